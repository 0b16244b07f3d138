//! 命令行主程序入口

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use encoding_rs::Encoding;

use compendium_translator::env::{core::LogLevel, EnvVar};
use compendium_translator::translation::{
    convert_measurements_in_text, ConfigManager, DeeplxBackend, Language, TranslationConfig,
    TranslationError, TranslationResult, TranslationService,
};
use compendium_translator::utils::init_tracing;

#[derive(Parser, Debug)]
#[command(
    name = "compendium-translator",
    version,
    about = "Translate markup fragments while keeping @Compendium cross-references intact"
)]
struct Cli {
    /// Input file; reads standard input when absent or "-"
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output file; writes standard output when absent
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Source language code (e.g. EN)
    #[arg(short, long)]
    source: Option<Language>,

    /// Target language code (e.g. PT-BR)
    #[arg(short, long)]
    target: Option<Language>,

    /// Translation backend endpoint
    #[arg(short = 'u', long)]
    api_url: Option<String>,

    /// Configuration file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Input charset label (e.g. utf-8, windows-1252)
    #[arg(short = 'E', long, value_name = "LABEL")]
    encoding: Option<String>,

    /// Treat input as plain content instead of a markup fragment
    #[arg(long)]
    plain: bool,

    /// Only convert imperial measurements, without calling the backend
    #[arg(long)]
    convert_only: bool,

    /// Write an example configuration file and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// 读取输入并按字符集解码
fn read_input(input: Option<&str>, encoding: Option<&str>) -> TranslationResult<String> {
    let bytes = match input {
        None | Some("-") => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
        Some(path) => fs::read(path).map_err(|e| TranslationError::from(e).with_context(path))?,
    };

    let encoding = match encoding {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| TranslationError::ConfigError(format!("未知的字符集: {}", label)))?,
        None => encoding_rs::UTF_8,
    };

    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        tracing::warn!("输入包含无法按 {} 解码的字节，已替换", encoding.name());
    }

    Ok(text.into_owned())
}

fn write_output(output: Option<&PathBuf>, content: &str) -> TranslationResult<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            tracing::info!("已写入: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// 配置优先级：命令行 > 环境变量 > 配置文件 > 默认值
fn load_config(cli: &Cli) -> TranslationResult<TranslationConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigManager::from_file(path)?.into_config(),
        None => ConfigManager::new()?.into_config(),
    };

    if let Some(source) = cli.source {
        config.source_lang = source;
    }
    if let Some(target) = cli.target {
        config.target_lang = target;
    }
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }

    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> TranslationResult<()> {
    if let Some(path) = &cli.init_config {
        ConfigManager::generate_example_config(path)?;
        tracing::info!("示例配置已写入: {}", path);
        return Ok(());
    }

    let input = read_input(cli.input.as_deref(), cli.encoding.as_deref())?;

    if cli.convert_only {
        return write_output(cli.output.as_ref(), &convert_measurements_in_text(&input));
    }

    let config = load_config(&cli)?;
    tracing::info!(
        "翻译 {} -> {}，后端: {}",
        config.source_lang,
        config.target_lang,
        config.api_url
    );

    let backend = DeeplxBackend::from_config(&config)?;
    let service = TranslationService::new(backend, &config);

    let translated = if cli.plain {
        service.translate_content(&input).await?
    } else {
        service.translate_fragment(&input).await?
    };

    let stats = service.engine().stats();
    tracing::info!(
        "完成: {} 次请求，{} 次重试，发送 {} 字符，接收 {} 字符",
        stats.requests(),
        stats.retries.load(std::sync::atomic::Ordering::Relaxed),
        stats.characters_sent.load(std::sync::atomic::Ordering::Relaxed),
        stats.characters_received.load(std::sync::atomic::Ordering::Relaxed)
    );

    write_output(cli.output.as_ref(), &translated)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        LogLevel::get().unwrap_or_else(|_| "info".to_string())
    };
    init_tracing(&level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
