//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问

use std::env;
use std::fmt;
use std::time::Duration;

use crate::translation::backend::Language;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 变量是否显式设置
    fn is_set() -> bool {
        env::var(Self::NAME).is_ok()
    }
}

fn invalid(variable: &str, message: String) -> EnvError {
    EnvError {
        variable: variable.to_string(),
        message,
    }
}

fn parse_language(value: &str, variable: &str) -> EnvResult<Language> {
    value
        .parse::<Language>()
        .map_err(|e| invalid(variable, e.to_string()))
}

fn parse_positive_u64(value: &str, variable: &str) -> EnvResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid(variable, "Value must be greater than 0".to_string())),
        Ok(n) => Ok(n),
        Err(_) => Err(invalid(variable, format!("Invalid number '{}'", value))),
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "COMPENDIUM_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(invalid(
                    Self::NAME,
                    format!("Invalid log level '{}'. Use: trace, debug, info, warn, error", value),
                )),
            }
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 源语言
    pub struct SourceLang;
    impl EnvVar<Language> for SourceLang {
        const NAME: &'static str = "COMPENDIUM_SOURCE_LANG";
        const DEFAULT: Option<Language> = Some(Language::English);
        const DESCRIPTION: &'static str = "Source language code (e.g. EN)";

        fn parse(value: &str) -> EnvResult<Language> {
            parse_language(value, Self::NAME)
        }
    }

    /// 目标语言
    pub struct TargetLang;
    impl EnvVar<Language> for TargetLang {
        const NAME: &'static str = "COMPENDIUM_TARGET_LANG";
        const DEFAULT: Option<Language> = Some(Language::PortugueseBrazil);
        const DESCRIPTION: &'static str = "Target language code (e.g. PT-BR)";

        fn parse(value: &str) -> EnvResult<Language> {
            parse_language(value, Self::NAME)
        }
    }

    /// API URL
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "COMPENDIUM_API_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Translation backend endpoint (http or https)";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::config::constants::DEFAULT_API_URL.to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let value = value.trim();
            match url::Url::parse(value) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
                    Ok(value.to_string())
                }
                Ok(parsed) => Err(invalid(
                    Self::NAME,
                    format!("Unsupported URL scheme '{}'", parsed.scheme()),
                )),
                Err(e) => Err(invalid(Self::NAME, format!("Invalid URL: {}", e))),
            }
        }
    }

    /// 最大重试次数
    pub struct MaxRetryAttempts;
    impl EnvVar<u32> for MaxRetryAttempts {
        const NAME: &'static str = "COMPENDIUM_MAX_RETRY_ATTEMPTS";
        const DEFAULT: Option<u32> = Some(100);
        const DESCRIPTION: &'static str = "Retries after a backend failure marker before giving up";

        fn parse(value: &str) -> EnvResult<u32> {
            value
                .trim()
                .parse::<u32>()
                .map_err(|_| invalid(Self::NAME, format!("Invalid number '{}'", value)))
        }
    }

    /// 重试间隔
    pub struct RetryDelay;
    impl EnvVar<Duration> for RetryDelay {
        const NAME: &'static str = "COMPENDIUM_RETRY_DELAY_MS";
        const DEFAULT: Option<Duration> = Some(Duration::from_millis(5000));
        const DESCRIPTION: &'static str = "Fixed delay between retries in milliseconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| invalid(Self::NAME, format!("Invalid number '{}'", value)))
        }
    }

    /// 请求超时
    pub struct RequestTimeout;
    impl EnvVar<Duration> for RequestTimeout {
        const NAME: &'static str = "COMPENDIUM_REQUEST_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(30));
        const DESCRIPTION: &'static str = "HTTP request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_positive_u64(value, Self::NAME).map(Duration::from_secs)
        }
    }
}

/// 生成环境变量文档
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");
    docs.push_str("| Variable | Description | Default |\n");
    docs.push_str("|----------|-------------|---------|\n");

    let rows = [
        (core::LogLevel::NAME, core::LogLevel::DESCRIPTION, "info".to_string()),
        (
            translation::SourceLang::NAME,
            translation::SourceLang::DESCRIPTION,
            Language::English.code().to_string(),
        ),
        (
            translation::TargetLang::NAME,
            translation::TargetLang::DESCRIPTION,
            Language::PortugueseBrazil.code().to_string(),
        ),
        (
            translation::ApiUrl::NAME,
            translation::ApiUrl::DESCRIPTION,
            crate::translation::config::constants::DEFAULT_API_URL.to_string(),
        ),
        (
            translation::MaxRetryAttempts::NAME,
            translation::MaxRetryAttempts::DESCRIPTION,
            "100".to_string(),
        ),
        (
            translation::RetryDelay::NAME,
            translation::RetryDelay::DESCRIPTION,
            "5000".to_string(),
        ),
        (
            translation::RequestTimeout::NAME,
            translation::RequestTimeout::DESCRIPTION,
            "30".to_string(),
        ),
    ];

    for (name, description, default) in rows {
        docs.push_str(&format!("| `{}` | {} | `{}` |\n", name, description, default));
    }

    docs
}
