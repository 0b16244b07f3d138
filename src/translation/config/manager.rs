//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::backend::Language;
use crate::translation::error::{TranslationError, TranslationResult};

/// 翻译配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    // 语言配置
    pub source_lang: Language,
    pub target_lang: Language,

    // 后端配置
    pub api_url: String,
    pub request_timeout_secs: u64,

    // 重试配置
    pub max_retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            source_lang: constants::DEFAULT_SOURCE_LANG,
            target_lang: constants::DEFAULT_TARGET_LANG,
            api_url: constants::DEFAULT_API_URL.to_string(),
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT.as_secs(),
            max_retry_attempts: constants::DEFAULT_MAX_RETRY_ATTEMPTS,
            retry_delay_ms: constants::DEFAULT_RETRY_DELAY.as_millis() as u64,
        }
    }
}

impl TranslationConfig {
    /// 创建指定语言对的默认配置
    pub fn with_languages(source_lang: Language, target_lang: Language) -> Self {
        Self {
            source_lang,
            target_lang,
            ..Self::default()
        }
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        match url::Url::parse(&self.api_url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(parsed) => {
                return Err(TranslationError::ConfigError(format!(
                    "不支持的API协议: {}",
                    parsed.scheme()
                )));
            }
            Err(e) => {
                return Err(TranslationError::ConfigError(format!(
                    "无效的API地址 {}: {}",
                    self.api_url, e
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(TranslationError::ConfigError("请求超时不能为0".to_string()));
        }

        if self.source_lang == self.target_lang {
            return Err(TranslationError::ConfigError(format!(
                "源语言与目标语言相同: {}",
                self.source_lang
            )));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{translation, EnvVar};

        if translation::SourceLang::is_set() {
            match translation::SourceLang::get() {
                Ok(lang) => self.source_lang = lang,
                Err(e) => tracing::warn!("忽略环境变量: {}", e),
            }
        }

        if translation::TargetLang::is_set() {
            match translation::TargetLang::get() {
                Ok(lang) => self.target_lang = lang,
                Err(e) => tracing::warn!("忽略环境变量: {}", e),
            }
        }

        if translation::ApiUrl::is_set() {
            match translation::ApiUrl::get() {
                Ok(api_url) => {
                    self.api_url = api_url;
                    tracing::info!("环境变量覆盖 API URL: {}", self.api_url);
                }
                Err(e) => tracing::warn!("忽略环境变量: {}", e),
            }
        }

        if translation::MaxRetryAttempts::is_set() {
            match translation::MaxRetryAttempts::get() {
                Ok(attempts) => self.max_retry_attempts = attempts,
                Err(e) => tracing::warn!("忽略环境变量: {}", e),
            }
        }

        if translation::RetryDelay::is_set() {
            match translation::RetryDelay::get() {
                Ok(delay) => self.retry_delay_ms = delay.as_millis() as u64,
                Err(e) => tracing::warn!("忽略环境变量: {}", e),
            }
        }

        if translation::RequestTimeout::is_set() {
            match translation::RequestTimeout::get() {
                Ok(timeout) => self.request_timeout_secs = timeout.as_secs(),
                Err(e) => tracing::warn!("忽略环境变量: {}", e),
            }
        }
    }

    /// 转换为Duration类型
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 简化的配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: TranslationConfig,
}

impl ConfigManager {
    /// 按搜索路径加载配置，再应用环境变量覆盖并验证
    pub fn new() -> TranslationResult<Self> {
        let mut config = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 从指定文件加载配置，再应用环境变量覆盖并验证
    pub fn from_file(path: &str) -> TranslationResult<Self> {
        Self::load_dotenv();

        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 获取配置
    pub fn get_config(&self) -> &TranslationConfig {
        &self.config
    }

    /// 取出配置
    pub fn into_config(self) -> TranslationConfig {
        self.config
    }

    /// 从文件加载配置
    fn load_config() -> TranslationResult<TranslationConfig> {
        // 首先尝试加载 .env 文件
        Self::load_dotenv();

        // 查找配置文件
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslationConfig::default())
    }

    /// 从指定文件加载配置
    fn load_from_file(path: &str) -> TranslationResult<TranslationConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::ConfigError(format!("读取配置文件失败: {}", e)))?;

        parse_config(path, &content).map_err(|e| e.with_context(path))
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let config = TranslationConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| TranslationError::ConfigError(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslationError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}

/// 按扩展名解析配置内容：`.json` 使用JSON，其余使用TOML
fn parse_config(path: &str, content: &str) -> TranslationResult<TranslationConfig> {
    if path.ends_with(".json") {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TranslationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source_lang, Language::English);
        assert_eq!(config.target_lang, Language::PortugueseBrazil);
        assert_eq!(config.max_retry_attempts, 100);
        assert_eq!(config.retry_delay(), Duration::from_millis(5000));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = TranslationConfig::default();
        config.api_url = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(TranslationError::ConfigError(_))));

        let mut config = TranslationConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let config = TranslationConfig::with_languages(Language::French, Language::French);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml_uses_defaults() {
        let content = r#"
            target_lang = "es"
            max_retry_attempts = 3
        "#;
        let config = parse_config("config.toml", content).unwrap();

        assert_eq!(config.target_lang, Language::Spanish);
        assert_eq!(config.max_retry_attempts, 3);
        assert_eq!(config.source_lang, Language::English);
        assert_eq!(config.api_url, constants::DEFAULT_API_URL);
    }

    #[test]
    fn test_parse_json() {
        let content = r#"{"source_lang": "de", "retry_delay_ms": 10}"#;
        let config = parse_config("config.json", content).unwrap();

        assert_eq!(config.source_lang, Language::German);
        assert_eq!(config.retry_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_parse_rejects_unknown_language() {
        let result = parse_config("config.toml", "target_lang = \"xx\"");
        assert!(matches!(result, Err(TranslationError::ParseError(_))));
    }

    #[test]
    fn test_example_config_round_trip() {
        let dir = std::env::temp_dir().join(format!("compendium-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("example.toml");
        let path = path.to_str().unwrap();

        ConfigManager::generate_example_config(path).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let config = parse_config(path, &content).unwrap();
        assert_eq!(config, TranslationConfig::default());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
