//! 翻译模块
//!
//! 对含 `@Compendium[...]` 交叉引用的标记片段进行结构保持的翻译：
//! - **core**: 片段翻译服务、单段翻译引擎、重试策略
//! - **pipeline**: 度量换算、交叉引用拆分、节点批次
//! - **backend**: 翻译后端契约、语言目录、HTTP 后端
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use compendium_translator::translation::{translate_fragment, DeeplxBackend, TranslationConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TranslationConfig::default();
//! let backend = DeeplxBackend::from_config(&config)?;
//!
//! let html = translate_fragment(&backend, &config, "<p>Hello <b>World</b></p>").await?;
//! # Ok(())
//! # }
//! ```

/// 翻译后端模块 - 后端契约与实现
pub mod backend;

/// 配置管理模块 - 语言对、后端地址、重试策略
pub mod config;

/// 核心翻译模块 - 片段翻译服务与翻译引擎
pub mod core;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 文本处理管道模块 - 度量换算、交叉引用、节点批次
pub mod pipeline;

// 重新导出主要类型
pub use backend::{DeeplxBackend, Language, TranslationBackend, SENTINEL};
pub use config::{ConfigManager, TranslationConfig};
pub use core::{EngineConfig, EngineStats, RetryPolicy, TranslationEngine, TranslationService};
pub use error::{TranslationError, TranslationResult};
pub use pipeline::convert_measurements_in_text;

/// 使用给定后端翻译一个标记片段
pub async fn translate_fragment<B: TranslationBackend>(
    backend: B,
    config: &TranslationConfig,
    html: &str,
) -> TranslationResult<String> {
    TranslationService::new(backend, config)
        .translate_fragment(html)
        .await
}

/// 使用给定后端翻译一段不含标记的内容
pub async fn translate_content<B: TranslationBackend>(
    backend: B,
    config: &TranslationConfig,
    content: &str,
) -> TranslationResult<String> {
    TranslationService::new(backend, config)
        .translate_content(content)
        .await
}
