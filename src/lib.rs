//! # Compendium Translator
//!
//! 对标记片段进行结构保持的翻译，保留 `@Compendium[...]` 交叉引用的标识，
//! 并在翻译前将英制度量换算为公制。
//!
//! ## 模块组织
//!
//! - `parsers` - 片段解析、DOM 操作与序列化
//! - `translation` - 翻译服务、引擎、后端与配置
//! - `env` - 类型化的环境变量访问
//! - `utils` - 日志与工具函数

pub mod env;
pub mod parsers;
pub mod translation;
pub mod utils;

// Re-export commonly used items for convenience
pub use parsers::*;
pub use translation::{
    translate_content, translate_fragment, TranslationBackend, TranslationConfig,
    TranslationError, TranslationResult, TranslationService,
};
pub use utils::*;
