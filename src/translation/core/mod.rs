//! 翻译系统核心模块
//!
//! - **服务层** (`service.rs`): 片段解析、节点分批、译文写回
//! - **引擎层** (`engine.rs`): 单段内容翻译，交叉引用与度量换算
//! - **重试** (`retry.rs`): 失败标记的固定间隔重试
//!
//! ```text
//! TranslationService (service.rs)
//!     ├── BatchingContext (pipeline/batch.rs)
//!     └── TranslationEngine (engine.rs)
//!             ├── compendium / measure (pipeline/)
//!             ├── RetryPolicy (retry.rs)
//!             └── TranslationBackend (backend/)
//! ```

pub mod engine;
pub mod retry;
pub mod service;

/// 翻译引擎 - 单段内容翻译
pub use engine::{EngineConfig, EngineStats, TranslationEngine};

/// 重试策略
pub use retry::{RetryPolicy, TranslationAttempt};

/// 片段翻译服务 - 主要的对外接口
pub use service::TranslationService;
