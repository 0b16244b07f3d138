//! # 工具模块
//!
//! 这个模块包含各种工具函数和实用程序：
//!
//! - 日志订阅器初始化
//! - 日志文本截断
//!
//! # 模块组织
//!
//! - `logging` - 日志初始化与格式化辅助函数

pub mod logging;

// Re-export commonly used items for convenience
pub use logging::truncate_text;
#[cfg(feature = "cli")]
pub use logging::init_tracing;
