//! # 解析器模块
//!
//! 包含处理标记片段所需的解析和序列化功能：
//!
//! - `html` - HTML片段解析、DOM操作、内部标记序列化

pub mod html;

// Re-export commonly used items for convenience
pub use html::{fragment_to_dom, get_fragment_root, serialize_inner};
