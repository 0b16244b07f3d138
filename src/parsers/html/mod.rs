//! HTML解析和处理模块
//!
//! - `utils`: 标签分类常量与工具函数
//! - `dom`: 片段解析与基础DOM操作
//! - `serializer`: 序列化功能

pub mod dom;
pub mod serializer;
pub mod utils;

// 重新导出主要的公共 API
pub use dom::{
    collect_text_nodes, find_last_text_node, fragment_to_dom, get_fragment_root, get_node_name,
    get_text_content, is_element, set_text_content,
};
pub use serializer::serialize_inner;
pub use utils::{is_blank, is_inline_decorative, INLINE_TAGS, LINE_BREAK_TAG};
