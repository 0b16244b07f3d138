//! 翻译管道模块
//!
//! 提供翻译前后的文本处理：度量换算、交叉引用拆分与节点批次

pub mod batch;
pub mod compendium;
pub mod measure;

// 重新导出主要类型
pub use batch::{normalize_node_text, traversal_plan, BatchingContext, NodeBatch, TraversalStep};
pub use compendium::{contains_cross_ref, split_segments, CrossRefToken, Segment, TextSegment};
pub use measure::{
    convert_distance, convert_mass, convert_measurements_in_text, Measurement, MetricUnit,
};
