//! 翻译服务核心实现
//!
//! 对标记片段进行结构保持的翻译：解析片段、按闸门规则将文本节点分批、
//! 每批调用一次引擎、将译文写回原节点，最后序列化内部标记。
//! 标签、属性和嵌套结构从不改变，只有文本节点的值会变化。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use compendium_translator::translation::{DeeplxBackend, TranslationConfig, TranslationService};
//!
//! let config = TranslationConfig::default();
//! let backend = DeeplxBackend::from_config(&config)?;
//! let service = TranslationService::new(backend, &config);
//!
//! let html = service.translate_fragment("<p>Hello <b>World</b></p>").await?;
//! ```
//!
//! 中途失败时，已提交批次写回的节点保持已翻译状态，不回滚。

use markup5ever_rcdom::Handle;
use std::time::Instant;

use super::engine::{EngineConfig, TranslationEngine};
use crate::parsers::html::{
    find_last_text_node, fragment_to_dom, get_fragment_root, serialize_inner,
};
use crate::translation::backend::TranslationBackend;
use crate::translation::config::TranslationConfig;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::batch::{traversal_plan, BatchingContext, NodeBatch};

/// 片段翻译服务
pub struct TranslationService<B> {
    engine: TranslationEngine<B>,
}

impl<B: TranslationBackend> TranslationService<B> {
    /// 按配置创建服务
    pub fn new(backend: B, config: &TranslationConfig) -> Self {
        Self::with_engine_config(backend, EngineConfig::from(config))
    }

    pub fn with_engine_config(backend: B, config: EngineConfig) -> Self {
        Self {
            engine: TranslationEngine::new(backend, config),
        }
    }

    /// 底层翻译引擎
    pub fn engine(&self) -> &TranslationEngine<B> {
        &self.engine
    }

    /// 翻译单段内容（不解析标记）
    pub async fn translate_content(&self, content: &str) -> TranslationResult<String> {
        self.engine.translate(content).await
    }

    /// 翻译标记片段
    ///
    /// 空字符串直接返回，不进行解析。
    pub async fn translate_fragment(&self, html: &str) -> TranslationResult<String> {
        if html.is_empty() {
            return Ok(String::new());
        }

        let start_time = Instant::now();
        let dom = fragment_to_dom(html);
        let root = get_fragment_root(&dom)
            .ok_or_else(|| TranslationError::ParseError("片段缺少根元素".to_string()))?;

        self.translate_dom(&root).await?;
        let output = serialize_inner(&root)?;

        tracing::debug!(
            "片段翻译完成，耗时 {:?}，共 {} 次后端请求",
            start_time.elapsed(),
            self.engine.stats().requests()
        );

        Ok(output)
    }

    /// 就地翻译已解析的树
    ///
    /// `root` 的子节点即片段内容。批处理状态只在本次调用内有效。
    pub async fn translate_dom(&self, root: &Handle) -> TranslationResult<()> {
        let mut context = BatchingContext::new(find_last_text_node(root));

        for step in traversal_plan(root) {
            context.enter(&step);
            context.visit(&step.node);

            if context.should_flush() {
                self.flush(context.take_batch()).await?;
            }
        }

        if context.has_pending() {
            self.flush(context.take_batch()).await?;
        }

        Ok(())
    }

    /// 提交一个批次：翻译拼接文本并写回各节点
    async fn flush(&self, batch: NodeBatch) -> TranslationResult<()> {
        tracing::debug!(
            "提交批次: {} 个节点，{} 字符",
            batch.len(),
            batch.estimated_chars
        );

        let translated = self.engine.translate(&batch.joined_text()).await?;
        batch.distribute(&translated)
    }
}
