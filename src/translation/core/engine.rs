//! 翻译引擎核心实现
//!
//! 负责单段内容的翻译：短路判断、交叉引用拆分、度量换算、调用后端、
//! 失败标记重试以及首尾空格修正。
//!
//! ## 工作流程
//! 1. 内容为空或不含字母时原样返回，不调用后端
//! 2. 含交叉引用时拆分为槽位缓冲区，只翻译显示文本与普通文本
//! 3. 对原始内容执行度量换算后调用后端
//! 4. 收到失败标记时按固定间隔重试，始终基于原始内容
//! 5. 恢复译文丢失的首尾空格

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::retry::RetryPolicy;
use crate::translation::backend::{is_sentinel, Language, TranslationBackend};
use crate::translation::config::TranslationConfig;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::compendium::{
    build_buffer, contains_cross_ref, expected_pieces, reassemble, split_segments,
};
use crate::translation::pipeline::measure::convert_measurements_in_text;

/// 引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub source_lang: Language,
    pub target_lang: Language,
    pub retry: RetryPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&TranslationConfig::default())
    }
}

impl From<&TranslationConfig> for EngineConfig {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            source_lang: config.source_lang,
            target_lang: config.target_lang,
            retry: RetryPolicy::new(config.max_retry_attempts, config.retry_delay()),
        }
    }
}

impl EngineConfig {
    /// 替换重试策略
    pub fn with_retry(mut self, max_retry_attempts: u32, delay: Duration) -> Self {
        self.retry = RetryPolicy::new(max_retry_attempts, delay);
        self
    }
}

/// 翻译引擎统计信息
///
/// 计数器使用原子类型，只读访问无需可变借用。统计不影响翻译结果。
#[derive(Debug, Default)]
pub struct EngineStats {
    /// 发往后端的请求总数（含重试）
    pub requests_sent: AtomicUsize,
    /// 因失败标记而发起的重试次数
    pub retries: AtomicUsize,
    /// 发送给后端的字符总数
    pub characters_sent: AtomicUsize,
    /// 从后端接收的字符总数
    pub characters_received: AtomicUsize,
    /// 未调用后端而直接返回的内容数
    pub short_circuited: AtomicUsize,
}

impl EngineStats {
    pub fn inc_requests_sent(&self) {
        self.requests_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_retries(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_characters_sent(&self, count: usize) {
        self.characters_sent.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_characters_received(&self, count: usize) {
        self.characters_received.fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_short_circuited(&self) {
        self.short_circuited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> usize {
        self.requests_sent.load(Ordering::Relaxed)
    }

    /// 重置统计信息
    pub fn reset(&mut self) {
        *self = Default::default();
    }
}

/// 内容为空或不含字母时无需翻译
fn should_short_circuit(content: &str) -> bool {
    !content.chars().any(|c| c.is_ascii_alphabetic())
}

/// 恢复译文丢失的首尾空格
fn restore_edge_spaces(original: &str, translated: String) -> String {
    let mut result = translated;

    if original.starts_with(' ') && !result.starts_with(' ') {
        result.insert(0, ' ');
    }
    if original.ends_with(' ') && !result.ends_with(' ') {
        result.push(' ');
    }

    result
}

/// 翻译引擎
///
/// 对后端的调用严格串行。引擎本身不持有可变状态，统计信息通过原子计数器更新。
pub struct TranslationEngine<B> {
    backend: B,
    config: EngineConfig,
    stats: EngineStats,
}

impl<B: TranslationBackend> TranslationEngine<B> {
    /// 创建新的翻译引擎
    ///
    /// # 参数
    /// - `backend`: 翻译后端
    /// - `config`: 语言对与重试策略
    pub fn new(backend: B, config: EngineConfig) -> Self {
        Self {
            backend,
            config,
            stats: EngineStats::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 翻译一段内容
    ///
    /// # 错误
    /// - `TranslationError::TranslationFailed`: 重试耗尽后后端仍返回失败标记
    /// - `TranslationError::ReconstructionMismatch`: 交叉引用槽位无法还原
    pub async fn translate(&self, content: &str) -> TranslationResult<String> {
        if should_short_circuit(content) {
            self.stats.inc_short_circuited();
            return Ok(content.to_string());
        }

        if contains_cross_ref(content) {
            return self.translate_cross_refs(content).await;
        }

        self.translate_plain(content).await
    }

    /// 只翻译交叉引用的显示文本及其周围的普通文本，标识前缀不发送给后端
    async fn translate_cross_refs(&self, content: &str) -> TranslationResult<String> {
        let segments = split_segments(content);
        let buffer = build_buffer(&segments);

        if expected_pieces(&segments) == 0 || should_short_circuit(&buffer) {
            self.stats.inc_short_circuited();
            return Ok(content.to_string());
        }

        tracing::debug!(
            "交叉引用拆分: {} 个片段，{} 个槽位",
            segments.len(),
            expected_pieces(&segments)
        );

        let translated = self.translate_plain(&buffer).await?;
        reassemble(&segments, &translated)
    }

    /// 度量换算后调用后端，失败标记时重试
    async fn translate_plain(&self, content: &str) -> TranslationResult<String> {
        let mut attempt = self.config.retry.start(content);

        loop {
            let converted = convert_measurements_in_text(attempt.content);

            self.stats.inc_requests_sent();
            self.stats.add_characters_sent(converted.chars().count());

            let translated = self
                .backend
                .translate(&converted, self.config.source_lang, self.config.target_lang)
                .await;

            if !is_sentinel(&translated) {
                self.stats
                    .add_characters_received(translated.chars().count());
                return Ok(restore_edge_spaces(content, translated));
            }

            if !attempt.wait_and_advance().await {
                return Err(TranslationError::TranslationFailed {
                    content: content.to_string(),
                    attempts: attempt.requests_made(),
                });
            }

            self.stats.inc_retries();
        }
    }

    /// 获取统计信息
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// 重置统计信息
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}
