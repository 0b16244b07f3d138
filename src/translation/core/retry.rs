//! 失败标记重试策略
//!
//! 后端返回失败标记时，以固定间隔重新请求同一段原始内容，直到成功或次数耗尽。

use std::time::Duration;

use tokio::time::sleep;

use crate::translation::config::constants::{DEFAULT_MAX_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY};
use crate::utils::logging::truncate_text;

/// 重试策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 首次请求之后允许的重试次数，总请求数为该值加一
    pub max_retry_attempts: u32,
    /// 两次请求之间的固定间隔
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retry_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retry_attempts: u32, delay: Duration) -> Self {
        Self {
            max_retry_attempts,
            delay,
        }
    }

    /// 从第一次尝试开始
    pub fn start<'a>(&self, content: &'a str) -> TranslationAttempt<'a> {
        TranslationAttempt {
            content,
            attempt: 0,
            policy: *self,
        }
    }
}

/// 一次翻译调用的重试状态
///
/// 始终持有原始（换算前）内容，每次尝试都从原始内容重新换算。
#[derive(Debug, Clone)]
pub struct TranslationAttempt<'a> {
    pub content: &'a str,
    /// 当前尝试序号，从 0 开始
    pub attempt: u32,
    policy: RetryPolicy,
}

impl TranslationAttempt<'_> {
    /// 已发出的请求次数
    pub fn requests_made(&self) -> u32 {
        self.attempt + 1
    }

    /// 是否还能重试
    pub fn can_retry(&self) -> bool {
        self.attempt < self.policy.max_retry_attempts
    }

    /// 等待固定间隔后进入下一次尝试；次数耗尽时返回 `false`
    pub async fn wait_and_advance(&mut self) -> bool {
        if !self.can_retry() {
            return false;
        }

        self.attempt += 1;
        tracing::warn!(
            "翻译后端返回失败标记，{:.1}s 后重试 (第 {}/{} 次): {}",
            self.policy.delay.as_secs_f32(),
            self.attempt,
            self.policy.max_retry_attempts,
            truncate_text(self.content, 40)
        );

        sleep(self.policy.delay).await;
        true
    }
}
