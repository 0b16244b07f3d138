//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;

use thiserror::Error;

use crate::utils::logging::truncate_text;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 后端在重试耗尽后仍返回失败标记
    #[error("翻译失败，已尝试 {attempts} 次: {}", truncate_text(.content, 80))]
    TranslationFailed {
        /// 未翻译的原始内容
        content: String,
        /// 实际发出的后端请求次数
        attempts: u32,
    },

    /// 译文分段数量与原始节点数量不一致
    #[error("译文重建失败: 期望 {expected} 段，得到 {actual} 段")]
    ReconstructionMismatch { expected: usize, actual: usize },

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 读写错误
    #[error("IO错误: {0}")]
    IoError(String),
}

impl TranslationError {
    /// 是否源自后端的不可靠性（而非内部批处理故障）
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, TranslationError::TranslationFailed { .. })
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::TranslationFailed { .. } => ErrorSeverity::Error,
            TranslationError::ReconstructionMismatch { .. } => ErrorSeverity::Critical,
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::ParseError(_) => ErrorSeverity::Error,
            TranslationError::IoError(_) => ErrorSeverity::Error,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::TranslationFailed { .. } => ErrorCategory::Backend,
            TranslationError::ReconstructionMismatch { .. } => ErrorCategory::Reconstruction,
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::IoError(_) => ErrorCategory::Io,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(self, context: T) -> Self {
        let new_msg = |msg: String| format!("{} (上下文: {})", msg, context);

        match self {
            TranslationError::ConfigError(msg) => TranslationError::ConfigError(new_msg(msg)),
            TranslationError::ParseError(msg) => TranslationError::ParseError(new_msg(msg)),
            TranslationError::IoError(msg) => TranslationError::IoError(new_msg(msg)),
            // 结构化变体保持原样，调用方依赖其字段
            other => other,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Backend,
    Reconstruction,
    Configuration,
    Parsing,
    Io,
}

/// 标准错误转换
impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ParseError(format!("TOML解析错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;
