//! 日志工具模块
//!
//! 提供日志订阅器初始化和输出格式化的辅助函数。
//! 库代码只发出 `tracing` 事件，订阅器由可执行程序安装。

/// 初始化日志订阅器
///
/// 日志写入标准错误，避免污染标准输出中的翻译结果。
///
/// # 参数
/// - `level`: 日志级别字符串（trace、debug、info、warn、error），无法识别时回退到 info
#[cfg(feature = "cli")]
pub fn init_tracing(level: &str) {
    let max_level = level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    // 重复初始化（如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
