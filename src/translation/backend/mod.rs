//! 翻译后端模块
//!
//! 定义翻译核心所消费的后端契约。后端接收 `(文本, 源语言, 目标语言)`，
//! 返回译文；暂时无法翻译（限流、服务不可达等）时返回失败标记 [`SENTINEL`]，
//! 而不是抛出错误。核心的重试策略是唯一的恢复路径。
//!
//! - `language`: 后端语言目录
//! - `deeplx`: 基于 HTTP 的 DeepLX 兼容后端

pub mod deeplx;
pub mod language;

pub use deeplx::DeeplxBackend;
pub use language::Language;

/// 后端暂时失败时返回的标记值
///
/// 合法译文恰好为 `"--"` 时无法与失败区分，会被当作失败重试。
pub const SENTINEL: &str = "--";

/// 翻译后端契约
///
/// 调用严格串行：核心在上一次调用返回前不会发起下一次调用。
#[allow(async_fn_in_trait)]
pub trait TranslationBackend {
    /// 翻译一段文本，失败时返回 [`SENTINEL`]
    async fn translate(&self, text: &str, source: Language, target: Language) -> String;
}

impl<B: TranslationBackend> TranslationBackend for &B {
    async fn translate(&self, text: &str, source: Language, target: Language) -> String {
        (**self).translate(text, source, target).await
    }
}

impl<B: TranslationBackend> TranslationBackend for std::sync::Arc<B> {
    async fn translate(&self, text: &str, source: Language, target: Language) -> String {
        (**self).translate(text, source, target).await
    }
}

/// 判断后端返回值是否为失败标记
pub fn is_sentinel(translated: &str) -> bool {
    translated == SENTINEL
}
