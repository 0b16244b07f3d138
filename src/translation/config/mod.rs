//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslationConfig};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    use crate::translation::backend::Language;

    // 分段标记
    /// 批次打包与交叉引用打包共用的唯一连接标记
    pub const JOIN_MARKER: &str = "&nbsp;";
    /// 节点文本中已有的 `&nbsp;` 字面量改写为此数值引用，避免与连接标记冲突
    pub const NBSP_REFERENCE: &str = "&#160;";
    /// 交叉引用语法的起始标识
    pub const CROSS_REF_MARKER: &str = "@Compendium";

    // 语言
    pub const DEFAULT_SOURCE_LANG: Language = Language::English;
    pub const DEFAULT_TARGET_LANG: Language = Language::PortugueseBrazil;

    // 默认API设置
    pub const DEFAULT_API_URL: &str = "http://localhost:1188/translate";
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    // 重试策略
    pub const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 100;
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(5000);

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "compendium-translator.toml",
        ".compendium-translator.toml",
        "~/.config/compendium-translator/config.toml",
        "/etc/compendium-translator/config.toml",
    ];
}
