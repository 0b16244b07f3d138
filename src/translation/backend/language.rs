//! 语言目录
//!
//! 后端以自身的枚举目录识别语言，这里固定为一组受支持的语言，
//! 并提供线上代码与显示名称之间的转换。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::translation::error::TranslationError;

/// 后端语言目录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    PortugueseBrazil,
    Portuguese,
    Spanish,
    French,
    German,
    Italian,
    Dutch,
    Polish,
    Russian,
    Japanese,
    Korean,
    Chinese,
}

impl Language {
    /// 目录中的全部语言
    pub const ALL: &'static [Language] = &[
        Language::English,
        Language::PortugueseBrazil,
        Language::Portuguese,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Dutch,
        Language::Polish,
        Language::Russian,
        Language::Japanese,
        Language::Korean,
        Language::Chinese,
    ];

    /// 后端使用的语言代码
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::PortugueseBrazil => "PT-BR",
            Language::Portuguese => "PT-PT",
            Language::Spanish => "ES",
            Language::French => "FR",
            Language::German => "DE",
            Language::Italian => "IT",
            Language::Dutch => "NL",
            Language::Polish => "PL",
            Language::Russian => "RU",
            Language::Japanese => "JA",
            Language::Korean => "KO",
            Language::Chinese => "ZH",
        }
    }

    /// 英文显示名称
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::PortugueseBrazil => "Portuguese_Brazil",
            Language::Portuguese => "Portuguese",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Dutch => "Dutch",
            Language::Polish => "Polish",
            Language::Russian => "Russian",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Chinese => "Chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = TranslationError;

    /// 接受语言代码或英文名称，不区分大小写，`-` 与 `_` 等价
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase().replace('_', "-");

        Language::ALL
            .iter()
            .copied()
            .find(|lang| {
                lang.code() == normalized
                    || lang.name().to_uppercase().replace('_', "-") == normalized
            })
            .or(match normalized.as_str() {
                // 常见的简写形式
                "PT" => Some(Language::Portuguese),
                "EN-US" | "EN-GB" => Some(Language::English),
                "ZH-CN" | "ZH-HANS" => Some(Language::Chinese),
                _ => None,
            })
            .ok_or_else(|| TranslationError::ParseError(format!("未知的语言代码: {}", value)))
    }
}

impl TryFrom<String> for Language {
    type Error = TranslationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes_and_names() {
        assert_eq!("pt-br".parse::<Language>().unwrap(), Language::PortugueseBrazil);
        assert_eq!("PT_BR".parse::<Language>().unwrap(), Language::PortugueseBrazil);
        assert_eq!(
            "portuguese_brazil".parse::<Language>().unwrap(),
            Language::PortugueseBrazil
        );
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!(" German ".parse::<Language>().unwrap(), Language::German);
        assert_eq!("zh-CN".parse::<Language>().unwrap(), Language::Chinese);

        assert!("klingon".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_codes_round_trip_through_display() {
        for lang in Language::ALL {
            assert_eq!(lang.to_string().parse::<Language>().unwrap(), *lang);
        }
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&Language::PortugueseBrazil).unwrap();
        assert_eq!(json, "\"PT-BR\"");

        let lang: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(lang, Language::French);

        assert!(serde_json::from_str::<Language>("\"xx\"").is_err());
    }
}
