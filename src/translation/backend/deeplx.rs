//! DeepLX 兼容的 HTTP 翻译后端
//!
//! 请求格式：`POST {"text", "source_lang", "target_lang"}`，
//! 成功响应为 `{"code": 200, "data": "<译文>"}`。
//! 任何传输错误、非成功状态码或无法解析的响应体都映射为失败标记。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Language, TranslationBackend, SENTINEL};
use crate::translation::config::TranslationConfig;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::utils::logging::truncate_text;

/// 翻译请求体
#[derive(Debug, Serialize)]
struct DeeplxRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

/// 翻译响应体
#[derive(Debug, Deserialize)]
struct DeeplxResponse {
    code: u16,
    #[serde(default)]
    data: Option<String>,
}

/// 基于 HTTP 的翻译后端
#[derive(Debug, Clone)]
pub struct DeeplxBackend {
    client: reqwest::Client,
    api_url: String,
}

impl DeeplxBackend {
    /// 创建后端
    ///
    /// # 参数
    /// - `api_url`: 翻译接口地址
    /// - `timeout`: 单次请求超时
    pub fn new(api_url: &str, timeout: Duration) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
        })
    }

    /// 按配置创建后端
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    async fn request(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, String> {
        let body = DeeplxRequest {
            text,
            source_lang: source.code(),
            target_lang: target.code(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("请求失败: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP状态码 {}", status));
        }

        let payload: DeeplxResponse = response
            .json()
            .await
            .map_err(|e| format!("响应解析失败: {}", e))?;

        parse_payload(payload)
    }
}

fn parse_payload(payload: DeeplxResponse) -> Result<String, String> {
    if payload.code != 200 {
        return Err(format!("接口返回代码 {}", payload.code));
    }

    payload
        .data
        .ok_or_else(|| "响应缺少 data 字段".to_string())
}

impl TranslationBackend for DeeplxBackend {
    async fn translate(&self, text: &str, source: Language, target: Language) -> String {
        tracing::debug!(
            "请求翻译 {} -> {}: {}",
            source,
            target,
            truncate_text(text, 60)
        );

        match self.request(text, source, target).await {
            Ok(translated) => translated,
            Err(reason) => {
                tracing::warn!("翻译后端不可用，返回失败标记: {}", reason);
                SENTINEL.to_string()
            }
        }
    }
}
