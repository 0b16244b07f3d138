// 集成测试公共模块
//
// 提供脚本化的模拟后端和片段辅助工具

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use compendium_translator::translation::{
    EngineConfig, Language, TranslationBackend, TranslationService, SENTINEL,
};

/// 记录每次请求的后端，译文由转换函数生成
pub struct RecordingBackend {
    transform: fn(&str) -> String,
    requests: RefCell<Vec<String>>,
}

impl RecordingBackend {
    pub fn new(transform: fn(&str) -> String) -> Self {
        Self {
            transform,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// 原样返回
    pub fn echo() -> Self {
        Self::new(|text| text.to_string())
    }

    /// 转为大写，连接标记保持原样
    pub fn uppercase() -> Self {
        Self::new(uppercase_keep_markers)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl TranslationBackend for RecordingBackend {
    async fn translate(&self, text: &str, _source: Language, _target: Language) -> String {
        self.requests.borrow_mut().push(text.to_string());
        (self.transform)(text)
    }
}

/// 先返回指定次数的失败标记，之后按转换函数翻译
pub struct FlakyBackend {
    failures_left: RefCell<usize>,
    inner: RecordingBackend,
}

impl FlakyBackend {
    pub fn new(failures: usize, transform: fn(&str) -> String) -> Self {
        Self {
            failures_left: RefCell::new(failures),
            inner: RecordingBackend::new(transform),
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }

    pub fn requests(&self) -> Vec<String> {
        self.inner.requests()
    }
}

impl TranslationBackend for FlakyBackend {
    async fn translate(&self, text: &str, source: Language, target: Language) -> String {
        let translated = self.inner.translate(text, source, target).await;

        let mut failures_left = self.failures_left.borrow_mut();
        if *failures_left > 0 {
            *failures_left -= 1;
            return SENTINEL.to_string();
        }

        translated
    }
}

/// 按队列依次返回预设译文，队列耗尽后返回失败标记
pub struct ScriptedBackend {
    replies: RefCell<VecDeque<String>>,
    calls: RefCell<usize>,
}

impl ScriptedBackend {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: RefCell::new(replies.iter().map(|r| r.to_string()).collect()),
            calls: RefCell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl TranslationBackend for ScriptedBackend {
    async fn translate(&self, _text: &str, _source: Language, _target: Language) -> String {
        *self.calls.borrow_mut() += 1;
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| SENTINEL.to_string())
    }
}

pub fn uppercase_keep_markers(text: &str) -> String {
    text.to_uppercase().replace("&NBSP;", "&nbsp;")
}

/// 默认语言对、无重试间隔的引擎配置
pub fn fast_config(max_retry_attempts: u32) -> EngineConfig {
    EngineConfig::default().with_retry(max_retry_attempts, Duration::ZERO)
}

pub fn service<B: TranslationBackend>(backend: B) -> TranslationService<B> {
    TranslationService::with_engine_config(backend, fast_config(3))
}

/// 只保留标签结构，用于比较翻译前后的结构
pub fn strip_text(html: &str) -> String {
    let mut structure = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                structure.push(c);
            }
            '>' => {
                in_tag = false;
                structure.push(c);
            }
            _ if in_tag => structure.push(c),
            _ => {}
        }
    }

    structure
}
