//! 交叉引用拆分
//!
//! 内容中的 `@Compendium[<pack>.<entry>]{<显示文本>}` 交叉引用在翻译前被拆开：
//! 标识前缀永不发送给后端，只有显示文本与周围的普通文本一起翻译。
//!
//! 拆分后的每个可翻译槽位（普通文本段、引用的显示文本）以连接标记
//! [`JOIN_MARKER`] 拼接为一个缓冲区，译文再按同一标记切回各槽位。
//! 槽位自身已包含的连接标记会被计数，因此嵌套使用同一标记时仍能准确还原。

use std::sync::LazyLock;

use regex::Regex;

use crate::translation::config::constants::{CROSS_REF_MARKER, JOIN_MARKER};
use crate::translation::error::{TranslationError, TranslationResult};

/// 交叉引用语法；缺少 `{显示文本}` 的引用同样匹配，按原样保留
static CROSS_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@Compendium\[([A-Za-z0-9.]*)\](?:\{([^{}]*)\})?")
        .expect("cross-reference pattern is valid")
});

/// 待翻译的连续普通文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    /// 在原内容中的序号
    pub position: usize,
}

/// 解析后的交叉引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRefToken {
    /// 标识前缀，形如 `@Compendium[dnd5e.spells.abc123]`，不翻译也不修改
    pub prefix: String,
    /// 可翻译的显示文本；语法残缺时为 `None`
    pub display: Option<String>,
    /// 在原内容中的序号
    pub position: usize,
}

impl CrossRefToken {
    /// 引用的标识（方括号内的内容）
    pub fn id(&self) -> &str {
        self.prefix
            .trim_start_matches(CROSS_REF_MARKER)
            .trim_start_matches('[')
            .trim_end_matches(']')
    }

    /// 以新的显示文本重新组装引用
    pub fn render(&self, display: &str) -> String {
        format!("{}{{{}}}", self.prefix, display)
    }

    /// 原始形式
    pub fn original(&self) -> String {
        match &self.display {
            Some(display) => self.render(display),
            None => self.prefix.clone(),
        }
    }
}

/// 内容片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(TextSegment),
    CrossRef(CrossRefToken),
}

impl Segment {
    /// 片段参与翻译的文本；不参与翻译时为 `None`
    fn slot(&self) -> Option<&str> {
        match self {
            Segment::Text(segment) => Some(&segment.text),
            Segment::CrossRef(token) => token.display.as_deref(),
        }
    }
}

/// 槽位文本在缓冲区中占用的分段数
fn slot_width(slot: &str) -> usize {
    slot.matches(JOIN_MARKER).count() + 1
}

/// 内容是否包含交叉引用
pub fn contains_cross_ref(content: &str) -> bool {
    content.contains(CROSS_REF_MARKER) && CROSS_REF_RE.is_match(content)
}

/// 将内容拆分为普通文本段与交叉引用交替的序列，空文本段被省略
pub fn split_segments(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    let push_text = |segments: &mut Vec<Segment>, text: &str| {
        if !text.is_empty() {
            let position = segments.len();
            segments.push(Segment::Text(TextSegment {
                text: text.to_string(),
                position,
            }));
        }
    };

    for caps in CROSS_REF_RE.captures_iter(content) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        push_text(&mut segments, &content[last_end..whole.start()]);

        let position = segments.len();
        segments.push(Segment::CrossRef(CrossRefToken {
            prefix: format!("{}[{}]", CROSS_REF_MARKER, id.as_str()),
            display: caps.get(2).map(|m| m.as_str().to_string()),
            position,
        }));
        last_end = whole.end();
    }

    push_text(&mut segments, &content[last_end..]);
    segments
}

/// 可翻译槽位的总分段数
pub fn expected_pieces(segments: &[Segment]) -> usize {
    segments.iter().filter_map(Segment::slot).map(slot_width).sum()
}

/// 构建发送给后端的缓冲区：各槽位以连接标记拼接，标识前缀不出现在其中
pub fn build_buffer(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter_map(Segment::slot)
        .collect::<Vec<_>>()
        .join(JOIN_MARKER)
}

/// 按原顺序重组译文
///
/// 普通文本段直接取用译文片段；交叉引用以原前缀包裹译后的显示文本；
/// 语法残缺的引用原样输出。分段数不符时返回重建错误。
pub fn reassemble(segments: &[Segment], translated: &str) -> TranslationResult<String> {
    let pieces: Vec<&str> = translated.split(JOIN_MARKER).collect();
    let expected = expected_pieces(segments);

    if pieces.len() != expected {
        return Err(TranslationError::ReconstructionMismatch {
            expected,
            actual: pieces.len(),
        });
    }

    let mut pieces = pieces.into_iter();
    let mut output = String::with_capacity(translated.len());

    for segment in segments {
        let Some(slot) = segment.slot() else {
            if let Segment::CrossRef(token) = segment {
                output.push_str(&token.original());
            }
            continue;
        };

        let piece = pieces
            .by_ref()
            .take(slot_width(slot))
            .collect::<Vec<_>>()
            .join(JOIN_MARKER);

        match segment {
            Segment::Text(_) => output.push_str(&piece),
            Segment::CrossRef(token) => output.push_str(&token.render(&piece)),
        }
    }

    Ok(output)
}

/// 重组原始内容（不经翻译）
pub fn original_content(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.text.clone(),
            Segment::CrossRef(token) => token.original(),
        })
        .collect()
}
