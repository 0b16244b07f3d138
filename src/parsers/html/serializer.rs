use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{Handle, SerializableHandle};

use crate::translation::error::{TranslationError, TranslationResult};

/// 序列化节点的内部标记（不含节点自身的标签）
pub fn serialize_inner(node: &Handle) -> TranslationResult<String> {
    let mut buf: Vec<u8> = Vec::new();

    let serializable: SerializableHandle = node.clone().into();
    serialize(
        &mut buf,
        &serializable,
        SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        },
    )?;

    String::from_utf8(buf)
        .map_err(|e| TranslationError::ParseError(format!("序列化结果不是有效的UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::{fragment_to_dom, get_fragment_root};

    fn round_trip(html: &str) -> String {
        let dom = fragment_to_dom(html);
        let root = get_fragment_root(&dom).unwrap();
        serialize_inner(&root).unwrap()
    }

    #[test]
    fn test_inner_markup_round_trip() {
        assert_eq!(round_trip("<p>Hello <b>World</b></p>"), "<p>Hello <b>World</b></p>");
        assert_eq!(
            round_trip(r#"<p class="note"><a href="x.html">link</a><br>next</p>"#),
            r#"<p class="note"><a href="x.html">link</a><br>next</p>"#
        );
        assert_eq!(round_trip("plain text"), "plain text");
    }

    #[test]
    fn test_entities_are_escaped() {
        assert_eq!(round_trip("<p>a&nbsp;b &amp; c</p>"), "<p>a&nbsp;b &amp; c</p>");
    }
}
