use html5ever::tendril::TendrilSink;
use html5ever::{local_name, namespace_url, ns, parse_fragment, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::utils::is_blank;

/// 将 HTML 片段解析为 DOM
///
/// 片段以 `<body>` 为上下文解析，解析器会生成一个 `<html>` 根元素包裹片段内容，
/// 通过 [`get_fragment_root`] 取得。
pub fn fragment_to_dom(html: &str) -> RcDom {
    parse_fragment(
        RcDom::default(),
        Default::default(),
        QualName::new(None, ns!(html), local_name!("body")),
        vec![],
    )
    .one(html)
}

/// 获取片段的根元素（其子节点即为片段内容）
pub fn get_fragment_root(dom: &RcDom) -> Option<Handle> {
    dom.document
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 是否为元素节点
pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// 获取文本节点的内容，非文本节点返回 `None`
pub fn get_text_content(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// 替换文本节点的内容，非文本节点保持不变
pub fn set_text_content(node: &Handle, text: &str) {
    if let NodeData::Text { contents } = &node.data {
        *contents.borrow_mut() = text.into();
    }
}

/// 前序遍历收集所有文本节点
pub fn collect_text_nodes(node: &Handle) -> Vec<Handle> {
    let mut found_nodes = Vec::new();

    for child_node in node.children.borrow().iter() {
        match child_node.data {
            NodeData::Text { .. } => found_nodes.push(child_node.clone()),
            NodeData::Element { .. } => found_nodes.append(&mut collect_text_nodes(child_node)),
            _ => {}
        }
    }

    found_nodes
}

/// 查找片段中最后一个非空白文本节点
pub fn find_last_text_node(root: &Handle) -> Option<Handle> {
    collect_text_nodes(root).into_iter().rev().find(|node| {
        get_text_content(node)
            .map(|text| !is_blank(&text))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_fragment_root_holds_fragment_children() {
        let dom = fragment_to_dom("<p>Hello</p><p>World</p>");
        let root = get_fragment_root(&dom).unwrap();

        assert_eq!(get_node_name(&root), Some("html"));
        let names: Vec<String> = root
            .children
            .borrow()
            .iter()
            .filter_map(|child| get_node_name(child).map(str::to_string))
            .collect();
        assert_eq!(names, vec!["p", "p"]);
    }

    #[test]
    fn test_collect_text_nodes_in_document_order() {
        let dom = fragment_to_dom("<p>Hello <b>World</b></p> <div>again</div>");
        let root = get_fragment_root(&dom).unwrap();

        let texts: Vec<String> = collect_text_nodes(&root)
            .iter()
            .filter_map(get_text_content)
            .collect();
        assert_eq!(texts, vec!["Hello ", "World", " ", "again"]);
    }

    #[test]
    fn test_last_text_node_skips_whitespace() {
        let dom = fragment_to_dom("<p>Hello</p>\n<p>World</p>\n");
        let root = get_fragment_root(&dom).unwrap();

        let last = find_last_text_node(&root).unwrap();
        assert_eq!(get_text_content(&last).as_deref(), Some("World"));

        let all = collect_text_nodes(&root);
        assert!(!Rc::ptr_eq(all.last().unwrap(), &last));
    }

    #[test]
    fn test_set_text_content() {
        let dom = fragment_to_dom("<em>Hello</em>");
        let root = get_fragment_root(&dom).unwrap();
        let node = find_last_text_node(&root).unwrap();

        set_text_content(&node, "Olá");
        assert_eq!(get_text_content(&node).as_deref(), Some("Olá"));
    }

    #[test]
    fn test_empty_fragment_has_no_text() {
        let dom = fragment_to_dom("<br><hr>");
        let root = get_fragment_root(&dom).unwrap();
        assert!(find_last_text_node(&root).is_none());
    }
}
