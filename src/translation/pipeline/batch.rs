//! 节点批次与批处理上下文
//!
//! 同一段连续行文中的文本节点被合并为一个批次，以连接标记拼接后一次性翻译，
//! 译文再按连接标记切分并逐一写回原节点。
//!
//! ## 闸门规则
//!
//! 进入每个子节点之前重新计算闸门：批次为空，或子节点不是元素，或子节点是
//! 行内修饰元素（换行元素除外）时闸门打开；其余情况（块级元素、`<br>`）闸门关闭，
//! 当前批次必须先提交。到达最后一个文本节点时闸门同样关闭。

use markup5ever_rcdom::Handle;
use std::rc::Rc;

use crate::parsers::html::{
    get_node_name, get_text_content, is_blank, is_element, is_inline_decorative,
    set_text_content,
};
use crate::translation::config::constants::{JOIN_MARKER, NBSP_REFERENCE};
use crate::translation::error::{TranslationError, TranslationResult};

/// 将节点文本中的 `&nbsp;` 字面量改写为数值引用，避免与连接标记冲突
pub fn normalize_node_text(text: &str) -> String {
    text.replace(JOIN_MARKER, NBSP_REFERENCE)
}

/// 待翻译的节点批次
#[derive(Debug, Default)]
pub struct NodeBatch {
    nodes: Vec<Handle>,
    texts: Vec<String>,
    /// 批次文本的字符总数
    pub estimated_chars: usize,
}

impl NodeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个文本节点，文本先经过规范化
    pub fn push(&mut self, node: Handle, text: &str) {
        let text = normalize_node_text(text);
        self.estimated_chars += text.chars().count();
        self.nodes.push(node);
        self.texts.push(text);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 批次中的节点，按文档顺序
    pub fn nodes(&self) -> &[Handle] {
        &self.nodes
    }

    /// 以连接标记拼接的批次文本
    pub fn joined_text(&self) -> String {
        self.texts.join(JOIN_MARKER)
    }

    /// 将译文切分并写回各节点
    ///
    /// 分段数必须与节点数一致，否则不写回任何节点并返回重建错误。
    pub fn distribute(&self, translated: &str) -> TranslationResult<()> {
        let pieces: Vec<&str> = translated.split(JOIN_MARKER).collect();

        if pieces.len() != self.nodes.len() {
            return Err(TranslationError::ReconstructionMismatch {
                expected: self.nodes.len(),
                actual: pieces.len(),
            });
        }

        for (node, piece) in self.nodes.iter().zip(pieces) {
            set_text_content(node, piece);
        }

        Ok(())
    }
}

/// 遍历计划中的一步
#[derive(Debug, Clone)]
pub struct TraversalStep {
    pub node: Handle,
    /// 不依赖批次状态即可打开闸门（非元素或行内修饰元素）
    pub keeps_gate_open: bool,
}

/// 前序展开片段的遍历顺序，只进入元素节点的子节点
pub fn traversal_plan(root: &Handle) -> Vec<TraversalStep> {
    let mut steps = Vec::new();
    push_children(root, &mut steps);
    steps
}

fn push_children(node: &Handle, steps: &mut Vec<TraversalStep>) {
    for child in node.children.borrow().iter() {
        let keeps_gate_open = match get_node_name(child) {
            Some(tag) => is_inline_decorative(tag),
            None => true,
        };

        steps.push(TraversalStep {
            node: child.clone(),
            keeps_gate_open,
        });

        if is_element(child) {
            push_children(child, steps);
        }
    }
}

/// 单次片段翻译的批处理状态
///
/// 每次调用独立构建，不在调用之间共享。
#[derive(Debug)]
pub struct BatchingContext {
    batch: NodeBatch,
    gate_open: bool,
    terminal: Option<Handle>,
}

impl BatchingContext {
    /// `terminal` 为片段中最后一个非空白文本节点
    pub fn new(terminal: Option<Handle>) -> Self {
        Self {
            batch: NodeBatch::new(),
            gate_open: true,
            terminal,
        }
    }

    /// 进入子节点前按闸门规则重新计算闸门
    pub fn enter(&mut self, step: &TraversalStep) {
        self.gate_open = self.batch.is_empty() || step.keeps_gate_open;
    }

    /// 访问节点：闸门打开时收集非空白文本节点，到达终止节点后关闭闸门
    pub fn visit(&mut self, node: &Handle) {
        let Some(text) = get_text_content(node) else {
            return;
        };

        if is_blank(&text) || !self.gate_open {
            return;
        }

        self.batch.push(node.clone(), &text);

        if self.is_terminal(node) {
            self.gate_open = false;
        }
    }

    fn is_terminal(&self, node: &Handle) -> bool {
        self.terminal
            .as_ref()
            .map(|terminal| Rc::ptr_eq(terminal, node))
            .unwrap_or(false)
    }

    pub fn gate_open(&self) -> bool {
        self.gate_open
    }

    /// 批次非空且闸门已关闭时需要提交
    pub fn should_flush(&self) -> bool {
        !self.batch.is_empty() && !self.gate_open
    }

    pub fn has_pending(&self) -> bool {
        !self.batch.is_empty()
    }

    /// 取出当前批次，重置状态并重新打开闸门
    pub fn take_batch(&mut self) -> NodeBatch {
        self.gate_open = true;
        std::mem::take(&mut self.batch)
    }
}
