//! Huffman 编码
//!
//! 节点存放在按下标寻址的数组（arena）里，每个内部节点只记录两个子节点的下标。
//! 构建时不用堆：每次合并后对剩余节点做一次稳定排序，再取最前面的两个，
//! 所以同频率节点的先后由当前集合顺序决定。

use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::core::{Trace, TraceRecorder, TraceStep, VizError, VizResult};

/// 节点在 arena 中的下标
pub type NodeId = usize;

/// Huffman 树节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HuffmanNode {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<char>,
    pub frequency: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<NodeId>,
}

impl HuffmanNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HuffmanAction {
    Initialize,
    Merge,
    Complete,
}

/// Huffman 构建过程的步骤快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HuffmanStep {
    pub index: usize,
    pub description: String,
    pub action: HuffmanAction,
    /// 到此为止创建的全部节点
    pub nodes: Arc<[HuffmanNode]>,
    /// 当前森林中各棵树的根，按集合顺序
    pub forest: Vec<NodeId>,
    /// 本步合并的 (左, 右, 新节点)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged: Option<(NodeId, NodeId, NodeId)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<BTreeMap<char, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<String>,
}

impl TraceStep for HuffmanStep {
    fn index(&self) -> usize {
        self.index
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// 一次编码的全部产物
#[derive(Debug, Clone, Serialize)]
pub struct HuffmanOutcome {
    pub trace: Trace<HuffmanStep>,
    /// 字符频率，按首次出现的顺序
    pub frequencies: Vec<(char, usize)>,
    pub codes: BTreeMap<char, String>,
    pub encoded: String,
    #[serde(skip)]
    nodes: Vec<HuffmanNode>,
    #[serde(skip)]
    root: Option<NodeId>,
}

impl HuffmanOutcome {
    fn empty() -> Self {
        Self {
            trace: Trace::empty(),
            frequencies: Vec::new(),
            codes: BTreeMap::new(),
            encoded: String::new(),
            nodes: Vec::new(),
            root: None,
        }
    }

    /// 原文按每字符 8 位计算的长度
    pub fn original_bits(&self) -> usize {
        self.frequencies.iter().map(|(_, count)| count * 8).sum()
    }

    pub fn compressed_bits(&self) -> usize {
        self.encoded.len()
    }

    /// 沿树解码比特串
    pub fn decode(&self, bits: &str) -> VizResult<String> {
        let root_id = self
            .root
            .ok_or_else(|| VizError::Decode("no code table: input text was empty".to_string()))?;
        let root = &self.nodes[root_id];

        let mut decoded = String::new();
        if let Some(symbol) = root.symbol.filter(|_| root.is_leaf()) {
            for (position, bit) in bits.chars().enumerate() {
                if bit != '0' {
                    return Err(VizError::Decode(format!(
                        "unexpected bit '{}' at position {}",
                        bit, position
                    )));
                }
                decoded.push(symbol);
            }
            return Ok(decoded);
        }

        let mut current = root;
        for (position, bit) in bits.chars().enumerate() {
            let next = match bit {
                '0' => current.left,
                '1' => current.right,
                other => {
                    return Err(VizError::Decode(format!(
                        "unexpected bit '{}' at position {}",
                        other, position
                    )))
                }
            };
            let next_id = next.ok_or_else(|| {
                VizError::Decode(format!("no branch for bit at position {}", position))
            })?;
            current = &self.nodes[next_id];

            if current.is_leaf() {
                if let Some(symbol) = current.symbol {
                    decoded.push(symbol);
                }
                current = root;
            }
        }

        if !std::ptr::eq(current, root) {
            return Err(VizError::Decode(
                "bit string ends in the middle of a code".to_string(),
            ));
        }
        Ok(decoded)
    }
}

/// Huffman 编码结构体
pub struct Huffman;

struct Builder {
    nodes: Vec<HuffmanNode>,
    forest: Vec<NodeId>,
}

impl Builder {
    fn snapshot(
        &self,
        index: usize,
        action: HuffmanAction,
        description: String,
        merged: Option<(NodeId, NodeId, NodeId)>,
    ) -> HuffmanStep {
        HuffmanStep {
            index,
            description,
            action,
            nodes: Arc::from(self.nodes.clone()),
            forest: self.forest.clone(),
            merged,
            codes: None,
            encoded: None,
        }
    }

    fn push(
        &mut self,
        symbol: Option<char>,
        frequency: usize,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(HuffmanNode {
            id,
            symbol,
            frequency,
            left,
            right,
        });
        id
    }

    fn sort_forest(&mut self) {
        let nodes = &self.nodes;
        self.forest.sort_by_key(|&id| nodes[id].frequency);
    }

    fn label(&self, id: NodeId) -> String {
        let node = &self.nodes[id];
        match node.symbol {
            Some(symbol) => format!("'{}':{}", symbol, node.frequency),
            None => node.frequency.to_string(),
        }
    }

    /// 前序遍历分配编码：左 0 右 1，空编码记为 "0"
    fn assign_codes(&self, id: NodeId, prefix: &mut String, codes: &mut BTreeMap<char, String>) {
        let node = &self.nodes[id];
        if node.is_leaf() {
            if let Some(symbol) = node.symbol {
                let code = if prefix.is_empty() {
                    "0".to_string()
                } else {
                    prefix.clone()
                };
                codes.insert(symbol, code);
            }
            return;
        }

        for (bit, child) in [('0', node.left), ('1', node.right)] {
            if let Some(child) = child {
                prefix.push(bit);
                self.assign_codes(child, prefix, codes);
                prefix.pop();
            }
        }
    }
}

impl Huffman {
    /// 字符频率，按首次出现的顺序
    pub fn frequencies(text: &str) -> Vec<(char, usize)> {
        let mut order: Vec<(char, usize)> = Vec::new();
        let mut positions: HashMap<char, usize> = HashMap::new();
        for symbol in text.chars() {
            match positions.get(&symbol) {
                Some(&position) => order[position].1 += 1,
                None => {
                    positions.insert(symbol, order.len());
                    order.push((symbol, 1));
                }
            }
        }
        order
    }

    /// 构建 Huffman 树并生成轨迹、编码表和编码结果；空文本得到空结果
    pub fn run(text: &str) -> HuffmanOutcome {
        if text.is_empty() {
            return HuffmanOutcome::empty();
        }

        let frequencies = Self::frequencies(text);
        let mut recorder = TraceRecorder::new();
        let mut builder = Builder {
            nodes: Vec::with_capacity(frequencies.len() * 2),
            forest: Vec::with_capacity(frequencies.len()),
        };

        for &(symbol, count) in &frequencies {
            let id = builder.push(Some(symbol), count, None, None);
            builder.forest.push(id);
        }
        builder.sort_forest();

        recorder.record(|index| {
            let leaves: Vec<String> = builder.forest.iter().map(|&id| builder.label(id)).collect();
            builder.snapshot(
                index,
                HuffmanAction::Initialize,
                format!(
                    "Create {} leaf nodes sorted by frequency: [{}]",
                    leaves.len(),
                    leaves.join(", ")
                ),
                None,
            )
        });

        while builder.forest.len() > 1 {
            let left = builder.forest.remove(0);
            let right = builder.forest.remove(0);
            let sum = builder.nodes[left].frequency + builder.nodes[right].frequency;
            let parent = builder.push(None, sum, Some(left), Some(right));
            builder.forest.push(parent);
            builder.sort_forest();

            recorder.record(|index| {
                builder.snapshot(
                    index,
                    HuffmanAction::Merge,
                    format!(
                        "Merge the two lowest nodes {} and {} into a node with frequency {}",
                        builder.label(left),
                        builder.label(right),
                        sum
                    ),
                    Some((left, right, parent)),
                )
            });
        }

        let root = builder.forest.first().copied();
        let mut codes = BTreeMap::new();
        if let Some(root) = root {
            builder.assign_codes(root, &mut String::new(), &mut codes);
        }

        let encoded: String = text
            .chars()
            .filter_map(|symbol| codes.get(&symbol).map(String::as_str))
            .collect();

        recorder.record(|index| {
            let table: Vec<String> = codes
                .iter()
                .map(|(symbol, code)| format!("'{}'={}", symbol, code))
                .collect();
            HuffmanStep {
                codes: Some(codes.clone()),
                encoded: Some(encoded.clone()),
                ..builder.snapshot(
                    index,
                    HuffmanAction::Complete,
                    format!(
                        "Huffman tree complete; codes: {}; encoded length {} bits",
                        table.join(", "),
                        encoded.len()
                    ),
                    None,
                )
            }
        });

        debug!(
            "Huffman coding of {} symbols ({} distinct) produced {} steps, {} bits",
            text.chars().count(),
            frequencies.len(),
            recorder.len(),
            encoded.len()
        );

        HuffmanOutcome {
            trace: recorder.finish(),
            frequencies,
            codes,
            encoded,
            nodes: builder.nodes,
            root,
        }
    }
}
