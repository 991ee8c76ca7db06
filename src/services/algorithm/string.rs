//! 字符串匹配的公共部分
//!
//! 文本和模式都按 Unicode 标量值（`char`）逐个比较。三个匹配引擎共享
//! 比较计数与匹配位置的累积状态，步骤里的其余字段由各引擎自己填写。

use crate::services::algorithm::types::{MatchAction, MatchStep};

/// 匹配过程中累积的状态
#[derive(Debug, Default)]
pub(crate) struct MatchProgress {
    pub comparisons: usize,
    pub matches: Vec<usize>,
}

impl MatchProgress {
    /// 只含公共字段的步骤，调用方用结构体更新语法补充其余字段
    pub fn step(&self, index: usize, action: MatchAction, description: String) -> MatchStep {
        MatchStep {
            index,
            description,
            action,
            text_index: None,
            pattern_index: None,
            window_start: None,
            is_match: false,
            comparisons: self.comparisons,
            matches: self.matches.clone(),
            lps: None,
            hash: None,
        }
    }

    pub fn summary(&self, engine: &str) -> String {
        match self.matches.len() {
            0 => format!(
                "{} complete: no match after {} comparisons",
                engine, self.comparisons
            ),
            count => format!(
                "{} complete: {} match(es) at {:?} after {} comparisons",
                engine, count, self.matches, self.comparisons
            ),
        }
    }
}

/// 拆成字符序列；模式为空或比文本长时返回 `None`
pub(crate) fn split_inputs(text: &str, pattern: &str) -> Option<(Vec<char>, Vec<char>)> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    if pattern.is_empty() || pattern.len() > text.len() {
        return None;
    }
    Some((text, pattern))
}
