//! 朴素字符串匹配
//!
//! 长度为 m 的窗口依次滑过文本的每个起点 `0..=n-m`，窗口内从左到右比较，
//! 每一次比较都计数并记录一步。

use log::debug;

use crate::core::{Trace, TraceRecorder};
use crate::services::algorithm::string::{split_inputs, MatchProgress};
use crate::services::algorithm::types::{MatchAction, MatchStep};

/// 朴素匹配结构体
pub struct NaiveMatcher;

impl NaiveMatcher {
    /// 生成朴素匹配的完整轨迹；模式为空或比文本长时返回空轨迹
    pub fn run(text: &str, pattern: &str) -> Trace<MatchStep> {
        let Some((text, pattern)) = split_inputs(text, pattern) else {
            return Trace::empty();
        };

        let n = text.len();
        let m = pattern.len();
        let mut recorder = TraceRecorder::new();
        let mut progress = MatchProgress::default();

        for start in 0..=(n - m) {
            recorder.record(|index| MatchStep {
                window_start: Some(start),
                text_index: Some(start),
                pattern_index: Some(0),
                ..progress.step(
                    index,
                    MatchAction::WindowShift,
                    format!("Align pattern at text offset {}", start),
                )
            });

            let mut matched = true;
            for j in 0..m {
                let t = start + j;
                progress.comparisons += 1;
                let equal = text[t] == pattern[j];

                recorder.record(|index| {
                    let (action, description) = if equal {
                        (
                            MatchAction::CharMatch,
                            format!("text[{}] = '{}' matches pattern[{}]", t, text[t], j),
                        )
                    } else {
                        (
                            MatchAction::CharMismatch,
                            format!(
                                "text[{}] = '{}' differs from pattern[{}] = '{}'",
                                t, text[t], j, pattern[j]
                            ),
                        )
                    };
                    MatchStep {
                        window_start: Some(start),
                        text_index: Some(t),
                        pattern_index: Some(j),
                        is_match: equal,
                        ..progress.step(index, action, description)
                    }
                });

                if !equal {
                    matched = false;
                    break;
                }
            }

            if matched {
                progress.matches.push(start);
            }
            recorder.record(|index| {
                let (action, description) = if matched {
                    (
                        MatchAction::WindowMatched,
                        format!("Pattern found at offset {}", start),
                    )
                } else {
                    (
                        MatchAction::WindowAborted,
                        format!("Window at offset {} aborted on mismatch", start),
                    )
                };
                MatchStep {
                    window_start: Some(start),
                    is_match: matched,
                    ..progress.step(index, action, description)
                }
            });
        }

        recorder.record(|index| {
            progress.step(index, MatchAction::Complete, progress.summary("Naive search"))
        });

        debug!(
            "Naive search produced {} steps, {} comparisons, matches {:?}",
            recorder.len(),
            progress.comparisons,
            progress.matches
        );
        recorder.finish()
    }

    /// 只取匹配位置
    pub fn find_all(text: &str, pattern: &str) -> Vec<usize> {
        Self::run(text, pattern)
            .last()
            .map(|step| step.matches.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pattern_naive() {
        let text = "ABABDABACDABABCABCABCABCABC";
        let pattern = "ABABC";
        assert_eq!(NaiveMatcher::find_all(text, pattern), vec![10]);
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(NaiveMatcher::find_all("AAAA", "AA"), vec![0, 1, 2]);
    }

    #[test]
    fn test_comparison_count() {
        // 窗口 0: 两次相等；窗口 1: B≠A；窗口 2: 两次相等
        let trace = NaiveMatcher::run("ABAB", "AB");
        let last = trace.last().expect("Trace should not be empty in test");
        assert_eq!(last.comparisons, 5);
        assert_eq!(last.matches, vec![0, 2]);
    }

    #[test]
    fn test_step_sequence_for_single_window() {
        let trace = NaiveMatcher::run("AB", "AC");
        let actions: Vec<MatchAction> = trace.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                MatchAction::WindowShift,
                MatchAction::CharMatch,
                MatchAction::CharMismatch,
                MatchAction::WindowAborted,
                MatchAction::Complete,
            ]
        );
    }

    #[test]
    fn test_unsatisfiable_inputs_give_empty_trace() {
        assert!(NaiveMatcher::run("AB", "ABC").is_empty());
        assert!(NaiveMatcher::run("AB", "").is_empty());
    }
}
