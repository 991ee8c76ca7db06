//! KMP (Knuth-Morris-Pratt) 字符串匹配
//!
//! 先计算模式串的失效函数（LPS 数组），失配时按它回退模式下标，文本下标从不后退。

use log::{debug, trace};
use std::sync::Arc;

use crate::core::{Trace, TraceRecorder};
use crate::services::algorithm::string::{split_inputs, MatchProgress};
use crate::services::algorithm::types::{MatchAction, MatchStep};

/// KMP算法结构体
pub struct Kmp;

impl Kmp {
    /// 失效函数：`lps[i]` 是 `pattern[..=i]` 的最长真前缀兼后缀的长度
    pub fn failure_function(pattern: &[char]) -> Vec<usize> {
        let mut lps = vec![0; pattern.len()];
        let mut len = 0;
        let mut idx = 1;

        while idx < pattern.len() {
            if pattern[idx] == pattern[len] {
                len += 1;
                lps[idx] = len;
                idx += 1;
            } else if len != 0 {
                len = lps[len - 1];
            } else {
                lps[idx] = 0;
                idx += 1;
            }
        }

        lps
    }

    /// 字符串形式的便捷入口
    pub fn lps(pattern: &str) -> Vec<usize> {
        let chars: Vec<char> = pattern.chars().collect();
        Self::failure_function(&chars)
    }

    /// 生成KMP的完整轨迹；模式为空或比文本长时返回空轨迹
    pub fn run(text: &str, pattern: &str) -> Trace<MatchStep> {
        let Some((text, pattern)) = split_inputs(text, pattern) else {
            return Trace::empty();
        };

        let n = text.len();
        let m = pattern.len();
        let lps: Arc<[usize]> = Arc::from(Self::failure_function(&pattern));
        let mut recorder = TraceRecorder::new();
        let mut progress = MatchProgress::default();

        recorder.record(|index| MatchStep {
            lps: Some(Arc::clone(&lps)),
            ..progress.step(
                index,
                MatchAction::FailureFunction,
                format!("Failure function (LPS) of the pattern: {:?}", lps),
            )
        });

        let mut text_idx = 0;
        let mut pattern_idx = 0;

        while text_idx < n {
            progress.comparisons += 1;
            let (t, p) = (text_idx, pattern_idx);

            if text[t] == pattern[p] {
                recorder.record(|index| MatchStep {
                    text_index: Some(t),
                    pattern_index: Some(p),
                    window_start: Some(t - p),
                    is_match: true,
                    lps: Some(Arc::clone(&lps)),
                    ..progress.step(
                        index,
                        MatchAction::CharMatch,
                        format!("text[{}] = '{}' matches pattern[{}]", t, text[t], p),
                    )
                });
                text_idx += 1;
                pattern_idx += 1;

                if pattern_idx == m {
                    let start = text_idx - m;
                    progress.matches.push(start);
                    let fallback = lps[pattern_idx - 1];
                    recorder.record(|index| MatchStep {
                        text_index: Some(text_idx - 1),
                        pattern_index: Some(m - 1),
                        window_start: Some(start),
                        is_match: true,
                        lps: Some(Arc::clone(&lps)),
                        ..progress.step(
                            index,
                            MatchAction::FullMatch,
                            format!(
                                "Complete match at offset {}; continue from pattern index {}",
                                start, fallback
                            ),
                        )
                    });
                    pattern_idx = fallback;
                }
            } else {
                recorder.record(|index| MatchStep {
                    text_index: Some(t),
                    pattern_index: Some(p),
                    window_start: Some(t - p),
                    lps: Some(Arc::clone(&lps)),
                    ..progress.step(
                        index,
                        MatchAction::CharMismatch,
                        format!(
                            "text[{}] = '{}' differs from pattern[{}] = '{}'",
                            t, text[t], p, pattern[p]
                        ),
                    )
                });

                if pattern_idx != 0 {
                    pattern_idx = lps[pattern_idx - 1];
                    let fallback = pattern_idx;
                    trace!("KMP fallback at text {}: pattern {} -> {}", t, p, fallback);
                    recorder.record(|index| MatchStep {
                        text_index: Some(t),
                        pattern_index: Some(fallback),
                        window_start: Some(t - fallback),
                        lps: Some(Arc::clone(&lps)),
                        ..progress.step(
                            index,
                            MatchAction::FallBack,
                            format!(
                                "Use failure function: lps[{}] = {}, pattern index falls back to {}",
                                p - 1,
                                fallback,
                                fallback
                            ),
                        )
                    });
                } else {
                    text_idx += 1;
                }
            }
        }

        recorder.record(|index| MatchStep {
            lps: Some(Arc::clone(&lps)),
            ..progress.step(index, MatchAction::Complete, progress.summary("KMP search"))
        });

        debug!(
            "KMP search produced {} steps, {} comparisons, matches {:?}",
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
    fn test_failure_function() {
        assert_eq!(Kmp::lps("ABABA"), vec![0, 0, 1, 2, 3]);
        assert_eq!(Kmp::lps("AABAAA"), vec![0, 1, 0, 1, 2, 2]);
        assert_eq!(Kmp::lps("ABCD"), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_kmp_search() {
        assert_eq!(Kmp::find_all("ABABCABABA", "ABABA"), vec![5]);
        assert_eq!(
            Kmp::find_all("ABABDABACDABABCABCABCABCABC", "ABABCABCAB"),
            vec![10]
        );
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(Kmp::find_all("AAAA", "AA"), vec![0, 1, 2]);
        assert_eq!(Kmp::find_all("ABABABA", "ABA"), vec![0, 2, 4]);
    }

    #[test]
    fn test_trace_starts_with_failure_function() {
        let trace = Kmp::run("ABABCABABA", "ABABA");
        let first = trace.first().expect("Trace should not be empty in test");
        assert_eq!(first.action, MatchAction::FailureFunction);
        assert_eq!(first.lps.as_deref(), Some(&[0, 0, 1, 2, 3][..]));
        assert_eq!(
            trace.last().map(|s| s.action),
            Some(MatchAction::Complete)
        );
    }

    #[test]
    fn test_fallback_after_partial_match() {
        // 在 text[4] = 'C' 与 pattern[4] = 'A' 失配，回退到 lps[3] = 2
        let trace = Kmp::run("ABABCABABA", "ABABA");
        let fallback = trace
            .iter()
            .find(|s| s.action == MatchAction::FallBack)
            .expect("Fallback step should exist in test");
        assert_eq!(fallback.text_index, Some(4));
        assert_eq!(fallback.pattern_index, Some(2));
    }

    #[test]
    fn test_full_match_step() {
        let trace = Kmp::run("ABABCABABA", "ABABA");
        let full: Vec<usize> = trace
            .iter()
            .filter(|s| s.action == MatchAction::FullMatch)
            .filter_map(|s| s.window_start)
            .collect();
        assert_eq!(full, vec![5]);
    }

    #[test]
    fn test_unsatisfiable_inputs_give_empty_trace() {
        assert!(Kmp::run("AB", "ABC").is_empty());
        assert!(Kmp::run("", "A").is_empty());
    }
}
