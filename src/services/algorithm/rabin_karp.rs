//! Rabin-Karp 字符串匹配
//!
//! 多项式哈希对 `prime` 取模，窗口右移时用滚动哈希更新：
//!
//! `new = ((old - code(out) * base^(m-1)) * base + code(in)) mod prime`
//!
//! 结果归一化为非负数。哈希相等后再逐字符核对，区分真正匹配与哈希碰撞。
//! 每个窗口的哈希值都会出现在轨迹里，所以这里的模运算必须逐位一致。

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{Trace, TraceRecorder, VizError, VizResult};
use crate::services::algorithm::string::{split_inputs, MatchProgress};
use crate::services::algorithm::types::{MatchAction, MatchStep, RollingHashState};

/// 默认基数
pub const DEFAULT_BASE: u64 = 256;
/// 默认模数
pub const DEFAULT_PRIME: u64 = 101;

/// 哈希参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RabinKarpParams {
    pub base: u64,
    pub prime: u64,
}

impl Default for RabinKarpParams {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            prime: DEFAULT_PRIME,
        }
    }
}

impl RabinKarpParams {
    /// 校验参数：`base >= 1`，`prime >= 2`，两者都不超过 `u32::MAX`
    pub fn new(base: u64, prime: u64) -> VizResult<Self> {
        let params = Self { base, prime };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.base == 0 {
            return Err(VizError::InvalidParameter(
                "Rabin-Karp base must be positive".to_string(),
            ));
        }
        if self.prime < 2 {
            return Err(VizError::InvalidParameter(
                "Rabin-Karp prime must be at least 2".to_string(),
            ));
        }
        if self.base > u64::from(u32::MAX) || self.prime > u64::from(u32::MAX) {
            return Err(VizError::InvalidParameter(
                "Rabin-Karp base and prime must fit in 32 bits".to_string(),
            ));
        }
        Ok(())
    }

    /// Horner 法则计算多项式哈希
    pub fn hash(&self, chars: &[char]) -> u64 {
        let base = u128::from(self.base);
        let prime = u128::from(self.prime);
        let hash = chars
            .iter()
            .fold(0u128, |acc, &c| (acc * base + char_code(c)) % prime);
        hash as u64
    }

    /// `base^(m-1) mod prime`
    pub fn leading_power(&self, pattern_len: usize) -> u64 {
        let base = u128::from(self.base);
        let prime = u128::from(self.prime);
        let mut power = 1u128;
        for _ in 1..pattern_len {
            power = (power * base) % prime;
        }
        (power % prime) as u64
    }

    /// 窗口右移一位后的哈希
    pub fn roll(&self, old_hash: u64, outgoing: char, incoming: char, power: u64) -> u64 {
        let base = i128::from(self.base);
        let prime = i128::from(self.prime);
        let removed = i128::from(old_hash) - char_code(outgoing) as i128 * i128::from(power);
        let rolled = (removed * base + char_code(incoming) as i128) % prime;
        let normalized = if rolled < 0 { rolled + prime } else { rolled };
        normalized as u64
    }
}

fn char_code(c: char) -> u128 {
    u128::from(u32::from(c))
}

/// Rabin-Karp算法结构体
pub struct RabinKarp;

struct HashTable {
    pattern_hash: u64,
    window_hash: u64,
    power: u64,
    window_hashes: Vec<u64>,
}

impl HashTable {
    fn state(&self) -> RollingHashState {
        RollingHashState {
            pattern_hash: self.pattern_hash,
            window_hash: self.window_hash,
            hash_power: self.power,
            window_hashes: self.window_hashes.clone(),
        }
    }
}

impl RabinKarp {
    /// 生成Rabin-Karp的完整轨迹；模式为空或比文本长时返回空轨迹
    ///
    /// 参数由调用方保证有效（见 [`RabinKarpParams::new`]）。
    pub fn run(text: &str, pattern: &str, params: RabinKarpParams) -> Trace<MatchStep> {
        let Some((text, pattern)) = split_inputs(text, pattern) else {
            return Trace::empty();
        };

        let n = text.len();
        let m = pattern.len();
        let mut recorder = TraceRecorder::new();
        let mut progress = MatchProgress::default();

        let first_window = params.hash(&text[..m]);
        let mut table = HashTable {
            pattern_hash: params.hash(&pattern),
            window_hash: first_window,
            power: params.leading_power(m),
            window_hashes: vec![first_window],
        };

        recorder.record(|index| MatchStep {
            window_start: Some(0),
            hash: Some(table.state()),
            ..progress.step(
                index,
                MatchAction::InitialHashes,
                format!(
                    "Pattern hash = {}, first window hash = {} (base {}, prime {}, base^(m-1) mod prime = {})",
                    table.pattern_hash, table.window_hash, params.base, params.prime, table.power
                ),
            )
        });

        for start in 0..=(n - m) {
            if start > 0 {
                let outgoing = text[start - 1];
                let incoming = text[start + m - 1];
                let old = table.window_hash;
                table.window_hash = params.roll(old, outgoing, incoming, table.power);
                table.window_hashes.push(table.window_hash);

                recorder.record(|index| MatchStep {
                    window_start: Some(start),
                    text_index: Some(start + m - 1),
                    hash: Some(table.state()),
                    ..progress.step(
                        index,
                        MatchAction::RollingHash,
                        format!(
                            "Roll hash to window {}: drop '{}', add '{}', {} -> {}",
                            start, outgoing, incoming, old, table.window_hash
                        ),
                    )
                });
            }

            if table.window_hash != table.pattern_hash {
                continue;
            }

            recorder.record(|index| MatchStep {
                window_start: Some(start),
                hash: Some(table.state()),
                ..progress.step(
                    index,
                    MatchAction::HashMatch,
                    format!(
                        "Window {} hash {} equals pattern hash; verify characters",
                        start, table.window_hash
                    ),
                )
            });

            let mut exact = true;
            for j in 0..m {
                progress.comparisons += 1;
                if text[start + j] != pattern[j] {
                    exact = false;
                    break;
                }
            }

            if exact {
                progress.matches.push(start);
            }
            recorder.record(|index| {
                let (action, description) = if exact {
                    (
                        MatchAction::ExactMatch,
                        format!("Characters agree: exact match at offset {}", start),
                    )
                } else {
                    (
                        MatchAction::HashCollision,
                        format!("Characters differ: hash collision at offset {}", start),
                    )
                };
                MatchStep {
                    window_start: Some(start),
                    is_match: exact,
                    hash: Some(table.state()),
                    ..progress.step(index, action, description)
                }
            });
        }

        recorder.record(|index| MatchStep {
            hash: Some(table.state()),
            ..progress.step(
                index,
                MatchAction::Complete,
                progress.summary("Rabin-Karp search"),
            )
        });

        debug!(
            "Rabin-Karp search (base {}, prime {}) produced {} steps, matches {:?}",
            params.base,
            params.prime,
            recorder.len(),
            progress.matches
        );
        recorder.finish()
    }

    /// 只取匹配位置
    pub fn find_all(text: &str, pattern: &str, params: RabinKarpParams) -> Vec<usize> {
        Self::run(text, pattern, params)
            .last()
            .map(|step| step.matches.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_validation() {
        assert!(RabinKarpParams::new(256, 101).is_ok());
        assert!(RabinKarpParams::new(0, 101).is_err());
        assert!(RabinKarpParams::new(256, 1).is_err());
        assert!(RabinKarpParams::new(256, u64::MAX).is_err());
    }

    #[test]
    fn test_hash_matches_horner() {
        let params = RabinKarpParams::default();
        // ('A' * 256 + 'B') mod 101 = (65 * 256 + 66) mod 101
        assert_eq!(params.hash(&['A', 'B']), (65 * 256 + 66) % 101);
    }

    #[test]
    fn test_rolling_hash_equals_direct_hash() {
        let params = RabinKarpParams::new(31, 1_000_003).expect("Params should be valid in test");
        let text: Vec<char> = "rolling hashes".chars().collect();
        let m = 4;
        let power = params.leading_power(m);
        let mut hash = params.hash(&text[..m]);
        for start in 1..=(text.len() - m) {
            hash = params.roll(hash, text[start - 1], text[start + m - 1], power);
            assert_eq!(hash, params.hash(&text[start..start + m]));
        }
    }

    #[test]
    fn test_finds_matches() {
        let params = RabinKarpParams::default();
        assert_eq!(RabinKarp::find_all("ABABCABABA", "ABABA", params), vec![5]);
        assert_eq!(RabinKarp::find_all("AAAA", "AA", params), vec![0, 1, 2]);
    }

    #[test]
    fn test_one_rolling_step_per_shift() {
        let trace = RabinKarp::run("ABCDEF", "CD", RabinKarpParams::default());
        let rolls = trace
            .iter()
            .filter(|s| s.action == MatchAction::RollingHash)
            .count();
        assert_eq!(rolls, 4);

        let last = trace.last().expect("Trace should not be empty in test");
        let table = last.hash.as_ref().expect("Hash state should exist in test");
        assert_eq!(table.window_hashes.len(), 5);
    }

    #[test]
    fn test_hash_collision_is_reported() {
        // 模数为 2 时，'A'(65) 与 'C'(67) 哈希相同
        let params = RabinKarpParams::new(256, 2).expect("Params should be valid in test");
        let trace = RabinKarp::run("C", "A", params);
        let actions: Vec<MatchAction> = trace.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                MatchAction::InitialHashes,
                MatchAction::HashMatch,
                MatchAction::HashCollision,
                MatchAction::Complete,
            ]
        );
        assert!(trace.last().map(|s| s.matches.is_empty()).unwrap_or(false));
    }

    #[test]
    fn test_unsatisfiable_inputs_give_empty_trace() {
        let params = RabinKarpParams::default();
        assert!(RabinKarp::run("AB", "ABC", params).is_empty());
        assert!(RabinKarp::run("AB", "", params).is_empty());
    }
}
