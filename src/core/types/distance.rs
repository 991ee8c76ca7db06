use serde::Serialize;
use std::fmt;

/// 单源最短路径中的距离：有限值或不可达
///
/// `Finite` 总是小于 `Infinite`，序列化时 `Infinite` 输出为 `null`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Distance {
    Finite(i64),
    #[default]
    Infinite,
}

impl Distance {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn finite(&self) -> Option<i64> {
        match self {
            Distance::Finite(value) => Some(*value),
            Distance::Infinite => None,
        }
    }

    /// 经过一条权重为 `weight` 的边后的距离，不可达保持不可达
    ///
    /// 有限值的加法是饱和的：负权环上反复松弛时距离停在 `i64::MIN`。
    pub fn extend(&self, weight: i64) -> Distance {
        match self {
            Distance::Finite(value) => Distance::Finite(value.saturating_add(weight)),
            Distance::Infinite => Distance::Infinite,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(value) => write!(f, "{}", value),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}
