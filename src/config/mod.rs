use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::{VizError, VizResult};
use crate::services::algorithm::rabin_karp::{DEFAULT_BASE, DEFAULT_PRIME};
use crate::services::algorithm::RabinKarpParams;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub playback: PlaybackConfig,
    pub rabin_karp: RabinKarpConfig,
}

/// 日志配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "algotrace".to_string(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            max_files: 5,
        }
    }
}

/// 自动播放配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// 两步之间的间隔（毫秒）
    pub tick_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 800,
        }
    }
}

impl PlaybackConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Rabin-Karp 的默认哈希参数，请求里没有给出时使用
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RabinKarpConfig {
    pub base: u64,
    pub prime: u64,
}

impl Default for RabinKarpConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            prime: DEFAULT_PRIME,
        }
    }
}

impl RabinKarpConfig {
    pub fn params(&self) -> VizResult<RabinKarpParams> {
        RabinKarpParams::new(self.base, self.prime)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> VizResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.playback.tick_interval_ms == 0 {
            return Err(VizError::Config(
                "playback.tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(VizError::Config("log.level must not be empty".to_string()));
        }
        self.rabin_karp
            .params()
            .map_err(|e| VizError::Config(format!("rabin_karp: {}", e)))?;
        Ok(())
    }
}
