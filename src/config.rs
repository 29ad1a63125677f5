use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Delay before a clicked key is released again.
    #[serde(default = "default_release_delay_ms")]
    pub release_delay_ms: u64,
    /// Used when the terminal cannot report key releases: a key counts as
    /// released this long after its last press.
    #[serde(default = "default_release_fallback_ms")]
    pub release_fallback_ms: u64,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Key codes whose own bindings are suppressed.
    #[serde(default = "default_suppressed_keys")]
    pub suppressed_keys: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_release_delay_ms() -> u64 {
    200
}
fn default_release_fallback_ms() -> u64 {
    150
}
fn default_tick_rate_ms() -> u64 {
    50
}
pub fn default_suppressed_keys() -> Vec<String> {
    [
        "F1",
        "F5",
        "F12",
        "ControlLeft",
        "ControlRight",
        "AltLeft",
        "AltRight",
        "MetaLeft",
        "MetaRight",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            release_delay_ms: default_release_delay_ms(),
            release_fallback_ms: default_release_fallback_ms(),
            tick_rate_ms: default_tick_rate_ms(),
            suppressed_keys: default_suppressed_keys(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kbmirror")
            .join("config.toml")
    }

    pub fn release_delay(&self) -> Duration {
        Duration::from_millis(self.release_delay_ms)
    }

    pub fn release_fallback(&self) -> Duration {
        Duration::from_millis(self.release_fallback_ms)
    }

    /// Never zero, so the event thread still yields between polls.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    /// Unknown level names fall back to `info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
