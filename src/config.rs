//! Runtime configuration for the `blockfall` binary.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::EngineConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Randomizer seed; the same seed replays the same piece sequence.
    pub seed: u32,
    /// JSON-lines event log destination. `None` disables logging.
    pub log_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            seed: 1,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables.
    ///
    /// Absent or unparseable values fall back to the defaults. The seed falls
    /// back to the wall clock so every run deals a different sequence.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = EngineConfig::default();
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());
        let parse_u16 = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u16>().ok());

        let engine = EngineConfig {
            width: parse_u16("BLOCKFALL_WIDTH").unwrap_or(defaults.width),
            height: parse_u16("BLOCKFALL_HEIGHT").unwrap_or(defaults.height),
            max_interval_ms: parse("BLOCKFALL_MAX_INTERVAL_MS").unwrap_or(defaults.max_interval_ms),
            min_interval_ms: parse("BLOCKFALL_MIN_INTERVAL_MS").unwrap_or(defaults.min_interval_ms),
            speed_steps: parse("BLOCKFALL_SPEED_STEPS").unwrap_or(defaults.speed_steps),
        };

        let seed = parse("BLOCKFALL_SEED").unwrap_or_else(clock_seed);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            engine,
            seed,
            log_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
