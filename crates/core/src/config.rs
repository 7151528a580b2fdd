//! Engine configuration
//!
//! Fixed for the lifetime of an engine: the grid is never resized and the
//! speed ramp never changes mid-game.

use std::fmt;

use crate::types::{
    DEFAULT_HEIGHT, DEFAULT_MAX_INTERVAL_MS, DEFAULT_MIN_INTERVAL_MS, DEFAULT_SPEED_STEPS,
    DEFAULT_WIDTH, PIECE_CELLS,
};

/// Narrowest grid that still fits a flat straight piece.
pub const MIN_WIDTH: u16 = PIECE_CELLS as u16;

/// Shallowest grid that still fits every spawn orientation.
pub const MIN_HEIGHT: u16 = 2;

/// Largest grid side. Keeps piece coordinates well inside `i16` and the
/// rendered playfield inside a `u16` terminal.
pub const MAX_SIDE: u16 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    /// Tick interval at game start
    pub max_interval_ms: u32,
    /// Tick interval floor
    pub min_interval_ms: u32,
    /// Line clears needed to ramp from max to min
    pub speed_steps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_interval_ms: DEFAULT_MAX_INTERVAL_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            speed_steps: DEFAULT_SPEED_STEPS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    GridTooSmall { width: u16, height: u16 },
    GridTooLarge { width: u16, height: u16 },
    ZeroInterval,
    IntervalRange { min_ms: u32, max_ms: u32 },
    ZeroSpeedSteps,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridTooSmall { width, height } => write!(
                f,
                "grid {}x{} is too small (minimum {}x{})",
                width, height, MIN_WIDTH, MIN_HEIGHT
            ),
            ConfigError::GridTooLarge { width, height } => write!(
                f,
                "grid {}x{} is too large (maximum {}x{})",
                width, height, MAX_SIDE, MAX_SIDE
            ),
            ConfigError::ZeroInterval => write!(f, "tick intervals must be positive"),
            ConfigError::IntervalRange { min_ms, max_ms } => write!(
                f,
                "min interval {}ms exceeds max interval {}ms",
                min_ms, max_ms
            ),
            ConfigError::ZeroSpeedSteps => write!(f, "speed steps must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl EngineConfig {
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_SIDE || self.height > MAX_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_interval_ms == 0 || self.max_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.min_interval_ms > self.max_interval_ms {
            return Err(ConfigError::IntervalRange {
                min_ms: self.min_interval_ms,
                max_ms: self.max_interval_ms,
            });
        }
        if self.speed_steps == 0 {
            return Err(ConfigError::ZeroSpeedSteps);
        }
        Ok(())
    }

    /// Amount the tick interval shrinks per cleared row
    pub fn interval_step_ms(&self) -> u32 {
        self.max_interval_ms.saturating_sub(self.min_interval_ms) / self.speed_steps.max(1)
    }
}
