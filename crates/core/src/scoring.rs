//! Scoring module - points and speed ramp for line clears
//!
//! Each cleared row is worth one point per column. There is no multi-line
//! bonus: clearing `k` rows in one tick is worth exactly `k * width`.
//!
//! Each cleared row also shortens the tick interval by one step of
//! `(max - min) / steps`, never going below `min`.

use crate::config::EngineConfig;

/// Points for a single cleared row
pub fn line_clear_points(width: u16) -> u32 {
    width as u32
}

/// Points for `lines` rows cleared together
pub fn calculate_line_score(lines: u32, width: u16) -> u32 {
    lines.saturating_mul(line_clear_points(width))
}

/// Interval after one more cleared row
pub fn next_tick_interval(current_ms: u32, config: &EngineConfig) -> u32 {
    current_ms
        .saturating_sub(config.interval_step_ms())
        .max(config.min_interval_ms)
}
