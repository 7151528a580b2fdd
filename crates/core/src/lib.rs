//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game-state engine: the grid, the piece shape tables,
//! the active piece's movement and rotation rules, row clearing, and the
//! scoring/speed policy. It has **zero dependencies** on rendering, input or
//! timers, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is reachable through plain method calls
//! - **Portable**: Any scheduler or frontend can drive it
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell store with bounds-checked access and row collapse
//! - [`shapes`]: per-kind orientation offset tables
//! - [`piece`]: the active piece and its single legality primitive
//! - [`rng`]: seeded uniform piece selection
//! - [`scoring`]: points per cleared row and the tick-interval ramp
//! - [`config`]: engine dimensions and timing
//! - [`engine`]: the state machine tying everything together
//! - [`snapshot`]: read-only state copies for renderers and schedulers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every spawn picks one of 7 kinds with equal odds
//! - **Rotation without kicks**: a blocked rotation is simply rejected
//! - **Row clears**: one point per column; no multi-line bonus
//! - **Speed ramp**: each cleared row shortens the tick interval by a fixed step,
//!   down to a configured floor
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, GameEngine};
//! use blockfall_types::{GameAction, Status};
//!
//! let mut game = GameEngine::new(EngineConfig::default(), 12345).unwrap();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.tick();
//!
//! assert_eq!(game.status(), Status::Running);
//! assert_eq!(game.tick_interval_ms(), 1000);
//! ```
//!
//! # Timing
//!
//! The engine does not measure time. Call [`GameEngine::tick`] every
//! [`GameEngine::tick_interval_ms`] milliseconds while the game is running,
//! re-reading the interval after each tick.

pub mod config;
pub mod engine;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use engine::GameEngine;
pub use grid::{Coord, Grid, GridError};
pub use piece::{spawn_anchor, ActivePiece};
pub use rng::{PieceRandomizer, SimpleRng};
pub use scoring::{calculate_line_score, line_clear_points, next_tick_interval};
pub use shapes::{orientation_count, orientations, shape, CellOffset, PieceShape};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
