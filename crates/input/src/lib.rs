//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and buffers them
//! between ticks. Each key press is one discrete command; the engine sees
//! nothing of key repeat or release.

pub mod map;
pub mod queue;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
pub use queue::{ActionQueue, ACTION_QUEUE_CAPACITY};
