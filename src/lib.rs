//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine, input, and terminal crates under `crates/` as
//! `blockfall::{core,input,term,types}`, and hosts the binary's configuration
//! and event log.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod event_log;
