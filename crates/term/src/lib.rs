//! Terminal renderer for blockfall.
//!
//! Renders into a simple framebuffer that is then flushed to the terminal with
//! crossterm. Grid cells are drawn 2 columns wide to compensate for glyph
//! aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
