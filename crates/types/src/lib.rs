//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Playfield Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 15 | Columns (indexed 0-14, left to right) |
//! | `DEFAULT_HEIGHT` | 30 | Rows (indexed 0-29, top to bottom) |
//! | `DEFAULT_MAX_INTERVAL_MS` | 1000 | Tick interval at the start of a game |
//! | `DEFAULT_MIN_INTERVAL_MS` | 100 | Tick interval floor |
//! | `DEFAULT_SPEED_STEPS` | 10 | Line clears needed to go from max to min |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{cell_color, PieceKind, Status, EMPTY_COLOR};
//!
//! let piece = PieceKind::from_index(6).unwrap();
//! assert_eq!(piece, PieceKind::L);
//! assert_eq!(cell_color(Some(piece)), piece.color());
//! assert_eq!(cell_color(None), EMPTY_COLOR);
//!
//! assert!(Status::Running.is_running());
//! ```

/// Default grid width in cells (15 columns)
pub const DEFAULT_WIDTH: u16 = 15;

/// Default grid height in cells (30 rows)
pub const DEFAULT_HEIGHT: u16 = 30;

/// Tick interval at game start and after restart (1000ms = 1 row per second)
pub const DEFAULT_MAX_INTERVAL_MS: u32 = 1000;

/// Tick interval floor (100ms)
pub const DEFAULT_MIN_INTERVAL_MS: u32 = 100;

/// Number of line clears that take the interval from max to min
pub const DEFAULT_SPEED_STEPS: u32 = 10;

/// Cells per piece.
pub const PIECE_CELLS: usize = 4;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Display color of an empty grid cell.
pub const EMPTY_COLOR: Rgb = Rgb::new(0x80, 0x80, 0x80);

/// The seven piece kinds
///
/// Identity and presentation are separate: the kind decides the shape table,
/// [`PieceKind::color`] decides how a renderer paints it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Index into [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Inverse of [`PieceKind::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display color for locked and falling cells of this kind
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(80, 220, 220),
            PieceKind::O => Rgb::new(240, 220, 80),
            PieceKind::T => Rgb::new(200, 120, 220),
            PieceKind::S => Rgb::new(100, 220, 120),
            PieceKind::Z => Rgb::new(220, 80, 80),
            PieceKind::J => Rgb::new(80, 120, 220),
            PieceKind::L => Rgb::new(255, 165, 0),
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: locked cell, painted with the kind's color
pub type Cell = Option<PieceKind>;

/// Color to paint a grid cell with.
pub fn cell_color(cell: Cell) -> Rgb {
    cell.map(|k| k.color()).unwrap_or(EMPTY_COLOR)
}

/// Engine lifecycle status
///
/// `Running` accepts ticks and input, `Paused` freezes everything until
/// resumed, `GameOver` is sticky until restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Running,
    Paused,
    GameOver,
}

impl Status {
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Status::Paused)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, Status::GameOver)
    }
}

/// Commands the engine consumes
///
/// Physical keys are mapped to these by the input crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Advance to the next orientation, rejected on collision
    Rotate,
    /// Running -> Paused
    Pause,
    /// Paused -> Running
    Resume,
    /// Flip between Running and Paused
    TogglePause,
    /// Fresh grid, zero score, max interval
    Restart,
}

/// Core-side event emitted when a tick or command changes more than the
/// active piece's position.
///
/// Consumed by observers such as the event log via `take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreLastEvent {
    /// A piece was locked into the grid.
    pub locked: bool,
    /// Rows removed by the row-clear pass.
    pub lines_cleared: u32,
    /// Points awarded for those rows.
    pub line_clear_score: u32,
    /// Tick interval after the clear.
    pub tick_interval_ms: u32,
    /// The spawn that followed the lock was blocked.
    pub game_over: bool,
}
