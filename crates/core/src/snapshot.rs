use crate::grid::Coord;
use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind, Rgb, Status, PIECE_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub orientation: usize,
    pub anchor: Coord,
    pub cells: [Coord; PIECE_CELLS],
    pub color: Rgb,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            orientation: value.orientation(),
            anchor: value.anchor(),
            cells: value.occupied_cells(),
            color: value.color(),
        }
    }
}

/// Read-only copy of everything a renderer or scheduler needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Locked cells, row-major (y * width + x)
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub top_score: u32,
    pub lines: u32,
    pub status: Status,
    pub tick_interval_ms: u32,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// Locked cell at (x, y); `None` outside the grid
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Kind covering (x, y) when the active piece is drawn over the locked cells
    pub fn visible_cell(&self, x: u16, y: u16) -> Option<Cell> {
        let locked = self.cell(x, y)?;
        let covered = self
            .active
            .filter(|a| a.cells.contains(&(x as i16, y as i16)))
            .map(|a| a.kind);
        Some(covered.or(locked))
    }
}
