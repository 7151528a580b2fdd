//! Active piece - the one piece under timer and player control
//!
//! A piece is a kind, an orientation index into the kind's shape table and an
//! anchor. Its cells are always derived (anchor + offsets), never stored.
//! Every mutation goes through a single legality check against the grid and
//! is committed only if all four candidate cells are in bounds and empty.

use crate::grid::{Coord, Grid};
use crate::shapes::{orientation_count, shape, PieceShape};
use crate::types::{PieceKind, Rgb, PIECE_CELLS};

/// Falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    kind: PieceKind,
    orientation: u8,
    x: i16,
    y: i16,
}

/// Anchor a new piece spawns at on a grid `width` columns wide.
pub fn spawn_anchor(width: u16) -> Coord {
    ((width.saturating_sub(PIECE_CELLS as u16) / 2) as i16, 0)
}

impl ActivePiece {
    /// Piece in orientation 0 at `anchor`
    pub fn new(kind: PieceKind, anchor: Coord) -> Self {
        Self {
            kind,
            orientation: 0,
            x: anchor.0,
            y: anchor.1,
        }
    }

    /// Piece at the fixed spawn anchor for a grid `width` columns wide
    pub fn spawn(kind: PieceKind, width: u16) -> Self {
        Self::new(kind, spawn_anchor(width))
    }

    /// Same piece in a given orientation (taken modulo the kind's count)
    pub fn with_orientation(mut self, orientation: usize) -> Self {
        self.orientation = (orientation % orientation_count(self.kind)) as u8;
        self
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn orientation(&self) -> usize {
        self.orientation as usize
    }

    pub fn anchor(&self) -> Coord {
        (self.x, self.y)
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Offsets for the current orientation
    pub fn shape(&self) -> PieceShape {
        shape(self.kind, self.orientation as usize)
    }

    /// Anchor plus each offset of the current orientation
    pub fn occupied_cells(&self) -> [Coord; PIECE_CELLS] {
        cells_at(self.shape(), self.x, self.y)
    }

    /// All cells in bounds and over empty grid cells
    pub fn fits(&self, grid: &Grid) -> bool {
        fits(grid, &self.occupied_cells())
    }

    /// Shift by (dx, dy) if the shifted cells are legal.
    ///
    /// On false the piece is unchanged.
    pub fn try_move(&mut self, grid: &Grid, dx: i16, dy: i16) -> bool {
        let candidate = cells_at(
            self.shape(),
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
        );
        if !fits(grid, &candidate) {
            return false;
        }

        self.x += dx;
        self.y += dy;
        true
    }

    pub fn move_left(&mut self, grid: &Grid) -> bool {
        self.try_move(grid, -1, 0)
    }

    pub fn move_right(&mut self, grid: &Grid) -> bool {
        self.try_move(grid, 1, 0)
    }

    /// One row down; returns whether the piece advanced
    pub fn soft_step(&mut self, grid: &Grid) -> bool {
        self.try_move(grid, 0, 1)
    }

    /// Step down until resting. Returns rows descended; does not lock.
    pub fn hard_drop(&mut self, grid: &Grid) -> u16 {
        let mut rows = 0;
        while self.soft_step(grid) {
            rows += 1;
        }
        rows
    }

    /// Advance to the next orientation in place.
    ///
    /// The anchor never moves: if the next orientation is out of bounds or
    /// overlaps a locked cell the piece keeps its current orientation and
    /// false is returned.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        let next = (self.orientation as usize + 1) % orientation_count(self.kind);
        let candidate = cells_at(shape(self.kind, next), self.x, self.y);
        if !fits(grid, &candidate) {
            return false;
        }

        self.orientation = next as u8;
        true
    }
}

fn cells_at(shape: PieceShape, x: i16, y: i16) -> [Coord; PIECE_CELLS] {
    // Saturated coordinates land outside every grid and fail the fit check.
    shape.map(|(dx, dy)| (x.saturating_add(dx as i16), y.saturating_add(dy as i16)))
}

fn fits(grid: &Grid, cells: &[Coord]) -> bool {
    cells.iter().all(|&(x, y)| grid.is_vacant(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_anchor_is_centered() {
        assert_eq!(spawn_anchor(10), (3, 0));
        assert_eq!(spawn_anchor(15), (5, 0));
        assert_eq!(spawn_anchor(4), (0, 0));
    }

    #[test]
    fn test_occupied_cells_follow_anchor() {
        let piece = ActivePiece::new(PieceKind::I, (2, 5));
        assert_eq!(piece.occupied_cells(), [(2, 5), (3, 5), (4, 5), (5, 5)]);
    }

    #[test]
    fn test_try_move_rejects_without_mutation() {
        let grid = Grid::new(4, 4);
        let mut piece = ActivePiece::new(PieceKind::I, (0, 0));

        assert!(!piece.move_right(&grid));
        assert!(!piece.try_move(&grid, 0, -1));
        assert_eq!(piece.anchor(), (0, 0));
    }

    #[test]
    fn test_hard_drop_counts_rows() {
        let grid = Grid::new(6, 10);
        let mut piece = ActivePiece::new(PieceKind::O, (2, 0));
        assert_eq!(piece.hard_drop(&grid), 8);
        assert_eq!(piece.anchor(), (2, 8));
        assert!(!piece.soft_step(&grid));
    }

    #[test]
    fn test_with_orientation_wraps() {
        let piece = ActivePiece::new(PieceKind::I, (0, 0)).with_orientation(3);
        assert_eq!(piece.orientation(), 1);
    }

    #[test]
    fn test_moves_at_coordinate_limit_are_rejected() {
        let grid = Grid::new(6, 10);
        let mut piece = ActivePiece::new(PieceKind::L, (i16::MAX, i16::MAX));
        let before = piece;

        assert!(!piece.move_right(&grid));
        assert!(!piece.soft_step(&grid));
        assert!(!piece.rotate(&grid));
        assert_eq!(piece.hard_drop(&grid), 0);
        assert_eq!(piece, before);
    }
}
