//! Grid module - the fixed-size board of locked cells
//!
//! Each cell is either empty or holds the kind of the piece that was locked there.
//! Uses a flat row-major array for cache locality; the allocation is made once
//! per game and only replaced wholesale on restart.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom,
//! so row 0 is the top row and row `height - 1` is the floor.

use std::fmt;

use crate::types::{Cell, PieceKind};

/// A grid position. Signed so that candidate positions left of or above the
/// grid can be expressed and rejected.
pub type Coord = (i16, i16);

/// Contract violation when addressing the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds { x: i16, y: i16 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { x, y } => write!(f, "cell ({}, {}) is out of bounds", x, y),
        }
    }
}

impl std::error::Error for GridError {}

/// The playfield - `width` columns by `height` rows using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x as u16 >= self.width || y as u16 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    pub fn get(&self, x: i16, y: i16) -> Result<Cell, GridError> {
        self.index(x, y)
            .map(|idx| self.cells[idx])
            .ok_or(GridError::OutOfBounds { x, y })
    }

    /// Overwrite one cell
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// In bounds and empty. This is the legality test for piece cells.
    pub fn is_vacant(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Ok(None))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Ok(Some(_)))
    }

    /// Borrow one row, left to right.
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// True iff every cell in row `y` is filled. Rows outside the grid are never complete.
    pub fn is_row_complete(&self, y: u16) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// First complete row scanning from the top, if any.
    pub fn first_complete_row(&self) -> Option<u16> {
        (0..self.height).find(|&y| self.is_row_complete(y))
    }

    /// Number of complete rows.
    pub fn complete_rows(&self) -> usize {
        (0..self.height).filter(|&y| self.is_row_complete(y)).count()
    }

    /// Remove row `y` and shift every row above it down by one.
    ///
    /// Row `y` receives row `y - 1`, and so on up to row 1 receiving row 0;
    /// row 0 is reset to empty as the last step.
    pub fn collapse_row(&mut self, y: u16) -> Result<(), GridError> {
        if y >= self.height {
            return Err(GridError::OutOfBounds {
                x: 0,
                y: y.min(i16::MAX as u16) as i16,
            });
        }

        let width = self.width as usize;

        // copy_within handles overlapping ranges
        for row in (1..=y as usize).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(None);
        Ok(())
    }

    /// Write a piece's cells as locked cells of `kind`.
    ///
    /// All-or-nothing: returns false and leaves the grid untouched if any
    /// cell is out of bounds or already filled.
    pub fn lock_cells(&mut self, cells: &[Coord], kind: PieceKind) -> bool {
        if !cells.iter().all(|&(x, y)| self.is_vacant(x, y)) {
            return false;
        }

        for &(x, y) in cells {
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = Some(kind);
            }
        }

        true
    }

    /// Total number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
