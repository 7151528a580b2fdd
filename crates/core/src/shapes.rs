//! Shapes module - per-kind orientation tables
//!
//! Every orientation is four (dx, dy) offsets from the piece anchor, x to the
//! right and y down. Rotation steps forward through a kind's list and wraps.
//!
//! Orientation 0 is the spawn orientation. For every kind its smallest dx and
//! smallest dy are both 0, so a piece anchored on row 0 starts fully inside the
//! grid and a piece anchored on column 0 touches the left wall.

use crate::types::{PieceKind, PIECE_CELLS};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Shape of a piece in one orientation
pub type PieceShape = [CellOffset; PIECE_CELLS];

/// Straight piece: flat, then standing in the second column.
const I_SHAPES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

/// Square piece: one orientation, rotation is a no-op.
const O_SHAPES: [PieceShape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [PieceShape; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// All orientations of a kind, in rotation order
pub fn orientations(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

pub fn orientation_count(kind: PieceKind) -> usize {
    orientations(kind).len()
}

/// Offsets for `orientation`, taken modulo the kind's orientation count.
pub fn shape(kind: PieceKind, orientation: usize) -> PieceShape {
    let table = orientations(kind);
    table[orientation % table.len()]
}
