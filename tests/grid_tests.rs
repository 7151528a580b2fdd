//! Grid tests - bounds contract, row completeness and collapse

use blockfall::core::{Grid, GridError};
use blockfall::types::PieceKind;

fn fill_row(grid: &mut Grid, y: i16, kind: PieceKind) {
    for x in 0..grid.width() as i16 {
        grid.set(x, y, Some(kind)).unwrap();
    }
}

#[test]
fn test_fresh_grid_has_no_complete_rows() {
    let grid = Grid::new(15, 30);
    for y in 0..30 {
        assert!(!grid.is_row_complete(y), "row {} should not be complete", y);
    }
    assert_eq!(grid.first_complete_row(), None);
    assert_eq!(grid.filled_count(), 0);
}

#[test]
fn test_out_of_bounds_access_is_an_error() {
    let mut grid = Grid::new(4, 4);

    assert_eq!(grid.get(-1, 0), Err(GridError::OutOfBounds { x: -1, y: 0 }));
    assert_eq!(grid.get(0, 4), Err(GridError::OutOfBounds { x: 0, y: 4 }));
    assert_eq!(
        grid.set(4, 0, Some(PieceKind::T)),
        Err(GridError::OutOfBounds { x: 4, y: 0 })
    );
    assert_eq!(grid.filled_count(), 0);
    assert_eq!(
        GridError::OutOfBounds { x: 4, y: 0 }.to_string(),
        "cell (4, 0) is out of bounds"
    );
}

#[test]
fn test_set_overwrites_one_cell() {
    let mut grid = Grid::new(4, 4);
    grid.set(2, 3, Some(PieceKind::L)).unwrap();

    assert_eq!(grid.get(2, 3), Ok(Some(PieceKind::L)));
    assert!(grid.is_occupied(2, 3));
    assert!(grid.is_vacant(1, 3));
    assert!(!grid.is_vacant(-1, 3));
    assert_eq!(grid.filled_count(), 1);
}

#[test]
fn test_row_complete_iff_every_cell_filled() {
    let mut grid = Grid::new(4, 4);
    for x in 0..3 {
        grid.set(x, 2, Some(PieceKind::S)).unwrap();
    }
    assert!(!grid.is_row_complete(2));

    grid.set(3, 2, Some(PieceKind::Z)).unwrap();
    assert!(grid.is_row_complete(2));
    assert_eq!(grid.first_complete_row(), Some(2));
    assert_eq!(grid.complete_rows(), 1);
}

#[test]
fn test_collapse_shifts_rows_above_down() {
    let mut grid = Grid::new(4, 4);
    grid.set(0, 0, Some(PieceKind::T)).unwrap();
    grid.set(1, 1, Some(PieceKind::J)).unwrap();
    fill_row(&mut grid, 2, PieceKind::I);
    grid.set(3, 3, Some(PieceKind::O)).unwrap();

    grid.collapse_row(2).unwrap();

    // Row 0 is empty, rows 0..2 moved down by one, row 3 untouched.
    assert!(grid.row(0).unwrap().iter().all(|c| c.is_none()));
    assert_eq!(grid.get(0, 1), Ok(Some(PieceKind::T)));
    assert_eq!(grid.get(1, 2), Ok(Some(PieceKind::J)));
    assert_eq!(grid.get(3, 3), Ok(Some(PieceKind::O)));
    assert_eq!(grid.filled_count(), 3);
}

#[test]
fn test_collapse_of_full_row_removes_exactly_width_cells() {
    let mut grid = Grid::new(15, 30);
    fill_row(&mut grid, 29, PieceKind::I);
    fill_row(&mut grid, 27, PieceKind::O);
    grid.set(4, 28, Some(PieceKind::T)).unwrap();
    let before = grid.filled_count();

    grid.collapse_row(29).unwrap();

    assert_eq!(grid.filled_count(), before - 15);
    assert!(grid.is_row_complete(28));
    assert_eq!(grid.get(4, 29), Ok(Some(PieceKind::T)));
}

#[test]
fn test_collapse_top_row_just_empties_it() {
    let mut grid = Grid::new(4, 3);
    fill_row(&mut grid, 0, PieceKind::L);
    grid.set(1, 2, Some(PieceKind::S)).unwrap();

    grid.collapse_row(0).unwrap();

    assert!(grid.row(0).unwrap().iter().all(|c| c.is_none()));
    assert_eq!(grid.get(1, 2), Ok(Some(PieceKind::S)));
    assert!(grid.collapse_row(3).is_err());
}

#[test]
fn test_lock_cells_is_all_or_nothing() {
    let mut grid = Grid::new(4, 4);
    grid.set(3, 3, Some(PieceKind::O)).unwrap();

    assert!(!grid.lock_cells(&[(0, 3), (1, 3), (2, 3), (3, 3)], PieceKind::I));
    assert_eq!(grid.filled_count(), 1);

    assert!(!grid.lock_cells(&[(0, 3), (-1, 3)], PieceKind::I));
    assert_eq!(grid.filled_count(), 1);

    assert!(grid.lock_cells(&[(0, 3), (1, 3), (2, 3)], PieceKind::I));
    assert!(grid.is_row_complete(3));

    grid.clear();
    assert_eq!(grid.filled_count(), 0);
}
