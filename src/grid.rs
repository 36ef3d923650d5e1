//! Grid cell addressing.
//!
//! The grid is row-major: row = time slot, column = court. Every cell has a
//! linear index `row * lanes + col`, and a round's footprint is the run of
//! `span` consecutive linear indices starting at its start cell, so a round
//! that does not fit in the remainder of a row continues at column 0 of the
//! next row.

use serde::{Deserialize, Serialize};

/// A single (row, column) grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Time slot index (0-based).
    pub row: usize,
    /// Court index (0-based).
    pub col: usize,
}

impl Cell {
    /// Creates a cell.
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Linear index of this cell in a grid of `lanes` columns.
    #[inline]
    pub fn linear(&self, lanes: usize) -> usize {
        linear_index(self.row, self.col, lanes)
    }

    /// Inverse of [`Cell::linear`].
    #[inline]
    pub fn from_linear(index: usize, lanes: usize) -> Self {
        let (row, col) = from_linear_index(index, lanes);
        Self { row, col }
    }
}

/// `row * lanes + col`.
#[inline]
pub fn linear_index(row: usize, col: usize, lanes: usize) -> usize {
    row * lanes + col
}

/// Splits a linear index back into `(row, col)`.
///
/// `lanes` must be non-zero.
#[inline]
pub fn from_linear_index(index: usize, lanes: usize) -> (usize, usize) {
    (index / lanes, index % lanes)
}

/// Ordered cells covered by a round of `span` courts starting at
/// `(start_row, start_col)`.
///
/// The cells are the `span` linear indices from the start cell on, so the
/// run wraps to column 0 of the next row when it reaches `lanes`. An empty
/// grid has no cells.
///
/// ```
/// use u_court_grid::grid::{footprint, Cell};
///
/// assert_eq!(
///     footprint(0, 6, 4, 8),
///     vec![Cell::new(0, 6), Cell::new(0, 7), Cell::new(1, 0), Cell::new(1, 1)]
/// );
/// ```
pub fn footprint(start_row: usize, start_col: usize, span: usize, lanes: usize) -> Vec<Cell> {
    if lanes == 0 {
        return Vec::new();
    }
    let start = linear_index(start_row, start_col, lanes);
    (0..span).map(|k| Cell::from_linear(start + k, lanes)).collect()
}

/// Linear index one past the last cell of a footprint, or `None` when the
/// footprint does not fit in the addressable grid.
#[inline]
pub fn checked_end(start_row: usize, start_col: usize, span: usize, lanes: usize) -> Option<usize> {
    start_row
        .checked_mul(lanes)?
        .checked_add(start_col)?
        .checked_add(span)
}

/// Whether a round of `span` courts may be started at `col`.
///
/// Rounds that fit within a row must not wrap; rounds wider than the grid
/// can only start at column 0.
#[inline]
pub fn fits_in_row(col: usize, span: usize, lanes: usize) -> bool {
    if span > lanes {
        col == 0
    } else {
        col.checked_add(span).is_some_and(|end| end <= lanes)
    }
}

/// Last row touched by a footprint starting at `start_row`/`start_col`.
#[inline]
pub fn last_row(start_row: usize, start_col: usize, span: usize, lanes: usize) -> usize {
    if span == 0 {
        return start_row;
    }
    let end = linear_index(start_row, start_col, lanes) + span - 1;
    end / lanes
}
