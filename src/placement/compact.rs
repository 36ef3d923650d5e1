//! Compaction: close an empty cell by pulling later rounds back one cell.

use super::{PlacementContext, Transform};
use crate::grid::{self, Cell};
use crate::models::Schedule;
use crate::validation::{Rejection, RejectionKind};

/// Removes the empty cell `(row, col)` from the grid.
///
/// Every round starting after the cell (by linear index) moves back one
/// cell; rounds starting before it stay. The shifted result is not
/// re-validated.
pub fn compact(ctx: &PlacementContext<'_>, row: usize, col: usize) -> Transform {
    ctx.check_extent(row, col, 1)?;
    let lanes = ctx.lanes;
    let cell = Cell::new(row, col);

    if let Some(owner) = ctx.schedule.round_at(cell, ctx.roster, lanes) {
        return Err(Rejection::new(
            RejectionKind::CellNotEmpty,
            format!(
                "Slot {}, court {} is occupied by round '{}'",
                row + 1,
                col + 1,
                owner.round_id
            ),
        ));
    }

    let t = grid::linear_index(row, col, lanes);
    let (shift, keep): (Vec<_>, Vec<_>) = ctx
        .schedule
        .iter()
        .partition(|e| e.start_index(lanes) > t);

    let shifted = shift
        .into_iter()
        .map(|e| e.at_index(e.start_index(lanes) - 1, lanes));
    Ok(Schedule::from_entries(
        keep.into_iter().cloned().chain(shifted),
    ))
}
