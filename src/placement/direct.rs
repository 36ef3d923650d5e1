//! Direct placement, append placement and simple edits.
//!
//! These operations perform no legality checks beyond "the round exists"
//! and "the start column is inside the grid"; callers gate hand placements
//! with [`can_place`](crate::validation::can_place).

use super::{PlacementContext, Transform};
use crate::grid;
use crate::models::{Schedule, ScheduledRound};
use crate::validation::{Rejection, RejectionKind};

/// Rows scanned past the last used row when appending.
pub const APPEND_SCAN_ROWS: usize = 5;

/// Places a round at `(row, col)`, replacing any previous placement.
pub fn place(ctx: &PlacementContext<'_>, round_id: &str, row: usize, col: usize) -> Transform {
    let span = ctx.span_of(round_id)?;
    ctx.check_extent(row, col, span)?;
    let mut next = ctx.schedule.clone();
    next.set(ScheduledRound::new(round_id, row, col));
    Ok(next)
}

/// Places a round at the first free footprint after the used area.
///
/// Scans rows `max_row..=max_row + APPEND_SCAN_ROWS` left to right for a
/// start cell whose footprint touches no other round. Falls back to column
/// 0 of the row after the last used one.
pub fn place_next(ctx: &PlacementContext<'_>, round_id: &str) -> Transform {
    let span = ctx.span_of(round_id)?;
    let lanes = ctx.lanes;
    let others = ctx.schedule.without(round_id);

    let Some(max_row) = others.max_row(ctx.roster, lanes) else {
        return place(ctx, round_id, 0, 0);
    };
    let occupied = others.occupancy(ctx.roster, lanes);

    for row in max_row..=max_row.saturating_add(APPEND_SCAN_ROWS) {
        for col in 0..lanes {
            if !grid::fits_in_row(col, span, lanes)
                || grid::checked_end(row, col, span, lanes).is_none()
            {
                continue;
            }
            if grid::footprint(row, col, span, lanes).iter().all(|c| !occupied.contains_key(c)) {
                return place(ctx, round_id, row, col);
            }
        }
    }
    place(ctx, round_id, max_row.saturating_add(1), 0)
}

/// Moves a scheduled round to a new start cell without validation.
///
/// The entry keeps its position in the schedule.
pub fn move_round(ctx: &PlacementContext<'_>, round_id: &str, row: usize, col: usize) -> Transform {
    if !ctx.schedule.contains(round_id) {
        return Err(not_scheduled(round_id));
    }
    let span = ctx.span_of(round_id)?;
    ctx.check_extent(row, col, span)?;
    Ok(Schedule::from_entries(ctx.schedule.iter().map(|e| {
        if e.round_id == round_id {
            ScheduledRound::new(round_id, row, col)
        } else {
            e.clone()
        }
    })))
}

/// Removes a round from the schedule.
pub fn unschedule(ctx: &PlacementContext<'_>, round_id: &str) -> Transform {
    let mut next = ctx.schedule.clone();
    next.remove(round_id).ok_or_else(|| not_scheduled(round_id))?;
    Ok(next)
}

/// Empties the schedule.
pub fn clear(_ctx: &PlacementContext<'_>) -> Transform {
    Ok(Schedule::new())
}

fn not_scheduled(round_id: &str) -> Rejection {
    Rejection::new(
        RejectionKind::RoundNotFound,
        format!("Round '{round_id}' is not scheduled"),
    )
}
