//! Cascading insertion.
//!
//! Drops a round at a target cell and pushes everything in its way, and
//! everything after it, forward by the inserted round's span.
//!
//! # Algorithm
//!
//! 1. Compute the target footprint and drop the round's old placement.
//! 2. For every other round count the footprint cells shared with the
//!    target. A count strictly between zero and the round's size means the
//!    target would split it: reject.
//! 3. No shared cells at all: place directly.
//! 4. Otherwise shift every round that shares cells with the target or
//!    starts at or after the target start: `start += span` (linear index).
//!    Shifting happens last-in-grid first.
//!
//! Rounds left in place all end before the target start, and shifted
//! rounds keep their relative order, so no two footprints can collide
//! after the shift.

use std::collections::HashSet;

use super::{PlacementContext, Transform};
use crate::grid::{self, Cell};
use crate::models::{Schedule, ScheduledRound};
use crate::validation::{Rejection, RejectionKind};

/// Inserts a round at `(row, col)`, shifting conflicting and later rounds.
pub fn place_with_push(
    ctx: &PlacementContext<'_>,
    round_id: &str,
    row: usize,
    col: usize,
) -> Transform {
    let span = ctx.span_of(round_id)?;
    ctx.check_extent(row, col, span)?;
    let lanes = ctx.lanes;

    let target: HashSet<Cell> = grid::footprint(row, col, span, lanes).into_iter().collect();
    let target_start = grid::linear_index(row, col, lanes);
    let working = ctx.schedule.without(round_id);

    let mut keep = Vec::new();
    let mut shift = Vec::new();
    let mut any_hit = false;

    for (entry, cells) in working.footprints(ctx.roster, lanes) {
        let hits = cells.iter().filter(|c| target.contains(c)).count();
        if hits > 0 && hits < cells.len() {
            return Err(Rejection::new(
                RejectionKind::SplitsRound,
                format!(
                    "Slot {}, court {} lands inside round '{}'",
                    row + 1,
                    col + 1,
                    entry.round_id
                ),
            ));
        }
        any_hit |= hits > 0;
        if hits > 0 || entry.start_index(lanes) >= target_start {
            shift.push(entry);
        } else {
            keep.push(entry);
        }
    }

    let inserted = ScheduledRound::new(round_id, row, col);
    if !any_hit {
        let mut next = working.clone();
        next.set(inserted);
        return Ok(next);
    }

    shift.sort_by_key(|e| std::cmp::Reverse(e.start_index(lanes)));
    let mut shifted = Vec::with_capacity(shift.len());
    for entry in shift {
        let own_span = ctx.roster.span(&entry.round_id).unwrap_or(0);
        let start = entry
            .start_index(lanes)
            .checked_add(span)
            .filter(|s| s.checked_add(own_span).is_some())
            .ok_or_else(|| {
                Rejection::new(
                    RejectionKind::CellOutOfBounds,
                    format!("Pushing round '{}' runs past the grid", entry.round_id),
                )
            })?;
        shifted.push(entry.at_index(start, lanes));
    }

    let entries = keep
        .into_iter()
        .cloned()
        .chain(std::iter::once(inserted))
        .chain(shifted);
    Ok(Schedule::from_entries(entries))
}
