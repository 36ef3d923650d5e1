//! Schedule transforms.
//!
//! Every operation here is a pure function from the current grid state to
//! either a new [`Schedule`] or a [`Rejection`]. None of them touch
//! history; the [`Planner`](crate::planner::Planner) commits results and
//! records undo snapshots.
//!
//! | Operation | Validates legality | Moves other rounds |
//! |-----------|-------------------|--------------------|
//! | [`place`] | no | no |
//! | [`place_next`] | first free footprint | no |
//! | [`move_round`] | no | no |
//! | [`place_with_push`] | rejects splitting a round | forward by span |
//! | [`compact`] | target must be empty | back by one cell |

mod cascade;
mod compact;
mod direct;

pub use cascade::place_with_push;
pub use compact::compact;
pub use direct::{clear, move_round, place, place_next, unschedule, APPEND_SCAN_ROWS};

use crate::grid;
use crate::models::{Roster, Schedule};
use crate::validation::{Rejection, RejectionKind};

/// Result of a schedule transform.
pub type Transform = Result<Schedule, Rejection>;

/// Read-only view of the grid an operation runs against.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    /// Series and rounds (spans, series membership, numbering).
    pub roster: &'a Roster,
    /// Current placements.
    pub schedule: &'a Schedule,
    /// Number of courts.
    pub lanes: usize,
}

impl<'a> PlacementContext<'a> {
    /// Creates a context.
    pub fn new(roster: &'a Roster, schedule: &'a Schedule, lanes: usize) -> Self {
        Self {
            roster,
            schedule,
            lanes,
        }
    }

    /// Span of a known round.
    pub(crate) fn span_of(&self, round_id: &str) -> Result<usize, Rejection> {
        self.roster
            .span(round_id)
            .ok_or_else(|| Rejection::round_not_found(round_id))
    }

    /// Rejects start columns outside the grid.
    pub(crate) fn check_column(&self, col: usize) -> Result<(), Rejection> {
        if col >= self.lanes {
            return Err(Rejection::new(
                RejectionKind::CellOutOfBounds,
                format!(
                    "Court {} is outside the {} courts",
                    col.saturating_add(1),
                    self.lanes
                ),
            ));
        }
        Ok(())
    }

    /// Rejects start cells whose footprint runs past the addressable grid.
    pub(crate) fn check_extent(&self, row: usize, col: usize, span: usize) -> Result<(), Rejection> {
        self.check_column(col)?;
        if grid::checked_end(row, col, span, self.lanes).is_none() {
            return Err(Rejection::new(
                RejectionKind::CellOutOfBounds,
                format!("Slot {} is outside the grid", row.saturating_add(1)),
            ));
        }
        Ok(())
    }
}
