//! Planning session.
//!
//! A [`Planner`] owns one roster, its settings, the current schedule and
//! the undo history. Every mutating call runs a pure transform from
//! [`placement`](crate::placement) or [`scheduler`](crate::scheduler) and
//! then commits it:
//!
//! - rejected: nothing changes, a warning is logged
//! - same placements as before: nothing changes, no history entry
//! - otherwise: the old schedule is pushed to history and replaced
//!
//! The planner is not synchronized; hosts that share it between actors
//! must serialize calls.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::grid::{self, Cell};
use crate::history::History;
use crate::models::{Roster, Round, Schedule, ScheduledRound, Series, Settings};
use crate::placement::{self, PlacementContext, Transform};
use crate::scheduler::{AutoScheduler, GridKpi};
use crate::validation::{self, PlacementResult, Rejection, Violation};

/// Result of a mutating planner call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The schedule changed and the previous one was pushed to history.
    Applied,
    /// The operation succeeded but produced the same placements.
    Unchanged,
    /// The operation was refused.
    Rejected(Rejection),
}

impl Outcome {
    /// Whether the schedule changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    /// Whether the operation was refused.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// The rejection, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

/// A scheduling session: roster, settings, schedule and undo history.
#[derive(Debug, Clone)]
pub struct Planner {
    roster: Roster,
    settings: Settings,
    schedule: Schedule,
    history: History,
}

impl Planner {
    /// Creates a planner with an empty roster.
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_roster(settings, Roster::new())
    }

    /// Creates a planner for an existing roster.
    pub fn with_roster(settings: Settings, roster: Roster) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            roster,
            settings,
            schedule: Schedule::new(),
            history: History::new(),
        })
    }

    /// Restores a session from saved parts. History starts empty; entries
    /// for rounds missing from the roster or starting outside the grid are
    /// dropped.
    pub fn from_parts(settings: Settings, roster: Roster, schedule: Schedule) -> Result<Self> {
        let mut planner = Self::with_roster(settings, roster)?;
        let mut schedule = schedule;
        let before = schedule.len();
        schedule.retain(|e| {
            planner.roster.contains_round(&e.round_id) && planner.fits_grid(e, &planner.settings)
        });
        if schedule.len() != before {
            warn!(
                dropped = before - schedule.len(),
                "dropped placements of unknown or off-grid rounds"
            );
        }
        planner.schedule = schedule;
        Ok(planner)
    }

    /// Whether a placement starts on a court of `settings` and its footprint
    /// stays addressable.
    fn fits_grid(&self, entry: &ScheduledRound, settings: &Settings) -> bool {
        let span = self.roster.span(&entry.round_id).unwrap_or(0);
        entry.start_col < settings.court_count
            && grid::checked_end(entry.row, entry.start_col, span, settings.court_count).is_some()
    }

    // ---- accessors ---------------------------------------------------------

    /// Series and rounds.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Grid settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current placements.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of undo steps available.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether [`Planner::undo`] would do anything.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Placement of a round.
    pub fn placement_of(&self, round_id: &str) -> Option<&ScheduledRound> {
        self.schedule.get(round_id)
    }

    /// Round covering a cell.
    pub fn round_at(&self, row: usize, col: usize) -> Option<&ScheduledRound> {
        self.schedule
            .round_at(Cell::new(row, col), &self.roster, self.settings.court_count)
    }

    /// Rounds not on the grid, in roster order.
    pub fn unscheduled_rounds(&self) -> Vec<&Round> {
        self.roster
            .rounds()
            .filter(|r| !self.schedule.contains(&r.id))
            .collect()
    }

    /// Invariant violations in the current schedule.
    pub fn audit(&self) -> Vec<Violation> {
        validation::audit_schedule(&self.schedule, &self.roster, &self.settings)
    }

    /// Grid KPIs for the current schedule.
    pub fn kpi(&self) -> GridKpi {
        GridKpi::calculate(&self.schedule, &self.roster, &self.settings)
    }

    fn ctx(&self) -> PlacementContext<'_> {
        PlacementContext::new(&self.roster, &self.schedule, self.settings.court_count)
    }

    // ---- roster and settings -----------------------------------------------

    /// Adds a series.
    pub fn add_series(&mut self, series: Series) -> Result<()> {
        self.roster.add_series(series)
    }

    /// Appends a round to a series.
    pub fn add_round(&mut self, series_id: &str, round: Round) -> Result<()> {
        self.roster.add_round(series_id, round)
    }

    /// Renames a series.
    pub fn rename_series(&mut self, series_id: &str, names: Vec<String>) -> Result<()> {
        self.roster.rename_series(series_id, names)
    }

    /// Removes a round and its placement, including from history snapshots.
    pub fn remove_round(&mut self, round_id: &str) -> Result<Round> {
        let removed = self.roster.remove_round(round_id)?;
        self.forget_rounds(&HashSet::from([removed.id.as_str()]));
        Ok(removed)
    }

    /// Removes a series with all its rounds and their placements.
    pub fn remove_series(&mut self, series_id: &str) -> Result<Series> {
        let removed = self.roster.remove_series(series_id)?;
        let ids: HashSet<&str> = removed.rounds.iter().map(|r| r.id.as_str()).collect();
        self.forget_rounds(&ids);
        Ok(removed)
    }

    fn forget_rounds(&mut self, ids: &HashSet<&str>) {
        self.schedule.retain(|e| !ids.contains(e.round_id.as_str()));
        self.history
            .retain_entries(|e| !ids.contains(e.round_id.as_str()));
    }

    /// Replaces the settings. Placements are kept as-is.
    ///
    /// Fails when a placed round would start past the last court.
    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        if let Some(entry) = self.schedule.iter().find(|e| !self.fits_grid(e, &settings)) {
            return Err(Error::InvalidSettings(format!(
                "round '{}' starts at court {}, outside {} courts",
                entry.round_id,
                entry.start_col.saturating_add(1),
                settings.court_count
            )));
        }
        self.settings = settings;
        Ok(())
    }

    // ---- placement ---------------------------------------------------------

    /// Checks whether a round may start at `(row, col)`.
    pub fn can_place(
        &self,
        round_id: &str,
        row: usize,
        col: usize,
        exclude: Option<&str>,
    ) -> PlacementResult {
        validation::can_place(&self.ctx(), round_id, row, col, exclude)
    }

    /// Places a round without legality checks.
    pub fn place(&mut self, round_id: &str, row: usize, col: usize) -> Outcome {
        let result = placement::place(&self.ctx(), round_id, row, col);
        self.commit("place", Some(round_id), result)
    }

    /// Inserts a round, pushing conflicting and later rounds forward.
    pub fn place_with_push(&mut self, round_id: &str, row: usize, col: usize) -> Outcome {
        let result = placement::place_with_push(&self.ctx(), round_id, row, col);
        self.commit("place_with_push", Some(round_id), result)
    }

    /// Places a round at the next free footprint.
    pub fn place_next(&mut self, round_id: &str) -> Outcome {
        let result = placement::place_next(&self.ctx(), round_id);
        self.commit("place_next", Some(round_id), result)
    }

    /// Moves a scheduled round without legality checks.
    pub fn move_round(&mut self, round_id: &str, row: usize, col: usize) -> Outcome {
        let result = placement::move_round(&self.ctx(), round_id, row, col);
        self.commit("move_round", Some(round_id), result)
    }

    /// Removes a round from the grid.
    pub fn unschedule(&mut self, round_id: &str) -> Outcome {
        let result = placement::unschedule(&self.ctx(), round_id);
        self.commit("unschedule", Some(round_id), result)
    }

    /// Removes every placement.
    pub fn clear(&mut self) -> Outcome {
        let result = placement::clear(&self.ctx());
        self.commit("clear", None, result)
    }

    /// Closes the empty cell `(row, col)`.
    pub fn compact(&mut self, row: usize, col: usize) -> Outcome {
        let result = placement::compact(&self.ctx(), row, col);
        self.commit("compact", None, result)
    }

    /// Replaces the schedule with a greedy packing of the whole roster.
    pub fn auto_schedule(&mut self) -> Outcome {
        let next = AutoScheduler::new().schedule(&self.roster, self.settings.court_count);
        self.commit("auto_schedule", None, Ok(next))
    }

    /// Restores the schedule from before the last applied mutation.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.schedule = previous;
                debug!(history = self.history.len(), "undo");
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, op: &'static str, round_id: Option<&str>, result: Transform) -> Outcome {
        match result {
            Err(rejection) => {
                warn!(
                    op,
                    round_id = round_id.unwrap_or("-"),
                    kind = ?rejection.kind,
                    reason = %rejection,
                    "operation rejected"
                );
                Outcome::Rejected(rejection)
            }
            Ok(next) if next.same_placements(&self.schedule) => {
                debug!(op, "no change");
                Outcome::Unchanged
            }
            Ok(next) => {
                let previous = std::mem::replace(&mut self.schedule, next);
                self.history.push(previous);
                debug!(
                    op,
                    entries = self.schedule.len(),
                    history = self.history.len(),
                    "applied"
                );
                Outcome::Applied
            }
        }
    }
}
