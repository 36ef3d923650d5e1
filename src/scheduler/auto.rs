//! Greedy auto-packer.
//!
//! # Algorithm
//!
//! 1. Flatten all rounds and sort by (series display name, round number).
//! 2. Track per series the first row it may use next (`min_row`) and per
//!    row the series already placed there.
//! 3. For each round, starting at its series' `min_row`, scan the courts
//!    left to right for a start whose footprint is free and whose rows
//!    hold no round of the same series. Nothing fits: try the next row.
//! 4. Record the placement, mark its rows and advance `min_row` past the
//!    last row it spans.
//!
//! Start columns follow [`grid::fits_in_row`], so rounds that fit in a row
//! never wrap.
//!
//! # Complexity
//! O(n · r · c · s) where n = rounds, r = rows scanned per round,
//! c = courts, s = span.
//!
//! Greedy per round: the result is valid but not guaranteed to use the
//! fewest rows.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::grid::{self, Cell};
use crate::models::{Roster, Schedule, ScheduledRound};

/// Greedy whole-roster packer.
///
/// # Example
///
/// ```
/// use u_court_grid::models::{Roster, Round, Series};
/// use u_court_grid::scheduler::AutoScheduler;
///
/// let roster = Roster::from_series(vec![
///     Series::new("S1", "Singles")
///         .with_round(Round::new("S1-R1", 4))
///         .with_round(Round::new("S1-R2", 2)),
/// ])
/// .unwrap();
///
/// let schedule = AutoScheduler::new().schedule(&roster, 8);
/// assert_eq!(schedule.get("S1-R1").unwrap().row, 0);
/// assert_eq!(schedule.get("S1-R2").unwrap().row, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoScheduler;

impl AutoScheduler {
    /// Creates a packer.
    pub fn new() -> Self {
        Self
    }

    /// Packs every round of the roster onto a grid of `lanes` courts.
    pub fn schedule(&self, roster: &Roster, lanes: usize) -> Schedule {
        let mut schedule = Schedule::new();
        if lanes == 0 {
            return schedule;
        }

        let mut order: Vec<_> = roster
            .series()
            .iter()
            .flat_map(|s| {
                let name = s.display_name();
                s.rounds.iter().map(move |r| (name.clone(), s, r))
            })
            .collect();
        order.sort_by(|a, b| a.0.cmp(&b.0).then(a.2.round_number.cmp(&b.2.round_number)));

        let mut min_row: HashMap<&str, usize> = HashMap::new();
        let mut row_series: HashMap<usize, HashSet<&str>> = HashMap::new();
        let mut occupied: HashSet<Cell> = HashSet::new();

        for (_, series, round) in order {
            let span = round.span();
            let series_id = series.id.as_str();
            let mut row = min_row.get(series_id).copied().unwrap_or(0);

            let (col, cells) = loop {
                let found = (0..lanes)
                    .filter(|&col| grid::fits_in_row(col, span, lanes))
                    .map(|col| (col, grid::footprint(row, col, span, lanes)))
                    .find(|(_, cells)| {
                        cells.iter().all(|c| {
                            !occupied.contains(c)
                                && !row_series
                                    .get(&c.row)
                                    .is_some_and(|set| set.contains(series_id))
                        })
                    });
                if let Some(hit) = found {
                    break hit;
                }
                row += 1;
            };

            let last = cells.last().map_or(row, |c| c.row);
            for cell in &cells {
                row_series.entry(cell.row).or_default().insert(series_id);
            }
            occupied.extend(cells);
            min_row.insert(series_id, last + 1);
            schedule.set(ScheduledRound::new(round.id.clone(), row, col));
        }

        debug!(
            rounds = schedule.len(),
            rows = schedule.max_row(roster, lanes).map_or(0, |r| r + 1),
            "auto-scheduled roster"
        );
        schedule
    }
}
