//! Grid quality metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Rows used | Last row touched by any footprint + 1 |
//! | Occupied cells | Cells covered by a footprint |
//! | Idle cells | Uncovered cells within the used rows |
//! | Utilization | Occupied / (rows used × courts) |
//! | Overflow rows | Used rows past the end of the day |

use crate::models::{Roster, Schedule, Settings};

/// Grid performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct GridKpi {
    /// Rows from row 0 through the last used row.
    pub rows_used: usize,
    /// Cells covered by any round.
    pub occupied_cells: usize,
    /// Free cells inside the used rows.
    pub idle_cells: usize,
    /// Fraction of used-row cells that are occupied (0.0..1.0).
    pub utilization: f64,
    /// Rounds with a placement.
    pub scheduled_rounds: usize,
    /// Roster rounds without a placement.
    pub unscheduled_rounds: usize,
    /// Used rows beyond the displayable day.
    pub overflow_rows: usize,
    /// Time of day at which the last used row ends (`HH:MM`), if any.
    pub finish_time: Option<String>,
}

impl GridKpi {
    /// Computes KPIs for a schedule.
    pub fn calculate(schedule: &Schedule, roster: &Roster, settings: &Settings) -> Self {
        let lanes = settings.court_count;
        let rows_used = schedule.max_row(roster, lanes).map_or(0, |r| r + 1);
        let occupied_cells = schedule.occupancy(roster, lanes).len();
        let capacity = rows_used * lanes;

        let utilization = if capacity == 0 {
            0.0
        } else {
            occupied_cells as f64 / capacity as f64
        };

        let scheduled_rounds = schedule
            .iter()
            .filter(|e| roster.contains_round(&e.round_id))
            .count();

        Self {
            rows_used,
            occupied_cells,
            idle_cells: capacity.saturating_sub(occupied_cells),
            utilization,
            scheduled_rounds,
            unscheduled_rounds: roster.round_count() - scheduled_rounds,
            overflow_rows: rows_used.saturating_sub(settings.row_count()),
            finish_time: (rows_used > 0).then(|| settings.row_label(rows_used)),
        }
    }

    /// Whether everything is placed and fits in the day.
    pub fn is_complete(&self) -> bool {
        self.unscheduled_rounds == 0 && self.overflow_rows == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Round, ScheduledRound, Series, TimeOfDay};

    fn sample_roster() -> Roster {
        Roster::from_series(vec![
            Series::new("A", "Alpha")
                .with_round(Round::new("A1", 4))
                .with_round(Round::new("A2", 2)),
            Series::new("B", "Beta").with_round(Round::new("B1", 2)),
        ])
        .unwrap()
    }

    #[test]
    fn test_kpi_basic() {
        let roster = sample_roster();
        let s = Schedule::from_entries(vec![
            ScheduledRound::new("A1", 0, 0),
            ScheduledRound::new("A2", 1, 0),
        ]);
        let kpi = GridKpi::calculate(&s, &roster, &Settings::default());
        assert_eq!(kpi.rows_used, 2);
        assert_eq!(kpi.occupied_cells, 6);
        assert_eq!(kpi.idle_cells, 10);
        assert!((kpi.utilization - 0.375).abs() < 1e-10);
        assert_eq!(kpi.scheduled_rounds, 2);
        assert_eq!(kpi.unscheduled_rounds, 1);
        assert_eq!(kpi.finish_time.as_deref(), Some("10:00"));
        assert!(!kpi.is_complete());
    }

    #[test]
    fn test_kpi_overflow() {
        let roster = sample_roster();
        let settings = Settings::default()
            .with_day(TimeOfDay::new(9, 0).unwrap(), TimeOfDay::new(10, 0).unwrap());
        let s = Schedule::from_entries(vec![
            ScheduledRound::new("A1", 0, 0),
            ScheduledRound::new("A2", 2, 0),
            ScheduledRound::new("B1", 0, 4),
        ]);
        let kpi = GridKpi::calculate(&s, &roster, &settings);
        assert_eq!(kpi.rows_used, 3);
        assert_eq!(kpi.overflow_rows, 1);
        assert!(!kpi.is_complete());
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = GridKpi::calculate(&Schedule::new(), &sample_roster(), &Settings::default());
        assert_eq!(kpi.rows_used, 0);
        assert_eq!(kpi.occupied_cells, 0);
        assert!((kpi.utilization - 0.0).abs() < 1e-10);
        assert_eq!(kpi.unscheduled_rounds, 3);
        assert!(kpi.finish_time.is_none());
    }
}
