//! Placement validation and schedule audits.
//!
//! [`can_place`] is the read-only gate used before a hand placement. It
//! runs its checks in a fixed order and reports the first failure:
//! 1. The round exists
//! 2. The round fits in the remaining courts of the row (no wrapping)
//! 3. None of those courts is taken by another round
//! 4. The series has no other round on that row
//! 5. Series order is kept (earlier rounds on earlier or equal rows)
//!
//! [`audit_schedule`] re-checks a whole schedule against the grid
//! invariants and collects every violation.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::models::{Roster, Schedule, Settings};
use crate::placement::PlacementContext;

/// Placement check result.
pub type PlacementResult = Result<(), Rejection>;

/// Why a placement or operation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Rejection category.
    pub kind: RejectionKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of rejected placements and degenerate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// The round ID is unknown (or the round is not scheduled, where required).
    RoundNotFound,
    /// Not enough consecutive courts left in the row.
    InsufficientLanes,
    /// A target court is taken by another round.
    CellOccupied,
    /// The series already has a round on the target row.
    SeriesRowConflict,
    /// The placement breaks series round order.
    OrderViolation,
    /// A cascading insertion would land inside an existing round.
    SplitsRound,
    /// Compaction target is covered by a round.
    CellNotEmpty,
    /// The cell lies outside the grid columns.
    CellOutOfBounds,
}

impl Rejection {
    pub(crate) fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn round_not_found(round_id: &str) -> Self {
        Self::new(
            RejectionKind::RoundNotFound,
            format!("Round '{round_id}' not found"),
        )
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks whether `round_id` may start at `(row, col)`.
///
/// `exclude` names one more round to ignore, typically the round being
/// dragged when it is still present at its old position.
pub fn can_place(
    ctx: &PlacementContext<'_>,
    round_id: &str,
    row: usize,
    col: usize,
    exclude: Option<&str>,
) -> PlacementResult {
    let lanes = ctx.lanes;
    let (series, round) = ctx
        .roster
        .lookup(round_id)
        .ok_or_else(|| Rejection::round_not_found(round_id))?;
    let span = round.span();

    let Some(end_col) = col.checked_add(span - 1).filter(|&end| end < lanes) else {
        return Err(Rejection::new(
            RejectionKind::InsufficientLanes,
            format!(
                "{} needs {span} consecutive courts; only {} available from court {}",
                round.display_label(),
                lanes.saturating_sub(col),
                col.saturating_add(1)
            ),
        ));
    };
    ctx.check_extent(row, col, span)?;

    let is_other = |id: &str| id != round_id && Some(id) != exclude;

    let occupied = ctx.schedule.occupancy(ctx.roster, lanes);
    for c in col..=end_col {
        if let Some(&other) = occupied.get(&Cell::new(row, c)) {
            if is_other(other) {
                return Err(Rejection::new(
                    RejectionKind::CellOccupied,
                    format!("Court {} is already taken by {}", c + 1, describe(ctx.roster, other)),
                ));
            }
        }
    }

    let siblings: Vec<_> = ctx
        .schedule
        .iter()
        .filter(|e| is_other(e.round_id.as_str()))
        .filter_map(|e| {
            let (s, r) = ctx.roster.lookup(&e.round_id)?;
            (s.id == series.id).then_some((e, r))
        })
        .collect();

    for (entry, other) in &siblings {
        let last = crate::grid::last_row(entry.row, entry.start_col, other.span(), lanes);
        if (entry.row..=last).contains(&row) {
            return Err(Rejection::new(
                RejectionKind::SeriesRowConflict,
                format!(
                    "{} already has {} in this time slot",
                    series.display_name(),
                    other.display_label()
                ),
            ));
        }
    }

    for (entry, other) in &siblings {
        if other.round_number < round.round_number && entry.row > row {
            return Err(Rejection::new(
                RejectionKind::OrderViolation,
                format!(
                    "Round {} must be scheduled after round {} (slot {})",
                    round.round_number,
                    other.round_number,
                    entry.row + 1
                ),
            ));
        }
        if other.round_number > round.round_number && entry.row < row {
            return Err(Rejection::new(
                RejectionKind::OrderViolation,
                format!(
                    "Round {} must be scheduled before round {} (slot {})",
                    round.round_number,
                    other.round_number,
                    entry.row + 1
                ),
            ));
        }
    }

    Ok(())
}

fn describe(roster: &Roster, round_id: &str) -> String {
    match roster.lookup(round_id) {
        Some((s, r)) => format!("{} {}", s.display_name(), r.display_label()),
        None => format!("round '{round_id}'"),
    }
}

/// A broken invariant found by [`audit_schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Offending round ID.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two footprints share a cell.
    CellOverlap,
    /// Two rounds of a series share a row.
    SeriesRowConflict,
    /// A lower-numbered round starts on a later row.
    OrderViolation,
    /// The entry names a round missing from the roster.
    UnknownRound,
    /// The start column is outside the grid.
    OutOfBounds,
    /// The footprint runs past the end of the day.
    BeyondDay,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
        severity: i32,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Checks every entry of a schedule against the grid invariants.
///
/// Reports overlaps, series row conflicts, order inversions, unknown
/// rounds, out-of-grid starts and rounds running past the displayable day.
pub fn audit_schedule(schedule: &Schedule, roster: &Roster, settings: &Settings) -> Vec<Violation> {
    let lanes = settings.court_count;
    let mut violations = Vec::new();
    let mut owner: HashMap<Cell, &str> = HashMap::new();
    let mut series_rows: HashMap<(&str, usize), &str> = HashMap::new();

    for (entry, cells) in schedule.footprints(roster, lanes) {
        let id = entry.round_id.as_str();
        let Some((series, _)) = roster.lookup(id) else {
            violations.push(Violation::new(
                ViolationType::UnknownRound,
                id,
                format!("Scheduled round '{id}' is not in the roster"),
                90,
            ));
            continue;
        };
        if entry.start_col >= lanes {
            violations.push(Violation::new(
                ViolationType::OutOfBounds,
                id,
                format!("Start court {} exceeds {lanes} courts", entry.start_col + 1),
                90,
            ));
        }

        let mut reported = HashSet::new();
        for cell in &cells {
            if let Some(prev) = owner.insert(*cell, id) {
                if reported.insert(prev) {
                    violations.push(Violation::new(
                        ViolationType::CellOverlap,
                        id,
                        format!("Overlaps '{prev}' at slot {}, court {}", cell.row + 1, cell.col + 1),
                        95,
                    ));
                }
            }
        }

        let rows: HashSet<usize> = cells.iter().map(|c| c.row).collect();
        for row in rows {
            if let Some(prev) = series_rows.insert((series.id.as_str(), row), id) {
                violations.push(Violation::new(
                    ViolationType::SeriesRowConflict,
                    id,
                    format!("Shares slot {} with '{prev}' of the same series", row + 1),
                    80,
                ));
            }
        }

        if let Some(last) = cells.last() {
            if !settings.is_displayable(last.row) {
                violations.push(Violation::new(
                    ViolationType::BeyondDay,
                    id,
                    format!("Runs past the end of the day (slot {})", last.row + 1),
                    20,
                ));
            }
        }
    }

    for series in roster.series() {
        let placed: Vec<_> = series
            .rounds
            .iter()
            .filter_map(|r| schedule.get(&r.id).map(|e| (r, e.row)))
            .collect();
        for pair in placed.windows(2) {
            let ((earlier, earlier_row), (later, later_row)) = (pair[0], pair[1]);
            if earlier_row > later_row {
                violations.push(Violation::new(
                    ViolationType::OrderViolation,
                    later.id.clone(),
                    format!(
                        "Round {} (slot {}) starts before round {} (slot {})",
                        later.round_number,
                        later_row + 1,
                        earlier.round_number,
                        earlier_row + 1
                    ),
                    80,
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Round, ScheduledRound, Series};

    fn sample_roster() -> Roster {
        Roster::from_series(vec![
            Series::new("A", "Alpha")
                .with_round(Round::new("A1", 4))
                .with_round(Round::new("A2", 2))
                .with_round(Round::new("A3", 2)),
            Series::new("B", "Beta").with_round(Round::new("B1", 3)),
        ])
        .unwrap()
    }

    fn check(schedule: &Schedule, round: &str, row: usize, col: usize) -> PlacementResult {
        let roster = sample_roster();
        let ctx = PlacementContext::new(&roster, schedule, 8);
        can_place(&ctx, round, row, col, None)
    }

    fn kind(result: PlacementResult) -> RejectionKind {
        result.unwrap_err().kind
    }

    #[test]
    fn test_valid_on_empty_grid() {
        assert!(check(&Schedule::new(), "A1", 0, 0).is_ok());
        assert!(check(&Schedule::new(), "A1", 3, 4).is_ok());
    }

    #[test]
    fn test_unknown_round() {
        assert_eq!(kind(check(&Schedule::new(), "nope", 0, 0)), RejectionKind::RoundNotFound);
    }

    #[test]
    fn test_insufficient_lanes_no_wrap() {
        let err = check(&Schedule::new(), "A1", 0, 6).unwrap_err();
        assert_eq!(err.kind, RejectionKind::InsufficientLanes);
        assert!(err.message.contains("4 consecutive"));
    }

    #[test]
    fn test_cell_occupied() {
        let s = Schedule::from_entries(vec![ScheduledRound::new("B1", 0, 2)]);
        assert_eq!(kind(check(&s, "A1", 0, 0)), RejectionKind::CellOccupied);
        assert!(check(&s, "A1", 0, 5).is_err());
        assert!(check(&s, "A2", 0, 5).is_ok());
    }

    #[test]
    fn test_occupied_by_wrapped_footprint() {
        // B1 at (0,7) wraps onto (1,0) and (1,1).
        let s = Schedule::from_entries(vec![ScheduledRound::new("B1", 0, 7)]);
        assert_eq!(kind(check(&s, "A2", 1, 1)), RejectionKind::CellOccupied);
        assert!(check(&s, "A2", 1, 2).is_ok());
    }

    #[test]
    fn test_own_position_ignored() {
        let s = Schedule::from_entries(vec![ScheduledRound::new("A1", 0, 0)]);
        assert!(check(&s, "A1", 0, 2).is_ok());
    }

    #[test]
    fn test_exclude_ignored() {
        let roster = sample_roster();
        let s = Schedule::from_entries(vec![ScheduledRound::new("B1", 0, 0)]);
        let ctx = PlacementContext::new(&roster, &s, 8);
        assert!(can_place(&ctx, "A1", 0, 0, None).is_err());
        assert!(can_place(&ctx, "A1", 0, 0, Some("B1")).is_ok());
    }

    #[test]
    fn test_series_row_conflict() {
        let s = Schedule::from_entries(vec![ScheduledRound::new("A1", 0, 0)]);
        assert_eq!(kind(check(&s, "A2", 0, 5)), RejectionKind::SeriesRowConflict);
        assert!(check(&s, "B1", 0, 5).is_ok());
    }

    #[test]
    fn test_series_row_conflict_on_wrapped_row() {
        // A1 at (0,6) runs into row 1, so row 1 is taken for series A too.
        let s = Schedule::from_entries(vec![ScheduledRound::new("A1", 0, 6)]);
        assert_eq!(kind(check(&s, "A2", 1, 4)), RejectionKind::SeriesRowConflict);
        assert!(check(&s, "A2", 2, 4).is_ok());
    }

    #[test]
    fn test_huge_coordinates_rejected() {
        let s = Schedule::from_entries(vec![ScheduledRound::new("A1", 0, 0)]);
        assert_eq!(
            kind(check(&s, "B1", 0, usize::MAX)),
            RejectionKind::InsufficientLanes
        );
        assert_eq!(
            kind(check(&s, "B1", usize::MAX, 0)),
            RejectionKind::CellOutOfBounds
        );
    }

    #[test]
    fn test_order_violation_message() {
        let s = Schedule::from_entries(vec![ScheduledRound::new("A2", 2, 0)]);
        let err = check(&s, "A1", 3, 0).unwrap_err();
        assert_eq!(err.kind, RejectionKind::OrderViolation);
        assert!(err.message.contains("Round 1"));
        assert!(err.message.contains("round 2"));

        let err = check(&s, "A3", 1, 0).unwrap_err();
        assert_eq!(err.kind, RejectionKind::OrderViolation);
        assert!(check(&s, "A3", 3, 0).is_ok());
        assert!(check(&s, "A1", 1, 0).is_ok());
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        // Both occupied and a series row conflict: occupancy reported first.
        let s = Schedule::from_entries(vec![ScheduledRound::new("A1", 0, 0)]);
        assert_eq!(kind(check(&s, "A2", 0, 0)), RejectionKind::CellOccupied);
    }

    #[test]
    fn test_audit_clean_schedule() {
        let roster = sample_roster();
        let s = Schedule::from_entries(vec![
            ScheduledRound::new("A1", 0, 0),
            ScheduledRound::new("B1", 0, 4),
            ScheduledRound::new("A2", 1, 0),
        ]);
        assert!(audit_schedule(&s, &roster, &Settings::default()).is_empty());
    }

    #[test]
    fn test_audit_finds_violations() {
        let roster = sample_roster();
        let s = Schedule::from_entries(vec![
            ScheduledRound::new("A2", 0, 0),
            ScheduledRound::new("A1", 1, 0),
            ScheduledRound::new("B1", 1, 2),
            ScheduledRound::new("A3", 1, 6),
            ScheduledRound::new("ghost", 0, 0),
        ]);
        let types: HashSet<ViolationType> = audit_schedule(&s, &roster, &Settings::default())
            .into_iter()
            .map(|v| v.violation_type)
            .collect();
        assert!(types.contains(&ViolationType::CellOverlap));
        assert!(types.contains(&ViolationType::SeriesRowConflict));
        assert!(types.contains(&ViolationType::OrderViolation));
        assert!(types.contains(&ViolationType::UnknownRound));
    }

    #[test]
    fn test_audit_beyond_day() {
        let roster = sample_roster();
        let s = Schedule::from_entries(vec![ScheduledRound::new("A1", 40, 0)]);
        let v = audit_schedule(&s, &roster, &Settings::default());
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::BeyondDay);
    }
}
