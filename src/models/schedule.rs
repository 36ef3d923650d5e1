//! Schedule (placement set) model.
//!
//! A schedule maps rounds to start cells. It holds at most one entry per
//! round; footprints are derived from the roster (span) and the court
//! count, never stored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Roster;
use crate::grid::{self, Cell};

/// A round placed at a start cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledRound {
    /// Placed round ID.
    pub round_id: String,
    /// Start row (time slot).
    pub row: usize,
    /// Start column (court).
    pub start_col: usize,
}

impl ScheduledRound {
    /// Creates a placement.
    pub fn new(round_id: impl Into<String>, row: usize, start_col: usize) -> Self {
        Self {
            round_id: round_id.into(),
            row,
            start_col,
        }
    }

    /// Start cell.
    #[inline]
    pub fn start(&self) -> Cell {
        Cell::new(self.row, self.start_col)
    }

    /// Linear index of the start cell.
    #[inline]
    pub fn start_index(&self, lanes: usize) -> usize {
        grid::linear_index(self.row, self.start_col, lanes)
    }

    /// Same round, moved to the cell at linear index `index`.
    pub fn at_index(&self, index: usize, lanes: usize) -> Self {
        let (row, start_col) = grid::from_linear_index(index, lanes);
        Self {
            round_id: self.round_id.clone(),
            row,
            start_col,
        }
    }

    /// Cells covered for a round of `span` courts.
    pub fn footprint(&self, span: usize, lanes: usize) -> Vec<Cell> {
        grid::footprint(self.row, self.start_col, span, lanes)
    }
}

/// The set of placed rounds.
///
/// Entry order is insertion order; it carries no meaning beyond display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ScheduledRound>", into = "Vec<ScheduledRound>")]
pub struct Schedule {
    entries: Vec<ScheduledRound>,
}

impl From<Vec<ScheduledRound>> for Schedule {
    fn from(entries: Vec<ScheduledRound>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Schedule> for Vec<ScheduledRound> {
    fn from(schedule: Schedule) -> Self {
        schedule.entries
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from entries. A later entry for the same round wins.
    pub fn from_entries(entries: impl IntoIterator<Item = ScheduledRound>) -> Self {
        let mut schedule = Self::new();
        for entry in entries {
            schedule.set(entry);
        }
        schedule
    }

    /// Places or replaces a round. The entry moves to the end.
    pub fn set(&mut self, entry: ScheduledRound) {
        self.entries.retain(|e| e.round_id != entry.round_id);
        self.entries.push(entry);
    }

    /// Removes a round's entry.
    pub fn remove(&mut self, round_id: &str) -> Option<ScheduledRound> {
        let pos = self.entries.iter().position(|e| e.round_id == round_id)?;
        Some(self.entries.remove(pos))
    }

    /// Copy of this schedule without the given round.
    pub fn without(&self, round_id: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| e.round_id != round_id)
                .cloned()
                .collect(),
        }
    }

    /// Keeps only entries matching the predicate.
    pub fn retain(&mut self, f: impl FnMut(&ScheduledRound) -> bool) {
        self.entries.retain(f);
    }

    /// Entry for a round.
    pub fn get(&self, round_id: &str) -> Option<&ScheduledRound> {
        self.entries.iter().find(|e| e.round_id == round_id)
    }

    /// Whether a round is placed.
    pub fn contains(&self, round_id: &str) -> bool {
        self.get(round_id).is_some()
    }

    /// All entries.
    pub fn entries(&self) -> &[ScheduledRound] {
        &self.entries
    }

    /// Iterates over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledRound> {
        self.entries.iter()
    }

    /// Number of placed rounds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether both schedules place the same rounds at the same cells,
    /// ignoring entry order.
    pub fn same_placements(&self, other: &Self) -> bool {
        if self.entries.len() != other.entries.len() {
            return false;
        }
        self.entries
            .iter()
            .all(|e| other.get(&e.round_id) == Some(e))
    }

    /// Entries paired with their footprints. Rounds missing from the roster
    /// get an empty footprint.
    pub fn footprints<'a>(
        &'a self,
        roster: &Roster,
        lanes: usize,
    ) -> Vec<(&'a ScheduledRound, Vec<Cell>)> {
        self.entries
            .iter()
            .map(|e| {
                let span = roster.span(&e.round_id).unwrap_or(0);
                (e, e.footprint(span, lanes))
            })
            .collect()
    }

    /// Cell → occupying round ID.
    pub fn occupancy(&self, roster: &Roster, lanes: usize) -> HashMap<Cell, &str> {
        let mut occupied = HashMap::new();
        for (entry, cells) in self.footprints(roster, lanes) {
            for cell in cells {
                occupied.insert(cell, entry.round_id.as_str());
            }
        }
        occupied
    }

    /// Round covering a cell, if any.
    pub fn round_at(&self, cell: Cell, roster: &Roster, lanes: usize) -> Option<&ScheduledRound> {
        self.footprints(roster, lanes)
            .into_iter()
            .find(|(_, cells)| cells.contains(&cell))
            .map(|(e, _)| e)
    }

    /// Highest row touched by any footprint. `None` when empty.
    pub fn max_row(&self, roster: &Roster, lanes: usize) -> Option<usize> {
        self.entries
            .iter()
            .map(|e| {
                let span = roster.span(&e.round_id).unwrap_or(0);
                grid::last_row(e.row, e.start_col, span, lanes)
            })
            .max()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduledRound;
    type IntoIter = std::slice::Iter<'a, ScheduledRound>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Round, Series};

    fn sample_roster() -> Roster {
        Roster::from_series(vec![Series::new("A", "Alpha")
            .with_round(Round::new("A1", 4))
            .with_round(Round::new("A2", 2))])
        .unwrap()
    }

    fn sample_schedule() -> Schedule {
        Schedule::from_entries(vec![
            ScheduledRound::new("A1", 0, 6),
            ScheduledRound::new("A2", 2, 0),
        ])
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut s = sample_schedule();
        s.set(ScheduledRound::new("A1", 5, 0));
        assert_eq!(s.len(), 2);
        assert_eq!(s.get("A1").unwrap().row, 5);
        assert_eq!(s.entries().last().unwrap().round_id, "A1");
    }

    #[test]
    fn test_remove_and_without() {
        let mut s = sample_schedule();
        assert_eq!(s.without("A1").len(), 1);
        assert_eq!(s.len(), 2);
        assert!(s.remove("A1").is_some());
        assert!(s.remove("A1").is_none());
        assert!(!s.contains("A1"));
    }

    #[test]
    fn test_occupancy_wraps() {
        let s = sample_schedule();
        let roster = sample_roster();
        let occ = s.occupancy(&roster, 8);
        assert_eq!(occ.len(), 6);
        assert_eq!(occ.get(&Cell::new(1, 1)), Some(&"A1"));
        assert_eq!(occ.get(&Cell::new(2, 1)), Some(&"A2"));
        assert!(occ.get(&Cell::new(1, 2)).is_none());
    }

    #[test]
    fn test_round_at() {
        let s = sample_schedule();
        let roster = sample_roster();
        assert_eq!(s.round_at(Cell::new(0, 7), &roster, 8).unwrap().round_id, "A1");
        assert!(s.round_at(Cell::new(0, 0), &roster, 8).is_none());
    }

    #[test]
    fn test_max_row() {
        let roster = sample_roster();
        assert_eq!(sample_schedule().max_row(&roster, 8), Some(2));
        let only_wrap = Schedule::from_entries(vec![ScheduledRound::new("A1", 0, 6)]);
        assert_eq!(only_wrap.max_row(&roster, 8), Some(1));
        assert_eq!(Schedule::new().max_row(&roster, 8), None);
    }

    #[test]
    fn test_same_placements_ignores_order() {
        let a = sample_schedule();
        let b = Schedule::from_entries(vec![
            ScheduledRound::new("A2", 2, 0),
            ScheduledRound::new("A1", 0, 6),
        ]);
        assert_ne!(a, b);
        assert!(a.same_placements(&b));
        assert!(!a.same_placements(&a.without("A2")));
    }

    #[test]
    fn test_unknown_round_has_empty_footprint() {
        let s = Schedule::from_entries(vec![ScheduledRound::new("ghost", 0, 0)]);
        assert!(s.occupancy(&sample_roster(), 8).is_empty());
    }

    #[test]
    fn test_serializes_as_list() {
        let json = serde_json::to_string(&sample_schedule()).unwrap();
        assert!(json.starts_with('['));
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample_schedule());
    }

    #[test]
    fn test_deserialize_keeps_last_entry_per_round() {
        let json = r#"[
            { "round_id": "A1", "row": 0, "start_col": 0 },
            { "round_id": "B1", "row": 1, "start_col": 0 },
            { "round_id": "A1", "row": 3, "start_col": 2 }
        ]"#;
        let s: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.get("A1"), Some(&ScheduledRound::new("A1", 3, 2)));
    }
}
