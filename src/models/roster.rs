//! Roster: the live collection of series and their rounds.
//!
//! Placement code resolves a round ID to its span and series on every
//! overlap check, so the roster keeps an `id → (series, round)` index that
//! is rebuilt after every structural change.

use std::collections::{HashMap, HashSet};

use super::{Round, Series};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RoundRef {
    series: usize,
    round: usize,
}

/// Ordered series collection with a round lookup index.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    series: Vec<Series>,
    index: HashMap<String, RoundRef>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from existing series, validating IDs and spans.
    pub fn from_series(series: Vec<Series>) -> Result<Self> {
        let mut roster = Self::new();
        for s in series {
            roster.add_series(s)?;
        }
        Ok(roster)
    }

    /// Adds a series. Rounds are renumbered in their given order.
    pub fn add_series(&mut self, mut series: Series) -> Result<()> {
        if self.series.iter().any(|s| s.id == series.id) {
            return Err(Error::DuplicateId(series.id));
        }
        let mut seen = HashSet::new();
        for round in &series.rounds {
            self.check_new_round(round)?;
            if !seen.insert(round.id.as_str()) {
                return Err(Error::DuplicateId(round.id.clone()));
            }
        }
        series.renumber();
        self.series.push(series);
        self.reindex();
        Ok(())
    }

    /// Removes a series and all its rounds.
    pub fn remove_series(&mut self, series_id: &str) -> Result<Series> {
        let pos = self
            .series
            .iter()
            .position(|s| s.id == series_id)
            .ok_or_else(|| Error::SeriesNotFound(series_id.to_string()))?;
        let removed = self.series.remove(pos);
        self.reindex();
        Ok(removed)
    }

    /// Appends a round to the end of a series.
    pub fn add_round(&mut self, series_id: &str, round: Round) -> Result<()> {
        self.check_new_round(&round)?;
        let series = self
            .series
            .iter_mut()
            .find(|s| s.id == series_id)
            .ok_or_else(|| Error::SeriesNotFound(series_id.to_string()))?;
        series.push_round(round);
        self.reindex();
        Ok(())
    }

    /// Removes a round; later rounds of its series move up one number.
    pub fn remove_round(&mut self, round_id: &str) -> Result<Round> {
        let r = *self
            .index
            .get(round_id)
            .ok_or_else(|| Error::RoundNotFound(round_id.to_string()))?;
        let removed = self.series[r.series]
            .remove_round(round_id)
            .ok_or_else(|| Error::RoundNotFound(round_id.to_string()))?;
        self.reindex();
        Ok(removed)
    }

    /// Replaces a series' display names.
    pub fn rename_series(&mut self, series_id: &str, names: Vec<String>) -> Result<()> {
        let series = self
            .series
            .iter_mut()
            .find(|s| s.id == series_id)
            .ok_or_else(|| Error::SeriesNotFound(series_id.to_string()))?;
        series.names = names;
        Ok(())
    }

    /// All series in insertion order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Finds a series by ID.
    pub fn series_by_id(&self, series_id: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.id == series_id)
    }

    /// Resolves a round ID to its series and round.
    pub fn lookup(&self, round_id: &str) -> Option<(&Series, &Round)> {
        let r = self.index.get(round_id)?;
        let series = &self.series[r.series];
        Some((series, &series.rounds[r.round]))
    }

    /// Finds a round by ID.
    pub fn round(&self, round_id: &str) -> Option<&Round> {
        self.lookup(round_id).map(|(_, r)| r)
    }

    /// Span of a round, if it exists.
    pub fn span(&self, round_id: &str) -> Option<usize> {
        self.round(round_id).map(Round::span)
    }

    /// Whether a round with this ID exists.
    pub fn contains_round(&self, round_id: &str) -> bool {
        self.index.contains_key(round_id)
    }

    /// All rounds, series by series.
    pub fn rounds(&self) -> impl Iterator<Item = &Round> {
        self.series.iter().flat_map(|s| s.rounds.iter())
    }

    /// Total number of rounds.
    pub fn round_count(&self) -> usize {
        self.index.len()
    }

    /// Whether the roster has no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn check_new_round(&self, round: &Round) -> Result<()> {
        if round.match_count == 0 {
            return Err(Error::EmptyRound(round.id.clone()));
        }
        if self.index.contains_key(&round.id) {
            return Err(Error::DuplicateId(round.id.clone()));
        }
        Ok(())
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (si, series) in self.series.iter().enumerate() {
            for (ri, round) in series.rounds.iter().enumerate() {
                self.index.insert(
                    round.id.clone(),
                    RoundRef {
                        series: si,
                        round: ri,
                    },
                );
            }
        }
    }
}
