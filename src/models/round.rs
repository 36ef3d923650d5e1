//! Round model.
//!
//! A round is the smallest schedulable unit: a block of `match_count`
//! matches played in parallel on consecutive courts within one time slot
//! (continuing into the next slot when the row is exhausted).

use serde::{Deserialize, Serialize};

/// A round of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Unique round identifier.
    pub id: String,
    /// Owning series identifier. Set when the round is added to a series.
    pub series_id: String,
    /// 1-indexed position within the series. Maintained by the series.
    pub round_number: u32,
    /// Number of matches, i.e. consecutive courts occupied.
    pub match_count: usize,
    /// Optional display label. Empty = "Round {n}".
    pub label: String,
}

impl Round {
    /// Creates a round spanning `match_count` courts.
    pub fn new(id: impl Into<String>, match_count: usize) -> Self {
        Self {
            id: id.into(),
            series_id: String::new(),
            round_number: 0,
            match_count,
            label: String::new(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Number of grid cells this round occupies.
    #[inline]
    pub fn span(&self) -> usize {
        self.match_count
    }

    /// Label shown on the grid.
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            format!("Round {}", self.round_number)
        } else {
            self.label.clone()
        }
    }
}
