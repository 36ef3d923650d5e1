//! Series model.
//!
//! A series is one competitive track (an event or draw). Its rounds are
//! kept in competitive order, and `round_number` always equals the
//! 1-based position in that order.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Round;

/// Saturation used for generated series colors.
const COLOR_SATURATION: f64 = 0.65;
/// Lightness used for generated series colors.
const COLOR_LIGHTNESS: f64 = 0.55;

/// A series of rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Unique series identifier.
    pub id: String,
    /// Display names (e.g. event name, division). Joined for display.
    pub names: Vec<String>,
    /// Display color as `#rrggbb`.
    pub color: String,
    /// Rounds in competitive order.
    pub rounds: Vec<Round>,
}

impl Series {
    /// Creates an empty series with a randomly generated color.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            names: vec![name.into()],
            color: random_color(&mut rand::rng()),
            rounds: Vec::new(),
        }
    }

    /// Adds a secondary display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Regenerates the display color from the given RNG.
    pub fn with_random_color<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.color = random_color(rng);
        self
    }

    /// Appends a round as the last round of this series.
    pub fn with_round(mut self, round: Round) -> Self {
        self.push_round(round);
        self
    }

    /// Appends a round, assigning its series ID and number.
    pub fn push_round(&mut self, mut round: Round) {
        round.series_id = self.id.clone();
        round.round_number = self.rounds.len() as u32 + 1;
        self.rounds.push(round);
    }

    /// Removes a round and renumbers the rest.
    pub fn remove_round(&mut self, round_id: &str) -> Option<Round> {
        let pos = self.rounds.iter().position(|r| r.id == round_id)?;
        let removed = self.rounds.remove(pos);
        self.renumber();
        Some(removed)
    }

    /// Re-establishes `round_number == position + 1` and the series back-reference.
    pub fn renumber(&mut self) {
        for (i, round) in self.rounds.iter_mut().enumerate() {
            round.round_number = i as u32 + 1;
            round.series_id = self.id.clone();
        }
    }

    /// Name used for display and for auto-scheduling order.
    pub fn display_name(&self) -> String {
        self.names.join(" / ")
    }

    /// Finds a round by ID.
    pub fn round(&self, round_id: &str) -> Option<&Round> {
        self.rounds.iter().find(|r| r.id == round_id)
    }

    /// Total matches across all rounds.
    pub fn total_matches(&self) -> usize {
        self.rounds.iter().map(|r| r.match_count).sum()
    }
}

/// Generates a `#rrggbb` color with a random hue and fixed saturation/lightness.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hue = rng.random_range(0.0..360.0);
    hsl_to_hex(hue, COLOR_SATURATION, COLOR_LIGHTNESS)
}

/// HSL → `#rrggbb`. `h` in degrees, `s` and `l` in `0.0..=1.0`.
fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h % 360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", to_byte(r1), to_byte(g1), to_byte(b1))
}
