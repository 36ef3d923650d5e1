//! JSON export and import.
//!
//! A planner session is saved as one document:
//!
//! ```json
//! {
//!   "settings": { "court_count": 8, "slot_minutes": 30, "start_time": "09:00", "end_time": "21:00" },
//!   "series": [ { "id": "S1", "names": ["Open Singles"], "color": "#d94c4c", "rounds": [...] } ],
//!   "schedule": [ { "round_id": "S1-R1", "row": 0, "start_col": 0 } ]
//! }
//! ```
//!
//! History is not saved. Import validates the settings and the roster,
//! keeps the last placement listed for each round, drops placements of
//! unknown rounds or off-grid starts and starts with an empty history.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Roster, Schedule, Series, Settings};
use crate::planner::Planner;

/// Serialized planner state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Grid settings.
    #[serde(default)]
    pub settings: Settings,
    /// Series with their rounds.
    #[serde(default)]
    pub series: Vec<Series>,
    /// Placements.
    #[serde(default)]
    pub schedule: Schedule,
}

impl ExportDocument {
    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds a planner from the document.
    pub fn into_planner(self) -> Result<Planner> {
        let roster = Roster::from_series(self.series)?;
        Planner::from_parts(self.settings, roster, self.schedule)
    }
}

impl From<&Planner> for ExportDocument {
    fn from(planner: &Planner) -> Self {
        Self {
            settings: planner.settings().clone(),
            series: planner.roster().series().to_vec(),
            schedule: planner.schedule().clone(),
        }
    }
}

impl Planner {
    /// Snapshot of the session for saving.
    pub fn export(&self) -> ExportDocument {
        ExportDocument::from(self)
    }

    /// Session as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        self.export().to_json()
    }

    /// Restores a session from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        ExportDocument::from_json(json)?.into_planner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::Round;

    fn sample_planner() -> Planner {
        let mut p = Planner::new(Settings::default().with_court_count(6)).unwrap();
        p.add_series(
            Series::new("A", "Alpha")
                .with_color("#112233")
                .with_round(Round::new("A1", 4))
                .with_round(Round::new("A2", 2).with_label("Final")),
        )
        .unwrap();
        p.add_series(Series::new("B", "Beta").with_round(Round::new("B1", 3)))
            .unwrap();
        p.auto_schedule();
        p
    }

    #[test]
    fn test_export_import_restores_session() {
        let p = sample_planner();
        let json = p.to_json().unwrap();
        let restored = Planner::from_json(&json).unwrap();

        assert_eq!(restored.settings(), p.settings());
        assert_eq!(restored.roster().series(), p.roster().series());
        assert!(restored.schedule().same_placements(p.schedule()));
        assert!(!restored.can_undo());
        assert_eq!(restored.roster().round("A2").unwrap().label, "Final");
    }

    #[test]
    fn test_import_drops_unknown_rounds() {
        let json = r##"{
            "settings": { "court_count": 4 },
            "series": [
                { "id": "A", "names": ["Alpha"], "color": "#000000",
                  "rounds": [ { "id": "A1", "series_id": "A", "round_number": 1,
                                "match_count": 2, "label": "" } ] }
            ],
            "schedule": [
                { "round_id": "A1", "row": 0, "start_col": 0 },
                { "round_id": "ghost", "row": 1, "start_col": 0 }
            ]
        }"##;
        let p = Planner::from_json(json).unwrap();
        assert_eq!(p.settings().court_count, 4);
        assert_eq!(p.settings().slot_minutes, 30);
        assert_eq!(p.schedule().len(), 1);
        assert!(p.placement_of("ghost").is_none());
    }

    #[test]
    fn test_import_keeps_one_placement_per_round() {
        let json = r##"{
            "settings": { "court_count": 4 },
            "series": [
                { "id": "A", "names": ["Alpha"], "color": "#000000",
                  "rounds": [
                    { "id": "A1", "series_id": "A", "round_number": 1, "match_count": 2, "label": "" },
                    { "id": "A2", "series_id": "A", "round_number": 2, "match_count": 2, "label": "" }
                  ] }
            ],
            "schedule": [
                { "round_id": "A1", "row": 3, "start_col": 1 },
                { "round_id": "A1", "row": 0, "start_col": 0 },
                { "round_id": "A2", "row": 2, "start_col": 9 }
            ]
        }"##;
        let mut p = Planner::from_json(json).unwrap();
        assert_eq!(p.schedule().len(), 1);
        assert_eq!(p.placement_of("A1").unwrap().row, 0);
        assert!(p.placement_of("A2").is_none());

        assert!(p.unschedule("A1").is_applied());
        assert!(p.placement_of("A1").is_none());
    }

    #[test]
    fn test_import_rejects_invalid_settings() {
        let json = r#"{ "settings": { "court_count": 0 }, "series": [], "schedule": [] }"#;
        assert!(matches!(
            Planner::from_json(json),
            Err(Error::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_import_rejects_duplicate_rounds() {
        let mut doc = sample_planner().export();
        let copy = doc.series[0].clone();
        doc.series.push(Series { id: "A-copy".into(), ..copy });
        assert!(matches!(doc.into_planner(), Err(Error::DuplicateId(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Planner::from_json("{ nope"), Err(Error::Json(_))));
    }

    #[test]
    fn test_empty_document_defaults() {
        let p = Planner::from_json("{}").unwrap();
        assert_eq!(p.settings(), &Settings::default());
        assert!(p.roster().is_empty());
        assert!(p.schedule().is_empty());
    }
}
