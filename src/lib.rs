//! Court-grid scheduling engine.
//!
//! Places tournament rounds onto a grid of time slots (rows) × courts
//! (lanes). A round occupies `match_count` consecutive cells in row-major
//! order; series rounds must stay ordered and never share a row.
//!
//! # Modules
//!
//! - **`grid`**: Cell addressing: footprints, linear indices
//! - **`models`**: Domain types: `Round`, `Series`, `Roster`, `Settings`,
//!   `ScheduledRound`, `Schedule`
//! - **`validation`**: Placement checks and whole-schedule audits
//! - **`placement`**: Pure schedule transforms: direct, cascading, append,
//!   compaction
//! - **`scheduler`**: Greedy auto-packer and grid statistics
//! - **`history`**: Bounded undo stack
//! - **`planner`**: Session object tying roster, settings, schedule and history
//! - **`export`**: JSON export/import document
//!
//! # Example
//!
//! ```
//! use u_court_grid::models::{Round, Series, Settings};
//! use u_court_grid::planner::Planner;
//!
//! let mut planner = Planner::new(Settings::default().with_court_count(4)).unwrap();
//! planner
//!     .add_series(
//!         Series::new("S1", "Open Singles")
//!             .with_round(Round::new("S1-R1", 4))
//!             .with_round(Round::new("S1-R2", 2)),
//!     )
//!     .unwrap();
//!
//! assert!(planner.auto_schedule().is_applied());
//! assert_eq!(planner.schedule().len(), 2);
//! assert!(planner.undo());
//! assert!(planner.schedule().is_empty());
//! ```

pub mod error;
pub mod export;
pub mod grid;
pub mod history;
pub mod models;
pub mod placement;
pub mod planner;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
