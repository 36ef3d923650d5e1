//! Court-grid domain models.
//!
//! Provides the data types the placement engine reads and writes.
//!
//! # Domain Mappings
//!
//! | u-court-grid | Tournament | Generic |
//! |--------------|------------|---------|
//! | Series | Event / draw | Job family |
//! | Round | Round of matches | Batch of parallel work |
//! | Court (lane) | Court / table | Resource column |
//! | Row (slot) | Time slot | Time step |
//! | Schedule | Order of play | Placement plan |

mod roster;
mod round;
mod schedule;
mod series;
mod settings;

pub use roster::Roster;
pub use round::Round;
pub use schedule::{Schedule, ScheduledRound};
pub use series::{random_color, Series};
pub use settings::{Settings, TimeOfDay};
