//! Auto-scheduling and grid KPIs.
//!
//! # Algorithm
//!
//! `AutoScheduler` is a greedy, deterministic packer: series are visited
//! by display name, rounds in order, each taking the first free start cell
//! that keeps its series off shared rows. It is not optimal, but provides
//! fast valid layouts.
//!
//! # KPI
//!
//! `GridKpi` computes rows used, occupied/idle cells, utilization and
//! overflow past the end of the day.

mod auto;
mod kpi;

pub use auto::AutoScheduler;
pub use kpi::GridKpi;
