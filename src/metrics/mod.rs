//! Reporting on a solved assignment.
//!
//! - [`LoadMetrics`]: makespan, average load, balance index and
//!   per-employee breakdowns
//! - [`build_timeline`]: back-to-back start/end times per employee
//! - [`WorkloadSummary`]: load per employee and base operation

mod kpi;
mod timeline;

pub use kpi::LoadMetrics;
pub use timeline::{build_timeline, TimelineEntry, WorkloadRow, WorkloadSummary};
