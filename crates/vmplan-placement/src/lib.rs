//! vmplan placement engine — first-fit hosting with transfer cost estimates.
//!
//! Walks an ordered list of workloads, commits each one to the first host
//! (in a fixed scan order) with room on every dimension, and attaches a
//! transfer time estimate to each placement.
//!
//! # Components
//!
//! - **`host`** — Stateful hosts and the atomic commit
//! - **`cost`** — Transfer time and resource footprint estimation
//! - **`engine`** — The first-fit planning loop
//! - **`report`** — Host utilization snapshots and plan summaries
//! - **`scenario`** — Concurrent what-if runs across bandwidths

pub mod cost;
pub mod engine;
pub mod host;
pub mod report;
pub mod scenario;

pub use cost::{compute_resource_usage, estimate_transfer, round2, seconds_to_minutes};
pub use engine::{PlanOptions, plan, plan_with, scan_indices};
pub use host::{Host, SharedHost};
pub use report::{HostSnapshot, PlanReport, PlanSummary, Utilization, UtilizationLevel};
pub use scenario::{ScenarioError, ScenarioOutcome, compare_bandwidths};
