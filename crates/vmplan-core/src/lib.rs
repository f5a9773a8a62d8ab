//! vmplan-core — shared types for workload placement planning.
//!
//! Holds the validated domain entities ([`Workload`], [`HostSpec`],
//! [`Bandwidth`]), the output [`PlacementRecord`], the [`PlanError`]
//! taxonomy and the `vmplan.toml` parser.

pub mod config;
pub mod error;
pub mod types;

pub use config::{OutputFormat, PlannerConfig, ScanOrder, ScanOrderName};
pub use error::{Dimension, PlanError, PlanResult};
pub use types::*;
