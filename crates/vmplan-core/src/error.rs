//! Error types for vmplan.

use thiserror::Error;

/// Result type alias for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors that reject a planning run before any placement happens.
///
/// An infeasible placement is not an error: it shows up as a
/// [`PlacementRecord`](crate::PlacementRecord) without a host.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("network bandwidth must be a positive number of Mbps, got {0}")]
    InvalidBandwidth(f64),

    #[error("host {host}: {dimension} capacity must be positive, got {value}")]
    InvalidCapacity {
        host: String,
        dimension: Dimension,
        value: f64,
    },

    #[error("workload {workload}: {dimension} demand must be non-negative, got {value}")]
    InvalidDemand {
        workload: String,
        dimension: Dimension,
        value: f64,
    },

    #[error("{0} id must not be empty")]
    EmptyId(&'static str),

    #[error("config error: {0}")]
    Config(String),
}

/// One of the three resource dimensions a host is bounded by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Cpu,
    Ram,
    Storage,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Cpu => write!(f, "cpu"),
            Dimension::Ram => write!(f, "ram"),
            Dimension::Storage => write!(f, "storage"),
        }
    }
}
