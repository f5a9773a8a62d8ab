//! Transfer cost estimation.
//!
//! Pure functions of a workload and the run-wide bandwidth. Nothing here
//! depends on hosts or on placement order.

use vmplan_core::{Bandwidth, ResourceUsage, Workload};

/// Megabits per gigabyte (GB -> MB -> Mb).
const MEGABITS_PER_GB: f64 = 8.0 * 1024.0;

/// Setup and downtime overhead applied on top of the raw transfer time.
pub const OVERHEAD_FACTOR: f64 = 1.15;

/// Estimated seconds to move the workload's storage over the network,
/// overhead included, rounded to 2 decimals.
pub fn estimate_transfer(workload: &Workload, bandwidth: Bandwidth) -> f64 {
    let megabits = workload.storage() * MEGABITS_PER_GB;
    let raw_seconds = megabits / bandwidth.mbps();
    round2(raw_seconds * OVERHEAD_FACTOR)
}

/// Convert an already-rounded seconds estimate to minutes, rounded to 2 decimals.
pub fn seconds_to_minutes(seconds: f64) -> f64 {
    round2(seconds / 60.0)
}

/// Resource footprint of a workload, independent of where it lands.
pub fn compute_resource_usage(workload: &Workload) -> ResourceUsage {
    ResourceUsage {
        cpu_cores: workload.cpu(),
        ram_gb: workload.ram(),
        storage_gb: workload.storage(),
        total_resource_units: workload.cpu() + workload.ram() + workload.storage(),
    }
}

/// Round to 2 decimal places, ties to even, on the exact binary value.
///
/// Goes through the correctly rounded decimal rendering rather than
/// scaling by 100, so `0.125` becomes `0.12` and `2.675` (stored just
/// below the tie) becomes `2.67`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
