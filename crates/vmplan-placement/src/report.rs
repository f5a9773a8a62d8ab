//! Post-run reporting: host occupancy snapshots and plan summaries.

use serde::{Deserialize, Serialize};

use vmplan_core::PlacementRecord;

use crate::cost::round2;
use crate::host::Host;

/// Coarse utilization band of a host, from its average utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationLevel {
    /// Below 50 %.
    Low,
    /// 50 % up to 75 %.
    Medium,
    /// 75 % up to 90 %.
    High,
    /// 90 % and above.
    Critical,
}

impl UtilizationLevel {
    pub fn from_percent(average_pct: f64) -> Self {
        if average_pct < 50.0 {
            Self::Low
        } else if average_pct < 75.0 {
            Self::Medium
        } else if average_pct < 90.0 {
            Self::High
        } else {
            Self::Critical
        }
    }
}

impl std::fmt::Display for UtilizationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Per-dimension utilization percentages of a host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    pub cpu_pct: f64,
    pub ram_pct: f64,
    pub storage_pct: f64,
    pub average_pct: f64,
    pub level: UtilizationLevel,
}

impl Utilization {
    pub fn of(host: &Host) -> Self {
        let spec = host.spec();
        let cpu_pct = percent(host.used_cpu(), spec.max_cpu());
        let ram_pct = percent(host.used_ram(), spec.max_ram());
        let storage_pct = percent(host.used_storage(), spec.max_storage());
        let average_pct = (cpu_pct + ram_pct + storage_pct) / 3.0;
        Self {
            cpu_pct: round2(cpu_pct),
            ram_pct: round2(ram_pct),
            storage_pct: round2(storage_pct),
            average_pct: round2(average_pct),
            level: UtilizationLevel::from_percent(average_pct),
        }
    }
}

fn percent(used: f64, max: f64) -> f64 {
    if max > 0.0 { used / max * 100.0 } else { 0.0 }
}

/// Occupancy of one host after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub host_id: String,
    pub max_cpu: f64,
    pub max_ram: f64,
    pub max_storage: f64,
    pub used_cpu: f64,
    pub used_ram: f64,
    pub used_storage: f64,
    pub workload_ids: Vec<String>,
    pub utilization: Utilization,
}

impl HostSnapshot {
    pub fn capture(host: &Host) -> Self {
        let spec = host.spec();
        Self {
            host_id: host.id().to_string(),
            max_cpu: spec.max_cpu(),
            max_ram: spec.max_ram(),
            max_storage: spec.max_storage(),
            used_cpu: host.used_cpu(),
            used_ram: host.used_ram(),
            used_storage: host.used_storage(),
            workload_ids: host
                .hosted_workloads()
                .iter()
                .map(|w| w.id().to_string())
                .collect(),
            utilization: Utilization::of(host),
        }
    }
}

/// Aggregate figures of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total: usize,
    pub placed: usize,
    pub unplaced: usize,
    /// Sum of per-workload estimates; workloads are assumed to move one after another.
    pub total_seconds: f64,
    /// Sum of the per-record minute figures, not `total_seconds / 60`.
    pub total_minutes: f64,
    /// Footprint of every workload, placed or not.
    pub total_resource_units: f64,
}

impl PlanSummary {
    pub fn from_records(records: &[PlacementRecord]) -> Self {
        let placed = records.iter().filter(|r| r.is_placed()).count();
        let total_seconds = records.iter().filter_map(|r| r.estimated_time_seconds).sum::<f64>();
        let total_minutes = records.iter().filter_map(|r| r.estimated_time_minutes).sum::<f64>();
        let total_resource_units = records
            .iter()
            .map(|r| r.resource_usage.total_resource_units)
            .sum::<f64>();
        Self {
            total: records.len(),
            placed,
            unplaced: records.len() - placed,
            total_seconds: round2(total_seconds),
            total_minutes: round2(total_minutes),
            total_resource_units: round2(total_resource_units),
        }
    }
}

/// Plan records together with the host state they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub records: Vec<PlacementRecord>,
    pub hosts: Vec<HostSnapshot>,
    pub summary: PlanSummary,
}

impl PlanReport {
    pub fn build(records: Vec<PlacementRecord>, hosts: &[Host]) -> Self {
        let summary = PlanSummary::from_records(&records);
        Self {
            records,
            hosts: hosts.iter().map(HostSnapshot::capture).collect(),
            summary,
        }
    }
}
