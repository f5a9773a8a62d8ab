//! Domain types shared by every vmplan crate.
//!
//! Workloads and host descriptions are validated when they are built, so
//! the placement engine only ever sees well-formed entities. Deserialization
//! routes through the same constructors.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Dimension, PlanError, PlanResult};

/// Identifier of a workload (VM).
pub type WorkloadId = String;

/// Identifier of a host.
pub type HostId = String;

// ── Workload ───────────────────────────────────────────────────────

/// A unit of demand to be relocated onto a host.
///
/// Immutable after construction. Ids are expected to be unique within a
/// run, but that is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorkloadRow")]
pub struct Workload {
    id: WorkloadId,
    cpu: f64,
    /// GB.
    ram: f64,
    /// GB.
    storage: f64,
}

impl Workload {
    /// Build a workload, rejecting an empty id or a negative/non-finite demand.
    pub fn new(id: impl Into<WorkloadId>, cpu: f64, ram: f64, storage: f64) -> PlanResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(PlanError::EmptyId("workload"));
        }
        for (dimension, value) in [
            (Dimension::Cpu, cpu),
            (Dimension::Ram, ram),
            (Dimension::Storage, storage),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidDemand {
                    workload: id,
                    dimension,
                    value,
                });
            }
        }
        Ok(Self {
            id,
            cpu,
            ram,
            storage,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cpu(&self) -> f64 {
        self.cpu
    }

    pub fn ram(&self) -> f64 {
        self.ram
    }

    pub fn storage(&self) -> f64 {
        self.storage
    }
}

/// Wire shape of a workload row (`id, cpu, ram, storage`).
#[derive(Deserialize)]
struct WorkloadRow {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    cpu: f64,
    ram: f64,
    storage: f64,
}

impl TryFrom<WorkloadRow> for Workload {
    type Error = PlanError;

    fn try_from(row: WorkloadRow) -> PlanResult<Self> {
        Workload::new(row.id, row.cpu, row.ram, row.storage)
    }
}

// ── Host description ───────────────────────────────────────────────

/// Capacity description of a host as ingested.
///
/// This carries no occupancy; the stateful host used during a run is
/// built from it by the placement crate, so every run can start from
/// fresh state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HostRow")]
pub struct HostSpec {
    id: HostId,
    max_cpu: f64,
    max_ram: f64,
    max_storage: f64,
}

impl HostSpec {
    /// Build a host description, rejecting an empty id or a non-positive capacity.
    pub fn new(
        id: impl Into<HostId>,
        max_cpu: f64,
        max_ram: f64,
        max_storage: f64,
    ) -> PlanResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(PlanError::EmptyId("host"));
        }
        for (dimension, value) in [
            (Dimension::Cpu, max_cpu),
            (Dimension::Ram, max_ram),
            (Dimension::Storage, max_storage),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::InvalidCapacity {
                    host: id,
                    dimension,
                    value,
                });
            }
        }
        Ok(Self {
            id,
            max_cpu,
            max_ram,
            max_storage,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn max_cpu(&self) -> f64 {
        self.max_cpu
    }

    pub fn max_ram(&self) -> f64 {
        self.max_ram
    }

    pub fn max_storage(&self) -> f64 {
        self.max_storage
    }
}

/// Wire shape of a host row (`id, max_cpu, max_ram, max_storage`).
#[derive(Deserialize)]
struct HostRow {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    max_cpu: f64,
    max_ram: f64,
    max_storage: f64,
}

impl TryFrom<HostRow> for HostSpec {
    type Error = PlanError;

    fn try_from(row: HostRow) -> PlanResult<Self> {
        HostSpec::new(row.id, row.max_cpu, row.max_ram, row.max_storage)
    }
}

/// Accept ids written either as strings or as integers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

// ── Bandwidth ──────────────────────────────────────────────────────

/// Run-wide aggregate network bandwidth in megabits per second.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bandwidth(f64);

impl Bandwidth {
    pub const DEFAULT_MBPS: f64 = 1000.0;

    pub fn new(mbps: f64) -> PlanResult<Self> {
        if !mbps.is_finite() || mbps <= 0.0 {
            return Err(PlanError::InvalidBandwidth(mbps));
        }
        Ok(Self(mbps))
    }

    pub fn mbps(self) -> f64 {
        self.0
    }
}

impl Default for Bandwidth {
    fn default() -> Self {
        Self(Self::DEFAULT_MBPS)
    }
}

// ── Placement record ───────────────────────────────────────────────

/// Resource footprint of a workload.
///
/// `total_resource_units` is an unweighted sum across cores and gigabytes,
/// not a physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub cpu_cores: f64,
    pub ram_gb: f64,
    pub storage_gb: f64,
    pub total_resource_units: f64,
}

/// Outcome of placing a single workload.
///
/// `host_id` is `None` exactly when no host could take the workload, and
/// then both time fields are `None` as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub workload_id: WorkloadId,
    pub host_id: Option<HostId>,
    pub estimated_time_seconds: Option<f64>,
    pub estimated_time_minutes: Option<f64>,
    pub resource_usage: ResourceUsage,
}

impl PlacementRecord {
    pub fn is_placed(&self) -> bool {
        self.host_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_rejects_negative_demand() {
        let err = Workload::new("vm-1", 1.0, -2.0, 10.0).unwrap_err();
        assert_eq!(
            err,
            PlanError::InvalidDemand {
                workload: "vm-1".to_string(),
                dimension: Dimension::Ram,
                value: -2.0,
            }
        );
    }

    #[test]
    fn workload_rejects_nan_and_empty_id() {
        assert!(Workload::new("vm-1", f64::NAN, 1.0, 1.0).is_err());
        assert_eq!(
            Workload::new("", 1.0, 1.0, 1.0).unwrap_err(),
            PlanError::EmptyId("workload")
        );
    }

    #[test]
    fn host_spec_rejects_zero_capacity() {
        let err = HostSpec::new("h1", 4.0, 0.0, 100.0).unwrap_err();
        assert!(matches!(
            err,
            PlanError::InvalidCapacity {
                dimension: Dimension::Ram,
                ..
            }
        ));
    }

    #[test]
    fn bandwidth_must_be_positive() {
        assert_eq!(Bandwidth::new(0.0), Err(PlanError::InvalidBandwidth(0.0)));
        assert!(Bandwidth::new(-10.0).is_err());
        assert!(Bandwidth::new(f64::INFINITY).is_err());
        assert_eq!(Bandwidth::new(250.0).unwrap().mbps(), 250.0);
        assert_eq!(Bandwidth::default().mbps(), 1000.0);
    }

    #[test]
    fn deserialize_workload_validates() {
        let ok: Workload =
            serde_json::from_str(r#"{"id": "vm-1", "cpu": 2, "ram": 4, "storage": 10}"#).unwrap();
        assert_eq!(ok.id(), "vm-1");
        assert_eq!(ok.storage(), 10.0);

        let bad = serde_json::from_str::<Workload>(r#"{"id": "vm-1", "cpu": -1, "ram": 4, "storage": 10}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn deserialize_accepts_integer_ids() {
        let host: HostSpec = serde_json::from_str(
            r#"{"id": 7, "max_cpu": 8, "max_ram": 32, "max_storage": 500}"#,
        )
        .unwrap();
        assert_eq!(host.id(), "7");
    }

    #[test]
    fn deserialize_rejects_missing_field() {
        let missing = serde_json::from_str::<HostSpec>(r#"{"id": "h1", "max_cpu": 8, "max_ram": 32}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn unplaced_record_serializes_nulls() {
        let record = PlacementRecord {
            workload_id: "vm-1".to_string(),
            host_id: None,
            estimated_time_seconds: None,
            estimated_time_minutes: None,
            resource_usage: ResourceUsage {
                cpu_cores: 4.0,
                ram_gb: 2.0,
                storage_gb: 10.0,
                total_resource_units: 16.0,
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["host_id"].is_null());
        assert!(json["estimated_time_seconds"].is_null());
        assert!(json["estimated_time_minutes"].is_null());
        assert!(!record.is_placed());
    }
}
