//! Writing and re-reading placement plans.
//!
//! JSON keeps the nested record shape with `null` for absent values. CSV
//! flattens `resource_usage` into its own columns and leaves absent
//! values as empty cells. Either way, exporting a plan and reading it back
//! yields the same records.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use vmplan_core::{PlacementRecord, ResourceUsage};
use vmplan_placement::PlanReport;

use crate::error::{IoError, IoResult};
use crate::format::Format;

/// Flat CSV row of a placement record.
#[derive(Debug, Serialize, Deserialize)]
struct PlanRow {
    workload_id: String,
    host_id: Option<String>,
    estimated_time_seconds: Option<f64>,
    estimated_time_minutes: Option<f64>,
    cpu_cores: f64,
    ram_gb: f64,
    storage_gb: f64,
    total_resource_units: f64,
}

impl From<&PlacementRecord> for PlanRow {
    fn from(r: &PlacementRecord) -> Self {
        PlanRow {
            workload_id: r.workload_id.clone(),
            host_id: r.host_id.clone(),
            estimated_time_seconds: r.estimated_time_seconds,
            estimated_time_minutes: r.estimated_time_minutes,
            cpu_cores: r.resource_usage.cpu_cores,
            ram_gb: r.resource_usage.ram_gb,
            storage_gb: r.resource_usage.storage_gb,
            total_resource_units: r.resource_usage.total_resource_units,
        }
    }
}

impl From<PlanRow> for PlacementRecord {
    fn from(row: PlanRow) -> Self {
        PlacementRecord {
            workload_id: row.workload_id,
            host_id: row.host_id,
            estimated_time_seconds: row.estimated_time_seconds,
            estimated_time_minutes: row.estimated_time_minutes,
            resource_usage: ResourceUsage {
                cpu_cores: row.cpu_cores,
                ram_gb: row.ram_gb,
                storage_gb: row.storage_gb,
                total_resource_units: row.total_resource_units,
            },
        }
    }
}

pub fn write_plan(path: &Path, records: &[PlacementRecord]) -> IoResult<()> {
    let format = Format::from_path(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    write_plan_to(&mut out, format, records)?;
    out.flush()?;
    info!(path = %path.display(), records = records.len(), "exported plan");
    Ok(())
}

pub fn write_plan_to<W: Write>(
    writer: W,
    format: Format,
    records: &[PlacementRecord],
) -> IoResult<()> {
    match format {
        Format::Csv => {
            let mut wtr = csv::Writer::from_writer(writer);
            for record in records {
                wtr.serialize(PlanRow::from(record))?;
            }
            wtr.flush()?;
        }
        Format::Json => serde_json::to_writer_pretty(writer, records)?,
    }
    Ok(())
}

pub fn read_plan(path: &Path) -> IoResult<Vec<PlacementRecord>> {
    let format = Format::from_path(path)?;
    read_plan_from(File::open(path)?, format)
}

/// Read an exported plan, rejecting records that mix a missing host with
/// present time fields (or the reverse).
pub fn read_plan_from<R: Read>(reader: R, format: Format) -> IoResult<Vec<PlacementRecord>> {
    let records: Vec<PlacementRecord> = match format {
        Format::Csv => {
            let mut rdr = csv::Reader::from_reader(reader);
            let mut records = Vec::new();
            for row in rdr.deserialize::<PlanRow>() {
                records.push(row?.into());
            }
            records
        }
        Format::Json => serde_json::from_reader(reader)?,
    };

    for (row, r) in records.iter().enumerate() {
        let placed = r.host_id.is_some();
        if placed != r.estimated_time_seconds.is_some() || placed != r.estimated_time_minutes.is_some() {
            return Err(IoError::Inconsistent {
                row,
                reason: format!(
                    "workload {}: host and time fields must be all present or all absent",
                    r.workload_id
                ),
            });
        }
    }
    Ok(records)
}

/// Write the full report (records, host snapshots, summary) as JSON.
pub fn write_report_json(path: &Path, report: &PlanReport) -> IoResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, report)?;
    out.flush()?;
    Ok(())
}
