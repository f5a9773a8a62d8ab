//! Reading workload and host tables.
//!
//! CSV files need a header row naming the columns (`id, cpu, ram, storage`
//! or `id, max_cpu, max_ram, max_storage`); extra columns are ignored.
//! JSON files hold an array of objects with the same field names. Every
//! row is validated while it is decoded, so a bad row fails the whole read.
//!
//! CSV ids are always taken verbatim as text, so `007` stays `007`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use vmplan_core::{HostSpec, PlanResult, Workload};

use crate::error::IoResult;
use crate::format::Format;

pub fn read_workloads(path: &Path) -> IoResult<Vec<Workload>> {
    let format = Format::from_path(path)?;
    let workloads = read_workloads_from(File::open(path)?, format)?;
    debug!(path = %path.display(), count = workloads.len(), "read workloads");
    Ok(workloads)
}

pub fn read_hosts(path: &Path) -> IoResult<Vec<HostSpec>> {
    let format = Format::from_path(path)?;
    let hosts = read_hosts_from(File::open(path)?, format)?;
    debug!(path = %path.display(), count = hosts.len(), "read hosts");
    Ok(hosts)
}

pub fn read_workloads_from<R: Read>(reader: R, format: Format) -> IoResult<Vec<Workload>> {
    match format {
        Format::Csv => read_csv_rows(reader, |row: WorkloadCsvRow| {
            Workload::new(row.id, row.cpu, row.ram, row.storage)
        }),
        Format::Json => Ok(serde_json::from_reader(reader)?),
    }
}

pub fn read_hosts_from<R: Read>(reader: R, format: Format) -> IoResult<Vec<HostSpec>> {
    match format {
        Format::Csv => read_csv_rows(reader, |row: HostCsvRow| {
            HostSpec::new(row.id, row.max_cpu, row.max_ram, row.max_storage)
        }),
        Format::Json => Ok(serde_json::from_reader(reader)?),
    }
}

#[derive(Deserialize)]
struct WorkloadCsvRow {
    id: String,
    cpu: f64,
    ram: f64,
    storage: f64,
}

#[derive(Deserialize)]
struct HostCsvRow {
    id: String,
    max_cpu: f64,
    max_ram: f64,
    max_storage: f64,
}

fn read_csv_rows<R, Row, T, F>(reader: R, build: F) -> IoResult<Vec<T>>
where
    R: Read,
    Row: DeserializeOwned,
    F: Fn(Row) -> PlanResult<T>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        out.push(build(row?)?);
    }
    Ok(out)
}
