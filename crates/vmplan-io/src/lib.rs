//! vmplan-io — file ingestion and plan export.
//!
//! Reads workload and host tables from CSV or JSON, and writes the
//! resulting plan back out in either format. The format is chosen from
//! the file extension.

pub mod error;
pub mod export;
pub mod format;
pub mod ingest;

pub use error::{IoError, IoResult};
pub use export::{read_plan, read_plan_from, write_plan, write_plan_to, write_report_json};
pub use format::Format;
pub use ingest::{read_hosts, read_hosts_from, read_workloads, read_workloads_from};
