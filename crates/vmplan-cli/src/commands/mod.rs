pub mod compare;
pub mod init;
pub mod plan;

use std::path::Path;

use anyhow::Context;
use vmplan_core::{HostSpec, PlannerConfig, ScanOrderName, Workload};

/// Input files and scan-order settings shared by `plan` and `compare`.
pub struct Inputs {
    pub workloads: String,
    pub hosts: String,
    pub config: Option<String>,
    pub scan_order: Option<ScanOrderName>,
    pub host_priority: Vec<String>,
}

impl Inputs {
    /// Load the config file (or defaults) with command-line overrides applied.
    pub fn config(&self) -> anyhow::Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::from_file(Path::new(path))?,
            None => PlannerConfig::default(),
        };
        if let Some(order) = self.scan_order {
            config.planner.scan_order = order;
        }
        if !self.host_priority.is_empty() {
            config.planner.host_priority = Some(self.host_priority.clone());
        }
        Ok(config)
    }

    pub fn load(&self) -> anyhow::Result<(Vec<Workload>, Vec<HostSpec>)> {
        let workloads = vmplan_io::read_workloads(Path::new(&self.workloads))
            .with_context(|| format!("reading workloads from {}", self.workloads))?;
        let hosts = vmplan_io::read_hosts(Path::new(&self.hosts))
            .with_context(|| format!("reading hosts from {}", self.hosts))?;
        Ok((workloads, hosts))
    }
}
