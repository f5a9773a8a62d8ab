//! vmplan.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PlanError, PlanResult};
use crate::types::Bandwidth;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub planner: PlannerSection,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSection {
    #[serde(default = "default_bandwidth")]
    pub network_bandwidth_mbps: f64,
    #[serde(default)]
    pub scan_order: ScanOrderName,
    /// Host ids scanned first when `scan_order = "priority"`.
    pub host_priority: Option<Vec<String>>,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            network_bandwidth_mbps: default_bandwidth(),
            scan_order: ScanOrderName::default(),
            host_priority: None,
        }
    }
}

fn default_bandwidth() -> f64 {
    Bandwidth::DEFAULT_MBPS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format of plan files whose path has no extension.
    pub format: Option<OutputFormat>,
}

/// Encoding of an exported plan file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Name of a host scan order as written in config files and CLI flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrderName {
    #[default]
    Input,
    Id,
    Priority,
}

impl std::str::FromStr for ScanOrderName {
    type Err = PlanError;

    fn from_str(s: &str) -> PlanResult<Self> {
        match s {
            "input" => Ok(Self::Input),
            "id" => Ok(Self::Id),
            "priority" => Ok(Self::Priority),
            other => Err(PlanError::Config(format!("unknown scan order: {other}"))),
        }
    }
}

/// Order in which first-fit visits hosts for every workload.
///
/// The first host in this order that can take a workload wins, so the
/// order decides the outcome whenever several hosts fit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanOrder {
    /// Hosts in the order they were supplied.
    #[default]
    Input,
    /// Ascending host id; equal ids keep their input order.
    ById,
    /// Listed host ids first, in list order, then the rest in input order.
    /// Ids that match no host are ignored.
    Priority(Vec<String>),
}

impl PlannerConfig {
    pub fn from_file(path: &Path) -> PlanResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PlanError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PlanResult<Self> {
        toml::from_str(content).map_err(|e| PlanError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> PlanResult<String> {
        toml::to_string_pretty(self).map_err(|e| PlanError::Config(e.to_string()))
    }

    /// Validated run-wide bandwidth.
    pub fn bandwidth(&self) -> PlanResult<Bandwidth> {
        Bandwidth::new(self.planner.network_bandwidth_mbps)
    }

    pub fn scan_order(&self) -> ScanOrder {
        match self.planner.scan_order {
            ScanOrderName::Input => ScanOrder::Input,
            ScanOrderName::Id => ScanOrder::ById,
            ScanOrderName::Priority => {
                ScanOrder::Priority(self.planner.host_priority.clone().unwrap_or_default())
            }
        }
    }

    /// Export format for plan paths given without an extension.
    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    /// Scaffold a minimal vmplan.toml.
    pub fn scaffold() -> Self {
        PlannerConfig {
            planner: PlannerSection::default(),
            output: Some(OutputConfig {
                format: Some(OutputFormat::Json),
            }),
        }
    }
}
