use std::path::{Path, PathBuf};

use vmplan_core::{Bandwidth, OutputFormat};
use vmplan_placement::{Host, PlanOptions, PlanReport, plan_with};

use super::Inputs;
use crate::render::{self, OutputStyle};

/// Run a single planning pass and print or export the result.
///
/// Bandwidth is validated before any input file is read.
pub fn plan(
    inputs: &Inputs,
    bandwidth: Option<f64>,
    output: Option<&str>,
    report_path: Option<&str>,
    format: OutputStyle,
) -> anyhow::Result<()> {
    let config = inputs.config()?;
    let bandwidth = match bandwidth {
        Some(mbps) => Bandwidth::new(mbps)?,
        None => config.bandwidth()?,
    };
    let options = PlanOptions::new(bandwidth).with_scan_order(config.scan_order());

    let (workloads, specs) = inputs.load()?;
    let mut hosts = Host::from_specs(&specs);
    let records = plan_with(&workloads, &mut hosts, &options);

    if let Some(path) = output {
        let path = export_path(path, config.output_format());
        vmplan_io::write_plan(&path, &records)?;
    }

    let report = PlanReport::build(records, &hosts);
    if let Some(path) = report_path {
        vmplan_io::write_report_json(Path::new(path), &report)?;
    }

    match format {
        OutputStyle::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputStyle::Text => print!("{}", render::format_report(&report, bandwidth.mbps())),
    }

    Ok(())
}

/// Plan file path, with the configured format's extension added when the
/// given path has none.
fn export_path(path: &str, default_format: OutputFormat) -> PathBuf {
    let path = PathBuf::from(path);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(default_format.extension())
    }
}
