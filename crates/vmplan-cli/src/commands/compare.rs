use std::sync::Arc;

use vmplan_placement::compare_bandwidths;

use super::Inputs;
use crate::render::{self, OutputStyle};

/// Run one plan per bandwidth concurrently and print them side by side.
pub async fn compare(inputs: &Inputs, bandwidths: &[f64], format: OutputStyle) -> anyhow::Result<()> {
    let config = inputs.config()?;
    let (workloads, specs) = inputs.load()?;

    let outcomes = compare_bandwidths(
        Arc::new(workloads),
        Arc::new(specs),
        bandwidths,
        config.scan_order(),
    )
    .await?;

    match format {
        OutputStyle::Json => {
            let reports: Vec<_> = outcomes
                .iter()
                .map(|o| {
                    serde_json::json!({
                        "bandwidth_mbps": o.bandwidth_mbps,
                        "summary": o.report.summary,
                        "records": o.report.records,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputStyle::Text => print!("{}", render::format_comparison(&outcomes)),
    }

    Ok(())
}
