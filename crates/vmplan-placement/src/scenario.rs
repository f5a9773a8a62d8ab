//! What-if comparison across bandwidth values.
//!
//! Each scenario is an independent planning run on its own freshly built
//! hosts, so runs share no mutable state and can execute concurrently on
//! tokio's blocking pool.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info};

use vmplan_core::{Bandwidth, HostSpec, PlanError, ScanOrder, Workload};

use crate::engine::{PlanOptions, plan_with};
use crate::host::Host;
use crate::report::PlanReport;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("scenario task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result of one what-if run.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub bandwidth_mbps: f64,
    pub report: PlanReport,
}

/// Run one plan per bandwidth and return the outcomes in bandwidth order.
///
/// Every bandwidth is validated before any run starts; one invalid value
/// rejects the whole comparison.
pub async fn compare_bandwidths(
    workloads: Arc<Vec<Workload>>,
    host_specs: Arc<Vec<HostSpec>>,
    bandwidths: &[f64],
    scan_order: ScanOrder,
) -> Result<Vec<ScenarioOutcome>, ScenarioError> {
    let validated = bandwidths
        .iter()
        .map(|&mbps| Bandwidth::new(mbps))
        .collect::<Result<Vec<_>, _>>()?;

    let mut tasks = JoinSet::new();
    for (index, bandwidth) in validated.into_iter().enumerate() {
        let workloads = Arc::clone(&workloads);
        let host_specs = Arc::clone(&host_specs);
        let options = PlanOptions::new(bandwidth).with_scan_order(scan_order.clone());

        tasks.spawn_blocking(move || {
            let mut hosts = Host::from_specs(&host_specs);
            let records = plan_with(&workloads, &mut hosts, &options);
            debug!(index, bandwidth_mbps = bandwidth.mbps(), "scenario finished");
            (
                index,
                ScenarioOutcome {
                    bandwidth_mbps: bandwidth.mbps(),
                    report: PlanReport::build(records, &hosts),
                },
            )
        });
    }

    let mut outcomes: Vec<Option<ScenarioOutcome>> = vec![None; bandwidths.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined?;
        outcomes[index] = Some(outcome);
    }

    info!(scenarios = bandwidths.len(), "bandwidth comparison complete");
    Ok(outcomes.into_iter().flatten().collect())
}
