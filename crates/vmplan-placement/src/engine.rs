//! Placement engine — first-fit assignment of workloads to hosts.
//!
//! Workloads are handled one at a time in input order. For each one the
//! hosts are scanned in a fixed [`ScanOrder`] and the workload is committed
//! to the first host that accepts it. Commits persist for the rest of the
//! run, so earlier workloads shape what later ones can get. There is no
//! backtracking and no retry.

use tracing::{debug, info, warn};

use vmplan_core::{Bandwidth, PlacementRecord, PlanResult, ScanOrder, Workload};

use crate::cost::{compute_resource_usage, estimate_transfer, seconds_to_minutes};
use crate::host::Host;

/// Run-wide parameters of a planning run.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub bandwidth: Bandwidth,
    pub scan_order: ScanOrder,
}

impl PlanOptions {
    pub fn new(bandwidth: Bandwidth) -> Self {
        Self {
            bandwidth,
            scan_order: ScanOrder::Input,
        }
    }

    pub fn with_scan_order(mut self, scan_order: ScanOrder) -> Self {
        self.scan_order = scan_order;
        self
    }
}

/// Plan with hosts scanned in input order.
///
/// Fails before touching any host if `bandwidth_mbps` is not a positive
/// number.
pub fn plan(
    workloads: &[Workload],
    hosts: &mut [Host],
    bandwidth_mbps: f64,
) -> PlanResult<Vec<PlacementRecord>> {
    let bandwidth = Bandwidth::new(bandwidth_mbps)?;
    Ok(plan_with(workloads, hosts, &PlanOptions::new(bandwidth)))
}

/// Plan with explicit options.
///
/// Returns exactly one record per workload, in input order.
pub fn plan_with(
    workloads: &[Workload],
    hosts: &mut [Host],
    options: &PlanOptions,
) -> Vec<PlacementRecord> {
    let order = scan_indices(hosts, &options.scan_order);
    let mut records = Vec::with_capacity(workloads.len());

    for workload in workloads {
        let chosen = order.iter().copied().find(|&i| hosts[i].commit(workload));

        let record = match chosen {
            Some(i) => {
                let seconds = estimate_transfer(workload, options.bandwidth);
                debug!(
                    workload = workload.id(),
                    host = hosts[i].id(),
                    seconds,
                    "placed workload"
                );
                PlacementRecord {
                    workload_id: workload.id().to_string(),
                    host_id: Some(hosts[i].id().to_string()),
                    estimated_time_seconds: Some(seconds),
                    estimated_time_minutes: Some(seconds_to_minutes(seconds)),
                    resource_usage: compute_resource_usage(workload),
                }
            }
            None => {
                warn!(
                    workload = workload.id(),
                    cpu = workload.cpu(),
                    ram = workload.ram(),
                    storage = workload.storage(),
                    "no host can take workload"
                );
                PlacementRecord {
                    workload_id: workload.id().to_string(),
                    host_id: None,
                    estimated_time_seconds: None,
                    estimated_time_minutes: None,
                    resource_usage: compute_resource_usage(workload),
                }
            }
        };
        records.push(record);
    }

    let placed = records.iter().filter(|r| r.is_placed()).count();
    info!(
        workloads = workloads.len(),
        hosts = hosts.len(),
        placed,
        unplaced = workloads.len() - placed,
        bandwidth_mbps = options.bandwidth.mbps(),
        "planning run complete"
    );

    records
}

/// Host indices in the order first-fit visits them.
pub fn scan_indices(hosts: &[Host], order: &ScanOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..hosts.len()).collect();
    match order {
        ScanOrder::Input => {}
        ScanOrder::ById => {
            // Stable, so duplicate ids keep input order.
            indices.sort_by(|&a, &b| hosts[a].id().cmp(hosts[b].id()));
        }
        ScanOrder::Priority(preferred) => {
            let mut taken = vec![false; hosts.len()];
            let mut ordered = Vec::with_capacity(hosts.len());
            for id in preferred {
                for (i, host) in hosts.iter().enumerate() {
                    if !taken[i] && host.id() == id {
                        taken[i] = true;
                        ordered.push(i);
                    }
                }
            }
            ordered.extend(indices.into_iter().filter(|&i| !taken[i]));
            indices = ordered;
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmplan_core::{HostSpec, PlanError};

    fn make_host(id: &str, cpu: f64, ram: f64, storage: f64) -> Host {
        Host::new(HostSpec::new(id, cpu, ram, storage).unwrap())
    }

    fn vm(id: &str, cpu: f64, ram: f64, storage: f64) -> Workload {
        Workload::new(id, cpu, ram, storage).unwrap()
    }

    #[test]
    fn first_fit_takes_first_feasible_host() {
        let mut hosts = vec![
            make_host("small", 1.0, 1.0, 1.0),
            make_host("big-1", 16.0, 64.0, 1000.0),
            make_host("big-2", 16.0, 64.0, 1000.0),
        ];
        let records = plan(&[vm("vm-1", 2.0, 4.0, 10.0)], &mut hosts, 1000.0).unwrap();

        assert_eq!(records[0].host_id.as_deref(), Some("big-1"));
        assert_eq!(records[0].estimated_time_seconds, Some(94.21));
        assert_eq!(records[0].estimated_time_minutes, Some(1.57));
        assert!(hosts[2].hosted_workloads().is_empty());
    }

    #[test]
    fn minutes_tie_rounds_to_even() {
        let mut hosts = vec![make_host("h1", 4.0, 8.0, 100.0)];
        let records = plan(&[vm("vm-1", 1.0, 1.0, 1.0)], &mut hosts, 1256.11).unwrap();

        assert_eq!(records[0].estimated_time_seconds, Some(7.5));
        assert_eq!(records[0].estimated_time_minutes, Some(0.12));
    }

    #[test]
    fn does_not_upgrade_to_best_fit() {
        // The tighter host comes second; first-fit still picks the roomy one.
        let mut hosts = vec![
            make_host("roomy", 32.0, 128.0, 2000.0),
            make_host("tight", 2.0, 4.0, 10.0),
        ];
        let records = plan(&[vm("vm-1", 2.0, 4.0, 10.0)], &mut hosts, 1000.0).unwrap();
        assert_eq!(records[0].host_id.as_deref(), Some("roomy"));
    }

    #[test]
    fn failure_scenario_keeps_resource_usage() {
        let mut hosts = vec![make_host("h1", 2.0, 4.0, 50.0)];
        let records = plan(&[vm("vm-1", 4.0, 2.0, 10.0)], &mut hosts, 1000.0).unwrap();

        let r = &records[0];
        assert_eq!(r.host_id, None);
        assert_eq!(r.estimated_time_seconds, None);
        assert_eq!(r.estimated_time_minutes, None);
        assert_eq!(r.resource_usage.total_resource_units, 16.0);
        assert_eq!(hosts[0].used_cpu(), 0.0);
    }

    #[test]
    fn occupancy_carries_across_workloads() {
        let mut hosts = vec![
            make_host("h1", 4.0, 8.0, 100.0),
            make_host("h2", 4.0, 8.0, 100.0),
        ];
        let workloads = vec![
            vm("a", 3.0, 2.0, 10.0),
            vm("b", 3.0, 2.0, 10.0),
            vm("c", 1.0, 2.0, 10.0),
        ];
        let records = plan(&workloads, &mut hosts, 1000.0).unwrap();

        let placed: Vec<Option<&str>> = records.iter().map(|r| r.host_id.as_deref()).collect();
        assert_eq!(placed, vec![Some("h1"), Some("h2"), Some("h1")]);
        assert_eq!(hosts[0].used_cpu(), 4.0);
    }

    #[test]
    fn invalid_bandwidth_aborts_before_placing() {
        let mut hosts = vec![make_host("h1", 4.0, 8.0, 100.0)];
        let err = plan(&[vm("a", 1.0, 1.0, 1.0)], &mut hosts, 0.0).unwrap_err();
        assert_eq!(err, PlanError::InvalidBandwidth(0.0));
        assert!(hosts[0].hosted_workloads().is_empty());

        assert!(plan(&[vm("a", 1.0, 1.0, 1.0)], &mut hosts, -5.0).is_err());
    }

    #[test]
    fn empty_inputs() {
        let mut no_hosts: Vec<Host> = Vec::new();
        let records = plan(&[vm("a", 1.0, 1.0, 1.0), vm("b", 1.0, 1.0, 1.0)], &mut no_hosts, 1000.0)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.host_id.is_none()));

        let mut hosts = vec![make_host("h1", 4.0, 8.0, 100.0)];
        assert!(plan(&[], &mut hosts, 1000.0).unwrap().is_empty());
    }

    #[test]
    fn scan_order_by_id_is_stable() {
        let hosts = vec![
            make_host("b", 1.0, 1.0, 1.0),
            make_host("a", 1.0, 1.0, 1.0),
            make_host("b", 2.0, 2.0, 2.0),
            make_host("c", 1.0, 1.0, 1.0),
        ];
        assert_eq!(scan_indices(&hosts, &ScanOrder::ById), vec![1, 0, 2, 3]);
        assert_eq!(scan_indices(&hosts, &ScanOrder::Input), vec![0, 1, 2, 3]);
    }

    #[test]
    fn scan_order_priority_puts_listed_hosts_first() {
        let hosts = vec![
            make_host("h1", 1.0, 1.0, 1.0),
            make_host("h2", 1.0, 1.0, 1.0),
            make_host("h3", 1.0, 1.0, 1.0),
        ];
        let order = ScanOrder::Priority(vec![
            "h3".to_string(),
            "missing".to_string(),
            "h3".to_string(),
            "h2".to_string(),
        ]);
        assert_eq!(scan_indices(&hosts, &order), vec![2, 1, 0]);
    }

    #[test]
    fn priority_order_changes_assignment() {
        let mut hosts = vec![
            make_host("h1", 8.0, 8.0, 100.0),
            make_host("h2", 8.0, 8.0, 100.0),
        ];
        let options = PlanOptions::new(Bandwidth::default())
            .with_scan_order(ScanOrder::Priority(vec!["h2".to_string()]));
        let records = plan_with(&[vm("a", 1.0, 1.0, 1.0)], &mut hosts, &options);
        assert_eq!(records[0].host_id.as_deref(), Some("h2"));
    }
}
