//! Stateful hosts that accumulate committed workloads.
//!
//! A [`Host`] is built fresh from a [`HostSpec`] for every planning run.
//! Occupancy only ever grows: there is no way to remove a workload once
//! it has been committed.

use std::sync::{Arc, Mutex};

use vmplan_core::{HostSpec, Workload};

/// Capacity ceiling plus mutable occupancy for one planning run.
///
/// Invariant: `used_X <= max_X` for cpu, ram and storage at all times.
#[derive(Debug, Clone)]
pub struct Host {
    spec: HostSpec,
    used_cpu: f64,
    used_ram: f64,
    used_storage: f64,
    hosted: Vec<Workload>,
}

impl Host {
    pub fn new(spec: HostSpec) -> Self {
        Self {
            spec,
            used_cpu: 0.0,
            used_ram: 0.0,
            used_storage: 0.0,
            hosted: Vec::new(),
        }
    }

    /// Fresh hosts for a run, in the same order as `specs`.
    pub fn from_specs(specs: &[HostSpec]) -> Vec<Host> {
        specs.iter().cloned().map(Host::new).collect()
    }

    /// Whether the workload fits in the remaining capacity on every dimension.
    pub fn can_host(&self, workload: &Workload) -> bool {
        self.used_cpu + workload.cpu() <= self.spec.max_cpu()
            && self.used_ram + workload.ram() <= self.spec.max_ram()
            && self.used_storage + workload.storage() <= self.spec.max_storage()
    }

    /// Bind the workload to this host if it fits.
    ///
    /// Returns `false` and leaves the host untouched when it does not.
    pub fn commit(&mut self, workload: &Workload) -> bool {
        if !self.can_host(workload) {
            return false;
        }
        self.used_cpu += workload.cpu();
        self.used_ram += workload.ram();
        self.used_storage += workload.storage();
        self.hosted.push(workload.clone());
        true
    }

    pub fn id(&self) -> &str {
        self.spec.id()
    }

    pub fn spec(&self) -> &HostSpec {
        &self.spec
    }

    pub fn used_cpu(&self) -> f64 {
        self.used_cpu
    }

    pub fn used_ram(&self) -> f64 {
        self.used_ram
    }

    pub fn used_storage(&self) -> f64 {
        self.used_storage
    }

    /// Committed workloads in commit order.
    pub fn hosted_workloads(&self) -> &[Workload] {
        &self.hosted
    }
}

/// A host shared between threads.
///
/// `commit` holds the host's lock across the feasibility check and the
/// mutation, so concurrent callers can never oversubscribe it.
#[derive(Debug, Clone)]
pub struct SharedHost {
    inner: Arc<Mutex<Host>>,
}

impl SharedHost {
    pub fn new(host: Host) -> Self {
        Self {
            inner: Arc::new(Mutex::new(host)),
        }
    }

    pub fn commit(&self, workload: &Workload) -> bool {
        let mut host = self.inner.lock().expect("host lock");
        host.commit(workload)
    }

    pub fn can_host(&self, workload: &Workload) -> bool {
        self.inner.lock().expect("host lock").can_host(workload)
    }

    /// Copy of the current host state.
    pub fn snapshot(&self) -> Host {
        self.inner.lock().expect("host lock").clone()
    }
}
