//! Ingest → plan → export → re-import, through real files.

use std::fs;

use vmplan_io::{Format, read_hosts, read_plan, read_workloads, write_plan, write_report_json};
use vmplan_placement::{Host, PlanReport, plan};

fn write_inputs(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let vms = dir.join("vms.csv");
    fs::write(
        &vms,
        "id,cpu,ram,storage\n\
         vm-1,2,4,10\n\
         vm-2,4,8,120\n\
         vm-3,16,4,10\n\
         vm-4,1,1,33.3\n",
    )
    .unwrap();

    let hosts = dir.join("hosts.json");
    fs::write(
        &hosts,
        r#"[
  {"id": "h1", "max_cpu": 4, "max_ram": 8, "max_storage": 100},
  {"id": "h2", "max_cpu": 8, "max_ram": 16, "max_storage": 500}
]"#,
    )
    .unwrap();

    (vms, hosts)
}

#[test]
fn plan_survives_export_and_reimport() {
    let dir = tempfile::tempdir().unwrap();
    let (vms, hosts) = write_inputs(dir.path());

    let workloads = read_workloads(&vms).unwrap();
    let mut hosts = Host::from_specs(&read_hosts(&hosts).unwrap());
    let records = plan(&workloads, &mut hosts, 1000.0).unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].host_id.as_deref(), Some("h1"));
    assert_eq!(records[1].host_id.as_deref(), Some("h2"));
    assert_eq!(records[2].host_id, None);
    assert_eq!(records[3].host_id.as_deref(), Some("h1"));

    for name in ["plan.csv", "plan.json"] {
        let path = dir.path().join(name);
        write_plan(&path, &records).unwrap();
        let reread = read_plan(&path).unwrap();
        assert_eq!(reread, records, "{name} round trip");
    }
}

#[test]
fn report_json_contains_hosts_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let (vms, hosts) = write_inputs(dir.path());

    let workloads = read_workloads(&vms).unwrap();
    let mut hosts = Host::from_specs(&read_hosts(&hosts).unwrap());
    let records = plan(&workloads, &mut hosts, 1000.0).unwrap();
    let report = PlanReport::build(records, &hosts);

    let path = dir.path().join("report.json");
    write_report_json(&path, &report).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["summary"]["placed"], 3);
    assert_eq!(value["summary"]["unplaced"], 1);
    assert_eq!(value["hosts"][0]["workload_ids"][1], "vm-4");
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.xlsx");
    assert!(write_plan(&path, &[]).is_err());
    assert!(!path.exists());
    assert!("yaml".parse::<Format>().is_err());
}
