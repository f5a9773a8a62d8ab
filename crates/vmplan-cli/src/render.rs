//! Plain-text rendering of plans for the terminal.

use clap::ValueEnum;
use vmplan_placement::{PlanReport, ScenarioOutcome};

/// How results are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputStyle {
    Text,
    Json,
}

pub fn format_report(report: &PlanReport, bandwidth_mbps: f64) -> String {
    let mut out = String::new();
    let s = &report.summary;

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  vmplan Relocation Plan                  ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  Bandwidth: {:<29}║\n", format!("{bandwidth_mbps} Mbps")));
    out.push_str(&format!("║  Placed:    {:<29}║\n", format!("{} of {}", s.placed, s.total)));
    out.push_str(&format!("║  Est. time: {:<29}║\n", format!("{} min", s.total_minutes)));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    out.push_str("Placements:\n");
    for r in &report.records {
        match (&r.host_id, r.estimated_time_seconds, r.estimated_time_minutes) {
            (Some(host), Some(secs), Some(mins)) => {
                out.push_str(&format!(
                    "  ✅ {:<16} → {:<16} {secs:>10} s ({mins} min)\n",
                    r.workload_id, host
                ));
            }
            _ => {
                out.push_str(&format!(
                    "  ❌ {:<16}   no host fits (needs {} units)\n",
                    r.workload_id, r.resource_usage.total_resource_units
                ));
            }
        }
    }
    out.push('\n');

    if !report.hosts.is_empty() {
        out.push_str("Hosts:\n");
        for h in &report.hosts {
            out.push_str(&format!(
                "  • {:<16} cpu {}/{}  ram {}/{} GB  storage {}/{} GB  [{} {}%]\n",
                h.host_id,
                h.used_cpu,
                h.max_cpu,
                h.used_ram,
                h.max_ram,
                h.used_storage,
                h.max_storage,
                h.utilization.level,
                h.utilization.average_pct,
            ));
        }
        out.push('\n');
    }

    out
}

pub fn format_comparison(outcomes: &[ScenarioOutcome]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>14}  {:>8}  {:>10}  {:>12}\n",
        "bandwidth", "placed", "unplaced", "total min"
    ));
    for o in outcomes {
        let s = &o.report.summary;
        out.push_str(&format!(
            "{:>9} Mbps  {:>8}  {:>10}  {:>12}\n",
            o.bandwidth_mbps, s.placed, s.unplaced, s.total_minutes
        ));
    }
    out
}
