use clap::{Parser, Subcommand};
use vmplan_core::ScanOrderName;

mod commands;
mod render;

use render::OutputStyle;

#[derive(Parser)]
#[command(
    name = "vmplan",
    about = "vmplan — first-fit workload relocation planner",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place workloads onto hosts and estimate transfer times.
    ///
    /// Input files may be CSV or JSON; the format follows the extension.
    Plan {
        #[command(flatten)]
        inputs: InputArgs,
        /// Network bandwidth in Mbps (overrides the config file)
        #[arg(short, long)]
        bandwidth: Option<f64>,
        /// Write the plan to this file (.csv or .json). Without an
        /// extension, [output].format from the config decides.
        #[arg(short, long)]
        output: Option<String>,
        /// Write the full report (plan, host usage, summary) as JSON
        #[arg(long)]
        report: Option<String>,
        /// Output format on stdout
        #[arg(short, long, value_enum, default_value_t = OutputStyle::Text)]
        format: OutputStyle,
    },
    /// Compare plans across several bandwidth values.
    Compare {
        #[command(flatten)]
        inputs: InputArgs,
        /// Bandwidth in Mbps; repeat for each scenario
        #[arg(short, long = "bandwidth", required = true)]
        bandwidths: Vec<f64>,
        /// Output format on stdout
        #[arg(short, long, value_enum, default_value_t = OutputStyle::Text)]
        format: OutputStyle,
    },
    /// Write a scaffold vmplan.toml
    Init {
        #[arg(short, long, default_value = ".")]
        path: String,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Workload table (id, cpu, ram, storage)
    #[arg(short, long)]
    workloads: String,
    /// Host table (id, max_cpu, max_ram, max_storage)
    #[arg(long)]
    hosts: String,
    /// Path to vmplan.toml
    #[arg(short, long)]
    config: Option<String>,
    /// Host scan order: input, id or priority
    #[arg(long)]
    scan_order: Option<ScanOrderName>,
    /// Host ids scanned first with --scan-order priority
    #[arg(long = "prefer")]
    host_priority: Vec<String>,
}

impl From<InputArgs> for commands::Inputs {
    fn from(args: InputArgs) -> Self {
        commands::Inputs {
            workloads: args.workloads,
            hosts: args.hosts,
            config: args.config,
            scan_order: args.scan_order,
            host_priority: args.host_priority,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vmplan=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            inputs,
            bandwidth,
            output,
            report,
            format,
        } => commands::plan::plan(
            &inputs.into(),
            bandwidth,
            output.as_deref(),
            report.as_deref(),
            format,
        ),
        Commands::Compare {
            inputs,
            bandwidths,
            format,
        } => commands::compare::compare(&inputs.into(), &bandwidths, format).await,
        Commands::Init { path } => commands::init::init(&path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_flag_accepts_known_styles() {
        let cli = Cli::try_parse_from([
            "vmplan", "plan", "-w", "vms.csv", "--hosts", "hosts.csv", "--format", "json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Plan { format: OutputStyle::Json, .. }
        ));

        let cli = Cli::try_parse_from(["vmplan", "plan", "-w", "vms.csv", "--hosts", "hosts.csv"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Plan { format: OutputStyle::Text, .. }
        ));
    }

    #[test]
    fn format_flag_rejects_unknown_style() {
        let plan = Cli::try_parse_from([
            "vmplan", "plan", "-w", "vms.csv", "--hosts", "hosts.csv", "--format", "jsno",
        ]);
        assert!(plan.is_err());

        let compare = Cli::try_parse_from([
            "vmplan", "compare", "-w", "vms.csv", "--hosts", "hosts.csv", "-b", "100", "-f", "yaml",
        ]);
        assert!(compare.is_err());
    }

    #[test]
    fn scan_order_flag_is_validated() {
        assert!(Cli::try_parse_from([
            "vmplan", "plan", "-w", "a.csv", "--hosts", "b.csv", "--scan-order", "best_fit",
        ])
        .is_err());
    }
}
