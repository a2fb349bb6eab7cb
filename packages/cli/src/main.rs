use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mlfq_twin::adapters::{channel_engine, spawn_engine};
use mlfq_twin::domain::scheduler::{EngineNotification, InteractiveEngine};
use mlfq_twin::infrastructure::{load_scenario, write_trace_jsonl, Scenario};

mod render;

use render::{summary_table, LiveView};

/// MLFQ scheduling simulator
/// Runs a workload through a multi-level feedback queue with aging and de-aging
#[derive(Parser)]
#[command(name = "mlfq", version)]
#[command(about = "Multi-level feedback queue scheduling simulator", long_about = None)]
struct Cli {
    /// Debug-level logging (every scheduling decision)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario (the built-in demo workload by default)
    Run(RunArgs),
    /// Print the built-in demo workload as a scenario document
    DemoScenario,
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Scenario file (JSON)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Per-level quanta, highest priority first
    #[arg(long, value_delimiter = ',')]
    quanta: Option<Vec<u32>>,

    /// Waiting units before promotion (0 disables aging)
    #[arg(long)]
    aging: Option<u32>,

    /// Consecutive CPU units before demotion (0 disables de-aging)
    #[arg(long = "de-aging")]
    de_aging: Option<u32>,

    /// Delay after each turn, in milliseconds
    #[arg(long = "pacing-ms")]
    pacing_ms: Option<u64>,

    /// Write the scheduling trace as JSON Lines
    #[arg(long = "trace-out")]
    trace_out: Option<PathBuf>,
}

impl RunArgs {
    /// Command line flags win over the scenario file.
    fn apply(&self, scenario: &mut Scenario) {
        if let Some(quanta) = &self.quanta {
            scenario.config.quanta.clone_from(quanta);
        }
        if let Some(aging) = self.aging {
            scenario.config.aging_threshold = aging;
        }
        if let Some(de_aging) = self.de_aging {
            scenario.config.de_aging_threshold = de_aging;
        }
        if let Some(pacing_ms) = self.pacing_ms {
            scenario.run.pacing_ms = pacing_ms;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => run(args).await,
        Commands::DemoScenario => {
            println!("{}", Scenario::demo().to_json_pretty()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: RunArgs) -> Result<()> {
    let mut scenario = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => Scenario::demo(),
    };
    args.apply(&mut scenario);
    scenario
        .config
        .validate()
        .context("Invalid engine configuration")?;

    info!(
        "⚡ MLFQ run: {} levels, quanta {:?}, aging {}, de-aging {}, {} processes",
        scenario.config.level_count(),
        scenario.config.quanta,
        scenario.config.aging_threshold,
        scenario.config.de_aging_threshold,
        scenario.processes.len()
    );

    let (engine, mut rx) = build_engine(&scenario)?;
    let handle = spawn_engine(engine).context("Failed to spawn engine thread")?;

    let token = handle.token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("🛑 Ctrl-C received, cancelling run");
            token.cancel();
        }
    });

    let mut view = LiveView::new(scenario.config.quanta.clone());
    let mut trace = Vec::new();
    while let Some(notification) = rx.recv().await {
        if let EngineNotification::Trace(event) = &notification {
            trace.push(event.clone());
        }
        if let Some(text) = view.apply(&notification) {
            println!("{text}");
        }
    }

    let summary = handle.wait().await.context("Engine run failed")?;
    println!();
    println!("{}", summary_table(&summary));

    if let Some(path) = args.trace_out {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_trace_jsonl(BufWriter::new(file), &trace)
            .with_context(|| format!("Failed to write trace to {}", path.display()))?;
        info!("📝 Trace written to {} ({} events)", path.display(), trace.len());
    }

    info!("✅ Run finished: {:?} at t={}", summary.outcome, summary.elapsed);
    Ok(())
}

fn build_engine(
    scenario: &Scenario,
) -> Result<(InteractiveEngine, UnboundedReceiver<EngineNotification>)> {
    match channel_engine(scenario.config.clone(), &scenario.processes, scenario.run) {
        Ok(parts) => Ok(parts),
        Err(err) if err.is_configuration_error() => Err(err).context("Invalid scenario"),
        Err(err) => Err(err).context("Failed to build engine"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_scenario() {
        let args = RunArgs {
            quanta: Some(vec![1, 2]),
            aging: Some(0),
            pacing_ms: Some(100),
            ..RunArgs::default()
        };
        let mut scenario = Scenario::demo();
        args.apply(&mut scenario);

        assert_eq!(scenario.config.quanta, vec![1, 2]);
        assert_eq!(scenario.config.aging_threshold, 0);
        assert_eq!(scenario.config.de_aging_threshold, 6);
        assert_eq!(scenario.run.pacing_ms, 100);
    }

    #[test]
    fn test_duplicate_id_reported_as_invalid_scenario() {
        let mut scenario = Scenario::demo();
        let first = scenario.processes[0].clone();
        scenario.processes.push(first);

        let err = build_engine(&scenario).unwrap_err();
        assert_eq!(err.to_string(), "Invalid scenario");
    }

    #[test]
    fn test_demo_scenario_builds() {
        assert!(build_engine(&Scenario::demo()).is_ok());
    }

    #[test]
    fn test_cli_parses_quanta_list() {
        let cli = Cli::parse_from(["mlfq", "run", "--quanta", "2,4,8", "--de-aging", "3"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.quanta, Some(vec![2, 4, 8]));
        assert_eq!(args.de_aging, Some(3));
    }
}
