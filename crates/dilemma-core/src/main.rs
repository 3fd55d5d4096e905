//! Network Dilemma Runner
//!
//! Builds a small-world social network, seeds every node with a strategy,
//! plays the iterated Prisoner's Dilemma for a number of rounds, and prints
//! the per-strategy payoff summary.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use dilemma_core::config::{default_config_toml, DEFAULT_CONFIG_PATH};
use dilemma_core::output::{action_counts, format_summary_table};
use dilemma_core::{
    watts_strogatz, ConfigError, RoundReport, RoundSnapshot, SimConfig, SimError, SimRng, Simulation,
    StrategySummary,
};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "network_dilemma")]
#[command(about = "Iterated Prisoner's Dilemma on a small-world social network")]
struct Args {
    /// TOML run configuration (defaults are used if the file is missing)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to simulate (overrides the config)
    #[arg(long)]
    rounds: Option<u64>,

    /// Number of agents in the network (overrides the config)
    #[arg(long)]
    nodes: Option<usize>,

    /// Start every agent cooperating instead of drawing actions at random
    #[arg(long)]
    cooperative_start: bool,

    /// Print round reports, summary, and final state as JSON
    #[arg(long)]
    json: bool,

    /// Print a commented default configuration and exit
    #[arg(long)]
    print_default_config: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("could not encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything `--json` prints
#[derive(Serialize)]
struct RunOutput {
    seed: u64,
    rounds: Vec<RoundReport>,
    summary: Vec<StrategySummary>,
    final_state: RoundSnapshot,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut config = SimConfig::load_or_default(&args.config)?;
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(rounds) = args.rounds {
        config.simulation.rounds = rounds;
    }
    if let Some(nodes) = args.nodes {
        config.network.nodes = nodes;
    }
    if args.cooperative_start {
        config.simulation.random_start = false;
    }

    let options = config.options()?;
    tracing::info!(
        seed = options.seed,
        rounds = config.simulation.rounds,
        nodes = config.network.nodes,
        k = config.network.k,
        "starting simulation"
    );

    // The network gets its own stream so topology and play stay independent
    let mut topology_rng = SimRng::seeded(options.seed.wrapping_add(1));
    let graph = watts_strogatz(
        config.network.nodes,
        config.network.k,
        config.network.rewire_probability,
        &mut topology_rng.0,
    )?;

    let mut sim = Simulation::new(graph, config.payoff, &options)?;
    let reports = sim.run(config.simulation.rounds)?;
    let summary = sim.summarize();

    if args.json {
        let output = RunOutput {
            seed: options.seed,
            rounds: reports,
            summary,
            final_state: sim.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let counts = action_counts(sim.agents());
    println!("Network Dilemma");
    println!("===============");
    println!("Seed: {}", options.seed);
    println!("Agents: {}", sim.agents().len());
    println!("Rounds: {}", sim.round());
    println!(
        "Next actions: {} cooperate, {} defect",
        counts.cooperate, counts.defect
    );
    println!();
    print!("{}", format_summary_table(&summary));

    Ok(())
}
