//! Temperance
//!
//! Step through the foraging simulation one tick at a time, or run a fixed
//! number of ticks and print where the world ended up.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use temperance_core::config::SimConfig;
use temperance_core::events::EventLogger;
use temperance_core::output::{render, render_rule_legend};
use temperance_core::{SimError, Simulation};

const PROMPT: &str = "Press Enter to move, or \"q\" to quit.";

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "temperance")]
#[command(about = "Foraging agents that learn how much it is wise to eat")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// TOML configuration file (temperance.toml is tried when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run this many ticks without prompting, then print the final state
    #[arg(long)]
    ticks: Option<u64>,

    /// Write every event to this JSONL file
    #[arg(long)]
    events: Option<PathBuf>,

    /// How many agents get an info panel
    #[arg(long)]
    show_agents: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("temperance=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), RunError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path).map_err(SimError::from)?,
        None => SimConfig::load_or_default(),
    };
    if let Some(shown) = args.show_agents {
        config.agents.shown_info = shown;
    }
    let shown = config.agents.shown_info;

    let mut sim = Simulation::new(config, args.seed)?;
    let mut logger = match &args.events {
        Some(path) => EventLogger::new(path)?,
        None => EventLogger::null(),
    };
    tracing::info!(seed = args.seed, "simulation started");

    match args.ticks {
        Some(ticks) => run_batch(&mut sim, &mut logger, ticks)?,
        None => run_interactive(&mut sim, &mut logger, shown)?,
    }

    logger.flush()?;
    tracing::info!(
        ticks = sim.tick(),
        survivors = sim.agents().len(),
        events = logger.event_count(),
        "simulation finished"
    );

    if args.ticks.is_some() {
        println!("{}", render(&sim.snapshot(), shown));
    }
    Ok(())
}

fn run_batch(sim: &mut Simulation, logger: &mut EventLogger, ticks: u64) -> Result<(), RunError> {
    for _ in 0..ticks {
        let report = sim.step()?;
        logger.log_tick(&report.events)?;
        if sim.is_extinct() {
            tracing::info!(tick = report.tick, "no agents left");
            break;
        }
    }
    Ok(())
}

fn run_interactive(
    sim: &mut Simulation,
    logger: &mut EventLogger,
    shown: usize,
) -> Result<(), RunError> {
    print!("{}", render_rule_legend());
    println!();
    println!("{}", render(&sim.snapshot(), shown));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim().eq_ignore_ascii_case("q") {
            break;
        }

        let report = sim.step()?;
        logger.log_tick(&report.events)?;
        println!("Tick {}", report.tick);
        println!("{}", render(&sim.snapshot(), shown));

        if sim.is_extinct() {
            tracing::info!(tick = report.tick, "no agents left");
            break;
        }
    }
    Ok(())
}
