//! Command-line runner for the predator-prey simulation.

mod render;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use predprey_core::SimulationConfig;
use predprey_world::Simulator;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "predprey", version, about = "Grid-based fox and rabbit population simulation")]
struct Args {
    /// JSON configuration file; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid rows
    #[arg(long)]
    depth: Option<usize>,

    /// Grid columns
    #[arg(long)]
    width: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of steps (defaults to the long-run length)
    #[arg(short, long)]
    steps: Option<u64>,

    /// Print a status line every N steps (0 disables)
    #[arg(long, default_value_t = 1)]
    report_every: u64,

    /// Print the grid after every reported step
    #[arg(long)]
    show_grid: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn load_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_telemetry(args.json_logs)?;

    let config = args.load_config()?;
    let max_steps = args.steps.unwrap_or(config.long_run_steps);
    info!(
        depth = config.depth,
        width = config.width,
        seed = config.seed,
        "Starting predprey"
    );

    let mut sim = Simulator::new(config).context("invalid simulation config")?;

    let executed = if args.report_every == 0 {
        sim.run(max_steps)
    } else {
        report(&mut sim, &args);
        sim.run_with(max_steps, |sim| {
            if sim.step_count() % args.report_every == 0 {
                report(sim, &args);
            }
        })
    };

    info!(executed, final_population = %sim.details(), "Simulation ended");
    Ok(())
}

fn report(sim: &mut Simulator, args: &Args) {
    println!("{}", render::status_line(sim));
    if args.show_grid {
        println!("{}", render::render_grid(sim));
    }
}
