use anyhow::Result;
use clap::Parser;
use living_matrix_lib::app::{App, RunOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 5000)]
    ticks: u64,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Seed overriding `world.seed`
    #[arg(long)]
    seed: Option<u64>,

    /// Speed multiplier overriding `world.sim_speed`
    #[arg(long)]
    speed: Option<f64>,

    /// Write a JSON snapshot of the final world here
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut app = App::new(RunOptions {
        config_path: args.config,
        seed: args.seed,
        sim_speed: args.speed,
        snapshot_path: args.snapshot,
    })?;

    if let Some(summary) = app.run(args.ticks)? {
        let stats = &app.simulation.world.stats;
        tracing::info!(
            tick = summary.tick,
            generation = summary.generation,
            population = summary.population,
            food = summary.food,
            births = stats.births,
            deaths = stats.deaths,
            lineages = stats.lineage_count,
            best_fitness = stats.best_fitness,
            "Run finished"
        );
    }
    Ok(())
}
