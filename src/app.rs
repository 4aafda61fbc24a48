use anyhow::{Context, Result};
use matrix_core::config::AppConfig;
use matrix_core::{Simulation, TickSummary};
use std::fs;
use std::path::{Path, PathBuf};

/// Host time advanced per headless frame.
pub const FRAME_DELTA: f64 = 1.0;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub seed: Option<u64>,
    pub sim_speed: Option<f64>,
    pub snapshot_path: Option<PathBuf>,
}

pub struct App {
    pub simulation: Simulation,
    pub config: AppConfig,
    snapshot_path: Option<PathBuf>,
}

impl App {
    pub fn new(options: RunOptions) -> Result<Self> {
        let mut config = load_config(&options.config_path)?;
        if let Some(seed) = options.seed {
            config.world.seed = Some(seed);
        }
        if let Some(speed) = options.sim_speed {
            config.world.sim_speed = speed;
        }

        let simulation =
            Simulation::new(config.clone()).context("Invalid simulation configuration")?;
        Ok(Self {
            simulation,
            config,
            snapshot_path: options.snapshot_path,
        })
    }

    /// Runs `ticks` frames, stopping early if the population dies out with
    /// no floor and no generational reseeding to bring it back.
    pub fn run(&mut self, ticks: u64) -> Result<Option<TickSummary>> {
        let can_recover =
            self.config.evolution.min_agents > 0 || self.config.generations_enabled();
        let mut last = None;
        for _ in 0..ticks {
            let summary = self.simulation.tick(FRAME_DELTA);
            last = Some(summary);
            if summary.population == 0 && !can_recover {
                tracing::warn!(tick = summary.tick, "Population extinct, stopping");
                break;
            }
        }

        if let Some(path) = &self.snapshot_path {
            self.write_snapshot(path)?;
        }
        Ok(last)
    }

    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = self.simulation.snapshot();
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Snapshot written");
        Ok(())
    }
}

/// Reads `path`, falling back to defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    AppConfig::from_toml(&content)
        .with_context(|| format!("Invalid config {}", path.display()))
}
