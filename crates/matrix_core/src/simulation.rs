//! Host loop: owns the world, its seeded generator and the metrics.

use crate::config::AppConfig;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::snapshot::WorldSnapshot;
use crate::world::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// What one host tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummary {
    pub tick: f64,
    pub generation: u32,
    pub population: usize,
    pub food: usize,
    pub generation_advanced: bool,
}

pub struct Simulation {
    pub world: World,
    rng: ChaCha8Rng,
    pub metrics: Metrics,
}

impl Simulation {
    /// Validates `config`, seeds food and agents.
    ///
    /// With `world.seed` set, two simulations built from the same config
    /// produce identical trajectories.
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        tracing::info!(
            fingerprint = %config.fingerprint(),
            seed = ?config.world.seed,
            width = config.world.width,
            height = config.world.height,
            "Simulation configured"
        );

        let metrics = Metrics::new(config.telemetry.log_interval);
        let density = config.world.initial_food_density;
        let count = config.world.initial_agents;
        let mut world = World::new(config)?;
        world.seed_food(density, &mut rng);
        world.init_agents(count, &mut rng);
        world.refresh_stats();

        Ok(Self {
            world,
            rng,
            metrics,
        })
    }

    /// Advances by `frame_delta` of host time, scaled by the world's speed.
    ///
    /// Order: time, automaton, pheromone decay, lifecycle, generation.
    pub fn tick(&mut self, frame_delta: f64) -> TickSummary {
        let start = Instant::now();
        let world = &mut self.world;
        let delta = frame_delta * world.sim_speed();
        world.tick += delta;

        world.step_automaton(&mut self.rng);
        world.decay_pheromone();
        world.update_agents(delta, &mut self.rng);

        let before = world.generation;
        let advanced = world.advance_generation(delta, &mut self.rng);
        if advanced {
            let crossed = (world.generation - before) as usize;
            for record in world.stats.history.iter().rev().take(crossed).rev() {
                self.metrics.record_generation(record);
            }
        }

        world.refresh_stats();
        self.metrics.record_tick(
            start.elapsed(),
            world.stats.population,
            world.stats.food_count,
            world.generation,
        );

        TickSummary {
            tick: world.tick,
            generation: world.generation,
            population: world.stats.population,
            food: world.stats.food_count,
            generation_advanced: advanced,
        }
    }

    /// Runs `ticks` steps of `frame_delta` each and returns the last summary.
    pub fn run(&mut self, ticks: u64, frame_delta: f64) -> Option<TickSummary> {
        let mut last = None;
        for _ in 0..ticks {
            last = Some(self.tick(frame_delta));
        }
        last
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }
}
