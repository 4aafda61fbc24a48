//! The explicit world state and the per-tick operations on it.

use crate::brain::{BrainLogic, BRAIN_INPUTS, BRAIN_OUTPUTS};
use crate::config::{AppConfig, EvolutionConfig, WorldConfig};
use crate::error::Result;
use crate::field::Field;
use crate::lifecycle::{self, AgentIds, Bounds, SpawnContext};
use crate::snapshot::WorldSnapshot;
use crate::systems::action::{self, LifecycleContext};
use crate::systems::perception::{self, SenseContext};
use crate::systems::selection::{self, GenerationPhase, SelectionContext};
use crate::systems::stats::{self, StatsContext};
use matrix_data::{Agent, GenerationRecord, PopulationStats};
use rand::Rng;

/// Owns the field, the population and every counter of one run.
///
/// All operations take the random source as a parameter; the world itself
/// holds no generator.
#[derive(Debug, Clone)]
pub struct World {
    width: u16,
    height: u16,
    pub field: Field,
    pub agents: Vec<Agent>,
    /// Simulated time, advanced by the host.
    pub tick: f64,
    pub config: AppConfig,
    /// Starts at 1.
    pub generation: u32,
    pub generation_progress: f64,
    pub phase: GenerationPhase,
    pub stats: PopulationStats,
    ids: AgentIds,
}

impl World {
    /// Empty grids, empty population, generation 1.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let WorldConfig { width, height, .. } = config.world;

        Ok(Self {
            width,
            height,
            field: Field::new(width, height),
            agents: Vec::new(),
            tick: 0.0,
            config,
            generation: 1,
            generation_progress: 0.0,
            phase: GenerationPhase::Running,
            stats: PopulationStats::default(),
            ids: AgentIds::default(),
        })
    }

    /// Builds a world from the individual construction parameters, using
    /// default metabolism, field and brain settings.
    pub fn create(
        width: u16,
        height: u16,
        sim_speed: f64,
        target_food_density: f64,
        evolution: EvolutionConfig,
    ) -> Result<Self> {
        let mut config = AppConfig::default();
        config.world.width = width;
        config.world.height = height;
        config.world.sim_speed = sim_speed;
        config.world.target_food_density = target_food_density;
        config.evolution = evolution;
        Self::new(config)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Read from the config on every call, so host edits between ticks apply.
    pub fn sim_speed(&self) -> f64 {
        self.config.world.sim_speed
    }

    pub fn target_food_density(&self) -> f64 {
        self.config.world.target_food_density
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Id the next created agent will receive.
    pub fn next_agent_id(&self) -> u64 {
        self.ids.peek()
    }

    /// Fills each food cell independently with probability `density`.
    pub fn seed_food<R: Rng>(&mut self, density: f64, rng: &mut R) {
        self.field.food.seed(density, rng);
    }

    /// Replaces the population with `count` fresh founders. Seeding is not
    /// counted as births.
    pub fn init_agents<R: Rng>(&mut self, count: usize, rng: &mut R) {
        let mut spawn = self.spawn_ctx();
        let agents: Vec<Agent> = (0..count)
            .map(|_| lifecycle::create_agent_with_rng(&mut spawn, rng))
            .collect();
        self.agents = agents;
        tracing::debug!(count, "Agents seeded");
    }

    /// One B3/S23 step with regrowth chance `target_food_density * regrowth_factor`.
    pub fn step_automaton<R: Rng>(&mut self, rng: &mut R) {
        let chance = self.target_food_density() * self.config.field.regrowth_factor;
        self.field.food.step(chance, rng);
    }

    pub fn decay_pheromone(&mut self) {
        self.field.pheromones.decay(self.config.field.pheromone_decay);
    }

    /// Lifecycle pass with every agent driven by its own brain.
    pub fn update_agents<R: Rng>(&mut self, delta: f64, rng: &mut R) {
        self.update_agents_with(delta, rng, |agent, inputs| agent.brain.forward(inputs));
    }

    /// Lifecycle pass with actions supplied by `decide` instead of the brains.
    pub fn update_agents_with<R, F>(&mut self, delta: f64, rng: &mut R, decide: F)
    where
        R: Rng,
        F: FnMut(&Agent, &[f32; BRAIN_INPUTS]) -> [f32; BRAIN_OUTPUTS],
    {
        let mut ctx = LifecycleContext {
            field: &mut self.field,
            metabolism: &self.config.metabolism,
            evolution: &self.config.evolution,
            hidden_size: self.config.brain.hidden_size,
            tick: self.tick,
            sim_speed: self.config.world.sim_speed,
            generation: self.generation,
            ids: &mut self.ids,
            stats: &mut self.stats,
            bounds: Bounds::new(self.width, self.height),
        };
        action::update_agents(&mut ctx, &mut self.agents, delta, rng, decide);
    }

    /// Accumulates `delta` and runs one selection per completed generation.
    ///
    /// Returns whether at least one generation boundary was crossed. Never
    /// fires when the generation length is zero or negative.
    ///
    /// With a positive `generation_recovery`, a boundary culls the population
    /// to its parents and enters [`GenerationPhase::Reset`]. The clock stays
    /// paused until the recovery time has elapsed, then the population is
    /// refilled to the target.
    pub fn advance_generation<R: Rng>(&mut self, delta: f64, rng: &mut R) -> bool {
        let length = self.config.evolution.generation_length;
        if length <= 0.0 {
            return false;
        }

        if let GenerationPhase::Reset { remaining } = self.phase {
            let remaining = remaining - delta;
            if remaining > 0.0 {
                self.phase = GenerationPhase::Reset { remaining };
            } else {
                self.refill_generation(rng);
            }
            return false;
        }

        self.generation_progress += delta;
        let mut advanced = false;
        while self.generation_progress >= length {
            self.generation_progress -= length;
            self.generation += 1;
            self.run_selection(rng);
            advanced = true;
            if matches!(self.phase, GenerationPhase::Reset { .. }) {
                self.generation_progress = 0.0;
                break;
            }
        }
        advanced
    }

    fn spawn_ctx(&mut self) -> SpawnContext<'_> {
        SpawnContext {
            ids: &mut self.ids,
            bounds: Bounds::new(self.width, self.height),
            metabolism: &self.config.metabolism,
            evolution: &self.config.evolution,
            hidden_size: self.config.brain.hidden_size,
            generation: self.generation,
        }
    }

    /// Scores the current population and replaces it with the next
    /// generation, stamped with the current generation number.
    ///
    /// When recovery is configured only the parents are kept and the world
    /// enters the reset phase.
    pub fn run_selection<R: Rng>(&mut self, rng: &mut R) -> GenerationRecord {
        let recovery = self.config.evolution.generation_recovery;
        let history_len = self.config.telemetry.history_len;
        let mut agents = std::mem::take(&mut self.agents);
        let mut stats = std::mem::take(&mut self.stats);
        let mut ctx = SelectionContext {
            spawn: self.spawn_ctx(),
            stats: &mut stats,
            history_len,
        };
        let record = if recovery > 0.0 {
            selection::cull_to_parents(&mut ctx, &mut agents, rng)
        } else {
            selection::run_selection(&mut ctx, &mut agents, rng)
        };
        self.agents = agents;
        self.stats = stats;
        if recovery > 0.0 && record.scored > 0 {
            self.phase = GenerationPhase::Reset {
                remaining: recovery,
            };
        }
        record
    }

    /// Ends the reset phase, breeding the live population back up to the
    /// target.
    pub fn refill_generation<R: Rng>(&mut self, rng: &mut R) {
        let mut agents = std::mem::take(&mut self.agents);
        let mut stats = std::mem::take(&mut self.stats);
        {
            let mut spawn = self.spawn_ctx();
            selection::refill(&mut spawn, &mut stats, &mut agents, rng);
        }
        self.agents = agents;
        self.stats = stats;
        self.phase = GenerationPhase::Running;
    }

    /// Feature vector the agent at `index` would see right now.
    pub fn sense<R: Rng>(&self, index: usize, rng: &mut R) -> Option<[f32; BRAIN_INPUTS]> {
        let agent = self.agents.get(index)?;
        let ctx = SenseContext {
            field: &self.field,
            population: &self.agents,
            tick: self.tick,
            max_energy: self.config.metabolism.max_energy,
        };
        Some(perception::sense(&ctx, agent, rng))
    }

    pub fn refresh_stats(&mut self) {
        stats::update_population_stats(StatsContext {
            stats: &mut self.stats,
            agents: &self.agents,
            food_count: self.field.food.count(),
        });
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self)
    }
}
