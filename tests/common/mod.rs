pub mod macros;

use living_matrix_lib::data::{Agent, Position};
use living_matrix_lib::model::brain::{BRAIN_INPUTS, BRAIN_OUTPUTS};
use living_matrix_lib::model::config::AppConfig;
use living_matrix_lib::model::world::World;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[allow(dead_code)]
struct AgentSeed {
    x: f64,
    y: f64,
    energy: f64,
}

/// Small deterministic worlds for integration tests.
///
/// Defaults: 5x5 grid, no population floor, no spontaneous reproduction,
/// no regrowth, generational cycling off.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    agents: Vec<AgentSeed>,
    food: Vec<(usize, usize)>,
    pheromones: Vec<(usize, usize, u8)>,
    seed: u64,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.width = 5;
        config.world.height = 5;
        config.world.initial_agents = 0;
        config.world.target_food_density = 0.0;
        config.evolution.min_agents = 0;
        config.evolution.reproduce_chance = 0.0;
        config.evolution.generation_length = 0.0;
        Self {
            config,
            agents: Vec::new(),
            food: Vec::new(),
            pheromones: Vec::new(),
            seed: 7,
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_agent(mut self, x: f64, y: f64, energy: f64) -> Self {
        self.agents.push(AgentSeed { x, y, energy });
        self
    }

    pub fn with_food(mut self, x: usize, y: usize) -> Self {
        self.food.push((x, y));
        self
    }

    pub fn with_pheromone(mut self, x: usize, y: usize, value: u8) -> Self {
        self.pheromones.push((x, y, value));
        self
    }

    /// Agents get ids in the order they were added.
    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to build test world");
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        world.init_agents(self.agents.len(), &mut rng);
        for (agent, seed) in world.agents.iter_mut().zip(&self.agents) {
            agent.position = Position {
                x: seed.x,
                y: seed.y,
            };
            agent.energy = seed.energy;
        }
        for (x, y) in self.food {
            world.field.food.set(x, y, true);
        }
        for (x, y, v) in self.pheromones {
            world.field.pheromones.set(x, y, v);
        }
        world
    }
}

/// Decision function that always returns `outputs`.
#[allow(dead_code)]
pub fn fixed(
    outputs: [f32; BRAIN_OUTPUTS],
) -> impl FnMut(&Agent, &[f32; BRAIN_INPUTS]) -> [f32; BRAIN_OUTPUTS] {
    move |_, _| outputs
}

/// Every draw is 0.0: every probability check passes, ranges give their low end.
#[allow(dead_code)]
pub fn zero_rng() -> StepRng {
    StepRng::new(0, 0)
}

/// Every draw is just below 1.0: probability checks below 1 never pass.
#[allow(dead_code)]
pub fn never_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}
