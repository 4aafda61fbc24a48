use crate::systems::selection::GenerationPhase;
use crate::world::World;
use matrix_data::{Color, PopulationStats};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AgentSnapshot {
    pub id: u64,
    pub lineage_id: Uuid,
    pub x: f64,
    pub y: f64,
    pub energy: f64,
    pub age: f64,
    pub color: Color,
    pub generation_born: u32,
    pub food_eaten: u32,
}

/// Read-only copy of everything a presentation layer needs.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: f64,
    pub generation: u32,
    pub phase: GenerationPhase,
    pub width: u16,
    pub height: u16,
    /// Row-major, one byte per cell, 0 or 1.
    pub food: Vec<u8>,
    /// Row-major intensities.
    pub pheromones: Vec<u8>,
    pub agents: Vec<AgentSnapshot>,
    pub stats: PopulationStats,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        let agents = world
            .agents
            .iter()
            .map(|a| AgentSnapshot {
                id: a.id,
                lineage_id: a.lineage_id,
                x: a.position.x,
                y: a.position.y,
                energy: a.energy,
                age: a.age,
                color: a.genes.color(),
                generation_born: a.generation_born,
                food_eaten: a.food_eaten,
            })
            .collect();

        Self {
            tick: world.tick,
            generation: world.generation,
            phase: world.phase,
            width: world.width(),
            height: world.height(),
            food: world.field.food.cells().to_vec(),
            pheromones: world.field.pheromones.cells().to_vec(),
            agents,
            stats: world.stats.clone(),
        }
    }
}
