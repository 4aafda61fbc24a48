//! Agent creation: fresh founders, reproduction offspring and generational
//! children.

use crate::brain::BrainLogic;
use crate::config::{EvolutionConfig, MetabolismConfig};
use crate::genetics::GenesLogic;
use matrix_data::{Agent, Brain, Genes, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distance kept between any agent and the grid edge.
pub const BOUNDARY_MARGIN: f64 = 0.25;

/// Monotonic agent id source. Ids are never reused within a world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentIds {
    next: u64,
}

impl AgentIds {
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Id the next allocation will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

/// Legal position range for a `width` x `height` grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Clamps into `[BOUNDARY_MARGIN, dim - BOUNDARY_MARGIN]` on both axes.
    pub fn clamp(&self, position: Position) -> Position {
        Position {
            x: clamp_axis(position.x, self.width),
            y: clamp_axis(position.y, self.height),
        }
    }

    /// Centre of a uniformly chosen cell.
    pub fn random_cell_centre<R: Rng>(&self, rng: &mut R) -> Position {
        Position {
            x: (rng.gen::<f64>() * self.width).floor() + 0.5,
            y: (rng.gen::<f64>() * self.height).floor() + 0.5,
        }
    }
}

fn clamp_axis(v: f64, dim: f64) -> f64 {
    let hi = (dim - BOUNDARY_MARGIN).max(BOUNDARY_MARGIN);
    v.clamp(BOUNDARY_MARGIN, hi)
}

/// Everything needed to mint a new agent.
pub struct SpawnContext<'a> {
    pub ids: &'a mut AgentIds,
    pub bounds: Bounds,
    pub metabolism: &'a MetabolismConfig,
    pub evolution: &'a EvolutionConfig,
    pub hidden_size: usize,
    pub generation: u32,
}

/// Freshly randomized founder with its own lineage.
pub fn create_agent_with_rng<R: Rng>(ctx: &mut SpawnContext, rng: &mut R) -> Agent {
    let position = ctx.bounds.random_cell_centre(rng);
    let max = ctx.metabolism.max_energy;
    let energy = rng.gen_range(max * 0.6..=max);
    let brain = Brain::new_random_with_rng(ctx.hidden_size, rng);
    let genes = Genes::new_random_with_rng(rng);
    let lineage_id = Uuid::from_u128(rng.gen::<u128>());

    Agent {
        id: ctx.ids.next_id(),
        lineage_id,
        position,
        energy,
        age: 0.0,
        alive: true,
        reproduction_cooldown: 0.0,
        distance_traveled: 0.0,
        food_eaten: 0,
        generation_born: ctx.generation,
        brain,
        genes,
    }
}

/// Splits `parent`'s energy with a mutated child placed next to it.
///
/// The parent loses `energy * child_energy_share`, which becomes the child's
/// energy. Both start the configured cooldown.
pub fn spawn_offspring<R: Rng>(ctx: &mut SpawnContext, parent: &mut Agent, rng: &mut R) -> Agent {
    let share = parent.energy * ctx.evolution.child_energy_share;
    parent.energy -= share;
    parent.reproduction_cooldown = ctx.evolution.reproduce_cooldown;

    let offset = Position {
        x: parent.position.x + rng.gen_range(-0.5..0.5),
        y: parent.position.y + rng.gen_range(-0.5..0.5),
    };
    let mut child = inherit(ctx, parent, rng);
    child.position = ctx.bounds.clamp(offset);
    child.energy = share;
    child.reproduction_cooldown = ctx.evolution.reproduce_cooldown;
    child
}

/// Mutated copy of `parent` for the next generation, re-energized and
/// repositioned at random.
pub fn spawn_generational_child<R: Rng>(
    ctx: &mut SpawnContext,
    parent: &Agent,
    rng: &mut R,
) -> Agent {
    let mut child = inherit(ctx, parent, rng);
    let max = ctx.metabolism.max_energy;
    child.energy = rng.gen_range(max * 0.5..=max * 0.8);
    child.position = ctx.bounds.random_cell_centre(rng);
    child
}

fn inherit<R: Rng>(ctx: &mut SpawnContext, parent: &Agent, rng: &mut R) -> Agent {
    let mut brain = parent.brain.clone();
    brain.mutate_with_config(ctx.evolution, rng);
    let mut genes = parent.genes;
    genes.mutate_with_config(ctx.evolution, rng);

    Agent {
        id: ctx.ids.next_id(),
        lineage_id: parent.lineage_id,
        position: parent.position,
        energy: 0.0,
        age: 0.0,
        alive: true,
        reproduction_cooldown: 0.0,
        distance_traveled: 0.0,
        food_eaten: 0,
        generation_born: ctx.generation,
        brain,
        genes,
    }
}
