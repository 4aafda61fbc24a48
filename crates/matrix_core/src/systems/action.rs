use crate::brain::{
    ACTIVATION_THRESHOLD, BRAIN_INPUTS, BRAIN_OUTPUTS, OUTPUT_EAT, OUTPUT_EMIT, OUTPUT_MOVE_X,
    OUTPUT_MOVE_Y,
};
use crate::config::{EvolutionConfig, MetabolismConfig};
use crate::field::Field;
use crate::lifecycle::{self, AgentIds, Bounds, SpawnContext};
use crate::systems::perception::{self, SenseContext};
use matrix_data::{Agent, PopulationStats, Position};
use rand::Rng;

/// Mutable world state threaded through one lifecycle pass.
pub struct LifecycleContext<'a> {
    pub field: &'a mut Field,
    pub metabolism: &'a MetabolismConfig,
    pub evolution: &'a EvolutionConfig,
    pub hidden_size: usize,
    pub tick: f64,
    pub sim_speed: f64,
    pub generation: u32,
    pub ids: &'a mut AgentIds,
    pub stats: &'a mut PopulationStats,
    pub bounds: Bounds,
}

impl LifecycleContext<'_> {
    fn spawn_ctx(&mut self) -> SpawnContext<'_> {
        SpawnContext {
            ids: &mut *self.ids,
            bounds: self.bounds,
            metabolism: self.metabolism,
            evolution: self.evolution,
            hidden_size: self.hidden_size,
            generation: self.generation,
        }
    }
}

/// Runs one lifecycle pass over `population`.
///
/// Agents act one at a time in ascending id order, so an earlier agent can
/// eat food a later one would have found. Newborns are queued and join the
/// population only after the pass, together with any floor top-up.
///
/// A birth is allowed only while the population projected to the end of the
/// pass stays below `max_agents`, so the pass never ends above the ceiling.
pub fn update_agents<R, F>(
    ctx: &mut LifecycleContext,
    population: &mut Vec<Agent>,
    delta: f64,
    rng: &mut R,
    mut decide: F,
) where
    R: Rng,
    F: FnMut(&Agent, &[f32; BRAIN_INPUTS]) -> [f32; BRAIN_OUTPUTS],
{
    let mut agents = std::mem::take(population);
    agents.retain(|a| a.alive);
    agents.sort_by_key(|a| a.id);

    let max_agents = ctx.evolution.max_agents;
    let mut survivors = 0usize;
    let mut newborns: Vec<Agent> = Vec::new();
    let pass_len = agents.len();

    for i in 0..pass_len {
        {
            let agent = &mut agents[i];
            agent.age += delta;
            agent.reproduction_cooldown = (agent.reproduction_cooldown - delta).max(0.0);
        }

        let inputs = {
            let sense_ctx = SenseContext {
                field: &*ctx.field,
                population: &agents,
                tick: ctx.tick,
                max_energy: ctx.metabolism.max_energy,
            };
            perception::sense(&sense_ctx, &agents[i], rng)
        };
        let outputs = decide(&agents[i], &inputs);
        let agent = &mut agents[i];

        move_agent(ctx, agent, &outputs, delta);

        let (cx, cy) = agent.position.cell();
        let (cx, cy) = ctx.field.clamp_cell(cx, cy);

        if outputs[OUTPUT_EAT] > ACTIVATION_THRESHOLD && ctx.field.food.has_food(cx as i64, cy as i64)
        {
            ctx.field.food.set(cx, cy, false);
            agent.energy = (agent.energy + ctx.metabolism.eat_gain).min(ctx.metabolism.max_energy);
            agent.food_eaten += 1;
        }

        let emit_cost = ctx.metabolism.emit_cost;
        if outputs[OUTPUT_EMIT] > ACTIVATION_THRESHOLD && agent.energy > emit_cost + 1.0 {
            ctx.field.pheromones.emit(cx, cy);
            agent.energy -= emit_cost;
        }

        // Crowding counts only agents already processed; the ceiling also
        // counts those still waiting, self included.
        let provisional = survivors + newborns.len() + 1;
        let projected = survivors + newborns.len() + (pass_len - i);
        if agent.energy >= ctx.evolution.reproduce_energy
            && agent.reproduction_cooldown <= 0.0
            && projected < max_agents
        {
            let crowding = 1.0 - provisional as f64 / max_agents as f64;
            if rng.gen::<f64>() < ctx.evolution.reproduce_chance * crowding {
                let child = lifecycle::spawn_offspring(&mut ctx.spawn_ctx(), agent, rng);
                tracing::debug!(parent = agent.id, child = child.id, "Agent born");
                ctx.stats.births += 1;
                newborns.push(child);
            }
        }

        agent.energy -= ctx.metabolism.energy_decay * delta * ctx.sim_speed;
        if agent.energy <= 0.0 {
            agent.energy = 0.0;
            agent.alive = false;
            ctx.stats.deaths += 1;
            tracing::debug!(id = agent.id, age = agent.age, "Agent starved");
        } else {
            survivors += 1;
        }
    }

    agents.retain(|a| a.alive);
    agents.append(&mut newborns);

    let floor = ctx.evolution.min_agents;
    if agents.len() < floor {
        let missing = floor - agents.len();
        for _ in 0..missing {
            let agent = lifecycle::create_agent_with_rng(&mut ctx.spawn_ctx(), rng);
            agents.push(agent);
        }
        ctx.stats.births += missing as u64;
        tracing::debug!(added = missing, floor, "Population topped up");
    }

    *population = agents;
}

fn move_agent(
    ctx: &LifecycleContext,
    agent: &mut Agent,
    outputs: &[f32; BRAIN_OUTPUTS],
    delta: f64,
) {
    let step = ctx.metabolism.move_speed * delta;
    let old = agent.position;
    let target = Position {
        x: old.x + f64::from(outputs[OUTPUT_MOVE_X]) * step,
        y: old.y + f64::from(outputs[OUTPUT_MOVE_Y]) * step,
    };
    agent.position = ctx.bounds.clamp(target);
    agent.distance_traveled += old.distance_sq(&agent.position).sqrt();
}
