//! End-of-generation fitness scoring and population replacement.

use crate::config::EvolutionConfig;
use crate::lifecycle::{self, SpawnContext};
use matrix_data::{Agent, Champion, GenerationRecord, PopulationStats};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const ENERGY_WEIGHT: f64 = 0.55;
pub const FOOD_WEIGHT: f64 = 0.30;
pub const DISTANCE_WEIGHT: f64 = 0.15;
/// Fitness floor applied before exponentiation in the roulette wheel.
pub const MIN_SELECTION_WEIGHT: f64 = 0.001;

pub struct SelectionContext<'a> {
    pub spawn: SpawnContext<'a>,
    pub stats: &'a mut PopulationStats,
    pub history_len: usize,
}

/// Fitness in [0, 1] for every agent, in input order.
///
/// Each term is min-max normalized over `agents`; when all agents share a
/// value the term is 1 for everyone.
pub fn fitness_scores(agents: &[Agent]) -> Vec<f64> {
    let energy = normalized(agents.iter().map(|a| a.energy));
    let food = normalized(agents.iter().map(|a| f64::from(a.food_eaten)));
    let distance = normalized(agents.iter().map(|a| a.distance_traveled));

    energy
        .iter()
        .zip(&food)
        .zip(&distance)
        .map(|((e, f), d)| ENERGY_WEIGHT * e + FOOD_WEIGHT * f + DISTANCE_WEIGHT * d)
        .collect()
}

fn normalized(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let values: Vec<f64> = values.collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    values
        .iter()
        .map(|v| if range > 0.0 { (v - min) / range } else { 1.0 })
        .collect()
}

/// Fitness-proportionate sampler over `max(0.001, f)^power`.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

impl RouletteWheel {
    pub fn new(fitness: &[f64], power: f64) -> Self {
        let mut total = 0.0;
        let cumulative = fitness
            .iter()
            .map(|f| {
                total += f.max(MIN_SELECTION_WEIGHT).powf(power);
                total
            })
            .collect();
        Self { cumulative }
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Index of the first slot whose cumulative weight reaches the draw.
    /// Returns `None` only for an empty wheel.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.cumulative.is_empty() {
            return None;
        }
        let target = rng.gen::<f64>() * self.total();
        let idx = self
            .cumulative
            .iter()
            .position(|&c| c >= target)
            .unwrap_or(self.cumulative.len() - 1);
        Some(idx)
    }
}

/// Where the generation clock stands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub enum GenerationPhase {
    #[default]
    Running,
    /// Culled to parents; refills once `remaining` delta has elapsed.
    Reset { remaining: f64 },
}

/// Replaces `population` with the next generation.
///
/// Survivors (top `survivor_fraction`, at least one) become parents. The top
/// `elite_fraction * target` of them each contribute one mutated child
/// unconditionally; roulette draws fill the rest. An empty population is
/// reseeded with fresh founders.
pub fn run_selection<R: Rng>(
    ctx: &mut SelectionContext,
    population: &mut Vec<Agent>,
    rng: &mut R,
) -> GenerationRecord {
    let target = target_size(ctx.spawn.evolution);
    let generation = ctx.spawn.generation;

    let mut old = std::mem::take(population);
    old.retain(|a| a.alive);
    if old.is_empty() {
        return reseed(ctx, population, rng);
    }

    let scored_count = old.len();
    let parents = rank_parents(old, ctx.spawn.evolution.survivor_fraction);
    let (avg_fitness, best_fitness) = record_parents(ctx, &parents);
    let (next, elite_count) = breed(&mut ctx.spawn, &parents, target, rng);

    ctx.stats.deaths += scored_count as u64;
    ctx.stats.births += next.len() as u64;

    let record = GenerationRecord {
        generation,
        scored: scored_count,
        survivors: parents.len(),
        avg_fitness,
        best_fitness,
        population: next.len(),
    };
    ctx.stats.push_history(record.clone(), ctx.history_len);

    tracing::info!(
        generation,
        survivors = parents.len(),
        elites = elite_count,
        avg_fitness,
        best_fitness,
        population = next.len(),
        "Generation advanced"
    );

    *population = next;
    record
}

/// Scores `population` and keeps only the parents, unchanged.
///
/// Used when a recovery period follows selection; [`refill`] breeds the
/// population back up afterwards. An empty population is reseeded as in
/// [`run_selection`].
pub fn cull_to_parents<R: Rng>(
    ctx: &mut SelectionContext,
    population: &mut Vec<Agent>,
    rng: &mut R,
) -> GenerationRecord {
    let generation = ctx.spawn.generation;

    let mut old = std::mem::take(population);
    old.retain(|a| a.alive);
    if old.is_empty() {
        return reseed(ctx, population, rng);
    }

    let scored_count = old.len();
    let parents = rank_parents(old, ctx.spawn.evolution.survivor_fraction);
    let (avg_fitness, best_fitness) = record_parents(ctx, &parents);
    let survivors = parents.len();
    ctx.stats.deaths += (scored_count - survivors) as u64;

    let record = GenerationRecord {
        generation,
        scored: scored_count,
        survivors,
        avg_fitness,
        best_fitness,
        population: survivors,
    };
    ctx.stats.push_history(record.clone(), ctx.history_len);
    tracing::info!(
        generation,
        survivors,
        avg_fitness,
        best_fitness,
        "Generation culled, recovering"
    );

    *population = parents.into_iter().map(|(_, agent)| agent).collect();
    record
}

/// Breeds the live population back up to the target after recovery.
///
/// Every live agent is a parent, ranked by fitness at this moment. The
/// parents are replaced by their children.
pub fn refill<R: Rng>(
    spawn: &mut SpawnContext,
    stats: &mut PopulationStats,
    population: &mut Vec<Agent>,
    rng: &mut R,
) {
    let target = target_size(spawn.evolution);
    let mut old = std::mem::take(population);
    old.retain(|a| a.alive);

    let next = if old.is_empty() {
        (0..target)
            .map(|_| lifecycle::create_agent_with_rng(spawn, rng))
            .collect()
    } else {
        stats.deaths += old.len() as u64;
        let parents = rank_parents(old, 1.0);
        breed(spawn, &parents, target, rng).0
    };
    stats.births += next.len() as u64;
    tracing::info!(
        generation = spawn.generation,
        population = next.len(),
        "Recovery over, population refilled"
    );
    *population = next;
}

fn target_size(evolution: &EvolutionConfig) -> usize {
    evolution.min_agents.max(evolution.max_agents)
}

/// Fitness-sorted parents, best first, ties by ascending id.
fn rank_parents(agents: Vec<Agent>, survivor_fraction: f64) -> Vec<(f64, Agent)> {
    let scored_count = agents.len();
    let fitness = fitness_scores(&agents);
    let mut ranked: Vec<(f64, Agent)> = fitness.into_iter().zip(agents).collect();
    ranked.sort_by(|(fa, a), (fb, b)| {
        fb.partial_cmp(fa)
            .unwrap_or(Ordering::Equal)
            .then(a.id.cmp(&b.id))
    });

    let survivor_count =
        ((scored_count as f64 * survivor_fraction).floor() as usize).clamp(1, scored_count);
    ranked.truncate(survivor_count);
    ranked
}

/// Updates champion and fitness statistics; returns `(avg, best)`.
fn record_parents(ctx: &mut SelectionContext, parents: &[(f64, Agent)]) -> (f64, f64) {
    let (best_fitness, best) = &parents[0];
    let avg_fitness = parents.iter().map(|(f, _)| f).sum::<f64>() / parents.len() as f64;

    ctx.stats.champion = Some(Champion {
        id: best.id,
        lineage_id: best.lineage_id,
        fitness: *best_fitness,
        generation: ctx.spawn.generation,
        genome_hex: best.brain.to_hex(),
    });
    ctx.stats.last_survivors = parents.len();
    ctx.stats.avg_fitness = avg_fitness;
    ctx.stats.best_fitness = *best_fitness;
    (avg_fitness, *best_fitness)
}

/// Elite children first, then roulette draws up to `target`.
fn breed<R: Rng>(
    spawn: &mut SpawnContext,
    parents: &[(f64, Agent)],
    target: usize,
    rng: &mut R,
) -> (Vec<Agent>, usize) {
    let evolution = spawn.evolution;
    let elite_count = ((target as f64 * evolution.elite_fraction).floor() as usize)
        .min(parents.len())
        .min(target);

    let mut next = Vec::with_capacity(target);
    for (_, parent) in &parents[..elite_count] {
        next.push(lifecycle::spawn_generational_child(spawn, parent, rng));
    }

    let parent_fitness: Vec<f64> = parents.iter().map(|(f, _)| *f).collect();
    let wheel = RouletteWheel::new(&parent_fitness, evolution.selection_power);
    while next.len() < target {
        let idx = wheel.spin(rng).unwrap_or(0);
        next.push(lifecycle::spawn_generational_child(spawn, &parents[idx].1, rng));
    }
    (next, elite_count)
}

fn reseed<R: Rng>(
    ctx: &mut SelectionContext,
    population: &mut Vec<Agent>,
    rng: &mut R,
) -> GenerationRecord {
    let target = target_size(ctx.spawn.evolution);
    let generation = ctx.spawn.generation;
    let next: Vec<Agent> = (0..target)
        .map(|_| lifecycle::create_agent_with_rng(&mut ctx.spawn, rng))
        .collect();
    ctx.stats.births += next.len() as u64;
    ctx.stats.last_survivors = 0;
    ctx.stats.avg_fitness = 0.0;
    ctx.stats.best_fitness = 0.0;
    tracing::warn!(generation, population = next.len(), "Population extinct, reseeded");

    let record = GenerationRecord {
        generation,
        scored: 0,
        survivors: 0,
        avg_fitness: 0.0,
        best_fitness: 0.0,
        population: next.len(),
    };
    ctx.stats.push_history(record.clone(), ctx.history_len);
    *population = next;
    record
}
