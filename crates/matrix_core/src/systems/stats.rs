use matrix_data::{Agent, PopulationStats};
use std::collections::HashSet;

pub struct StatsContext<'a> {
    pub stats: &'a mut PopulationStats,
    pub agents: &'a [Agent],
    pub food_count: usize,
}

/// Refreshes the per-tick gauges. Cumulative counters are left alone.
pub fn update_population_stats(ctx: StatsContext) {
    ctx.stats.population = ctx.agents.len();
    ctx.stats.food_count = ctx.food_count;

    if ctx.agents.is_empty() {
        ctx.stats.avg_energy = 0.0;
        ctx.stats.avg_age = 0.0;
        ctx.stats.lineage_count = 0;
        return;
    }

    let n = ctx.agents.len() as f64;
    ctx.stats.avg_energy = ctx.agents.iter().map(|a| a.energy).sum::<f64>() / n;
    ctx.stats.avg_age = ctx.agents.iter().map(|a| a.age).sum::<f64>() / n;
    ctx.stats.lineage_count = ctx
        .agents
        .iter()
        .map(|a| a.lineage_id)
        .collect::<HashSet<_>>()
        .len();
}
