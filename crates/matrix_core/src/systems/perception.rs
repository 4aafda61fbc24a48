use crate::brain::BRAIN_INPUTS;
use crate::field::{Field, PHEROMONE_MAX};
use matrix_data::Agent;
use rand::Rng;
use std::f64::consts::TAU;

/// Period of the shared oscillator input, in ticks.
pub const OSC_PERIOD: f64 = 20.0;
/// Squared distance at which the proximity input falls to zero.
pub const PROXIMITY_RADIUS_SQ: f64 = 25.0;

pub const INPUT_FOOD_N: usize = 0;
pub const INPUT_FOOD_S: usize = 1;
pub const INPUT_FOOD_E: usize = 2;
pub const INPUT_FOOD_W: usize = 3;
pub const INPUT_PROXIMITY: usize = 4;
pub const INPUT_PHEROMONE: usize = 5;
pub const INPUT_GRAD_X: usize = 6;
pub const INPUT_GRAD_Y: usize = 7;
pub const INPUT_WALL: usize = 8;
pub const INPUT_ENERGY: usize = 9;
pub const INPUT_OSC: usize = 10;
pub const INPUT_NOISE: usize = 11;

pub struct SenseContext<'a> {
    pub field: &'a Field,
    /// Everyone the sensing agent may notice. Entries with `alive == false`
    /// and the agent's own entry are skipped.
    pub population: &'a [Agent],
    pub tick: f64,
    pub max_energy: f64,
}

/// Builds the 12-feature input vector for `agent`.
///
/// Reads only; the field and population are untouched. Exactly one value
/// is drawn from `rng`, for the noise input.
pub fn sense<R: Rng>(ctx: &SenseContext, agent: &Agent, rng: &mut R) -> [f32; BRAIN_INPUTS] {
    let field = ctx.field;
    let w = field.width() as usize;
    let h = field.height() as usize;
    let (cx, cy) = agent.position.cell();
    let (cx, cy) = field.clamp_cell(cx, cy);
    let (x, y) = (cx as i64, cy as i64);

    let food = |dx: i64, dy: i64| f32::from(u8::from(field.food.has_food(x + dx, y + dy)));

    let mut inputs = [0.0; BRAIN_INPUTS];
    inputs[INPUT_FOOD_N] = food(0, -1);
    inputs[INPUT_FOOD_S] = food(0, 1);
    inputs[INPUT_FOOD_E] = food(1, 0);
    inputs[INPUT_FOOD_W] = food(-1, 0);
    inputs[INPUT_PROXIMITY] = proximity(agent, ctx.population) as f32;

    let pheromones = &field.pheromones;
    let here = f32::from(pheromones.get(cx, cy));
    let sample = |nx: Option<usize>, ny: Option<usize>| match (nx, ny) {
        (Some(nx), Some(ny)) if nx < w && ny < h => f32::from(pheromones.get(nx, ny)),
        _ => here,
    };
    let max = f32::from(PHEROMONE_MAX);
    let east = sample(cx.checked_add(1), Some(cy));
    let west = sample(cx.checked_sub(1), Some(cy));
    let south = sample(Some(cx), cy.checked_add(1));
    let north = sample(Some(cx), cy.checked_sub(1));
    inputs[INPUT_PHEROMONE] = here / max;
    inputs[INPUT_GRAD_X] = ((east - west) / max).clamp(-1.0, 1.0);
    inputs[INPUT_GRAD_Y] = ((south - north) / max).clamp(-1.0, 1.0);

    let (wf, hf) = (w as f64, h as f64);
    let (xf, yf) = (cx as f64, cy as f64);
    let wall = (xf / wf)
        .min(yf / hf)
        .min((wf - xf) / wf)
        .min((hf - yf) / hf);
    inputs[INPUT_WALL] = wall as f32;

    inputs[INPUT_ENERGY] = if ctx.max_energy > 0.0 {
        (agent.energy / ctx.max_energy).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    inputs[INPUT_OSC] = oscillator(ctx.tick) as f32;
    inputs[INPUT_NOISE] = rng.gen::<f32>();
    inputs
}

/// `clamp(1 - d²/25, 0, 1)` for the nearest other living agent; 0 when alone.
pub fn proximity(agent: &Agent, population: &[Agent]) -> f64 {
    population
        .iter()
        .filter(|other| other.alive && other.id != agent.id)
        .map(|other| agent.position.distance_sq(&other.position))
        .min_by(f64::total_cmp)
        .map_or(0.0, |d2| (1.0 - d2 / PROXIMITY_RADIUS_SQ).clamp(0.0, 1.0))
}

#[inline]
pub fn oscillator(tick: f64) -> f64 {
    0.5 + 0.5 * (TAU * tick / OSC_PERIOD).sin()
}
