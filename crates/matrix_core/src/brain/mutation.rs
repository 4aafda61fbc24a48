use super::*;
use crate::config::EvolutionConfig;

pub fn mutate_with_config<R: Rng>(brain: &mut Brain, config: &EvolutionConfig, rng: &mut R) {
    let rate = config.mutation_rate;
    let amount = config.mutation_strength;
    mutate_weights(&mut brain.w1, rate, amount, rng);
    mutate_weights(&mut brain.w2, rate, amount, rng);
}

/// Each weight independently, with probability `rate`, is perturbed by
/// uniform(-amount, amount) and clamped to the weight limit. Others pass
/// through untouched.
pub fn mutate_weights<R: Rng>(weights: &mut [f32], rate: f32, amount: f32, rng: &mut R) {
    for w in weights.iter_mut() {
        if rng.gen::<f32>() < rate {
            *w = (*w + symmetric(amount, rng)).clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT);
        }
    }
}

/// Uniform sample in (-amount, amount); zero when `amount` is not positive.
pub(crate) fn symmetric<R: Rng>(amount: f32, rng: &mut R) -> f32 {
    if amount > 0.0 {
        rng.gen_range(-amount..amount)
    } else {
        0.0
    }
}
