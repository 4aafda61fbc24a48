//! Cosmetic gene creation and mutation.

use crate::brain::mutation::symmetric;
use crate::config::EvolutionConfig;
use matrix_data::Genes;
use rand::Rng;

pub const SATURATION_RANGE: (f32, f32) = (0.4, 0.98);
pub const LUMINANCE_RANGE: (f32, f32) = (0.35, 0.8);

pub trait GenesLogic {
    fn new_random_with_rng<R: Rng>(rng: &mut R) -> Self;
    fn mutate_with_config<R: Rng>(&mut self, config: &EvolutionConfig, rng: &mut R);
}

impl GenesLogic for Genes {
    fn new_random_with_rng<R: Rng>(rng: &mut R) -> Self {
        Self {
            hue: rng.gen::<f32>(),
            saturation: rng.gen_range(0.55..0.95),
            luminance: rng.gen_range(0.45..0.7),
        }
    }

    /// Hue wraps into [0, 1); saturation and luminance move by half as much
    /// and are clamped to their safe ranges.
    fn mutate_with_config<R: Rng>(&mut self, config: &EvolutionConfig, rng: &mut R) {
        let amount = config.color_mutation;
        self.hue = wrap_unit(self.hue + symmetric(amount, rng));
        self.saturation = (self.saturation + symmetric(amount * 0.5, rng))
            .clamp(SATURATION_RANGE.0, SATURATION_RANGE.1);
        self.luminance = (self.luminance + symmetric(amount * 0.5, rng))
            .clamp(LUMINANCE_RANGE.0, LUMINANCE_RANGE.1);
    }
}

fn wrap_unit(v: f32) -> f32 {
    let w = v.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}
