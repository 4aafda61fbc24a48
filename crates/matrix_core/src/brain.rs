pub mod forward;
pub mod init;
pub mod mutation;

pub use matrix_data::{Brain, BRAIN_INPUTS, BRAIN_OUTPUTS};
use rand::Rng;

pub use init::create_brain_random_with_rng;

/// Trait defining the core logic for agent brains.
pub trait BrainLogic {
    fn new_random_with_rng<R: Rng>(hidden_size: usize, rng: &mut R) -> Self;

    /// Pure feed-forward evaluation.
    #[must_use]
    fn forward(&self, inputs: &[f32; BRAIN_INPUTS]) -> [f32; BRAIN_OUTPUTS];

    fn mutate_with_config<R: Rng>(
        &mut self,
        config: &crate::config::EvolutionConfig,
        rng: &mut R,
    );
}

pub const INPUT_LABELS: [&str; BRAIN_INPUTS] = [
    "FoodN", "FoodS", "FoodE", "FoodW", "Prox", "Phero", "GradX", "GradY", "Wall", "Energy",
    "Osc", "Noise",
];

pub const OUTPUT_LABELS: [&str; BRAIN_OUTPUTS] = ["MoveX", "MoveY", "Eat", "Emit"];

pub const OUTPUT_MOVE_X: usize = 0;
pub const OUTPUT_MOVE_Y: usize = 1;
pub const OUTPUT_EAT: usize = 2;
pub const OUTPUT_EMIT: usize = 3;

/// Eat and emit outputs act when strictly above this value.
pub const ACTIVATION_THRESHOLD: f32 = 0.5;
/// Mutated weights are clamped to `[-WEIGHT_LIMIT, WEIGHT_LIMIT]`.
pub const WEIGHT_LIMIT: f32 = 2.0;

impl BrainLogic for Brain {
    fn new_random_with_rng<R: Rng>(hidden_size: usize, rng: &mut R) -> Self {
        init::create_brain_random_with_rng(hidden_size, rng)
    }

    fn forward(&self, inputs: &[f32; BRAIN_INPUTS]) -> [f32; BRAIN_OUTPUTS] {
        forward::forward(self, inputs)
    }

    fn mutate_with_config<R: Rng>(
        &mut self,
        config: &crate::config::EvolutionConfig,
        rng: &mut R,
    ) {
        mutation::mutate_with_config(self, config, rng)
    }
}
