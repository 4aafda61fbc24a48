use super::*;

/// Uniform weights scaled by fan-in: ±sqrt(1/12) for W1, ±sqrt(1/H) for W2.
pub fn create_brain_random_with_rng<R: Rng>(hidden_size: usize, rng: &mut R) -> Brain {
    let scale1 = (1.0 / BRAIN_INPUTS as f32).sqrt();
    let scale2 = (1.0 / hidden_size.max(1) as f32).sqrt();

    let w1 = (0..BRAIN_INPUTS * hidden_size)
        .map(|_| rng.gen_range(-scale1..scale1))
        .collect();
    let w2 = (0..hidden_size * BRAIN_OUTPUTS)
        .map(|_| rng.gen_range(-scale2..scale2))
        .collect();

    Brain {
        hidden_size,
        w1,
        w2,
    }
}
