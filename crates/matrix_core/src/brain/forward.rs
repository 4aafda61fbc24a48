use super::*;

/// `out = tanh(tanh(inputs · W1) · W2)`, no bias terms.
pub fn forward(brain: &Brain, inputs: &[f32; BRAIN_INPUTS]) -> [f32; BRAIN_OUTPUTS] {
    let mut outputs = [0.0; BRAIN_OUTPUTS];
    if brain.hidden_size == 0 {
        return outputs;
    }

    let hidden: Vec<f32> = brain
        .w1
        .chunks_exact(BRAIN_INPUTS)
        .map(|row| dot(row, inputs).tanh())
        .collect();

    for (output, row) in outputs
        .iter_mut()
        .zip(brain.w2.chunks_exact(brain.hidden_size))
    {
        *output = dot(row, &hidden).tanh();
    }
    outputs
}

#[inline]
fn dot(weights: &[f32], values: &[f32]) -> f32 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}
