use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the sensory feature vector fed to every brain.
pub const BRAIN_INPUTS: usize = 12;
/// Length of the action vector produced by every brain.
pub const BRAIN_OUTPUTS: usize = 4;

/// Two-layer feed-forward weight set.
///
/// `w1` is hidden-major: the weight from input `i` to hidden unit `h` lives at
/// `w1[h * BRAIN_INPUTS + i]`. `w2` is output-major: the weight from hidden
/// unit `h` to output `o` lives at `w2[o * hidden_size + h]`. There are no
/// bias terms.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Brain {
    /// Width of the hidden layer.
    pub hidden_size: usize,
    /// Input to hidden weights (`BRAIN_INPUTS * hidden_size`).
    pub w1: Vec<f32>,
    /// Hidden to output weights (`hidden_size * BRAIN_OUTPUTS`).
    pub w2: Vec<f32>,
}

impl Brain {
    /// Brain with every weight set to zero. Always outputs zeros.
    #[must_use]
    pub fn zeroed(hidden_size: usize) -> Self {
        Self {
            hidden_size,
            w1: vec![0.0; BRAIN_INPUTS * hidden_size],
            w2: vec![0.0; hidden_size * BRAIN_OUTPUTS],
        }
    }

    /// Total number of weights across both layers.
    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.w1.len() + self.w2.len()
    }

    /// Serialize brain to hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(bytes)
    }

    /// Deserialize brain from hex string.
    pub fn from_hex(hex_str: &str) -> anyhow::Result<Self> {
        let bytes = hex::decode(hex_str)?;
        let brain: Brain = serde_json::from_slice(&bytes)?;
        anyhow::ensure!(
            brain.w1.len() == BRAIN_INPUTS * brain.hidden_size
                && brain.w2.len() == brain.hidden_size * BRAIN_OUTPUTS,
            "weight matrices do not match hidden size {}",
            brain.hidden_size
        );
        Ok(brain)
    }
}

/// Display color derived from an agent's genes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Cosmetic genes. Only ever mapped to a [`Color`]; never read by behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Genes {
    /// Hue in [0, 1).
    pub hue: f32,
    /// Saturation, kept within [0.4, 0.98] by mutation.
    pub saturation: f32,
    /// Luminance, kept within [0.35, 0.8] by mutation.
    pub luminance: f32,
}

impl Genes {
    /// HSL to RGB.
    #[must_use]
    pub fn color(&self) -> Color {
        let h = self.hue.rem_euclid(1.0);
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.luminance.clamp(0.0, 1.0);

        if s <= f32::EPSILON {
            let v = to_byte(l);
            return Color { r: v, g: v, b: v };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Color {
            r: to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
            g: to_byte(hue_to_channel(p, q, h)),
            b: to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
        }
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        let red = Genes {
            hue: 0.0,
            saturation: 1.0,
            luminance: 0.5,
        };
        assert_eq!(red.color(), Color { r: 255, g: 0, b: 0 });

        let green = Genes {
            hue: 1.0 / 3.0,
            ..red
        };
        assert_eq!(green.color(), Color { r: 0, g: 255, b: 0 });

        let blue = Genes {
            hue: 2.0 / 3.0,
            ..red
        };
        assert_eq!(blue.color(), Color { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn test_grey_without_saturation() {
        let genes = Genes {
            hue: 0.7,
            saturation: 0.0,
            luminance: 0.5,
        };
        let c = genes.color();
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert_eq!(c.to_string(), "#808080");
    }

    #[test]
    fn test_brain_hex_roundtrip() {
        let mut brain = Brain::zeroed(3);
        brain.w1[4] = 0.25;
        brain.w2[7] = -1.5;
        let restored = Brain::from_hex(&brain.to_hex()).expect("valid hex");
        assert_eq!(brain, restored);
    }

    #[test]
    fn test_from_hex_rejects_mismatched_shape() {
        let mut brain = Brain::zeroed(2);
        brain.w2.pop();
        assert!(Brain::from_hex(&brain.to_hex()).is_err());
        assert!(Brain::from_hex("zz").is_err());
    }
}
