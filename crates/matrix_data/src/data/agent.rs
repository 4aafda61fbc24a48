use super::genotype::{Brain, Genes};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Continuous position in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Grid cell containing this position.
    #[must_use]
    pub fn cell(&self) -> (usize, usize) {
        (self.x.max(0.0).floor() as usize, self.y.max(0.0).floor() as usize)
    }

    #[must_use]
    pub fn distance_sq(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// A mobile organism.
///
/// Brain and genes are owned values; inheritance always copies them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    /// Monotonic identifier, never reused within a world.
    pub id: u64,
    /// Shared by every descendant of the same freshly-randomized founder.
    pub lineage_id: Uuid,
    pub position: Position,
    pub energy: f64,
    pub age: f64,
    pub alive: bool,
    pub reproduction_cooldown: f64,
    /// Lifetime path length, an input to fitness.
    pub distance_traveled: f64,
    /// Lifetime food cells consumed, an input to fitness.
    pub food_eaten: u32,
    pub generation_born: u32,
    pub brain: Brain,
    pub genes: Genes,
}
