//! The food/pheromone grid pair agents live on.

pub mod food;
pub mod pheromone;

pub use food::FoodGrid;
pub use pheromone::{PheromoneGrid, PHEROMONE_MAX};

use serde::{Deserialize, Serialize};

/// Co-located food and pheromone grids of identical size.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Field {
    pub food: FoodGrid,
    pub pheromones: PheromoneGrid,
}

impl Field {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            food: FoodGrid::new(width, height),
            pheromones: PheromoneGrid::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.food.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.food.height
    }

    /// Clamps a cell coordinate into the grid.
    #[inline]
    pub fn clamp_cell(&self, x: usize, y: usize) -> (usize, usize) {
        (
            x.min(self.width() as usize - 1),
            y.min(self.height() as usize - 1),
        )
    }
}
