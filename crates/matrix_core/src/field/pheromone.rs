//! Pheromone system for inter-agent chemical communication

use serde::{Deserialize, Serialize};

/// Intensity written by an emitting agent.
pub const PHEROMONE_MAX: u8 = u8::MAX;

/// Grid-based pheromone map for the world
///
/// Cells are only ever set to [`PHEROMONE_MAX`] by emission and lose a fixed
/// amount per decay step, stopping at zero.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PheromoneGrid {
    pub width: u16,
    pub height: u16,
    cells: Vec<u8>,
}

impl PheromoneGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }

    /// Raw intensity at `(x, y)`, clamped into the grid.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        let ix = x.min(self.width as usize - 1);
        let iy = y.min(self.height as usize - 1);
        self.cells[self.index(ix, iy)]
    }

    /// Intensity at `(x, y)` normalized to [0, 1].
    pub fn intensity(&self, x: usize, y: usize) -> f32 {
        f32::from(self.get(x, y)) / f32::from(PHEROMONE_MAX)
    }

    /// Marks `(x, y)` at full strength.
    pub fn emit(&mut self, x: usize, y: usize) {
        self.set(x, y, PHEROMONE_MAX);
    }

    /// Overwrites the intensity at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width as usize && y < self.height as usize {
            let idx = self.index(x, y);
            self.cells[idx] = value;
        }
    }

    /// Subtracts `amount` from every cell, flooring at zero.
    pub fn decay(&mut self, amount: u8) {
        for cell in &mut self.cells {
            *cell = cell.saturating_sub(amount);
        }
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of cells with any scent left.
    pub fn active_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c > 0).count()
    }
}
