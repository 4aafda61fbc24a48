//! Binary food grid evolving under Conway's B3/S23 rule.

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Double-buffered food automaton.
///
/// A step reads only `cells` and writes only `back_buffer`; the two are then
/// swapped. Edges do not wrap: neighbors outside the grid count as dead.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FoodGrid {
    pub width: u16,
    pub height: u16,
    cells: Vec<u8>,
    #[serde(skip)]
    back_buffer: Vec<u8>,
}

impl FoodGrid {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![0; len],
            back_buffer: vec![0; len],
        }
    }

    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }

    /// Whether `(x, y)` holds food. Out-of-bounds cells never do.
    #[inline]
    pub fn has_food(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.cells[self.index(x as usize, y as usize)] == 1
    }

    /// Sets or clears food at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if x < self.width as usize && y < self.height as usize {
            let idx = self.index(x, y);
            self.cells[idx] = u8::from(alive);
        }
    }

    /// Row-major cell values, each 0 or 1.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Independently fills each cell with probability `density`.
    pub fn seed<R: Rng>(&mut self, density: f64, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = u8::from(rng.gen::<f64>() < density);
        }
    }

    /// Advances the automaton by one generation.
    ///
    /// Every cell that ends up dead after B3/S23 draws once from `rng`, in
    /// row-major order, and comes alive if the draw is below
    /// `regrowth_chance`.
    pub fn step<R: Rng>(&mut self, regrowth_chance: f64, rng: &mut R) {
        let w = self.width as usize;
        let h = self.height as usize;
        if w == 0 || h == 0 {
            return;
        }
        if self.back_buffer.len() != self.cells.len() {
            self.back_buffer = vec![0; self.cells.len()];
        }

        let cells = &self.cells;
        #[cfg(feature = "parallel")]
        self.back_buffer
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| apply_rule_row(cells, w, h, y, row));
        #[cfg(not(feature = "parallel"))]
        self.back_buffer
            .chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| apply_rule_row(cells, w, h, y, row));

        for next in &mut self.back_buffer {
            if *next == 0 && rng.gen::<f64>() < regrowth_chance {
                *next = 1;
            }
        }

        self.swap_buffers();
    }

    fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.cells, &mut self.back_buffer);
    }
}

/// B3/S23 transition.
#[inline]
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (_, 3))
}

fn live_neighbors(cells: &[u8], w: usize, h: usize, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
        for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
            if (nx, ny) != (x, y) {
                count += cells[ny * w + nx];
            }
        }
    }
    count
}

fn apply_rule_row(cells: &[u8], w: usize, h: usize, y: usize, row: &mut [u8]) {
    for (x, next) in row.iter_mut().enumerate() {
        let alive = cells[y * w + x] == 1;
        *next = u8::from(next_state(alive, live_neighbors(cells, w, h, x, y)));
    }
}
