use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Summary of one selection event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation number entered by this selection.
    pub generation: u32,
    /// Population size before replacement.
    pub scored: usize,
    /// Number of breeding parents kept.
    pub survivors: usize,
    pub avg_fitness: f64,
    pub best_fitness: f64,
    /// Population size after replacement.
    pub population: usize,
}

/// Best parent of the most recent selection event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub id: u64,
    pub lineage_id: Uuid,
    pub fitness: f64,
    pub generation: u32,
    /// Hex-encoded brain, see `Brain::to_hex`.
    pub genome_hex: String,
}

/// Observational counters. Never read back by simulation logic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopulationStats {
    pub population: usize,
    pub food_count: usize,
    pub avg_energy: f64,
    pub avg_age: f64,
    pub lineage_count: usize,
    /// Every agent that entered the population after initial seeding.
    pub births: u64,
    pub deaths: u64,
    pub last_survivors: usize,
    pub avg_fitness: f64,
    pub best_fitness: f64,
    pub champion: Option<Champion>,
    pub history: VecDeque<GenerationRecord>,
}

impl PopulationStats {
    /// Appends a generation record, dropping the oldest beyond `limit`.
    pub fn push_history(&mut self, record: GenerationRecord, limit: usize) {
        self.history.push_back(record);
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }
}
