//! Core data structures for the Living Matrix simulation.

pub mod agent;
pub mod genotype;
pub mod stats;
