//! Plain data types shared by the Living Matrix crates.
//!
//! Behavior lives in `matrix_core`; this crate only describes state.

pub mod data;

pub use data::agent::{Agent, Position};
pub use data::genotype::{Brain, Color, Genes, BRAIN_INPUTS, BRAIN_OUTPUTS};
pub use data::stats::{Champion, GenerationRecord, PopulationStats};
