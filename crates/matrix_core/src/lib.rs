//! # Matrix Core
//!
//! The simulation engine behind Living Matrix: a Conway food field, a
//! decaying pheromone grid and a population of agents driven by small
//! feed-forward brains, under generational selection.
//!
//! This crate contains the deterministic simulation logic:
//! - Food automaton (B3/S23, non-wrapping) and pheromone field
//! - 12-input sensing and the 12→H→4 tanh controller
//! - Agent lifecycle: movement, eating, emission, reproduction, death
//! - Fitness scoring, elitism and roulette-wheel selection
//! - Configuration, errors, metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use matrix_core::config::EvolutionConfig;
//! use matrix_core::world::World;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut world = World::create(32, 24, 1.0, 0.22, EvolutionConfig::default()).unwrap();
//! world.seed_food(0.22, &mut rng);
//! world.init_agents(20, &mut rng);
//!
//! world.step_automaton(&mut rng);
//! world.decay_pheromone();
//! world.update_agents(1.0, &mut rng);
//! world.advance_generation(1.0, &mut rng);
//! assert!(world.agents.len() >= world.config.evolution.min_agents);
//! ```

/// Feed-forward controller
pub mod brain;
/// Configuration management for simulation parameters
pub mod config;
pub mod error;
/// Food automaton and pheromone grid
pub mod field;
/// Cosmetic gene mutation
pub mod genetics;
/// Agent creation (founders, offspring, generational children)
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
pub mod simulation;
pub mod snapshot;
/// Perception, action, selection and statistics systems
pub mod systems;
pub mod world;

pub use brain::BrainLogic;
pub use config::AppConfig;
pub use error::ConfigError;
pub use genetics::GenesLogic;
pub use metrics::Metrics;
pub use simulation::{Simulation, TickSummary};
pub use snapshot::{AgentSnapshot, WorldSnapshot};
pub use world::World;
