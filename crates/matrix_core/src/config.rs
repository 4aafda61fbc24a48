//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section carries `#[serde(default)]`, so a
//! file only needs to name the values it overrides.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 72
//! height = 48
//! seed = 42
//!
//! [evolution]
//! max_agents = 150
//! generation_length = 600.0
//! ```
//!
//! Values are read-only to the simulation within a tick. A host may change
//! them between ticks (for example from UI sliders).

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Grid dimensions, seeding and host clock parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    pub initial_agents: usize,
    pub initial_food_density: f64,
    /// Bias for stochastic food regrowth, in [0, 1].
    pub target_food_density: f64,
    /// Multiplier applied to the host's elapsed time.
    pub sim_speed: f64,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 72,
            height: 48,
            initial_agents: 60,
            initial_food_density: 0.22,
            target_food_density: 0.22,
            sim_speed: 1.0,
            seed: None,
        }
    }
}

/// Energy economics of a single agent.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetabolismConfig {
    pub max_energy: f64,
    /// Passive loss per unit of delta.
    pub energy_decay: f64,
    pub eat_gain: f64,
    pub emit_cost: f64,
    /// Cells per unit of delta at full velocity output.
    pub move_speed: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            max_energy: 120.0,
            energy_decay: 0.3,
            eat_gain: 35.0,
            emit_cost: 4.0,
            move_speed: 0.6,
        }
    }
}

/// Food automaton and pheromone field.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FieldConfig {
    /// Absolute intensity removed from every pheromone cell per tick.
    pub pheromone_decay: u8,
    /// Regrowth chance per dead cell is `target_food_density * regrowth_factor`.
    pub regrowth_factor: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            pheromone_decay: 3,
            regrowth_factor: 0.0025,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BrainConfig {
    pub hidden_size: usize,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self { hidden_size: 8 }
    }
}

/// Reproduction, mutation and generational selection.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Population floor maintained after every lifecycle pass.
    pub min_agents: usize,
    /// Population ceiling for births; also the generational target size.
    pub max_agents: usize,
    pub reproduce_chance: f64,
    pub reproduce_energy: f64,
    pub reproduce_cooldown: f64,
    /// Fraction of the parent's energy handed to a newborn.
    pub child_energy_share: f64,
    /// Per-weight mutation probability.
    pub mutation_rate: f32,
    /// Half-width of the uniform weight perturbation.
    pub mutation_strength: f32,
    /// Half-width of the uniform hue perturbation.
    pub color_mutation: f32,
    /// Delta accumulated per generation. Zero or below disables selection.
    pub generation_length: f64,
    /// Delta spent culled to the parents before the population is refilled.
    /// Zero replaces the population at the boundary.
    pub generation_recovery: f64,
    pub survivor_fraction: f64,
    pub elite_fraction: f64,
    /// Exponent applied to fitness in roulette selection.
    pub selection_power: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            min_agents: 20,
            max_agents: 120,
            reproduce_chance: 0.02,
            reproduce_energy: 90.0,
            reproduce_cooldown: 40.0,
            child_energy_share: 0.45,
            mutation_rate: 0.08,
            mutation_strength: 0.3,
            color_mutation: 0.05,
            generation_length: 900.0,
            generation_recovery: 0.0,
            survivor_fraction: 0.25,
            elite_fraction: 0.1,
            selection_power: 2.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Ticks between periodic summary logs. Zero disables them.
    pub log_interval: u64,
    /// Number of generation records kept in the statistics.
    pub history_len: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_interval: 500,
            history_len: 64,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub metabolism: MetabolismConfig,
    pub field: FieldConfig,
    pub brain: BrainConfig,
    pub evolution: EvolutionConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns the first violation found. A non-positive
    /// `generation_length` is accepted and means "no generational cycling".
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        if w.width == 0 || w.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: w.width,
                height: w.height,
            });
        }
        ConfigError::unit_range("world.initial_food_density", w.initial_food_density)?;
        ConfigError::unit_range("world.target_food_density", w.target_food_density)?;
        ConfigError::non_negative("world.sim_speed", w.sim_speed)?;

        let m = &self.metabolism;
        ConfigError::positive("metabolism.max_energy", m.max_energy)?;
        ConfigError::non_negative("metabolism.energy_decay", m.energy_decay)?;
        ConfigError::non_negative("metabolism.eat_gain", m.eat_gain)?;
        ConfigError::non_negative("metabolism.emit_cost", m.emit_cost)?;
        ConfigError::non_negative("metabolism.move_speed", m.move_speed)?;

        ConfigError::unit_range("field.regrowth_factor", self.field.regrowth_factor)?;
        ConfigError::positive("brain.hidden_size", self.brain.hidden_size as f64)?;

        let e = &self.evolution;
        if e.min_agents > e.max_agents {
            return Err(ConfigError::PopulationBounds {
                min: e.min_agents,
                max: e.max_agents,
            });
        }
        ConfigError::unit_range("evolution.reproduce_chance", e.reproduce_chance)?;
        ConfigError::non_negative("evolution.reproduce_energy", e.reproduce_energy)?;
        ConfigError::non_negative("evolution.reproduce_cooldown", e.reproduce_cooldown)?;
        ConfigError::unit_range("evolution.child_energy_share", e.child_energy_share)?;
        ConfigError::unit_range("evolution.mutation_rate", e.mutation_rate as f64)?;
        ConfigError::non_negative("evolution.mutation_strength", e.mutation_strength as f64)?;
        ConfigError::non_negative("evolution.color_mutation", e.color_mutation as f64)?;
        ConfigError::non_negative("evolution.generation_recovery", e.generation_recovery)?;
        ConfigError::unit_range("evolution.survivor_fraction", e.survivor_fraction)?;
        ConfigError::unit_range("evolution.elite_fraction", e.elite_fraction)?;
        ConfigError::non_negative("evolution.selection_power", e.selection_power)?;

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of every section that affects simulation behavior.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hasher.update(format!("{:?}", self.field).as_bytes());
        hasher.update(format!("{:?}", self.brain).as_bytes());
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Whether generational selection is active.
    #[must_use]
    pub fn generations_enabled(&self) -> bool {
        self.evolution.generation_length > 0.0
    }
}
