//! Configuration types for building organisms from JSON.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::genetics::{DEFAULT_MUTATION_CHANCE, DEFAULT_MUTATION_RATE};
use crate::organism::Organism;

/// Top-level organism configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismConfig {
    /// State names, in index order.
    pub states: Vec<String>,
    /// Sensors, in index order.
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
    /// Transition weights by state name. Unlisted transitions stay at zero.
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,
    /// State to start in (defaults to the first).
    #[serde(default)]
    pub initial_state: Option<String>,
    /// Initial mutation parameters for every gene and chromosome.
    #[serde(default)]
    pub mutation: MutationConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        let states = ["idle", "forage", "flee"];
        let mut transitions = Vec::new();
        for from in states {
            transitions.push(TransitionConfig::new(from, "idle", 1.0, vec![0.0]));
            transitions.push(TransitionConfig::new(from, "forage", 1.0, vec![-0.5]));
            transitions.push(TransitionConfig::new(from, "flee", 0.1, vec![2.0]));
        }

        Self {
            states: states.iter().map(|s| s.to_string()).collect(),
            sensors: vec![SensorConfig {
                name: "threat".to_string(),
                value: 0.25,
            }],
            transitions,
            initial_state: Some("idle".to_string()),
            mutation: MutationConfig::default(),
            random_seed: Some(42),
        }
    }
}

/// A named sensor and its initial reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub name: String,
    #[serde(default)]
    pub value: f32,
}

/// Weights of one transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub from: String,
    pub to: String,
    pub base_weight: f32,
    /// One weight per sensor, in sensor order.
    #[serde(default)]
    pub sensor_weights: Vec<f32>,
}

impl TransitionConfig {
    pub fn new(from: &str, to: &str, base_weight: f32, sensor_weights: Vec<f32>) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            base_weight,
            sensor_weights,
        }
    }
}

/// Initial mutation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Per-coefficient mutation probability (0.0-1.0).
    #[serde(default = "default_gene_chance")]
    pub gene_chance: f32,
    /// Mutation magnitude.
    #[serde(default = "default_gene_rate")]
    pub gene_rate: f32,
    /// Whether chromosomes start in recombination mode.
    #[serde(default = "default_recombination")]
    pub recombination: bool,
    /// Probability of flipping the recombination mode (0.0-1.0).
    #[serde(default = "default_recombination_chance")]
    pub recombination_chance: f32,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            gene_chance: default_gene_chance(),
            gene_rate: default_gene_rate(),
            recombination: default_recombination(),
            recombination_chance: default_recombination_chance(),
        }
    }
}

fn default_gene_chance() -> f32 {
    DEFAULT_MUTATION_CHANCE
}
fn default_gene_rate() -> f32 {
    DEFAULT_MUTATION_RATE
}
fn default_recombination() -> bool {
    true
}
fn default_recombination_chance() -> f32 {
    DEFAULT_MUTATION_CHANCE
}

impl OrganismConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.states.is_empty() {
            return Err(ConfigError::NoStates);
        }

        let mut seen = HashSet::new();
        for name in &self.states {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateState(name.clone()));
            }
        }
        let mut seen = HashSet::new();
        for sensor in &self.sensors {
            if !seen.insert(sensor.name.as_str()) {
                return Err(ConfigError::DuplicateSensor(sensor.name.clone()));
            }
        }

        for (i, t) in self.transitions.iter().enumerate() {
            for name in [&t.from, &t.to] {
                if !self.states.contains(name) {
                    return Err(ConfigError::UnknownState(name.clone()));
                }
            }
            if t.sensor_weights.len() != self.sensors.len() {
                return Err(ConfigError::SensorWeightCount {
                    transition: i,
                    expected: self.sensors.len(),
                    actual: t.sensor_weights.len(),
                });
            }
        }

        if let Some(initial) = &self.initial_state {
            if !self.states.contains(initial) {
                return Err(ConfigError::UnknownState(initial.clone()));
            }
        }

        for chance in [self.mutation.gene_chance, self.mutation.recombination_chance] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::InvalidChance(chance));
            }
        }

        Ok(())
    }

    /// Build a ready organism: shape, labels, mutation parameters, weights.
    pub fn build(&self) -> Result<Organism, ConfigError> {
        self.validate()?;

        let mut organism = Organism::with_shape(self.states.len(), self.sensors.len());

        for (i, name) in self.states.iter().enumerate() {
            organism.set_state_name(i, name.as_str());
        }
        for (i, sensor) in self.sensors.iter().enumerate() {
            organism.set_sensor_name(i, sensor.name.as_str());
            organism.set_sensor_value(i, sensor.value);
        }

        for chromosome in organism.genome_mut().chromosomes_mut() {
            chromosome.set_recombination_enabled(self.mutation.recombination);
            chromosome.set_recombination_mutation_chance(self.mutation.recombination_chance);
            for gene in chromosome.genes_mut() {
                gene.set_mutation_chance(self.mutation.gene_chance);
                gene.set_mutation_rate(self.mutation.gene_rate);
            }
        }

        for t in &self.transitions {
            let from = organism.state_index(&t.from);
            let to = organism.state_index(&t.to);
            if let (Some(from), Some(to)) = (from, to) {
                organism.set_transition(from, to, t.base_weight, &t.sensor_weights);
            }
        }

        if let Some(initial) = &self.initial_state {
            organism.set_current_state_by_name(initial);
        }

        Ok(organism)
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("At least one state is required")]
    NoStates,
    #[error("Duplicate state name {0:?}")]
    DuplicateState(String),
    #[error("Duplicate sensor name {0:?}")]
    DuplicateSensor(String),
    #[error("Unknown state {0:?}")]
    UnknownState(String),
    #[error("Transition {transition} has {actual} sensor weights, expected {expected}")]
    SensorWeightCount {
        transition: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Mutation chance {0} must lie in [0, 1]")]
    InvalidChance(f32),
}
