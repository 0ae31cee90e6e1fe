//! Genetic FSM - Probabilistic state machines with evolved transition weights.
//!
//! An organism is a finite state machine whose transition weights are genetic
//! material. Each step scores every target state linearly from external sensor
//! readings, normalizes the scores into a distribution and samples the next
//! state. The weights live in genes that mutate and recombine, so populations
//! of organisms can be bred by a caller-supplied evolutionary loop.
//!
//! # Architecture
//!
//! - `genetics`: Gene, chromosome and genome with mutation and crossover
//! - `organism`: The state machine that interprets a genome
//! - `persistence`: Fixed-layout binary records
//! - `schema`: JSON configuration for building organisms
//!
//! # Example
//!
//! ```rust
//! use genetic_fsm::{GenomeRng, OrganismConfig};
//!
//! let config = OrganismConfig::default();
//! let mut mother = config.build().unwrap();
//! let father = config.build().unwrap();
//!
//! let mut rng = GenomeRng::new(42);
//! for _ in 0..10 {
//!     mother.set_sensor_value_by_name("threat", 0.9);
//!     mother.update_state(&mut rng).unwrap();
//! }
//!
//! let child = mother.crossover(&father, &mut rng).unwrap();
//! assert_eq!(child.state_count(), 3);
//! ```

pub mod genetics;
pub mod organism;
pub mod persistence;
pub mod schema;

// Re-export commonly used types
pub use genetics::{Chromosome, Gene, GeneticsError, Genome, GenomeRng};
pub use organism::{Organism, Sensor, State};
pub use persistence::{Record, load_from_path, save_to_path};
pub use schema::{ConfigError, OrganismConfig};
