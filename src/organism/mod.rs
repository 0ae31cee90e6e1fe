//! Organism module - the stochastic state machine.
//!
//! An [`Organism`] interprets its genome as a transition-weight table. On each
//! step it scores every target state linearly from the current sensor
//! readings, normalizes the scores by their sum, builds the cumulative
//! distribution, and samples the next state by inverse CDF.
//!
//! # Example
//!
//! ```rust
//! use genetic_fsm::{GenomeRng, Organism};
//!
//! let mut organism = Organism::with_shape(2, 1);
//! organism.set_state_name(0, "forage");
//! organism.set_state_name(1, "hide");
//! organism.set_sensor_name(0, "threat");
//!
//! // Hiding becomes likelier as the threat reading grows.
//! for from in 0..2 {
//!     organism.set_transition(from, 0, 1.0, &[0.0]);
//!     organism.set_transition(from, 1, 0.1, &[2.0]);
//! }
//! organism.set_sensor_value_by_name("threat", 0.8);
//!
//! let mut rng = GenomeRng::new(7);
//! let next = organism.update_state(&mut rng).unwrap();
//! assert!(next < 2);
//! ```

mod engine;
mod labels;

pub use engine::Organism;
pub use labels::{Sensor, State};
