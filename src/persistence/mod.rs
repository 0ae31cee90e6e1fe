//! Binary persistence for genetic material and organisms.
//!
//! # Record Layout
//!
//! Fixed-layout records in native byte order, nested top-down:
//!
//! ```text
//! Gene:
//!   Length: i32
//!   Mutation chance: f32
//!   Mutation rate: f32
//!   Coefficients: f32 * length
//!
//! Chromosome:
//!   Gene count: i32
//!   Recombination enabled: u8 (bool)
//!   Recombination mutation chance: f32
//!   Genes: Gene * gene count
//!
//! Genome:
//!   Chromosome count: i32
//!   Chromosomes: Chromosome * count
//!
//! State:
//!   Name bytes incl. NUL: i32
//!   Name: bytes, NUL-terminated
//!
//! Sensor:
//!   Name bytes incl. NUL: i32
//!   Value: f32
//!   Name: bytes, NUL-terminated
//!
//! Organism:
//!   State count: i32
//!   Sensor count: i32
//!   Current state: i32
//!   States: State * state count
//!   Sensors: Sensor * sensor count
//!   Genome
//! ```
//!
//! Dumps are only portable between machines of the same endianness.

mod file;
mod format;

pub use file::{load_from_path, save_to_path};
pub use format::Record;
