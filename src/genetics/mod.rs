//! Evolutionary parameter representation.
//!
//! # Overview
//!
//! Genetic material is nested three levels deep:
//!
//! - **Gene** (`gene`): a vector of real coefficients with its own mutation
//!   probability and magnitude
//! - **Chromosome** (`chromosome`): an ordered row of genes plus a heritable
//!   recombination-mode trait
//! - **Genome** (`genome`): an ordered sequence of chromosomes
//!
//! Every level supports mutation, meta-mutation of the mutation parameters,
//! and pairwise crossover. Randomness is always passed in explicitly, so a
//! seeded [`GenomeRng`] makes every operation reproducible.
//!
//! # Failure policy
//!
//! Out-of-range gene reads return `0.0`; setters at every level return
//! `false`. Chromosome and genome getters fail with [`GeneticsError`].
//! Gene and chromosome crossover of mismatched shapes degrade to an empty
//! child, genome crossover of mismatched shapes fails.
//!
//! # Example
//!
//! ```rust
//! use genetic_fsm::genetics::{Gene, GenomeRng};
//!
//! let mut rng = GenomeRng::new(42);
//! let mut gene = Gene::with_len(3);
//! gene.set(0, 1.0);
//! gene.set_mutation_chance(0.5);
//! gene.mutate(&mut rng);
//!
//! let child = gene.crossover(&Gene::with_len(3));
//! assert_eq!(child.len(), 3);
//! ```

mod chromosome;
mod error;
mod gene;
mod genome;
mod rng;

pub use chromosome::Chromosome;
pub use error::GeneticsError;
pub use gene::{DEFAULT_MUTATION_CHANCE, DEFAULT_MUTATION_RATE, Gene};
pub use genome::Genome;
pub use rng::GenomeRng;

pub(crate) use rng::unit;
