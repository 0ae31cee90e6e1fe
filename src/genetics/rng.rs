//! Random source for mutation, crossover and state sampling.

use rand::prelude::*;

/// Seedable random number generator handed to every stochastic operation.
///
/// Any [`Rng`] works with the genetic operators; this wrapper only fixes the
/// generator so that a seed fully determines a run.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RngCore for GenomeRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Uniform draw in `[0, 1)`.
#[inline]
pub(crate) fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.r#gen::<f32>()
}

/// Symmetric perturbation `(2u - 1) * scale`.
#[inline]
pub(crate) fn perturbation<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> f32 {
    (2.0 * unit(rng) - 1.0) * scale
}

/// Bernoulli trial that succeeds with probability `chance`.
///
/// Chances outside `[0, 1]` saturate: negative never fires, above one always
/// fires.
#[inline]
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    unit(rng) < chance
}
