//! Real-valued gene with self-adapting mutation parameters.

use rand::Rng;

use super::rng::{chance, perturbation};

/// Default per-coefficient mutation probability.
pub const DEFAULT_MUTATION_CHANCE: f32 = 0.001;

/// Default mutation magnitude.
pub const DEFAULT_MUTATION_RATE: f32 = 0.1;

/// A fixed-length vector of coefficients plus its own mutation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    coefficients: Vec<f32>,
    mutation_chance: f32,
    mutation_rate: f32,
}

impl Default for Gene {
    fn default() -> Self {
        Self {
            coefficients: Vec::new(),
            mutation_chance: DEFAULT_MUTATION_CHANCE,
            mutation_rate: DEFAULT_MUTATION_RATE,
        }
    }
}

impl Gene {
    /// Create a zero-filled gene of `len` coefficients with default mutation parameters.
    pub fn with_len(len: usize) -> Self {
        let mut gene = Self::default();
        gene.resize(len);
        gene
    }

    /// Assemble a gene from raw parts without clamping.
    pub fn from_parts(coefficients: Vec<f32>, mutation_chance: f32, mutation_rate: f32) -> Self {
        Self {
            coefficients,
            mutation_chance,
            mutation_rate,
        }
    }

    /// Reallocate to `len` coefficients, all zero. Previous values are discarded.
    pub fn resize(&mut self, len: usize) {
        self.coefficients.clear();
        self.coefficients.resize(len, 0.0);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    /// Coefficient at `i`, or `0.0` when `i` is out of range.
    #[inline]
    pub fn get(&self, i: usize) -> f32 {
        self.coefficients.get(i).copied().unwrap_or(0.0)
    }

    /// Write coefficient `i`. Returns `false` and changes nothing when out of range.
    pub fn set(&mut self, i: usize, value: f32) -> bool {
        match self.coefficients.get_mut(i) {
            Some(c) => {
                *c = value;
                true
            }
            None => false,
        }
    }

    pub fn mutation_chance(&self) -> f32 {
        self.mutation_chance
    }

    /// Set the per-coefficient mutation probability, clamped to `[0, 1]`.
    pub fn set_mutation_chance(&mut self, chance: f32) {
        self.mutation_chance = chance.clamp(0.0, 1.0);
    }

    pub fn mutation_rate(&self) -> f32 {
        self.mutation_rate
    }

    pub fn set_mutation_rate(&mut self, rate: f32) {
        self.mutation_rate = rate;
    }

    /// Perturb each coefficient with probability `mutation_chance` by a
    /// uniform step in `[-mutation_rate, mutation_rate]`.
    ///
    /// Returns `false` without drawing when the gene is empty.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.coefficients.is_empty() {
            return false;
        }

        let rate = self.mutation_rate;
        for c in &mut self.coefficients {
            if chance(rng, self.mutation_chance) {
                *c += perturbation(rng, rate);
            }
        }
        true
    }

    /// Meta-mutation: with one draw against `trigger`, shift both mutation
    /// parameters by independent uniform steps in `[-rate, rate]`.
    ///
    /// `mutation_chance` is not clamped here, so repeated meta-mutation can
    /// push it outside `[0, 1]`.
    pub fn mutate_mutation_factors<R: Rng + ?Sized>(
        &mut self,
        trigger: f32,
        rate: f32,
        rng: &mut R,
    ) {
        if chance(rng, trigger) {
            self.mutation_chance += perturbation(rng, rate);
            self.mutation_rate += perturbation(rng, rate);
        }
    }

    /// Coefficient-wise mean of two genes of equal length.
    ///
    /// Mismatched lengths yield an empty gene. The child always starts with the
    /// default mutation parameters rather than inheriting them.
    pub fn crossover(&self, other: &Gene) -> Gene {
        if self.len() != other.len() {
            return Gene::default();
        }

        let coefficients = self
            .coefficients
            .iter()
            .zip(&other.coefficients)
            .map(|(a, b)| (a + b) / 2.0)
            .collect();

        Gene {
            coefficients,
            ..Gene::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::GenomeRng;

    #[test]
    fn test_resize_zero_fills() {
        let mut gene = Gene::default();
        assert!(gene.is_empty());

        gene.resize(5);
        gene.set(2, 3.5);
        gene.resize(4);

        assert_eq!(gene.len(), 4);
        for i in 0..4 {
            assert_eq!(gene.get(i), 0.0);
        }
    }

    #[test]
    fn test_out_of_range_is_soft() {
        let mut gene = Gene::with_len(2);
        gene.set(1, 9.0);

        assert_eq!(gene.get(2), 0.0);
        assert_eq!(gene.get(usize::MAX), 0.0);
        assert!(!gene.set(2, 1.0));
        assert_eq!(gene.coefficients(), &[0.0, 9.0]);
    }

    #[test]
    fn test_mutation_chance_setter_clamps() {
        let mut gene = Gene::default();
        gene.set_mutation_chance(1.5);
        assert_eq!(gene.mutation_chance(), 1.0);
        gene.set_mutation_chance(-0.5);
        assert_eq!(gene.mutation_chance(), 0.0);
    }

    #[test]
    fn test_mutate_empty_gene_fails() {
        let mut rng = GenomeRng::new(1);
        let mut gene = Gene::default();
        assert!(!gene.mutate(&mut rng));
    }

    #[test]
    fn test_mutate_stays_within_rate() {
        let mut rng = GenomeRng::new(42);
        let mut gene = Gene::with_len(64);
        gene.set_mutation_chance(1.0);
        gene.set_mutation_rate(0.5);

        assert!(gene.mutate(&mut rng));

        assert!(gene.coefficients().iter().all(|c| c.abs() <= 0.5));
        assert!(gene.coefficients().iter().any(|&c| c != 0.0));
    }

    #[test]
    fn test_mutate_with_zero_chance_is_identity() {
        let mut rng = GenomeRng::new(42);
        let mut gene = Gene::with_len(8);
        gene.set(3, 1.25);
        gene.set_mutation_chance(0.0);
        let before = gene.clone();

        gene.mutate(&mut rng);
        assert_eq!(gene, before);
    }

    #[test]
    fn test_meta_mutation_is_unclamped() {
        let mut rng = GenomeRng::new(9);
        let mut gene = Gene::with_len(1);
        gene.set_mutation_chance(1.0);

        let mut escaped = false;
        for _ in 0..100 {
            gene.mutate_mutation_factors(1.0, 2.0, &mut rng);
            if !(0.0..=1.0).contains(&gene.mutation_chance()) {
                escaped = true;
            }
        }
        assert!(escaped);
    }

    #[test]
    fn test_meta_mutation_never_triggers_at_zero() {
        let mut rng = GenomeRng::new(9);
        let mut gene = Gene::with_len(3);
        for _ in 0..100 {
            gene.mutate_mutation_factors(0.0, 1.0, &mut rng);
        }
        assert_eq!(gene.mutation_chance(), DEFAULT_MUTATION_CHANCE);
        assert_eq!(gene.mutation_rate(), DEFAULT_MUTATION_RATE);
    }

    #[test]
    fn test_crossover_averages() {
        let a = Gene::from_parts(vec![1.0, 2.0, -4.0], 0.5, 3.0);
        let b = Gene::from_parts(vec![3.0, 0.0, 4.0], 0.2, 1.0);

        let child = a.crossover(&b);
        assert_eq!(child.coefficients(), &[2.0, 1.0, 0.0]);
        assert_eq!(child.mutation_chance(), DEFAULT_MUTATION_CHANCE);
        assert_eq!(child.mutation_rate(), DEFAULT_MUTATION_RATE);
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let a = Gene::with_len(3);
        let b = Gene::with_len(2);
        assert!(a.crossover(&b).is_empty());
    }
}
