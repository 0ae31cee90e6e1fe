//! Ordered gene sequence with a heritable recombination-mode trait.

use rand::Rng;

use super::error::GeneticsError;
use super::gene::{DEFAULT_MUTATION_CHANCE, Gene};
use super::rng::{chance, perturbation};

/// A row of genes plus the trait that decides how the row is inherited.
///
/// With recombination enabled, offspring take whole genes from either parent.
/// With it disabled, offspring genes are the coefficient-wise mean of both.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<Gene>,
    recombination_enabled: bool,
    recombination_mutation_chance: f32,
}

impl Default for Chromosome {
    fn default() -> Self {
        Self {
            genes: Vec::new(),
            recombination_enabled: true,
            recombination_mutation_chance: DEFAULT_MUTATION_CHANCE,
        }
    }
}

impl Chromosome {
    /// Create a chromosome of `count` empty genes.
    pub fn with_len(count: usize) -> Self {
        let mut chromosome = Self::default();
        chromosome.resize(count);
        chromosome
    }

    /// Assemble a chromosome from raw parts without clamping.
    pub fn from_parts(
        genes: Vec<Gene>,
        recombination_enabled: bool,
        recombination_mutation_chance: f32,
    ) -> Self {
        Self {
            genes,
            recombination_enabled,
            recombination_mutation_chance,
        }
    }

    /// Reallocate to `count` genes. Every gene comes back empty.
    pub fn resize(&mut self, count: usize) {
        self.genes.clear();
        self.genes.resize_with(count, Gene::default);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [Gene] {
        &mut self.genes
    }

    pub fn get_gene(&self, i: usize) -> Result<&Gene, GeneticsError> {
        let len = self.genes.len();
        self.genes
            .get(i)
            .ok_or_else(|| GeneticsError::out_of_range("gene", i, len))
    }

    pub fn get_gene_mut(&mut self, i: usize) -> Result<&mut Gene, GeneticsError> {
        let len = self.genes.len();
        self.genes
            .get_mut(i)
            .ok_or_else(|| GeneticsError::out_of_range("gene", i, len))
    }

    /// Replace gene `i` with a copy of `gene`. Returns `false` when out of range.
    pub fn set_gene(&mut self, i: usize, gene: &Gene) -> bool {
        match self.genes.get_mut(i) {
            Some(slot) => {
                slot.clone_from(gene);
                true
            }
            None => false,
        }
    }

    pub fn recombination_enabled(&self) -> bool {
        self.recombination_enabled
    }

    pub fn set_recombination_enabled(&mut self, enabled: bool) {
        self.recombination_enabled = enabled;
    }

    pub fn recombination_mutation_chance(&self) -> f32 {
        self.recombination_mutation_chance
    }

    /// Set the trait flip probability, clamped to `[0, 1]`.
    pub fn set_recombination_mutation_chance(&mut self, chance: f32) {
        self.recombination_mutation_chance = chance.clamp(0.0, 1.0);
    }

    /// Trait mutation followed by gene mutation.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.mutate_trait(rng);
        self.mutate_genes(rng);
    }

    /// Flip the recombination flag with probability `recombination_mutation_chance`.
    pub fn mutate_trait<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if chance(rng, self.recombination_mutation_chance) {
            self.recombination_enabled = !self.recombination_enabled;
        }
    }

    /// Mutate every gene. Empty genes are skipped.
    pub fn mutate_genes<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for gene in &mut self.genes {
            gene.mutate(rng);
        }
    }

    /// Meta-mutation of the trait chance (clamped), then of every gene.
    pub fn mutate_mutation_factors<R: Rng + ?Sized>(
        &mut self,
        trigger: f32,
        rate: f32,
        rng: &mut R,
    ) {
        if chance(rng, trigger) {
            let shifted = self.recombination_mutation_chance + perturbation(rng, rate);
            self.set_recombination_mutation_chance(shifted);
        }

        for gene in &mut self.genes {
            gene.mutate_mutation_factors(trigger, rate, rng);
        }
    }

    /// Produce an offspring row. The mode is chosen by `self`'s trait.
    ///
    /// Mismatched gene counts yield an empty chromosome.
    pub fn crossover<R: Rng + ?Sized>(&self, other: &Chromosome, rng: &mut R) -> Chromosome {
        if self.len() != other.len() {
            return Chromosome::default();
        }

        if self.recombination_enabled {
            let trait_parent = if rng.gen_bool(0.5) { self } else { other };

            let genes = self
                .genes
                .iter()
                .zip(&other.genes)
                .map(|(a, b)| if rng.gen_bool(0.5) { a.clone() } else { b.clone() })
                .collect();

            Chromosome {
                genes,
                recombination_enabled: trait_parent.recombination_enabled,
                recombination_mutation_chance: trait_parent.recombination_mutation_chance,
            }
        } else {
            let recombination_enabled = if rng.gen_bool(0.5) {
                self.recombination_enabled
            } else {
                other.recombination_enabled
            };

            let genes = self
                .genes
                .iter()
                .zip(&other.genes)
                .map(|(a, b)| a.crossover(b))
                .collect();

            Chromosome {
                genes,
                recombination_enabled,
                recombination_mutation_chance: (self.recombination_mutation_chance
                    + other.recombination_mutation_chance)
                    / 2.0,
            }
        }
    }
}
