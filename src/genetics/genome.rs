//! Ordered chromosome sequence.

use rand::Rng;

use super::chromosome::Chromosome;
use super::error::GeneticsError;

/// Full genetic material of an organism, one chromosome per state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Genome {
    chromosomes: Vec<Chromosome>,
}

impl Genome {
    /// Create a genome of `count` empty chromosomes.
    pub fn with_len(count: usize) -> Self {
        let mut genome = Self::default();
        genome.resize(count);
        genome
    }

    pub fn from_chromosomes(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }

    /// Reallocate to `count` chromosomes. Every chromosome comes back empty.
    pub fn resize(&mut self, count: usize) {
        self.chromosomes.clear();
        self.chromosomes.resize_with(count, Chromosome::default);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn chromosomes_mut(&mut self) -> &mut [Chromosome] {
        &mut self.chromosomes
    }

    pub fn get_chromosome(&self, i: usize) -> Result<&Chromosome, GeneticsError> {
        let len = self.chromosomes.len();
        self.chromosomes
            .get(i)
            .ok_or_else(|| GeneticsError::out_of_range("chromosome", i, len))
    }

    pub fn get_chromosome_mut(&mut self, i: usize) -> Result<&mut Chromosome, GeneticsError> {
        let len = self.chromosomes.len();
        self.chromosomes
            .get_mut(i)
            .ok_or_else(|| GeneticsError::out_of_range("chromosome", i, len))
    }

    /// Replace chromosome `i` with a copy. Returns `false` when out of range.
    pub fn set_chromosome(&mut self, i: usize, chromosome: &Chromosome) -> bool {
        match self.chromosomes.get_mut(i) {
            Some(slot) => {
                slot.clone_from(chromosome);
                true
            }
            None => false,
        }
    }

    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for chromosome in &mut self.chromosomes {
            chromosome.mutate(rng);
        }
    }

    pub fn mutate_mutation_factors<R: Rng + ?Sized>(
        &mut self,
        trigger: f32,
        rate: f32,
        rng: &mut R,
    ) {
        for chromosome in &mut self.chromosomes {
            chromosome.mutate_mutation_factors(trigger, rate, rng);
        }
    }

    /// Pairwise chromosome crossover.
    ///
    /// Unlike genes and chromosomes, a count mismatch here is a fault rather
    /// than an empty result.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        other: &Genome,
        rng: &mut R,
    ) -> Result<Genome, GeneticsError> {
        if self.len() != other.len() {
            return Err(GeneticsError::ShapeMismatch {
                what: "chromosome count",
                left: self.len(),
                right: other.len(),
            });
        }

        let chromosomes = self
            .chromosomes
            .iter()
            .zip(&other.chromosomes)
            .map(|(a, b)| a.crossover(b, rng))
            .collect();

        Ok(Genome { chromosomes })
    }

    /// Reshape into a `rows x rows` matrix of zeroed genes, each `gene_len` long.
    pub(crate) fn reshape(&mut self, rows: usize, gene_len: usize) {
        self.resize(rows);
        for chromosome in &mut self.chromosomes {
            chromosome.resize(rows);
        }
        self.resize_genes(gene_len);
    }

    /// Resize every gene of every chromosome to `gene_len` zeros.
    pub(crate) fn resize_genes(&mut self, gene_len: usize) {
        for chromosome in &mut self.chromosomes {
            for gene in chromosome.genes_mut() {
                gene.resize(gene_len);
            }
        }
    }
}
