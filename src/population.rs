//! # Population
//!
//! The `Population` struct is the chromosome store: a fixed-size ordered
//! array of C chromosomes, each of length G, plus an index-aligned fitness
//! vector of C real numbers. Store size and chromosome length never change
//! once an optimization run starts; after each ranking pass the order
//! encodes rank, with index 0 holding the best chromosome.
//!
//! ## Example
//!
//! ```rust
//! use bitevolve::chromosome::Chromosome;
//! use bitevolve::population::Population;
//! use bitevolve::rng::SeededRng;
//!
//! let mut rng = SeededRng::from_seed(42);
//! let seed = Chromosome::from_bits(&[true, false, true, false]);
//! let population = Population::initialize(6, 4, &[seed.clone()], &mut rng).unwrap();
//!
//! assert_eq!(population.len(), 6);
//! assert_eq!(population.chromosome(0), &seed);
//! assert!(population.fitness().iter().all(|&f| f == 0.0));
//! ```

use crate::chromosome::Chromosome;
use crate::error::{EngineError, Result};
use crate::rng::SeededRng;

/// The chromosome store: C chromosomes and an index-aligned fitness vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    fitness: Vec<f64>,
    gene_count: usize,
}

impl Population {
    /// Builds the initial population.
    ///
    /// The first `seed_patterns.len()` slots are verbatim copies of the
    /// supplied patterns; every remaining slot is filled bit-by-bit from the
    /// PRNG with a 50% per-bit activation probability, in increasing
    /// gene-index order, so the fill is reproducible for a fixed seed. The
    /// fitness vector starts at all-zero.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] if `size` or `gene_count` is
    /// zero, if more seed patterns than slots were supplied, or if any seed
    /// pattern's length differs from `gene_count`. No partial store is
    /// created in those cases.
    pub fn initialize(
        size: usize,
        gene_count: usize,
        seed_patterns: &[Chromosome],
        rng: &mut SeededRng,
    ) -> Result<Self> {
        if size == 0 {
            return Err(EngineError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if gene_count == 0 {
            return Err(EngineError::Configuration(
                "Gene count must be at least 1".to_string(),
            ));
        }
        if seed_patterns.len() > size {
            return Err(EngineError::Configuration(format!(
                "{} seed patterns supplied for a population of {}",
                seed_patterns.len(),
                size
            )));
        }
        for (idx, pattern) in seed_patterns.iter().enumerate() {
            if pattern.len() != gene_count {
                return Err(EngineError::Configuration(format!(
                    "Seed pattern {} has length {} but the gene count is {}",
                    idx,
                    pattern.len(),
                    gene_count
                )));
            }
        }

        let mut chromosomes = Vec::with_capacity(size);
        chromosomes.extend(seed_patterns.iter().cloned());
        for _ in seed_patterns.len()..size {
            let mut chromosome = Chromosome::zeroed(gene_count);
            for gene in 0..gene_count {
                chromosome.set_gene(gene, rng.coin_flip(0.5));
            }
            chromosomes.push(chromosome);
        }

        Ok(Self {
            chromosomes,
            fitness: vec![0.0; size],
            gene_count,
        })
    }

    /// Returns the number of chromosomes, C.
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Returns `true` if the store holds no chromosomes.
    ///
    /// Never true for a store built by [`Population::initialize`].
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Returns the number of genes per chromosome, G.
    pub fn gene_count(&self) -> usize {
        self.gene_count
    }

    /// Returns the chromosome at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn chromosome(&self, index: usize) -> &Chromosome {
        &self.chromosomes[index]
    }

    /// Returns all chromosomes in their current order.
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Returns the fitness vector, index-aligned with the chromosomes.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Returns a mutable view of the fitness vector for the evaluator pass.
    pub fn fitness_mut(&mut self) -> &mut [f64] {
        &mut self.fitness
    }

    /// Splits the store into its chromosomes and a writable fitness vector,
    /// the shape the fitness-assignment callback works on.
    pub fn evaluation_view(&mut self) -> (&[Chromosome], &mut [f64]) {
        (&self.chromosomes, &mut self.fitness)
    }

    /// Overwrites the chromosome at `to` with a copy of the one at `from`.
    pub(crate) fn clone_slot(&mut self, from: usize, to: usize) {
        if from != to {
            self.chromosomes[to] = self.chromosomes[from].clone();
        }
    }

    /// Returns a mutable reference to the chromosome at `index`.
    pub(crate) fn chromosome_mut(&mut self, index: usize) -> &mut Chromosome {
        &mut self.chromosomes[index]
    }

    /// Exchanges the gene segment `[0, locus)` between the chromosomes at
    /// `a` and `b`.
    pub(crate) fn swap_gene_segment(&mut self, a: usize, b: usize, locus: usize) {
        debug_assert!(a != b);
        debug_assert!(locus <= self.gene_count);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.chromosomes.split_at_mut(high);
        let first = &mut head[low];
        let second = &mut tail[0];
        for gene in 0..locus {
            let tmp = first.gene(gene);
            first.set_gene(gene, second.gene(gene));
            second.set_gene(gene, tmp);
        }
    }

    /// Reorders chromosomes and fitness in lockstep according to `order`,
    /// where `order[new_index] = old_index`.
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.chromosomes.len());
        let chromosomes = order
            .iter()
            .map(|&old| self.chromosomes[old].clone())
            .collect();
        let fitness = order.iter().map(|&old| self.fitness[old]).collect();
        self.chromosomes = chromosomes;
        self.fitness = fitness;
    }
}
