//! # FitnessFunction
//!
//! The `FitnessFunction` trait is the seam between the generational
//! mechanics and the problem being optimized: an externally supplied
//! capability that scores the entire current population in one call,
//! writing one fitness value per chromosome index.
//!
//! Problem-specific fitness is injected as a strategy object or a plain
//! closure rather than by subclassing the engine.
//!
//! ## Example
//!
//! ```rust
//! use bitevolve::chromosome::Chromosome;
//! use bitevolve::engine::FitnessFunction;
//! use bitevolve::error::Result;
//!
//! struct WeightedCoverage {
//!     weights: Vec<f64>,
//! }
//!
//! impl FitnessFunction for WeightedCoverage {
//!     fn assign_fitness(&mut self, chromosomes: &[Chromosome], fitness: &mut [f64]) -> Result<()> {
//!         for (slot, chromosome) in chromosomes.iter().enumerate() {
//!             fitness[slot] = chromosome
//!                 .active_indices()
//!                 .iter()
//!                 .map(|&gene| self.weights[gene])
//!                 .sum();
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use crate::chromosome::Chromosome;
use crate::error::Result;

/// The externally supplied fitness capability.
///
/// `assign_fitness` receives the whole current population and must write
/// one value into `fitness` for every chromosome index before returning.
/// An `Err` aborts the run at the current generation; the cause is attached
/// to the reported engine failure.
pub trait FitnessFunction {
    /// Fills `fitness` with one score per chromosome, index-aligned.
    fn assign_fitness(&mut self, chromosomes: &[Chromosome], fitness: &mut [f64]) -> Result<()>;
}

impl<F> FitnessFunction for F
where
    F: FnMut(&[Chromosome], &mut [f64]) -> Result<()>,
{
    fn assign_fitness(&mut self, chromosomes: &[Chromosome], fitness: &mut [f64]) -> Result<()> {
        self(chromosomes, fitness)
    }
}

/// A ready-made fitness function that scores each chromosome by its number
/// of active bits. Used by the benches and as a smoke-test problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct Popcount;

impl FitnessFunction for Popcount {
    fn assign_fitness(&mut self, chromosomes: &[Chromosome], fitness: &mut [f64]) -> Result<()> {
        for (slot, chromosome) in chromosomes.iter().enumerate() {
            fitness[slot] = chromosome.count_ones() as f64;
        }
        Ok(())
    }
}
