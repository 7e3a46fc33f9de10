//! # EngineConfig
//!
//! The `EngineConfig` struct holds the immutable-per-run parameters of the
//! optimizer: population size, gene count, PRNG seed, iteration budget,
//! wall-clock budget, the sparsity tie-break flag, and any pre-seeded
//! candidate chromosomes. The engine reinitializes its population and PRNG
//! in full whenever the configuration changes; nothing is reused across
//! configuration edits.
//!
//! ## Example
//!
//! ```rust
//! use bitevolve::engine::EngineConfig;
//!
//! let config = EngineConfig::builder()
//!     .population_size(32)
//!     .gene_count(16)
//!     .rng_seed(42)
//!     .iterations(200)
//!     .time_budget_secs(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.population_size, 32);
//! assert!(config.favor_sparse);
//! ```

use crate::chromosome::Chromosome;
use crate::error::{EngineError, Result};

/// Immutable-per-run configuration of the optimizer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of chromosomes, C. Fixed for the lifetime of a run.
    pub population_size: usize,
    /// Genes per chromosome, G. Determined by the problem, fixed at init.
    pub gene_count: usize,
    /// Seed for the engine-owned PRNG.
    pub rng_seed: u64,
    /// Number of generations to run.
    pub iterations: usize,
    /// Wall-clock budget in seconds; 0 means unbounded.
    pub time_budget_secs: u64,
    /// When set, equal-fitness chromosomes with fewer active bits rank
    /// higher.
    pub favor_sparse: bool,
    /// Pre-seeded candidate chromosomes copied verbatim into the initial
    /// population. Each must be exactly `gene_count` long; at most
    /// `population_size` of them.
    pub seed_patterns: Vec<Chromosome>,
}

impl EngineConfig {
    /// Creates a configuration with the given sizes and default budgets:
    /// seed 0, 100 iterations, unbounded wall clock, sparsity tie-break on,
    /// no seed patterns.
    pub fn new(population_size: usize, gene_count: usize) -> Self {
        Self {
            population_size,
            gene_count,
            rng_seed: 0,
            iterations: 100,
            time_budget_secs: 0,
            favor_sparse: true,
            seed_patterns: Vec::new(),
        }
    }

    /// Returns a builder for constructing a configuration fluently.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for a zero population or gene
    /// size, for more seed patterns than population slots, or for any seed
    /// pattern whose length differs from the gene count. Patterns are never
    /// silently truncated or padded.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EngineError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.gene_count == 0 {
            return Err(EngineError::Configuration(
                "Gene count must be at least 1".to_string(),
            ));
        }
        if self.seed_patterns.len() > self.population_size {
            return Err(EngineError::Configuration(format!(
                "{} seed patterns supplied for a population of {}",
                self.seed_patterns.len(),
                self.population_size
            )));
        }
        for (idx, pattern) in self.seed_patterns.iter().enumerate() {
            if pattern.len() != self.gene_count {
                return Err(EngineError::Configuration(format!(
                    "Seed pattern {} has length {} but the gene count is {}",
                    idx,
                    pattern.len(),
                    self.gene_count
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`EngineConfig`].
///
/// Population size and gene count are required; everything else falls back
/// to the defaults of [`EngineConfig::new`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    population_size: Option<usize>,
    gene_count: Option<usize>,
    rng_seed: Option<u64>,
    iterations: Option<usize>,
    time_budget_secs: Option<u64>,
    favor_sparse: Option<bool>,
    seed_patterns: Vec<Chromosome>,
}

impl EngineConfigBuilder {
    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the gene count.
    pub fn gene_count(mut self, value: usize) -> Self {
        self.gene_count = Some(value);
        self
    }

    /// Sets the PRNG seed.
    pub fn rng_seed(mut self, value: u64) -> Self {
        self.rng_seed = Some(value);
        self
    }

    /// Sets the iteration budget.
    pub fn iterations(mut self, value: usize) -> Self {
        self.iterations = Some(value);
        self
    }

    /// Sets the wall-clock budget in seconds; 0 means unbounded.
    pub fn time_budget_secs(mut self, value: u64) -> Self {
        self.time_budget_secs = Some(value);
        self
    }

    /// Enables or disables the sparsity tie-break.
    pub fn favor_sparse(mut self, value: bool) -> Self {
        self.favor_sparse = Some(value);
        self
    }

    /// Adds one pre-seeded candidate chromosome.
    pub fn seed_pattern(mut self, pattern: Chromosome) -> Self {
        self.seed_patterns.push(pattern);
        self
    }

    /// Replaces the pre-seeded candidate chromosomes.
    pub fn seed_patterns(mut self, patterns: Vec<Chromosome>) -> Self {
        self.seed_patterns = patterns;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] if population size or gene
    /// count was not specified, or if validation fails.
    pub fn build(self) -> Result<EngineConfig> {
        let population_size = self.population_size.ok_or_else(|| {
            EngineError::Configuration("Population size not specified".to_string())
        })?;
        let gene_count = self
            .gene_count
            .ok_or_else(|| EngineError::Configuration("Gene count not specified".to_string()))?;

        let config = EngineConfig {
            population_size,
            gene_count,
            rng_seed: self.rng_seed.unwrap_or(0),
            iterations: self.iterations.unwrap_or(100),
            time_budget_secs: self.time_budget_secs.unwrap_or(0),
            favor_sparse: self.favor_sparse.unwrap_or(true),
            seed_patterns: self.seed_patterns,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = EngineConfig::builder()
            .population_size(8)
            .gene_count(4)
            .build()
            .unwrap();
        assert_eq!(config.rng_seed, 0);
        assert_eq!(config.iterations, 100);
        assert_eq!(config.time_budget_secs, 0);
        assert!(config.favor_sparse);
        assert!(config.seed_patterns.is_empty());
    }

    #[test]
    fn test_builder_requires_sizes() {
        let missing_population = EngineConfig::builder().gene_count(4).build();
        assert!(matches!(
            missing_population,
            Err(EngineError::Configuration(_))
        ));

        let missing_genes = EngineConfig::builder().population_size(8).build();
        assert!(matches!(missing_genes, Err(EngineError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_length_pattern() {
        let config = EngineConfig::builder()
            .population_size(8)
            .gene_count(4)
            .seed_pattern(Chromosome::from_bits(&[true, false]))
            .build();
        match config {
            Err(EngineError::Configuration(msg)) => assert!(msg.contains("length 2")),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_validate_rejects_excess_patterns() {
        let patterns: Vec<Chromosome> = (0..3).map(|_| Chromosome::zeroed(4)).collect();
        let config = EngineConfig::builder()
            .population_size(2)
            .gene_count(4)
            .seed_patterns(patterns)
            .build();
        assert!(matches!(config, Err(EngineError::Configuration(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let config = EngineConfig::new(8, 4);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
