//! # Chromosome
//!
//! The `Chromosome` struct represents one candidate solution: a fixed-length
//! bit vector in which each bit (gene) encodes inclusion or exclusion of one
//! candidate element. The length is fixed at construction; content is only
//! mutated by the recombination and mutation phases of the engine.
//!
//! ## Example
//!
//! ```rust
//! use bitevolve::chromosome::Chromosome;
//!
//! let c = Chromosome::from_bits(&[true, false, true, false]);
//! assert_eq!(c.len(), 4);
//! assert_eq!(c.count_ones(), 2);
//! assert_eq!(c.active_indices(), vec![0, 2]);
//! assert_eq!(c.to_string(), "1010");
//! ```

use std::fmt;

/// One candidate solution: a fixed-length vector of genes, each a single bit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    genes: Vec<bool>,
}

impl Chromosome {
    /// Creates a chromosome of `gene_count` genes, all inactive.
    pub fn zeroed(gene_count: usize) -> Self {
        Self {
            genes: vec![false; gene_count],
        }
    }

    /// Creates a chromosome from an explicit bit pattern.
    pub fn from_bits(bits: &[bool]) -> Self {
        Self {
            genes: bits.to_vec(),
        }
    }

    /// Returns the number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns the gene at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn gene(&self, index: usize) -> bool {
        self.genes[index]
    }

    /// Sets the gene at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set_gene(&mut self, index: usize, active: bool) {
        self.genes[index] = active;
    }

    /// Flips the gene at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn flip_gene(&mut self, index: usize) {
        self.genes[index] = !self.genes[index];
    }

    /// Returns the number of active genes.
    pub fn count_ones(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// Returns the indices of the active genes, in increasing order.
    ///
    /// This is the hand-off format for collaborators that map gene indices
    /// back to domain elements such as column or attribute identifiers.
    pub fn active_indices(&self) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(idx, &g)| g.then_some(idx))
            .collect()
    }

    /// Returns the genes as a slice.
    pub fn bits(&self) -> &[bool] {
        &self.genes
    }
}

impl fmt::Display for Chromosome {
    /// Renders the bit pattern as a string of `1`s and `0`s, gene 0 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &g in &self.genes {
            f.write_str(if g { "1" } else { "0" })?;
        }
        Ok(())
    }
}
