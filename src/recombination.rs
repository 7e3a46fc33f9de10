//! # Recombination
//!
//! Produces the next generation's chromosome store from a freshly ranked
//! population. Three sequential passes run once per generation:
//!
//! 1. **Replication** — the strongest quartile overwrites the weakest
//!    quartile's slots.
//! 2. **Elite pinning** — for populations larger than 4, the last three
//!    slots become copies of the best chromosome and the two before them
//!    copies of the second-best, so the top two genotypes survive
//!    unconditionally into the next gene pool.
//! 3. **Single-point crossover** — C/4 randomized exchanges between
//!    non-elite slots: two distinct indices are drawn from `[2, C)` and the
//!    gene segment `[0, locus)` is swapped at a locus drawn from `[2, G−1)`.
//!
//! Fitness values are stale after this pass until the next evaluator run.

use crate::population::Population;
use crate::rng::SeededRng;

/// Runs the three recombination passes over a ranked population.
///
/// Slots 0 and 1 are never drawn as crossover candidates, so the two
/// best-ranked chromosomes are left bit-identical. When the population is
/// smaller than 4 chromosomes, or chromosomes carry fewer than 4 genes, the
/// crossover draw ranges are empty and that pass is skipped.
pub fn recombine(population: &mut Population, rng: &mut SeededRng) {
    let size = population.len();
    let gene_count = population.gene_count();

    // Replication: strongest quartile into the weakest quartile's slots.
    let quartile = size / 4;
    for i in 0..quartile {
        population.clone_slot(i, i + 3 * quartile);
    }

    // Elite pinning.
    if size > 4 {
        population.clone_slot(0, size - 1);
        population.clone_slot(0, size - 2);
        population.clone_slot(0, size - 3);
        population.clone_slot(1, size - 4);
        population.clone_slot(1, size - 5);
    }

    // Single-point crossover over the non-elite range.
    if size >= 4 && gene_count >= 4 {
        for _ in 0..size / 4 {
            let c1 = rng.index_in(2..size);
            let c2 = rng.index_in(2..size);
            if c1 == c2 {
                continue;
            }
            let locus = rng.index_in(2..gene_count - 1);
            population.swap_gene_segment(c1, c2, locus);
        }
    }
}
