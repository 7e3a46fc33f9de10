//! # Mutation
//!
//! Flips bits in a subset of chromosomes once per generation. Roughly C/2
//! slots are drawn from the store, excluding the last two so the freshly
//! pinned elite copies at the tail keep at least two pristine carriers of
//! the best genotype. Every gene of a selected chromosome flips
//! independently with probability 1/G, so a mutated chromosome sees about
//! one flipped bit on average.
//!
//! Fitness is not recomputed here; mutation strictly precedes the next
//! generation's evaluator pass.

use crate::population::Population;
use crate::rng::SeededRng;

/// Mutates roughly half the population in place.
///
/// Slot indices are drawn from `[0, C−2)` (the whole store when C < 3);
/// the same slot may be drawn more than once. Selected chromosomes flip
/// each gene with probability `1/G`.
pub fn mutate(population: &mut Population, rng: &mut SeededRng) {
    let size = population.len();
    let gene_count = population.gene_count();
    let flip_probability = 1.0 / gene_count as f64;
    let draw_upper = if size >= 3 { size - 2 } else { size };

    for _ in 0..size / 2 {
        let slot = rng.index_in(0..draw_upper);
        let chromosome = population.chromosome_mut(slot);
        for gene in 0..gene_count {
            if rng.coin_flip(flip_probability) {
                chromosome.flip_gene(gene);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Chromosome;

    #[test]
    fn test_sizes_unchanged_by_mutation() {
        let mut rng = SeededRng::from_seed(13);
        let mut population = Population::initialize(10, 8, &[], &mut rng).unwrap();

        mutate(&mut population, &mut rng);

        assert_eq!(population.len(), 10);
        for chromosome in population.chromosomes() {
            assert_eq!(chromosome.len(), 8);
        }
    }

    #[test]
    fn test_last_two_slots_never_mutated() {
        let mut rng = SeededRng::from_seed(17);
        let mut population = Population::initialize(8, 16, &[], &mut rng).unwrap();
        let tail_a = population.chromosome(6).clone();
        let tail_b = population.chromosome(7).clone();

        for _ in 0..200 {
            mutate(&mut population, &mut rng);
        }

        assert_eq!(population.chromosome(6), &tail_a);
        assert_eq!(population.chromosome(7), &tail_b);
    }

    #[test]
    fn test_mutation_is_seed_reproducible() {
        let mut rng_a = SeededRng::from_seed(5);
        let mut rng_b = SeededRng::from_seed(5);
        let mut pop_a = Population::initialize(12, 10, &[], &mut rng_a).unwrap();
        let mut pop_b = Population::initialize(12, 10, &[], &mut rng_b).unwrap();

        mutate(&mut pop_a, &mut rng_a);
        mutate(&mut pop_b, &mut rng_b);

        assert_eq!(pop_a, pop_b);
    }

    #[test]
    fn test_mean_flips_per_mutated_chromosome_near_one() {
        // Statistical property: with flip probability 1/G, a mutated
        // chromosome flips about one bit on average. With C = 2 exactly one
        // slot is drawn per pass; starting from an all-zero store, the
        // active-bit count across the store equals the flip count.
        let gene_count = 32;
        let trials = 4000;
        let mut rng = SeededRng::from_seed(2024);
        let mut total_flips = 0usize;

        for _ in 0..trials {
            let zeroed = Chromosome::zeroed(gene_count);
            let mut population =
                Population::initialize(2, gene_count, &[zeroed.clone(), zeroed], &mut rng)
                    .unwrap();
            mutate(&mut population, &mut rng);
            total_flips +=
                population.chromosome(0).count_ones() + population.chromosome(1).count_ones();
        }

        let mean = total_flips as f64 / trials as f64;
        assert!(
            (0.8..1.2).contains(&mean),
            "mean flips per mutated chromosome was {}",
            mean
        );
    }

    #[test]
    fn test_tiny_population_draws_from_whole_store() {
        // C = 2 leaves no room to spare the tail; the draw range falls back
        // to the whole store and must not panic.
        let mut rng = SeededRng::from_seed(31);
        let mut population = Population::initialize(2, 4, &[], &mut rng).unwrap();
        mutate(&mut population, &mut rng);
        assert_eq!(population.len(), 2);
    }
}
