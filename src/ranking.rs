//! # Ranking
//!
//! Sorts the population strictly descending by fitness, reordering the
//! chromosome store and the fitness vector in lockstep. Among equal-fitness
//! chromosomes the sparser one (fewer active bits) ranks higher when the
//! tie-break is enabled; sparser solutions select fewer candidate elements
//! for the same score. After a pass, index 0 holds the best chromosome.

use std::cmp::Ordering;

use crate::population::Population;

/// Reorders `population` descending by fitness.
///
/// When `favor_sparse` is set, equal-fitness chromosomes are ordered by
/// ascending active-bit count. NaN fitness values sink to the bottom of the
/// ranking. Stability beyond the tie-break rule is not guaranteed.
pub fn rank(population: &mut Population, favor_sparse: bool) {
    let keys: Vec<(f64, usize)> = (0..population.len())
        .map(|idx| {
            (
                population.fitness()[idx],
                population.chromosome(idx).count_ones(),
            )
        })
        .collect();

    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| {
        let cmp = compare_fitness(keys[a].0, keys[b].0).reverse();
        if cmp == Ordering::Equal && favor_sparse {
            keys[a].1.cmp(&keys[b].1)
        } else {
            cmp
        }
    });

    population.reorder(&order);
}

/// Compares two fitness values, treating NaN as less than any other value.
fn compare_fitness(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| {
        if a.is_nan() && b.is_nan() {
            Ordering::Equal
        } else if a.is_nan() {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Chromosome;
    use crate::rng::SeededRng;

    fn population_from(patterns: &[&[bool]], fitness: &[f64]) -> Population {
        let mut rng = SeededRng::from_seed(0);
        let seeds: Vec<Chromosome> = patterns.iter().map(|p| Chromosome::from_bits(p)).collect();
        let gene_count = patterns[0].len();
        let mut population =
            Population::initialize(patterns.len(), gene_count, &seeds, &mut rng).unwrap();
        population.fitness_mut().copy_from_slice(fitness);
        population
    }

    #[test]
    fn test_sorts_descending_by_fitness() {
        let mut population = population_from(
            &[
                &[true, false],
                &[false, true],
                &[true, true],
                &[false, false],
            ],
            &[0.2, 0.9, 0.5, 0.7],
        );

        rank(&mut population, true);

        let fitness = population.fitness();
        for pair in fitness.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        assert_eq!(fitness[0], 0.9);
    }

    #[test]
    fn test_tie_break_prefers_fewer_active_bits() {
        let mut population = population_from(
            &[
                &[true, true, true, false],
                &[true, false, false, false],
                &[true, true, false, false],
            ],
            &[0.5, 0.5, 0.5],
        );

        rank(&mut population, true);

        assert_eq!(population.chromosome(0).count_ones(), 1);
        assert_eq!(population.chromosome(1).count_ones(), 2);
        assert_eq!(population.chromosome(2).count_ones(), 3);
    }

    #[test]
    fn test_tie_break_disabled_leaves_ties_unordered_by_sparsity() {
        // With the flag off, only the fitness ordering is guaranteed.
        let mut population = population_from(
            &[&[true, true, true], &[true, false, false]],
            &[0.5, 0.5],
        );

        rank(&mut population, false);

        let fitness = population.fitness();
        assert_eq!(fitness, &[0.5, 0.5]);
    }

    #[test]
    fn test_adjacent_equal_fitness_invariant() {
        let mut population = population_from(
            &[
                &[true, true, false, false],
                &[false, true, false, false],
                &[true, true, true, false],
                &[false, false, false, true],
            ],
            &[0.3, 0.8, 0.3, 0.3],
        );

        rank(&mut population, true);

        let fitness = population.fitness();
        for i in 0..population.len() - 1 {
            assert!(fitness[i] >= fitness[i + 1]);
            if fitness[i] == fitness[i + 1] {
                assert!(
                    population.chromosome(i).count_ones()
                        <= population.chromosome(i + 1).count_ones()
                );
            }
        }
    }

    #[test]
    fn test_nan_sinks_to_bottom() {
        let mut population = population_from(
            &[&[true, false], &[false, true], &[true, true]],
            &[f64::NAN, 0.4, 0.6],
        );

        rank(&mut population, true);

        assert_eq!(population.fitness()[0], 0.6);
        assert_eq!(population.fitness()[1], 0.4);
        assert!(population.fitness()[2].is_nan());
    }
}
