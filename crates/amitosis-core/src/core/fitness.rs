//! Multiplicative fitness of the somatic genome.
//!
//! Each locus contributes a factor `1 + s * m / P`, where `m` is the number of mutant
//! copies at that locus, `P` the somatic ploidy and `s` the selection coefficient. A locus
//! therefore acts additively across its copies, and loci combine multiplicatively. The
//! germline never enters this calculation.

use super::models::CopyNumberMatrix;

/// Fitness of one individual given its somatic copy numbers.
#[inline]
pub fn individual_fitness(loci: &[u32], ploidy: u32, selcoef: f64) -> f64 {
    let p = ploidy as f64;
    loci.iter()
        .map(|&m| 1.0 + (m as f64 / p) * selcoef)
        .product()
}

/// Absolute fitness of every individual in a somatic matrix.
pub fn population_fitness(soma: &CopyNumberMatrix, selcoef: f64) -> Vec<f64> {
    soma.rows()
        .map(|row| individual_fitness(row, soma.ploidy(), selcoef))
        .collect()
}

/// Normalizes absolute fitness to sum to one.
///
/// Returns `None` when the total fitness is not positive, in which case no individual
/// can be chosen as a parent.
pub fn relative_fitness(fitness: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = fitness.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some(fitness.iter().map(|w| w / total).collect())
}

/// Arithmetic mean, or `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn unmutated_individual_has_unit_fitness() {
        assert!(f64_approx_equal(individual_fitness(&[0, 0, 0], 45, -0.1), 1.0));
    }

    #[test]
    fn fully_mutant_locus_applies_full_selection_coefficient() {
        assert!(f64_approx_equal(individual_fitness(&[4], 4, -0.1), 0.9));
        assert!(f64_approx_equal(individual_fitness(&[4], 4, 0.05), 1.05));
    }

    #[test]
    fn partial_dosage_scales_linearly_within_a_locus() {
        assert!(f64_approx_equal(individual_fitness(&[1], 4, -0.2), 0.95));
    }

    #[test]
    fn loci_combine_multiplicatively() {
        let w = individual_fitness(&[2, 2], 2, -0.5);
        assert!(f64_approx_equal(w, 0.25));
    }

    #[test]
    fn population_fitness_evaluates_each_row() {
        let soma = CopyNumberMatrix::from_counts(3, 1, 2, vec![0, 1, 2]).unwrap();
        let w = population_fitness(&soma, -0.2);
        assert_eq!(w.len(), 3);
        assert!(f64_approx_equal(w[0], 1.0));
        assert!(f64_approx_equal(w[1], 0.9));
        assert!(f64_approx_equal(w[2], 0.8));
    }

    #[test]
    fn relative_fitness_sums_to_one() {
        let rel = relative_fitness(&[1.0, 3.0]).unwrap();
        assert!(f64_approx_equal(rel[0], 0.25));
        assert!(f64_approx_equal(rel[1], 0.75));
    }

    #[test]
    fn relative_fitness_is_none_when_everyone_is_inviable() {
        assert!(relative_fitness(&[0.0, 0.0]).is_none());
        assert!(relative_fitness(&[]).is_none());
    }

    #[test]
    fn mean_of_empty_slice_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert!(f64_approx_equal(mean(&[1.0, 2.0, 3.0]), 2.0));
    }
}
