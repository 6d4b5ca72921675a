use crate::core::models::CopyNumberMatrix;
use crate::engine::config::SegregationMode;
use crate::engine::error::EngineError;
use crate::engine::state::Replicate;
use rand::Rng;
use rand_distr::{Distribution, Hypergeometric};

/// Amitotic segregation draws for a given somatic ploidy.
///
/// Before division each of the `P` copies at a locus is duplicated, giving `2m` mutant and
/// `2(P - m)` wild-type copies. The daughter receives `P` of them drawn without
/// replacement. Loci with `m == 0` or `m == P` segregate deterministically.
#[derive(Debug, Clone)]
pub struct SegregationKernel {
    ploidy: u32,
    by_mutant: Vec<Option<Hypergeometric>>,
}

impl SegregationKernel {
    pub fn new(ploidy: u32) -> Result<Self, EngineError> {
        let replicated = 2 * ploidy as u64;
        let mut by_mutant = Vec::with_capacity(ploidy as usize + 1);
        for mutant in 0..=ploidy {
            if mutant == 0 || mutant == ploidy {
                by_mutant.push(None);
                continue;
            }
            let dist = Hypergeometric::new(replicated, 2 * mutant as u64, ploidy as u64)
                .map_err(|e| EngineError::Distribution {
                    kind: "hypergeometric",
                    message: e.to_string(),
                })?;
            by_mutant.push(Some(dist));
        }
        Ok(Self { ploidy, by_mutant })
    }

    /// Replaces every somatic cell with its amitotically segregated copy number.
    pub fn apply(&self, soma: &mut CopyNumberMatrix, rng: &mut impl Rng) {
        debug_assert_eq!(soma.ploidy(), self.ploidy);
        for count in soma.counts_mut() {
            if let Some(dist) = &self.by_mutant[*count as usize] {
                *count = dist.sample(rng) as u32;
            }
        }
    }
}

/// Produces one offspring per sampled parent.
///
/// The germline is always transmitted mitotically. The soma is either copied or
/// segregated amitotically depending on `mode`.
pub fn run(
    replicate: &mut Replicate,
    parents: &[usize],
    mode: SegregationMode,
    kernel: &SegregationKernel,
) {
    replicate.germ = replicate.germ.gather(parents);
    replicate.soma = replicate.soma.gather(parents);
    if mode.is_amitosis() {
        kernel.apply(&mut replicate.soma, &mut replicate.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::utils::seeding::stream_rng;

    #[test]
    fn fixed_loci_are_transmitted_unchanged_by_amitosis() {
        let kernel = SegregationKernel::new(4).unwrap();
        let mut soma = CopyNumberMatrix::from_counts(1, 4, 4, vec![0, 4, 0, 4]).unwrap();
        kernel.apply(&mut soma, &mut stream_rng(1, 0));
        assert_eq!(soma.counts(), &[0, 4, 0, 4]);
    }

    #[test]
    fn amitosis_keeps_counts_within_ploidy() {
        let kernel = SegregationKernel::new(3).unwrap();
        let mut soma = CopyNumberMatrix::from_counts(1, 3, 3, vec![1, 2, 1]).unwrap();
        let mut rng = stream_rng(9, 0);
        for _ in 0..200 {
            kernel.apply(&mut soma, &mut rng);
            assert!(soma.counts().iter().all(|&c| c <= 3));
        }
    }

    #[test]
    fn amitosis_preserves_expected_mutant_fraction() {
        let ploidy = 10;
        let kernel = SegregationKernel::new(ploidy).unwrap();
        let mut soma = CopyNumberMatrix::from_counts(1, 20_000, ploidy, vec![3; 20_000]).unwrap();
        kernel.apply(&mut soma, &mut stream_rng(5, 0));
        let mean = soma.counts().iter().map(|&c| c as f64).sum::<f64>() / 20_000.0;
        assert!((mean - 3.0).abs() < 0.05, "observed {}", mean);
        assert!(soma.counts().iter().any(|&c| c != 3));
    }

    #[test]
    fn amitosis_matches_hypergeometric_moments_at_macronuclear_ploidy() {
        const PLOIDY: u32 = 45;
        const LOCI: usize = 50_000;
        const MAX_Z: f64 = 5.0;

        let kernel = SegregationKernel::new(PLOIDY).unwrap();
        let total = 2.0 * PLOIDY as f64;
        let draws = PLOIDY as f64;

        for (i, &mutant) in [1u32, 5, 11, 15, 22, 23, 30, 35, 40, 44].iter().enumerate() {
            let mut soma =
                CopyNumberMatrix::from_counts(1, LOCI, PLOIDY, vec![mutant; LOCI]).unwrap();
            kernel.apply(&mut soma, &mut stream_rng(2024, i));

            let successes = 2.0 * mutant as f64;
            let expected_mean = draws * successes / total;
            let expected_var = draws * (successes / total) * ((total - successes) / total)
                * ((total - draws) / (total - 1.0));

            let n = LOCI as f64;
            let values: Vec<f64> = soma.counts().iter().map(|&c| c as f64).collect();
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            let fourth = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / n;

            let z_mean = (mean - expected_mean) / (expected_var / n).sqrt();
            let z_var = (var - expected_var) / ((fourth - var * var) / n).sqrt();

            assert!(
                z_mean.abs() < MAX_Z,
                "m={} mean={} expected={} z={}",
                mutant,
                mean,
                expected_mean,
                z_mean
            );
            assert!(
                z_var.abs() < MAX_Z,
                "m={} var={} expected={} z={}",
                mutant,
                var,
                expected_var,
                z_var
            );
        }
    }

    #[test]
    fn mitosis_copies_soma_and_germline_exactly() {
        let kernel = SegregationKernel::new(2).unwrap();
        let mut r = Replicate::unmutated(3, 2, 2, stream_rng(1, 0)).unwrap();
        r.soma = CopyNumberMatrix::from_counts(3, 2, 2, vec![1, 1, 0, 2, 2, 0]).unwrap();
        r.germ = CopyNumberMatrix::from_counts(3, 2, 2, vec![0, 1, 1, 0, 2, 2]).unwrap();

        run(&mut r, &[0, 0, 2], SegregationMode::Mitosis, &kernel);

        assert_eq!(r.soma.counts(), &[1, 1, 1, 1, 2, 0]);
        assert_eq!(r.germ.counts(), &[0, 1, 0, 1, 2, 2]);
    }

    #[test]
    fn amitosis_still_copies_germline_exactly() {
        let kernel = SegregationKernel::new(2).unwrap();
        let mut r = Replicate::unmutated(2, 1, 2, stream_rng(1, 0)).unwrap();
        r.soma = CopyNumberMatrix::from_counts(2, 1, 2, vec![1, 1]).unwrap();
        r.germ = CopyNumberMatrix::from_counts(2, 1, 2, vec![2, 1]).unwrap();

        run(&mut r, &[1, 0], SegregationMode::Amitosis, &kernel);

        assert_eq!(r.germ.counts(), &[1, 2]);
        assert!(r.soma.counts().iter().all(|&c| c <= 2));
    }
}
