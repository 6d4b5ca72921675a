use crate::core::fitness;
use crate::core::models::{CopyNumberMatrix, GERMLINE_PLOIDY};
use crate::core::models::genome::GenomeError;
use rand_chacha::ChaCha8Rng;

/// One independently evolving population.
#[derive(Debug, Clone)]
pub struct Replicate {
    pub soma: CopyNumberMatrix,
    pub germ: CopyNumberMatrix,
    /// Absolute fitness from the most recent evaluation, one entry per individual.
    pub fitness: Vec<f64>,
    pub(crate) rng: ChaCha8Rng,
}

impl Replicate {
    /// Creates `size` unmutated individuals with `n_loci` loci each.
    pub fn unmutated(
        size: usize,
        n_loci: usize,
        ploidy: u32,
        rng: ChaCha8Rng,
    ) -> Result<Self, GenomeError> {
        Ok(Self {
            soma: CopyNumberMatrix::unmutated(size, n_loci, ploidy)?,
            germ: CopyNumberMatrix::unmutated(size, n_loci, GERMLINE_PLOIDY)?,
            fitness: vec![1.0; size],
            rng,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.soma.individuals()
    }

    /// Re-evaluates and caches the fitness of every individual from its soma.
    pub fn evaluate_fitness(&mut self, selcoef: f64) {
        self.fitness = fitness::population_fitness(&self.soma, selcoef);
    }

    #[inline]
    pub fn mean_fitness(&self) -> f64 {
        fitness::mean(&self.fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::utils::seeding::stream_rng;

    #[test]
    fn unmutated_replicate_has_unit_fitness_and_diploid_germline() {
        let r = Replicate::unmutated(5, 3, 8, stream_rng(1, 0)).unwrap();
        assert_eq!(r.size(), 5);
        assert_eq!(r.soma.ploidy(), 8);
        assert_eq!(r.germ.ploidy(), GERMLINE_PLOIDY);
        assert_eq!(r.fitness, vec![1.0; 5]);
        assert_eq!(r.mean_fitness(), 1.0);
    }

    #[test]
    fn evaluate_fitness_reflects_somatic_mutations() {
        let mut r = Replicate::unmutated(2, 1, 2, stream_rng(1, 0)).unwrap();
        r.soma = CopyNumberMatrix::from_counts(2, 1, 2, vec![0, 2]).unwrap();
        r.evaluate_fitness(-0.5);
        assert_eq!(r.fitness, vec![1.0, 0.5]);
        assert!((r.mean_fitness() - 0.75).abs() < 1e-12);
    }
}
