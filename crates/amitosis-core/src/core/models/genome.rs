use thiserror::Error;

/// Ploidy of the germline (micronuclear) genome.
pub const GERMLINE_PLOIDY: u32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenomeError {
    #[error("Ploidy must be at least 1")]
    ZeroPloidy,

    #[error("Expected {expected} copy-number cells ({individuals} x {loci}), found {found}")]
    ShapeMismatch {
        individuals: usize,
        loci: usize,
        expected: usize,
        found: usize,
    },

    #[error("Copy number {count} at cell {index} exceeds ploidy {ploidy}")]
    CountExceedsPloidy {
        index: usize,
        count: u32,
        ploidy: u32,
    },
}

/// Mutant copy counts for every locus of every individual in one population.
///
/// Stored row-major: the loci of individual `i` occupy `counts[i * loci..(i + 1) * loci]`.
/// Every cell lies in `0..=ploidy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyNumberMatrix {
    individuals: usize,
    loci: usize,
    ploidy: u32,
    counts: Vec<u32>,
}

impl CopyNumberMatrix {
    /// Creates a matrix of unmutated genomes.
    pub fn unmutated(individuals: usize, loci: usize, ploidy: u32) -> Result<Self, GenomeError> {
        if ploidy == 0 {
            return Err(GenomeError::ZeroPloidy);
        }
        Ok(Self {
            individuals,
            loci,
            ploidy,
            counts: vec![0; individuals * loci],
        })
    }

    /// Builds a matrix from explicit row-major counts, validating shape and bounds.
    pub fn from_counts(
        individuals: usize,
        loci: usize,
        ploidy: u32,
        counts: Vec<u32>,
    ) -> Result<Self, GenomeError> {
        if ploidy == 0 {
            return Err(GenomeError::ZeroPloidy);
        }
        let expected = individuals * loci;
        if counts.len() != expected {
            return Err(GenomeError::ShapeMismatch {
                individuals,
                loci,
                expected,
                found: counts.len(),
            });
        }
        if let Some((index, &count)) = counts.iter().enumerate().find(|(_, c)| **c > ploidy) {
            return Err(GenomeError::CountExceedsPloidy {
                index,
                count,
                ploidy,
            });
        }
        Ok(Self {
            individuals,
            loci,
            ploidy,
            counts,
        })
    }

    #[inline]
    pub fn individuals(&self) -> usize {
        self.individuals
    }

    #[inline]
    pub fn loci(&self) -> usize {
        self.loci
    }

    #[inline]
    pub fn ploidy(&self) -> u32 {
        self.ploidy
    }

    #[inline]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Mutable access for the engine tasks, which are responsible for keeping every
    /// cell within `0..=ploidy`.
    #[inline]
    pub(crate) fn counts_mut(&mut self) -> &mut [u32] {
        &mut self.counts
    }

    /// Returns the loci of a single individual.
    ///
    /// # Panics
    ///
    /// Panics if `individual` is out of range.
    #[inline]
    pub fn row(&self, individual: usize) -> &[u32] {
        let start = individual * self.loci;
        &self.counts[start..start + self.loci]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunks_exact panics on a zero chunk size
        self.counts.chunks_exact(self.loci.max(1)).take(self.individuals)
    }

    /// Builds the next generation's matrix by copying the rows of the given parents.
    pub fn gather(&self, parents: &[usize]) -> Self {
        let mut counts = Vec::with_capacity(parents.len() * self.loci);
        for &parent in parents {
            counts.extend_from_slice(self.row(parent));
        }
        Self {
            individuals: parents.len(),
            loci: self.loci,
            ploidy: self.ploidy,
            counts,
        }
    }

    /// Fraction of all copies in the matrix that carry a mutation.
    pub fn mutant_fraction(&self) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        let mutant: u64 = self.counts.iter().map(|&c| c as u64).sum();
        mutant as f64 / (self.counts.len() as f64 * self.ploidy as f64)
    }
}
