use crate::core::models::CopyNumberMatrix;
use crate::engine::error::EngineError;
use rand::Rng;
use rand_distr::{Binomial, Distribution};

/// Precomputed mutation draws for one genome ceiling.
///
/// A cell with `m` mutant copies has `ploidy - m` wild-type copies, each of which mutates
/// independently with probability `mu`. The binomial for every possible wild-type count
/// is built once and reused across generations.
#[derive(Debug, Clone)]
pub struct MutationKernel {
    ploidy: u32,
    by_wildtype: Vec<Option<Binomial>>,
}

impl MutationKernel {
    pub fn new(ploidy: u32, mu: f64) -> Result<Self, EngineError> {
        let mut by_wildtype = Vec::with_capacity(ploidy as usize + 1);
        for wildtype in 0..=ploidy {
            if wildtype == 0 || mu == 0.0 {
                by_wildtype.push(None);
                continue;
            }
            let dist =
                Binomial::new(wildtype as u64, mu).map_err(|e| EngineError::Distribution {
                    kind: "binomial",
                    message: e.to_string(),
                })?;
            by_wildtype.push(Some(dist));
        }
        Ok(Self {
            ploidy,
            by_wildtype,
        })
    }

    /// Adds new mutations to every cell of the matrix in place.
    pub fn apply(&self, matrix: &mut CopyNumberMatrix, rng: &mut impl Rng) {
        debug_assert_eq!(matrix.ploidy(), self.ploidy);
        for count in matrix.counts_mut() {
            let wildtype = (self.ploidy - *count) as usize;
            if let Some(dist) = &self.by_wildtype[wildtype] {
                *count += dist.sample(rng) as u32;
            }
        }
    }
}
