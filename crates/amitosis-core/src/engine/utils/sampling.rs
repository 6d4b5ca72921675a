use crate::core::fitness;
use rand::distr::weighted::{self, WeightedIndex};
use rand::prelude::*;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("Fitness list is empty, cannot sample parents")]
    EmptyFitness,
    #[error("Total fitness is zero or not finite; the population cannot reproduce")]
    ZeroTotalFitness,
    #[error("Failed to create weighted distribution: {source}")]
    DistributionError {
        #[from]
        source: weighted::Error,
    },
}

/// Draws `count` indices with replacement, each with probability proportional to its
/// fitness.
///
/// Weights are the relative fitness, so a non-positive or non-finite total is rejected
/// before any draw.
#[instrument(level = "trace", skip_all, fields(count))]
pub fn fitness_proportional_sample(
    fitness: &[f64],
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<usize>, SamplingError> {
    if fitness.is_empty() {
        return Err(SamplingError::EmptyFitness);
    }

    let relative = fitness::relative_fitness(fitness).ok_or(SamplingError::ZeroTotalFitness)?;
    let dist = WeightedIndex::new(&relative)?;
    Ok((0..count).map(|_| dist.sample(rng)).collect())
}
