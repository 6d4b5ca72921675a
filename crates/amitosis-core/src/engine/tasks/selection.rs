use crate::engine::error::EngineError;
use crate::engine::state::Replicate;
use crate::engine::utils::sampling::fitness_proportional_sample;

/// Re-evaluates fitness on the current soma and samples the parents of the next
/// generation with replacement, keeping the population size constant.
pub fn run(
    replicate: &mut Replicate,
    selcoef: f64,
    index: usize,
    generation: u64,
) -> Result<Vec<usize>, EngineError> {
    replicate.evaluate_fitness(selcoef);
    let size = replicate.size();
    fitness_proportional_sample(&replicate.fitness, size, &mut replicate.rng).map_err(|source| {
        EngineError::Selection {
            replicate: index,
            generation,
            source,
        }
    })
}
