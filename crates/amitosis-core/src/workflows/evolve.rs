use crate::core::io::trajectory::TrajectoryRecord;
use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use crate::engine::populations::Populations;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct EvolveResult {
    /// Master seed actually used, so unseeded runs can be repeated.
    pub seed: u64,
    pub records: Vec<TrajectoryRecord>,
}

#[instrument(skip_all, name = "evolve_workflow")]
pub fn run(
    config: &SimulationConfig,
    reporter: &ProgressReporter,
) -> Result<EvolveResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Initializing Populations",
    });
    info!(
        n_reps = config.population.n_reps,
        size = config.population.size,
        n_loci = config.population.n_loci,
        ploidy = config.population.ploidy,
        genomic_mu = config.mutation.genomic_mu,
        selcoef = config.mutation.selcoef,
        segregation = %config.segregation,
        "Creating unmutated populations."
    );
    let mut populations = Populations::new(config.clone())?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Evolving" });
    let records = populations.evolve_with_reporter(
        config.run.generations,
        config.run.interval,
        reporter,
    )?;
    reporter.report(Progress::PhaseFinish);

    if let Some(last) = records.last() {
        info!(
            generation = last.generation,
            fitness_mean = last.fitness_mean,
            "Evolution finished."
        );
    }

    Ok(EvolveResult {
        seed: populations.seed(),
        records,
    })
}
