use crate::core::io::trajectory::TrajectoryRecord;
use crate::engine::config::SweepConfig;
use crate::engine::error::EngineError;
use crate::engine::populations::Populations;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::utils::seeding;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct SweepResult {
    pub seed: u64,
    pub points: usize,
    /// Trajectories of every grid point, concatenated in grid order.
    pub records: Vec<TrajectoryRecord>,
}

/// Runs every point of the grid with a seed derived from the sweep seed and the point
/// index, so any single point can be re-run on its own.
#[instrument(skip_all, name = "sweep_workflow")]
pub fn run(sweep: &SweepConfig, reporter: &ProgressReporter) -> Result<SweepResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Expanding Parameter Grid",
    });
    let points = sweep.points()?;
    let seed = sweep.seed.unwrap_or_else(|| {
        let seed = seeding::entropy_seed();
        info!("No sweep seed supplied; using seed {}.", seed);
        seed
    });
    info!(points = points.len(), seed, "Parameter grid expanded.");
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Running Sweep",
    });
    let silent = ProgressReporter::new();
    let total = points.len();
    let mut records = Vec::new();

    reporter.report(Progress::TaskStart {
        total_steps: total as u64,
    });
    for (index, mut point) in points.into_iter().enumerate() {
        point.run.seed = Some(point_seed(seed, index));
        reporter.report(Progress::StatusUpdate {
            text: format!(
                "point {}/{}: N={}, L={}, P={}, U={}, s={}, {}",
                index + 1,
                total,
                point.population.size,
                point.population.n_loci,
                point.population.ploidy,
                point.mutation.genomic_mu,
                point.mutation.selcoef,
                point.segregation
            ),
        });

        let generations = point.run.generations;
        let interval = point.run.interval;
        let mut populations = Populations::new(point)?;
        let trajectory = populations.evolve_with_reporter(generations, interval, &silent)?;
        if let Some(last) = trajectory.last() {
            reporter.report(Progress::Message(format!(
                "point {}/{} finished: gen {}, mean fitness {:.4}, soma mutant freq {:.4}",
                index + 1,
                total,
                last.generation,
                last.fitness_mean,
                last.soma_mutant_freq
            )));
        }
        records.extend(trajectory);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    info!(rows = records.len(), "Sweep finished.");
    Ok(SweepResult {
        seed,
        points: total,
        records,
    })
}

/// Seed used for the grid point at `index`.
pub fn point_seed(sweep_seed: u64, index: usize) -> u64 {
    seeding::derive_seed(sweep_seed, index)
}
