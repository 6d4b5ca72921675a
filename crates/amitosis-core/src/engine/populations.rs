use super::config::SimulationConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::state::Replicate;
use super::tasks::mutation::MutationKernel;
use super::tasks::reproduction::{self, SegregationKernel};
use super::tasks::selection;
use super::utils::seeding;
use crate::core::fitness;
use crate::core::io::trajectory::TrajectoryRecord;
use crate::core::models::GERMLINE_PLOIDY;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Summary statistics across replicates at one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub fitness_mean: f64,
    /// Sample standard deviation (n - 1 denominator) of per-replicate mean fitness.
    /// `None` with a single replicate.
    pub fitness_std: Option<f64>,
    pub soma_mutant_freq: f64,
    pub germ_mutant_freq: f64,
}

/// A set of replicate populations evolving under identical parameters.
///
/// All individuals start unmutated. Each call to [`Populations::get_next_generation`]
/// applies mutation, selection and reproduction to every replicate.
///
/// A failed generation halts the ensemble. Replicates stepped before the failure keep
/// their new state, so the ensemble no longer describes a single generation and every
/// later step returns [`EngineError::Halted`]. Recorded history stays readable.
pub struct Populations {
    config: SimulationConfig,
    seed: u64,
    generation: u64,
    replicates: Vec<Replicate>,
    soma_mutation: MutationKernel,
    germ_mutation: MutationKernel,
    segregation: SegregationKernel,
    history: BTreeMap<u64, Snapshot>,
    halted: bool,
}

impl Populations {
    /// Builds unmutated replicates and records the generation-0 snapshot.
    ///
    /// Uses `config.run.seed` when present, otherwise draws a seed from the OS.
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        let seed = match config.run.seed {
            Some(seed) => seed,
            None => {
                let seed = seeding::entropy_seed();
                info!("No seed supplied; using seed {}.", seed);
                seed
            }
        };

        let pop = &config.population;
        let replicates = (0..pop.n_reps)
            .map(|i| {
                Replicate::unmutated(
                    pop.size,
                    pop.n_loci,
                    pop.ploidy,
                    seeding::stream_rng(seed, i),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mu = config.per_copy_mutation_rate();
        debug!(
            "Per-copy mutation rate {:.3e} ({} loci x {} copies).",
            mu, pop.n_loci, pop.ploidy
        );

        let soma_mutation = MutationKernel::new(pop.ploidy, mu)?;
        let germ_mutation = MutationKernel::new(GERMLINE_PLOIDY, mu)?;
        let segregation = SegregationKernel::new(pop.ploidy)?;

        let mut populations = Self {
            config,
            seed,
            generation: 0,
            replicates,
            soma_mutation,
            germ_mutation,
            segregation,
            history: BTreeMap::new(),
            halted: false,
        };
        let selcoef = populations.config.mutation.selcoef;
        for replicate in &mut populations.replicates {
            replicate.evaluate_fitness(selcoef);
        }
        populations.collect_data();
        Ok(populations)
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline]
    pub fn replicates(&self) -> &[Replicate] {
        &self.replicates
    }

    pub fn history(&self) -> &BTreeMap<u64, Snapshot> {
        &self.history
    }

    /// Whether a failed generation has stopped this ensemble.
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Takes every replicate through one mutation, selection and reproduction cycle.
    pub fn get_next_generation(&mut self) -> Result<(), EngineError> {
        if self.halted {
            return Err(EngineError::Halted {
                generation: self.generation,
            });
        }
        let next = self.generation + 1;
        let selcoef = self.config.mutation.selcoef;
        let mode = self.config.segregation;
        let soma_mutation = &self.soma_mutation;
        let germ_mutation = &self.germ_mutation;
        let segregation = &self.segregation;

        let stepped = self
            .replicates
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(index, replicate)| -> Result<(), EngineError> {
                soma_mutation.apply(&mut replicate.soma, &mut replicate.rng);
                germ_mutation.apply(&mut replicate.germ, &mut replicate.rng);
                let parents = selection::run(replicate, selcoef, index, next)?;
                reproduction::run(replicate, &parents, mode, segregation);
                Ok(())
            });
        if let Err(e) = stepped {
            warn!(generation = next, "Generation failed; halting populations: {}", e);
            self.halted = true;
            return Err(e);
        }

        self.generation = next;
        Ok(())
    }

    /// Records a snapshot for the current generation, replacing any earlier one.
    ///
    /// Fitness values are those cached at the last selection step.
    pub fn collect_data(&mut self) -> Snapshot {
        let snapshot = self.summarize();
        self.history.insert(self.generation, snapshot);
        snapshot
    }

    fn summarize(&self) -> Snapshot {
        let means: Vec<f64> = self.replicates.iter().map(Replicate::mean_fitness).collect();
        let soma: Vec<f64> = self
            .replicates
            .iter()
            .map(|r| r.soma.mutant_fraction())
            .collect();
        let germ: Vec<f64> = self
            .replicates
            .iter()
            .map(|r| r.germ.mutant_fraction())
            .collect();
        Snapshot {
            fitness_mean: fitness::mean(&means),
            fitness_std: sample_std(&means),
            soma_mutant_freq: fitness::mean(&soma),
            germ_mutant_freq: fitness::mean(&germ),
        }
    }

    /// Evolves for `ngenerations` generations, collecting a snapshot whenever the
    /// generation number is a multiple of `interval`, and returns every snapshot recorded
    /// so far.
    pub fn evolve(
        &mut self,
        ngenerations: u64,
        interval: u64,
    ) -> Result<Vec<TrajectoryRecord>, EngineError> {
        self.evolve_with_reporter(ngenerations, interval, &ProgressReporter::new())
    }

    #[instrument(skip_all, name = "evolve", fields(ngenerations = ngenerations, interval = interval))]
    pub fn evolve_with_reporter(
        &mut self,
        ngenerations: u64,
        interval: u64,
        reporter: &ProgressReporter,
    ) -> Result<Vec<TrajectoryRecord>, EngineError> {
        if interval == 0 {
            return Err(EngineError::InvalidInterval);
        }

        reporter.report(Progress::TaskStart {
            total_steps: ngenerations,
        });
        for _ in 0..ngenerations {
            self.get_next_generation()?;
            if self.generation % interval == 0 {
                let snapshot = self.collect_data();
                debug!(
                    generation = self.generation,
                    fitness_mean = snapshot.fitness_mean,
                    "Collected snapshot."
                );
                reporter.report(Progress::StatusUpdate {
                    text: format!(
                        "gen {}, mean fitness {:.4}",
                        self.generation, snapshot.fitness_mean
                    ),
                });
            }
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);

        Ok(self.records())
    }

    /// The trajectory table: one row per recorded generation, in generation order.
    pub fn records(&self) -> Vec<TrajectoryRecord> {
        let pop = &self.config.population;
        self.history
            .iter()
            .map(|(&generation, s)| TrajectoryRecord {
                generation,
                fitness_mean: s.fitness_mean,
                fitness_std: s.fitness_std,
                soma_mutant_freq: s.soma_mutant_freq,
                germ_mutant_freq: s.germ_mutant_freq,
                n_reps: pop.n_reps,
                n: pop.size,
                n_loci: pop.n_loci,
                ploidy: pop.ploidy,
                genomic_mu: self.config.mutation.genomic_mu,
                selcoef: self.config.mutation.selcoef,
                amitosis: self.config.segregation.is_amitosis(),
            })
            .collect()
    }
}

fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = fitness::mean(values);
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}
