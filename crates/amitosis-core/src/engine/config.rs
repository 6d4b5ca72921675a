use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Sweep axis '{0}' has no values")]
    EmptySweepAxis(&'static str),
}

/// Largest accepted somatic ploidy. Mutation and segregation kernels hold one
/// precomputed distribution per copy number.
pub const MAX_PLOIDY: u32 = 10_000;

/// How the somatic genome is transmitted from parent to offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegregationMode {
    /// Copies are replicated and a random half is passed on.
    Amitosis,
    /// The parental soma is copied exactly.
    Mitosis,
}

impl SegregationMode {
    #[inline]
    pub fn is_amitosis(self) -> bool {
        matches!(self, SegregationMode::Amitosis)
    }
}

impl std::fmt::Display for SegregationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegregationMode::Amitosis => write!(f, "amitosis"),
            SegregationMode::Mitosis => write!(f, "mitosis"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationConfig {
    pub n_reps: usize,
    pub size: usize,
    pub n_loci: usize,
    pub ploidy: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationConfig {
    /// Expected number of new mutations per somatic genome per generation.
    pub genomic_mu: f64,
    /// Effect of a fully mutant locus on fitness. Negative values are deleterious.
    pub selcoef: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub generations: u64,
    pub interval: u64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub population: PopulationConfig,
    pub mutation: MutationConfig,
    pub segregation: SegregationMode,
    pub run: RunConfig,
}

impl SimulationConfig {
    /// Mutation probability per copy per locus per generation.
    ///
    /// The genomic rate is spread over every somatic copy, and the same per-copy rate
    /// applies to the germline.
    #[inline]
    pub fn per_copy_mutation_rate(&self) -> f64 {
        per_copy_rate(
            self.mutation.genomic_mu,
            self.population.n_loci,
            self.population.ploidy,
        )
    }
}

fn per_copy_rate(genomic_mu: f64, n_loci: usize, ploidy: u32) -> f64 {
    genomic_mu / (n_loci as f64 * ploidy as f64)
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    n_reps: Option<usize>,
    size: Option<usize>,
    n_loci: Option<usize>,
    ploidy: Option<u32>,
    genomic_mu: Option<f64>,
    selcoef: Option<f64>,
    segregation: Option<SegregationMode>,
    generations: Option<u64>,
    interval: Option<u64>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_reps(mut self, n: usize) -> Self {
        self.n_reps = Some(n);
        self
    }
    pub fn size(mut self, n: usize) -> Self {
        self.size = Some(n);
        self
    }
    pub fn n_loci(mut self, n: usize) -> Self {
        self.n_loci = Some(n);
        self
    }
    pub fn ploidy(mut self, ploidy: u32) -> Self {
        self.ploidy = Some(ploidy);
        self
    }
    pub fn genomic_mu(mut self, mu: f64) -> Self {
        self.genomic_mu = Some(mu);
        self
    }
    pub fn selcoef(mut self, s: f64) -> Self {
        self.selcoef = Some(s);
        self
    }
    pub fn segregation(mut self, mode: SegregationMode) -> Self {
        self.segregation = Some(mode);
        self
    }
    pub fn amitosis(self, amitosis: bool) -> Self {
        self.segregation(if amitosis {
            SegregationMode::Amitosis
        } else {
            SegregationMode::Mitosis
        })
    }
    pub fn generations(mut self, n: u64) -> Self {
        self.generations = Some(n);
        self
    }
    pub fn interval(mut self, n: u64) -> Self {
        self.interval = Some(n);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let population = PopulationConfig {
            n_reps: positive(
                "n_reps",
                self.n_reps.ok_or(ConfigError::MissingParameter("n_reps"))?,
            )?,
            size: positive(
                "size",
                self.size.ok_or(ConfigError::MissingParameter("size"))?,
            )?,
            n_loci: positive(
                "n_loci",
                self.n_loci.ok_or(ConfigError::MissingParameter("n_loci"))?,
            )?,
            ploidy: positive(
                "ploidy",
                self.ploidy.ok_or(ConfigError::MissingParameter("ploidy"))?,
            )?,
        };
        if population.ploidy > MAX_PLOIDY {
            return Err(ConfigError::InvalidParameter {
                name: "ploidy",
                reason: format!(
                    "must not exceed {} (got {})",
                    MAX_PLOIDY, population.ploidy
                ),
            });
        }

        let genomic_mu = self
            .genomic_mu
            .ok_or(ConfigError::MissingParameter("genomic_mu"))?;
        if !genomic_mu.is_finite() || genomic_mu < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "genomic_mu",
                reason: format!("must be a finite, non-negative rate (got {})", genomic_mu),
            });
        }
        let mu = per_copy_rate(genomic_mu, population.n_loci, population.ploidy);
        if mu > 1.0 {
            return Err(ConfigError::InvalidParameter {
                name: "genomic_mu",
                reason: format!(
                    "implies a per-copy mutation probability of {} (must not exceed 1)",
                    mu
                ),
            });
        }

        let selcoef = self
            .selcoef
            .ok_or(ConfigError::MissingParameter("selcoef"))?;
        if !selcoef.is_finite() || selcoef < -1.0 {
            return Err(ConfigError::InvalidParameter {
                name: "selcoef",
                reason: format!("must be finite and at least -1 (got {})", selcoef),
            });
        }

        let interval = self
            .interval
            .ok_or(ConfigError::MissingParameter("interval"))?;
        if interval == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "interval",
                reason: "must be at least 1 generation".to_string(),
            });
        }

        Ok(SimulationConfig {
            population,
            mutation: MutationConfig {
                genomic_mu,
                selcoef,
            },
            segregation: self
                .segregation
                .ok_or(ConfigError::MissingParameter("segregation"))?,
            run: RunConfig {
                generations: self
                    .generations
                    .ok_or(ConfigError::MissingParameter("generations"))?,
                interval,
                seed: self.seed,
            },
        })
    }
}

fn positive<T: PartialOrd + Default + std::fmt::Display>(
    name: &'static str,
    value: T,
) -> Result<T, ConfigError> {
    if value > T::default() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be at least 1 (got {})", value),
        })
    }
}

/// A Cartesian grid of parameter values, run under shared replicate and run settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub n_reps: usize,
    pub sizes: Vec<usize>,
    pub n_loci: Vec<usize>,
    pub ploidies: Vec<u32>,
    pub genomic_mus: Vec<f64>,
    pub selcoefs: Vec<f64>,
    pub segregation: Vec<SegregationMode>,
    pub generations: u64,
    pub interval: u64,
    pub seed: Option<u64>,
}

impl SweepConfig {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.sizes.len()
            * self.n_loci.len()
            * self.ploidies.len()
            * self.genomic_mus.len()
            * self.selcoefs.len()
            * self.segregation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expands the grid into validated simulation configs.
    ///
    /// Points are ordered with segregation mode varying fastest and population size
    /// slowest. Seeds are left unset; the sweep workflow assigns one per point.
    pub fn points(&self) -> Result<Vec<SimulationConfig>, ConfigError> {
        for (name, len) in [
            ("sizes", self.sizes.len()),
            ("n_loci", self.n_loci.len()),
            ("ploidies", self.ploidies.len()),
            ("genomic_mus", self.genomic_mus.len()),
            ("selcoefs", self.selcoefs.len()),
            ("segregation", self.segregation.len()),
        ] {
            if len == 0 {
                return Err(ConfigError::EmptySweepAxis(name));
            }
        }

        let mut points = Vec::with_capacity(self.len());
        for &size in &self.sizes {
            for &n_loci in &self.n_loci {
                for &ploidy in &self.ploidies {
                    for &genomic_mu in &self.genomic_mus {
                        for &selcoef in &self.selcoefs {
                            for &mode in &self.segregation {
                                points.push(
                                    SimulationConfigBuilder::new()
                                        .n_reps(self.n_reps)
                                        .size(size)
                                        .n_loci(n_loci)
                                        .ploidy(ploidy)
                                        .genomic_mu(genomic_mu)
                                        .selcoef(selcoef)
                                        .segregation(mode)
                                        .generations(self.generations)
                                        .interval(self.interval)
                                        .build()?,
                                );
                            }
                        }
                    }
                }
            }
        }
        Ok(points)
    }
}
