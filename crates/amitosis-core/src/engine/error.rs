use thiserror::Error;

use super::config::ConfigError;
use super::utils::sampling::SamplingError;
use crate::core::models::genome::GenomeError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to initialize genomes: {source}")]
    Genome {
        #[from]
        source: GenomeError,
    },

    #[error("Selection failed in replicate {replicate} at generation {generation}: {source}")]
    Selection {
        replicate: usize,
        generation: u64,
        #[source]
        source: SamplingError,
    },

    #[error("Failed to construct {kind} distribution: {message}")]
    Distribution { kind: &'static str, message: String },

    #[error("Data collection interval must be at least 1 generation")]
    InvalidInterval,

    #[error("Populations failed at generation {generation} and cannot be advanced further")]
    Halted { generation: u64 },
}
