use crate::error::{CliError, Result};
use amitosis::engine::config::SegregationMode;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePopulationConfig {
    pub replicates: Option<usize>,
    pub size: Option<usize>,
    pub loci: Option<usize>,
    pub ploidy: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileMutationConfig {
    pub genomic_rate: Option<f64>,
    pub selection_coefficient: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSegregationConfig {
    pub mode: Option<SegregationMode>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRunConfig {
    pub generations: Option<u64>,
    pub interval: Option<u64>,
    pub seed: Option<u64>,
}

/// Value lists for each swept axis. Axes left unset fall back to the single value from
/// the corresponding section, then to the defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSweepConfig {
    pub sizes: Option<Vec<usize>>,
    pub loci: Option<Vec<usize>>,
    pub ploidies: Option<Vec<u32>>,
    pub genomic_rates: Option<Vec<f64>>,
    pub selection_coefficients: Option<Vec<f64>>,
    pub modes: Option<Vec<SegregationMode>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub population: Option<FilePopulationConfig>,
    pub mutation: Option<FileMutationConfig>,
    pub segregation: Option<FileSegregationConfig>,
    pub run: Option<FileRunConfig>,
    pub sweep: Option<FileSweepConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
