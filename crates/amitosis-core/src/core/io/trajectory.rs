use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrajectoryIoError {
    #[error("Failed to access trajectory file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read or write trajectory CSV '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// One snapshot of a replicated run, together with the parameters that produced it.
///
/// `fitness_std` is the sample standard deviation across replicates and is absent when
/// only one replicate was simulated. It is written as an empty CSV field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub generation: u64,
    pub fitness_mean: f64,
    pub fitness_std: Option<f64>,
    pub soma_mutant_freq: f64,
    pub germ_mutant_freq: f64,
    pub n_reps: usize,
    pub n: usize,
    pub n_loci: usize,
    pub ploidy: u32,
    pub genomic_mu: f64,
    pub selcoef: f64,
    pub amitosis: bool,
}

/// Writes records as CSV with a header row.
pub fn write_csv<W: Write>(
    records: &[TrajectoryRecord],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<TrajectoryRecord>, csv::Error> {
    let mut rdr = csv::Reader::from_reader(reader);
    rdr.deserialize::<TrajectoryRecord>().collect()
}

pub fn write_to_path(records: &[TrajectoryRecord], path: &Path) -> Result<(), TrajectoryIoError> {
    let file = std::fs::File::create(path).map_err(|e| TrajectoryIoError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_csv(records, std::io::BufWriter::new(file)).map_err(|e| TrajectoryIoError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

pub fn read_from_path(path: &Path) -> Result<Vec<TrajectoryRecord>, TrajectoryIoError> {
    let file = std::fs::File::open(path).map_err(|e| TrajectoryIoError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    read_csv(std::io::BufReader::new(file)).map_err(|e| TrajectoryIoError::Csv {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}
