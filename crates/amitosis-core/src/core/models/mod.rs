//! Data structures describing the genomes of a population.
//!
//! Each individual carries two genomes: a diploid germline (micronucleus) and a
//! polyploid soma (macronucleus). Both are stored as counts of mutant copies per locus
//! rather than as explicit chromosomes, since copies at a locus are exchangeable.

pub mod genome;

pub use genome::{CopyNumberMatrix, GERMLINE_PLOIDY};
