//! # Core Module
//!
//! Fundamental building blocks of the simulation: genome representations, the fitness
//! function and the tabular trajectory format.
//!
//! - **Genome Representation** ([`models`]) - Copy-number matrices for somatic and germline genomes
//! - **Fitness** ([`fitness`]) - Multiplicative per-locus fitness of the somatic genome
//! - **File I/O** ([`io`]) - Reading and writing trajectory tables as CSV

pub mod fitness;
pub mod io;
pub mod models;
