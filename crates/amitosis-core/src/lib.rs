//! # Amitosis Core Library
//!
//! A replicated Wright-Fisher simulator for a ciliate with a diploid germline and a
//! polyploid somatic genome (the macronucleus). Mutations accumulate in both genomes,
//! selection acts on the soma only, and the soma is passed on either by amitosis
//! (random segregation of replicated copies) or by mitosis (exact copy).
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`CopyNumberMatrix`), the
//!   multiplicative fitness function, and trajectory table I/O.
//!
//! - **[`engine`]: The Logic Core.** Stateful replicated populations, the per-generation
//!   tasks (mutation, selection, reproduction), configuration, and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete procedures such as evolving a single
//!   parameter set or sweeping a parameter grid, returning trajectory records ready to be
//!   written to disk.

pub mod core;
pub mod engine;
pub mod workflows;
