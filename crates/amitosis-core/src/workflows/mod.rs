//! # Workflows Module
//!
//! High-level entry points that run complete simulations and hand back trajectory tables.
//!
//! - **Evolve Workflow** ([`evolve`]) - Evolve replicate populations under one parameter set
//! - **Sweep Workflow** ([`sweep`]) - Evolve every point of a parameter grid and concatenate
//!   the trajectories, as needed to compare ploidy levels or segregation modes

pub mod evolve;
pub mod sweep;
