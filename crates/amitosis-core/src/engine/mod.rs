//! # Engine Module
//!
//! The stateful layer of the simulation. It owns replicated populations and advances them
//! generation by generation.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Population, mutation, segregation and run parameters
//! - **State** ([`state`]) - A single replicate population with its own random stream
//! - **Ensemble** ([`populations`]) - Replicates advanced together, with snapshot collection
//! - **Tasks** ([`tasks`]) - Mutation, fitness-proportional selection and reproduction
//! - **Progress Monitoring** ([`progress`]) - Callbacks for user feedback
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Replicates are stepped in parallel on the rayon pool. Each replicate draws from its own
//! seeded stream, so the trajectory of a run is fixed by its seed alone.

pub mod config;
pub mod error;
pub mod populations;
pub mod progress;
pub mod state;
pub(crate) mod tasks;
pub(crate) mod utils;

pub use utils::sampling::SamplingError;
