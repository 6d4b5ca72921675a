//! Input/output of simulation results.

pub mod trajectory;
