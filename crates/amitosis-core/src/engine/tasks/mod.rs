//! The three steps of a generation: mutation, selection and reproduction.

pub mod mutation;
pub mod reproduction;
pub mod selection;
