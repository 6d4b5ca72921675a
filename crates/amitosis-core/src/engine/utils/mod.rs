//! Random sampling helpers shared by the engine tasks.

pub mod sampling;
pub mod seeding;
