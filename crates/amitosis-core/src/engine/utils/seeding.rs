//! Deterministic derivation of independent random streams.
//!
//! A run is identified by one master seed. Each replicate (or sweep point) gets its own
//! ChaCha stream selected by index, so results do not depend on how work is scheduled
//! across threads.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random stream for the replicate at `index` within a run seeded by `seed`.
pub fn stream_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Derives a child seed, e.g. for one point of a parameter sweep.
pub fn derive_seed(seed: u64, index: usize) -> u64 {
    stream_rng(seed, index).next_u64()
}

/// Draws a fresh master seed from the OS-seeded thread generator.
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}
