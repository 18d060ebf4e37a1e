//! Seeded random source.
//!
//! Every stochastic component takes `&mut R where R: Rng` explicitly; the
//! run owns a single generator created here. The same seed and the same
//! configuration replay the same sequence of populations.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generator type used by the phaser binary.
pub type PhaserRng = StdRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u32) -> PhaserRng {
    StdRng::seed_from_u64(u64::from(seed))
}

/// Draws a fresh seed from the operating system entropy source.
pub fn generate_seed() -> u32 {
    rand::random()
}
