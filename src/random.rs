//! Random source.
//!
//! Every strategy owns exactly one generator, handed in at construction.
//! [`SolverRng`] is the default: a ChaCha stream that reproduces the same
//! search for the same seed on every platform.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default seedable generator used by the search strategies.
pub type SolverRng = ChaCha8Rng;

/// Creates a [`SolverRng`] from a seed.
pub fn create_rng(seed: u64) -> SolverRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a [`SolverRng`] from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> SolverRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}
