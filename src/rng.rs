//! Seeded random sources.
//!
//! Every stochastic operator in this crate takes an explicit `&mut R: Rng`.
//! A run owns exactly one driver RNG created here; parallel offspring
//! generation derives one independent stream per worker with [`fork_seeds`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic RNG from a 64-bit seed.
///
/// ```
/// use nqueens_ga::rng::create_rng;
/// use rand::Rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws `n` seeds from `rng`, one per independent child stream.
pub fn fork_seeds<R: Rng>(rng: &mut R, n: usize) -> Vec<u64> {
    (0..n).map(|_| rng.random()).collect()
}
