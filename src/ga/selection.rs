//! Tournament selection.
//!
//! Draw `k` indices uniformly with replacement and keep the one with the
//! fewest conflicts. A later draw wins ties, so with `k = 2` the result is
//! `if f[a] < f[b] { a } else { b }` for draws `a` then `b`.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::Rng;

/// Selects a parent index from `population` by a `k`-way tournament.
///
/// `k` below 1 is treated as 1 (uniform random pick).
///
/// # Complexity
/// O(k)
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() <= population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}
