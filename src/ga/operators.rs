//! Variation operators for permutation-encoded boards.
//!
//! All operators work on `&[usize]` gene slices and take the RNG explicitly.
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: one unconditional transposition, O(1)
//! - [`adaptive_mutation`]: per-gene Bernoulli transpositions, O(n)
//!
//! # Crossover
//!
//! - [`window_crossover`]: genes inside a random window from parent 1, the
//!   rest from parent 2 at the same positions. The child is **not**
//!   guaranteed to be a permutation; [`repair_permutation`] restores it.
//!
//! # Initialization
//!
//! - [`shuffle`]: in-place shuffle that swaps every position with a uniform
//!   random position.

use rand::Rng;
use std::ops::RangeInclusive;

// ============================================================================
// Initialization
// ============================================================================

/// Shuffles `genes` in place: for each `i`, swap `genes[i]` with `genes[j]`,
/// `j` uniform in `0..n`.
///
/// Transpositions only, so a permutation stays a permutation.
pub fn shuffle<R: Rng>(genes: &mut [usize], rng: &mut R) {
    let n = genes.len();
    for i in 0..n {
        let j = rng.random_range(0..n);
        genes.swap(i, j);
    }
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two random positions.
///
/// The positions may coincide, in which case nothing changes.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(genes: &mut [usize], rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    genes.swap(i, j);
}

/// Adaptive mutation: every position independently swaps with a random
/// position with probability `rate_percent / 100`.
///
/// # Complexity
/// O(n)
///
/// # Panics
/// Panics if `rate_percent > 100`.
pub fn adaptive_mutation<R: Rng>(genes: &mut [usize], rate_percent: u8, rng: &mut R) {
    assert!(
        rate_percent <= 100,
        "mutation rate is a percentage: {rate_percent}"
    );
    let n = genes.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        if rng.random_range(0..100u8) < rate_percent {
            let j = rng.random_range(0..n);
            genes.swap(i, j);
        }
    }
}

// ============================================================================
// Crossover
// ============================================================================

/// Multi-point window crossover.
///
/// Picks a random window `[start, end]`; the child takes `parent1` inside it
/// and `parent2` outside it, position by position. Returns the child and the
/// window.
///
/// Values copied from `parent2` may repeat values already taken from the
/// window, so the child can contain duplicate columns.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn window_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, RangeInclusive<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let (start, end) = random_segment(n, rng);
    let child = parent2
        .iter()
        .zip(parent1)
        .enumerate()
        .map(|(k, (&outside, &inside))| {
            if (start..=end).contains(&k) {
                inside
            } else {
                outside
            }
        })
        .collect();

    (child, start..=end)
}

/// Re-establishes the permutation invariant after crossover.
///
/// Genes inside `keep` are never touched. Outside it, the first occurrence of
/// each value not already used by `keep` is kept; every other position is
/// refilled with the missing values of `0..n` in ascending order.
///
/// The result is always a permutation. The genes inside `keep` must be
/// distinct, which holds when they were copied from a permutation.
///
/// # Panics
/// Panics if `keep` extends past the end of `genes`, if a gene is `>= n`, or
/// if `keep` holds the same column twice.
pub fn repair_permutation(genes: &mut [usize], keep: RangeInclusive<usize>) {
    let n = genes.len();
    if n == 0 {
        return;
    }
    assert!(
        *keep.end() < n,
        "repair window {keep:?} out of bounds for {n} genes"
    );

    let mut used = vec![false; n];
    for &g in &genes[keep.clone()] {
        assert!(g < n, "gene {g} out of range for {n} genes");
        assert!(!used[g], "repair window holds duplicate column {g}");
        used[g] = true;
    }

    let mut holes = Vec::new();
    for k in (0..n).filter(|k| !keep.contains(k)) {
        let g = genes[k];
        assert!(g < n, "gene {g} out of range for {n} genes");
        if used[g] {
            holes.push(k);
        } else {
            used[g] = true;
        }
    }

    let missing = (0..n).filter(|&v| !used[v]);
    for (k, v) in holes.into_iter().zip(missing) {
        genes[k] = v;
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
