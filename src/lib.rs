//! N-Queens solver built on a steady-state genetic algorithm.
//!
//! Given a board size `N`, the solver searches for a placement of `N`
//! non-attacking queens, returning either a zero-conflict board or its best
//! attempt after a bounded number of generations.
//!
//! - **Encoding**: permutation of column indices, one queen per row.
//! - **Fitness**: number of attacking queen pairs (0 = solved).
//! - **Selection**: k-way tournament, k = 2 by default.
//! - **Variation**: single swap mutation, or window crossover followed by
//!   per-gene adaptive mutation, with optional permutation repair.
//! - **Replacement**: per-slot elitist-with-drift rule; the population size
//!   never changes.
//! - **Parallelism**: optional rayon offspring generation over disjoint slot
//!   ranges with per-worker RNG streams (`parallel` feature).
//!
//! ```
//! use nqueens_ga::ga::{Solver, SolverConfig};
//!
//! let result = Solver::new(SolverConfig::new(8).with_seed(1)).unwrap().solve();
//! println!("{}", result.best.chromosome);
//! ```

pub mod ga;
pub mod rng;
