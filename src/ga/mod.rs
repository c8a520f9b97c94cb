//! Steady-state genetic algorithm for N-Queens.
//!
//! Candidate boards are permutations of column indices, one queen per row, so
//! row and column clashes are impossible by construction and the search only
//! has to remove diagonal attacks.
//!
//! # Key Types
//!
//! - [`Chromosome`]: one board, with [`conflicts`] as its fitness
//! - [`Population`]: fixed-size collection of evaluated [`Member`]s and the
//!   elitist-with-drift replacement rule ([`accepts`])
//! - [`SolverConfig`]: board size, population size, generation cap and policy knobs
//! - [`Solver`]: runs the generation loop and returns a [`SolveResult`]
//!
//! # Submodules
//!
//! - [`operators`]: shuffle, swap/adaptive mutation, window crossover and repair
//! - [`selection`]: k-way tournament selection
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Syswerda (1991), "A Study of Reproduction in Generational and Steady-State
//!   Genetic Algorithms"

mod chromosome;
mod config;
pub mod operators;
mod population;
mod runner;
pub mod selection;
mod types;

pub use chromosome::{conflicts, is_permutation, BoardError, Chromosome};
pub use config::{ConfigError, SolverConfig, Variation};
pub use population::{accepts, Member, Population};
pub use runner::{SolveResult, Solver};
pub use types::{Individual, Termination};
