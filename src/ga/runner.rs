//! Generation loop.
//!
//! [`Solver`] drives the steady-state loop:
//! initialize → (offspring pass → replacement pass → solution check) → repeat,
//! until a member reaches fitness 0 or the generation cap is hit.
//!
//! The offspring pass reads an immutable snapshot of the population; every
//! child is built from that snapshot only. In parallel mode the pass is split
//! into disjoint slot ranges, one per worker, each with its own RNG stream
//! forked from the driver RNG, so a seeded run gives the same result whatever
//! the thread scheduling.

use super::chromosome::Chromosome;
use super::config::{ConfigError, SolverConfig, Variation};
use super::operators::{adaptive_mutation, repair_permutation, swap_mutation, window_crossover};
use super::population::{Member, Population};
use super::selection::tournament;
use super::types::Termination;
use crate::rng::create_rng;
use log::{debug, info, trace, warn};
use rand::Rng;
use std::ops::Range;
use std::time::{Duration, Instant};

/// Final state of a run, handed to reporting code.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    /// The population after the last generation.
    pub population: Population,

    /// Lowest-fitness member of `population` (earliest slot on ties).
    pub best: Member,

    /// Number of generations executed.
    pub generations: usize,

    /// Why the loop stopped.
    pub termination: Termination,

    /// Seed of the driver RNG.
    pub seed: u64,

    /// Wall-clock time spent in the generation loop, starting after the
    /// initial population is built.
    pub elapsed: Duration,

    /// Best fitness before the first generation and after each generation.
    ///
    /// Always `generations + 1` entries, non-increasing.
    pub fitness_history: Vec<usize>,
}

impl SolveResult {
    /// Best fitness reached.
    pub fn best_fitness(&self) -> usize {
        self.best.fitness
    }

    /// Returns `true` if a zero-conflict board was found.
    pub fn is_solved(&self) -> bool {
        self.termination.is_converged()
    }
}

/// Steady-state GA for the N-Queens problem.
///
/// # Usage
///
/// ```
/// use nqueens_ga::ga::{Solver, SolverConfig};
///
/// let solver = Solver::new(SolverConfig::new(6).with_seed(42)).unwrap();
/// let result = solver.solve();
/// assert!(result.is_solved());
/// assert_eq!(result.best.fitness, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver after validating `config`.
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs the generation loop to convergence or exhaustion.
    pub fn solve(&self) -> SolveResult {
        let config = &self.config;
        let seed = config.seed.unwrap_or_else(rand::random);
        if config.parallel && !cfg!(feature = "parallel") {
            warn!(
                "parallel offspring generation requested but the `parallel` feature is \
                 disabled; running sequentially"
            );
        }
        info!(
            "solving {}-queens: population {}, cap {}, {:?}, tournament {}, seed {}",
            config.board_size,
            config.population_size,
            config.max_generations,
            config.variation,
            config.tournament_size,
            seed
        );

        let mut rng = create_rng(seed);
        let mut population =
            Population::random(config.board_size, config.population_size, &mut rng);
        let start = Instant::now();

        let mut fitness_history = Vec::with_capacity(config.max_generations.min(1 << 16) + 1);
        fitness_history.push(population.best().fitness);

        let mut generations = 0;
        while generations < config.max_generations && !population.has_solution() {
            self.next_generation(&mut population, &mut rng);
            generations += 1;

            let best = population.best().fitness;
            fitness_history.push(best);
            if config.log_interval > 0 && generations % config.log_interval == 0 {
                debug!("generation {generations}: best fitness {best}");
            }
        }

        let termination = if population.has_solution() {
            Termination::Converged
        } else {
            Termination::Exhausted
        };
        let elapsed = start.elapsed();
        let best = population.best().clone();
        info!(
            "{termination} after {generations} generations in {:.3}s, best fitness {}",
            elapsed.as_secs_f64(),
            best.fitness
        );

        SolveResult {
            population,
            best,
            generations,
            termination,
            seed,
            elapsed,
            fitness_history,
        }
    }

    /// Advances `population` by one generation.
    ///
    /// Returns the number of slots whose child was accepted.
    ///
    /// # Panics
    /// Panics if the population's board size differs from the configured one.
    pub fn next_generation<R: Rng>(&self, population: &mut Population, rng: &mut R) -> usize {
        assert_eq!(
            population.board_size(),
            self.config.board_size,
            "population board size does not match configuration"
        );

        let offspring = if self.config.parallel {
            self.offspring_parallel(population.members(), rng)
        } else {
            self.offspring_sequential(population.members(), rng)
        };
        let replaced = population.replace(offspring, self.config.elite_threshold, rng);
        trace!("{replaced}/{} slots replaced", population.len());
        replaced
    }

    fn offspring_sequential<R: Rng>(&self, parents: &[Member], rng: &mut R) -> Vec<Member> {
        (0..parents.len()).map(|_| self.breed(parents, rng)).collect()
    }

    #[cfg(feature = "parallel")]
    fn offspring_parallel<R: Rng>(&self, parents: &[Member], rng: &mut R) -> Vec<Member> {
        use rayon::prelude::*;

        let slots = partition(parents.len(), self.config.workers);
        let seeds = crate::rng::fork_seeds(rng, slots.len());

        let partitions: Vec<Vec<Member>> = slots
            .into_par_iter()
            .zip(seeds)
            .map(|(range, seed)| {
                let mut local = create_rng(seed);
                range.map(|_| self.breed(parents, &mut local)).collect()
            })
            .collect();

        partitions.into_iter().flatten().collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn offspring_parallel<R: Rng>(&self, parents: &[Member], rng: &mut R) -> Vec<Member> {
        self.offspring_sequential(parents, rng)
    }

    /// Builds and evaluates one child from the snapshot `parents`.
    fn breed<R: Rng>(&self, parents: &[Member], rng: &mut R) -> Member {
        let k = self.config.tournament_size;
        // Both parents are always drawn; `Swap` ignores the second.
        let first = &parents[tournament(parents, k, rng)].chromosome;
        let second = &parents[tournament(parents, k, rng)].chromosome;

        let genes = match self.config.variation {
            Variation::Swap => {
                let mut genes = first.genes().to_vec();
                swap_mutation(&mut genes, rng);
                genes
            }
            Variation::Crossover => {
                let (mut genes, window) = window_crossover(first.genes(), second.genes(), rng);
                if self.config.strict_permutation {
                    repair_permutation(&mut genes, window);
                }
                adaptive_mutation(&mut genes, self.config.mutation_rate, rng);
                genes
            }
        };

        Member::new(Chromosome::new(genes))
    }
}

/// Splits `0..count` into `min(workers, count)` contiguous, non-empty ranges
/// whose lengths differ by at most one. The first `count % parts` ranges get
/// the extra slot.
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
fn partition(count: usize, workers: usize) -> Vec<Range<usize>> {
    let parts = workers.min(count);
    if parts == 0 {
        return Vec::new();
    }
    let base = count / parts;
    let extra = count % parts;
    let mut start = 0;
    (0..parts)
        .map(|w| {
            let len = base + usize::from(w < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
