//! Solver configuration.
//!
//! [`SolverConfig`] holds every numeric knob and policy switch of the
//! generation loop. The baseline engine and the crossover variant are the same
//! state machine with different [`Variation`] settings.

use thiserror::Error;

/// How a child is produced from its two selected parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variation {
    /// Clone parent 1 and apply exactly one swap mutation.
    #[default]
    Swap,

    /// Window crossover of parent 1 and parent 2, followed by adaptive
    /// per-gene mutation at [`SolverConfig::mutation_rate`].
    Crossover,
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be at least 1")]
    EmptyBoard,
    #[error("population size must be at least 1")]
    EmptyPopulation,
    #[error("tournament size must be at least 2, got {0}")]
    TournamentTooSmall(usize),
    #[error("mutation rate must be a percentage in 0..=100, got {0}")]
    MutationRateOutOfRange(u8),
    #[error("worker count must be at least 1")]
    NoWorkers,
}

/// Configuration for the N-Queens solver.
///
/// # Defaults
///
/// ```
/// use nqueens_ga::ga::{SolverConfig, Variation};
///
/// let config = SolverConfig::default();
/// assert_eq!(config.board_size, 8);
/// assert_eq!(config.elite_threshold, 3);
/// assert_eq!(config.tournament_size, 2);
/// assert_eq!(config.variation, Variation::Swap);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use nqueens_ga::ga::{SolverConfig, Variation};
///
/// let config = SolverConfig::new(12)
///     .with_population_size(150)
///     .with_variation(Variation::Crossover)
///     .with_strict_permutation(true)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Board size `N`: number of queens, rows and columns.
    pub board_size: usize,

    /// Number of individuals. Constant for the whole run.
    pub population_size: usize,

    /// Generation cap. 0 evaluates the initial population only.
    pub max_generations: usize,

    /// Fitness below which an improving child always replaces its parent.
    ///
    /// When both parent and child are at or above the threshold, an improving
    /// child is accepted only on a fair coin flip.
    pub elite_threshold: usize,

    /// Number of draws per tournament. 2 is the baseline.
    pub tournament_size: usize,

    /// Per-gene swap probability in percent, used by [`Variation::Crossover`].
    pub mutation_rate: u8,

    /// Child construction policy.
    pub variation: Variation,

    /// Repair crossover children back into permutations.
    ///
    /// Off by default; crossover children may then carry duplicate columns,
    /// which the fitness function penalizes.
    pub strict_permutation: bool,

    /// Generate offspring on a rayon thread pool.
    pub parallel: bool,

    /// Number of disjoint offspring partitions in parallel mode. Slots are
    /// split evenly; with fewer slots than workers, one partition per slot.
    pub workers: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from OS entropy; the seed actually used is reported
    /// in the result.
    pub seed: Option<u64>,

    /// Emit a progress log line every this many generations (0 = never).
    pub log_interval: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            population_size: 200,
            max_generations: 50_000,
            elite_threshold: 3,
            tournament_size: 2,
            mutation_rate: 10,
            variation: Variation::Swap,
            strict_permutation: false,
            parallel: false,
            workers: 8,
            seed: None,
            log_interval: 0,
        }
    }
}

impl SolverConfig {
    /// Default configuration for an `n`×`n` board.
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    /// Sets the board size.
    pub fn with_board_size(mut self, n: usize) -> Self {
        self.board_size = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the elite threshold.
    pub fn with_elite_threshold(mut self, threshold: usize) -> Self {
        self.elite_threshold = threshold;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the adaptive mutation rate in percent.
    pub fn with_mutation_rate(mut self, percent: u8) -> Self {
        self.mutation_rate = percent;
        self
    }

    /// Sets the child construction policy.
    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variation = variation;
        self
    }

    /// Enables or disables crossover repair.
    pub fn with_strict_permutation(mut self, strict: bool) -> Self {
        self.strict_permutation = strict;
        self
    }

    /// Enables or disables parallel offspring generation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the number of offspring partitions for parallel mode.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress log interval (0 disables).
    pub fn with_log_interval(mut self, generations: usize) -> Self {
        self.log_interval = generations;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.tournament_size < 2 {
            return Err(ConfigError::TournamentTooSmall(self.tournament_size));
        }
        if self.mutation_rate > 100 {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 50_000);
        assert_eq!(config.elite_threshold, 3);
        assert_eq!(config.tournament_size, 2);
        assert_eq!(config.mutation_rate, 10);
        assert_eq!(config.variation, Variation::Swap);
        assert!(!config.strict_permutation);
        assert!(!config.parallel);
        assert_eq!(config.workers, 8);
        assert!(config.seed.is_none());
        assert_eq!(config.log_interval, 0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SolverConfig::new(20)
            .with_population_size(64)
            .with_max_generations(1000)
            .with_elite_threshold(5)
            .with_tournament_size(4)
            .with_mutation_rate(25)
            .with_variation(Variation::Crossover)
            .with_strict_permutation(true)
            .with_parallel(true)
            .with_workers(4)
            .with_seed(7)
            .with_log_interval(100);

        assert_eq!(config.board_size, 20);
        assert_eq!(config.population_size, 64);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.elite_threshold, 5);
        assert_eq!(config.tournament_size, 4);
        assert_eq!(config.mutation_rate, 25);
        assert_eq!(config.variation, Variation::Crossover);
        assert!(config.strict_permutation);
        assert!(config.parallel);
        assert_eq!(config.workers, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_interval, 100);
        assert_eq!(config.with_board_size(5).board_size, 5);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SolverConfig::default().validate().is_ok());
        let single = SolverConfig::new(1).with_max_generations(0);
        assert!(single.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_board() {
        assert_eq!(
            SolverConfig::new(0).validate(),
            Err(ConfigError::EmptyBoard)
        );
    }

    #[test]
    fn test_validate_empty_population() {
        let config = SolverConfig::default().with_population_size(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));
    }

    #[test]
    fn test_validate_tournament_too_small() {
        let config = SolverConfig::default().with_tournament_size(1);
        assert_eq!(config.validate(), Err(ConfigError::TournamentTooSmall(1)));
    }

    #[test]
    fn test_validate_mutation_rate() {
        let config = SolverConfig::default().with_mutation_rate(101);
        assert_eq!(
            config.validate(),
            Err(ConfigError::MutationRateOutOfRange(101))
        );
        let full = SolverConfig::default().with_mutation_rate(100);
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_validate_no_workers() {
        let config = SolverConfig::default().with_workers(0);
        assert_eq!(config.validate(), Err(ConfigError::NoWorkers));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::TournamentTooSmall(1).to_string(),
            "tournament size must be at least 2, got 1"
        );
        assert_eq!(
            ConfigError::EmptyBoard.to_string(),
            "board size must be at least 1"
        );
    }
}
