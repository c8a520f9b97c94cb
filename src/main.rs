//! nqueens - solve the N-Queens problem with a steady-state genetic algorithm.

use clap::Parser;
use nqueens_ga::ga::{Solver, SolverConfig, Variation};
use std::process::ExitCode;

/// Search for N non-attacking queens on an N×N board
#[derive(Parser, Debug)]
#[command(name = "nqueens")]
#[command(version, about, long_about = None)]
struct Args {
    /// Board size N
    #[arg(short = 'n', long, default_value = "8")]
    size: usize,

    /// Number of individuals
    #[arg(short, long, default_value = "200")]
    population: usize,

    /// Generation cap
    #[arg(short, long, default_value = "50000")]
    generations: usize,

    /// Fitness below which improving children always replace their parent
    #[arg(long, default_value = "3")]
    elite_threshold: usize,

    /// Tournament size
    #[arg(short, long, default_value = "2")]
    tournament: usize,

    /// Per-gene mutation probability in percent (crossover mode)
    #[arg(short, long, default_value = "10")]
    mutation_rate: u8,

    /// Use window crossover plus adaptive mutation instead of a single swap
    #[arg(short, long)]
    crossover: bool,

    /// Repair crossover children into permutations
    #[arg(long)]
    strict: bool,

    /// Generate offspring in parallel
    #[arg(long)]
    parallel: bool,

    /// Offspring partitions in parallel mode
    #[arg(short, long, default_value = "8")]
    workers: usize,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log progress every this many generations (needs RUST_LOG=debug)
    #[arg(long, default_value = "0")]
    log_interval: usize,

    /// Do not print the board
    #[arg(long)]
    no_board: bool,
}

impl Args {
    fn to_config(&self) -> SolverConfig {
        let variation = if self.crossover {
            Variation::Crossover
        } else {
            Variation::Swap
        };
        let config = SolverConfig::new(self.size)
            .with_population_size(self.population)
            .with_max_generations(self.generations)
            .with_elite_threshold(self.elite_threshold)
            .with_tournament_size(self.tournament)
            .with_mutation_rate(self.mutation_rate)
            .with_variation(variation)
            .with_strict_permutation(self.strict)
            .with_parallel(self.parallel)
            .with_workers(self.workers)
            .with_log_interval(self.log_interval);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let solver = match Solver::new(args.to_config()) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    let result = solver.solve();

    println!("Time taken: {:.6} seconds.", result.elapsed.as_secs_f64());
    println!("Number of Iterations: {}", result.generations);
    println!(
        "Result: {} (best fitness {}, seed {})",
        result.termination,
        result.best_fitness(),
        result.seed
    );

    if !args.no_board {
        print!("{}", result.best.chromosome);
    }

    ExitCode::SUCCESS
}
