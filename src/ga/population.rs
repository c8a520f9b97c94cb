//! Steady-state population and its replacement policy.
//!
//! The population is created once and keeps its size for the whole run. Each
//! generation, slot `i` competes only with child `i`; see [`accepts`] for the
//! rule that decides whether the child takes the slot.

use super::chromosome::{BoardError, Chromosome};
use super::types::Individual;
use rand::Rng;

/// A chromosome paired with its cached fitness.
///
/// Deserializing (with the `serde` feature) goes through
/// [`Member::from_parts`], so a stored fitness that disagrees with the board
/// is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StoredMember"))]
pub struct Member {
    /// The board.
    pub chromosome: Chromosome,

    /// Cached conflict count of `chromosome`.
    pub fitness: usize,
}

impl Member {
    /// Evaluates `chromosome` and caches the result.
    pub fn new(chromosome: Chromosome) -> Self {
        let fitness = chromosome.fitness();
        Self {
            chromosome,
            fitness,
        }
    }

    /// Rebuilds a member from a board and a previously cached fitness.
    pub fn from_parts(chromosome: Chromosome, fitness: usize) -> Result<Self, BoardError> {
        let member = Self::new(chromosome);
        if member.fitness != fitness {
            return Err(BoardError::FitnessMismatch {
                stored: fitness,
                actual: member.fitness,
            });
        }
        Ok(member)
    }

    /// Returns `true` if this board has no attacking pair.
    pub fn is_solution(&self) -> bool {
        self.fitness == 0
    }
}

impl Individual for Member {
    fn fitness(&self) -> usize {
        self.fitness
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredMember {
    chromosome: Chromosome,
    fitness: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredMember> for Member {
    type Error = BoardError;

    fn try_from(stored: StoredMember) -> Result<Self, Self::Error> {
        Self::from_parts(stored.chromosome, stored.fitness)
    }
}

/// Replacement rule for one slot.
///
/// - If the parent or the child is elite (fitness below `elite_threshold`),
///   the child replaces the parent exactly when it is strictly better.
/// - Otherwise a fair coin is flipped first, and the child replaces the
///   parent only if the flip succeeds **and** it is strictly better.
///
/// The coin is consumed from `rng` on the non-elite path even when the child
/// is not an improvement, so draw order depends only on the fitness values.
pub fn accepts<R: Rng>(parent: usize, child: usize, elite_threshold: usize, rng: &mut R) -> bool {
    if parent < elite_threshold || child < elite_threshold {
        child < parent
    } else {
        let flip = rng.random_bool(0.5);
        flip && child < parent
    }
}

/// Fixed-size ordered collection of members.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Member>"))]
pub struct Population {
    members: Vec<Member>,
}

impl TryFrom<Vec<Member>> for Population {
    type Error = BoardError;

    fn try_from(members: Vec<Member>) -> Result<Self, Self::Error> {
        let expected = members
            .first()
            .ok_or(BoardError::EmptyPopulation)?
            .chromosome
            .len();
        if let Some(m) = members.iter().find(|m| m.chromosome.len() != expected) {
            return Err(BoardError::MixedBoardSizes {
                expected,
                found: m.chromosome.len(),
            });
        }
        Ok(Self { members })
    }
}

impl Population {
    /// Creates `count` independently shuffled boards of size `n`.
    ///
    /// # Panics
    /// Panics if `n` or `count` is zero.
    pub fn random<R: Rng>(n: usize, count: usize, rng: &mut R) -> Self {
        assert!(count > 0, "population must not be empty");
        let members = (0..count)
            .map(|_| Member::new(Chromosome::random(n, rng)))
            .collect();
        Self { members }
    }

    /// Wraps pre-built members.
    ///
    /// # Panics
    /// Panics if `members` is empty or the boards have different sizes. Use
    /// [`Population::try_from`] to get the error instead.
    pub fn from_members(members: Vec<Member>) -> Self {
        Self::try_from(members).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never `true` for a constructed population.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Board size shared by all members.
    pub fn board_size(&self) -> usize {
        self.members[0].chromosome.len()
    }

    /// Members in slot order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Consumes the population and returns its members.
    pub fn into_members(self) -> Vec<Member> {
        self.members
    }

    /// The member with the lowest fitness; the earliest slot wins ties.
    pub fn best(&self) -> &Member {
        let mut best = &self.members[0];
        for m in &self.members[1..] {
            if m.fitness < best.fitness {
                best = m;
            }
        }
        best
    }

    /// Returns `true` if any member is a solution.
    pub fn has_solution(&self) -> bool {
        self.members.iter().any(Member::is_solution)
    }

    /// Offers `offspring[i]` to slot `i` for every slot, using [`accepts`].
    ///
    /// Returns the number of slots that took their child.
    ///
    /// # Panics
    /// Panics if `offspring.len()` differs from the population size.
    pub fn replace<R: Rng>(
        &mut self,
        offspring: Vec<Member>,
        elite_threshold: usize,
        rng: &mut R,
    ) -> usize {
        assert_eq!(
            offspring.len(),
            self.members.len(),
            "offspring count must match population size"
        );

        let mut replaced = 0;
        for (slot, child) in self.members.iter_mut().zip(offspring) {
            if accepts(slot.fitness, child.fitness, elite_threshold, rng) {
                *slot = child;
                replaced += 1;
            }
        }
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::chromosome::is_permutation;
    use crate::rng::create_rng;

    fn member(genes: &[usize]) -> Member {
        Member::new(Chromosome::new(genes.to_vec()))
    }

    #[test]
    fn test_random_population_shape() {
        let mut rng = create_rng(42);
        let pop = Population::random(8, 50, &mut rng);
        assert_eq!(pop.len(), 50);
        assert_eq!(pop.board_size(), 8);
        for m in pop.members() {
            assert!(is_permutation(m.chromosome.genes()));
            assert_eq!(m.fitness, m.chromosome.fitness());
        }
    }

    #[test]
    fn test_random_population_is_not_aliased() {
        let mut rng = create_rng(42);
        let pop = Population::random(10, 20, &mut rng);
        let distinct: std::collections::HashSet<_> = pop
            .members()
            .iter()
            .map(|m| m.chromosome.genes().to_vec())
            .collect();
        assert!(distinct.len() > 1, "all members identical");
    }

    #[test]
    fn test_best_prefers_earliest_on_tie() {
        let pop = Population::from_members(vec![
            member(&[0, 1, 2, 3]), // 6
            member(&[1, 3, 0, 2]), // 0
            member(&[2, 0, 3, 1]), // 0
        ]);
        assert_eq!(pop.best().chromosome.genes(), &[1, 3, 0, 2]);
        assert!(pop.has_solution());
    }

    #[test]
    fn test_has_solution_false() {
        let pop = Population::from_members(vec![member(&[0, 1, 2, 3]), member(&[3, 2, 1, 0])]);
        assert!(!pop.has_solution());
    }

    #[test]
    #[should_panic(expected = "population must not be empty")]
    fn test_empty_population_panics() {
        Population::from_members(Vec::new());
    }

    #[test]
    #[should_panic(expected = "all chromosomes must have board size")]
    fn test_mixed_board_sizes_panic() {
        Population::from_members(vec![member(&[0]), member(&[1, 0])]);
    }

    #[test]
    fn test_try_from_rejects_bad_members() {
        assert_eq!(
            Population::try_from(Vec::new()),
            Err(BoardError::EmptyPopulation)
        );
        assert_eq!(
            Population::try_from(vec![member(&[1, 0]), member(&[0, 1, 2])]),
            Err(BoardError::MixedBoardSizes {
                expected: 2,
                found: 3
            })
        );
        let pop = Population::try_from(vec![member(&[1, 3, 0, 2])]).unwrap();
        assert_eq!(pop.board_size(), 4);
    }

    #[test]
    fn test_from_parts_checks_cached_fitness() {
        let board = Chromosome::new(vec![0, 1, 2, 3]);
        let m = Member::from_parts(board.clone(), 6).unwrap();
        assert_eq!(m, Member::new(board.clone()));
        assert_eq!(
            Member::from_parts(board, 0),
            Err(BoardError::FitnessMismatch {
                stored: 0,
                actual: 6
            })
        );
    }

    // ---- Replacement rule ----

    #[test]
    fn test_elite_path_always_accepts_improvement() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert!(accepts(2, 1, 3, &mut rng));
        }
    }

    #[test]
    fn test_elite_child_always_accepted() {
        // Parent is non-elite but the child crosses the threshold.
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert!(accepts(7, 2, 3, &mut rng));
        }
    }

    #[test]
    fn test_elite_path_never_accepts_non_improvement() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert!(!accepts(2, 2, 3, &mut rng));
            assert!(!accepts(1, 4, 3, &mut rng));
        }
    }

    #[test]
    fn test_elite_path_consumes_no_randomness() {
        let mut rng = create_rng(42);
        let mut reference = create_rng(42);
        accepts(2, 1, 3, &mut rng);
        assert_eq!(rng.random::<u64>(), reference.random::<u64>());
    }

    #[test]
    fn test_non_elite_path_accepts_about_half() {
        let mut rng = create_rng(42);
        let trials = 10_000;
        let accepted = (0..trials).filter(|_| accepts(10, 5, 3, &mut rng)).count();
        let ratio = accepted as f64 / trials as f64;
        assert!(
            (0.45..0.55).contains(&ratio),
            "expected ~50% acceptance, got {ratio}"
        );
    }

    #[test]
    fn test_non_elite_path_never_accepts_worse() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            assert!(!accepts(5, 10, 3, &mut rng));
            assert!(!accepts(5, 5, 3, &mut rng));
        }
    }

    #[test]
    fn test_zero_threshold_disables_elite_path() {
        let mut rng = create_rng(42);
        let accepted = (0..10_000).filter(|_| accepts(1, 0, 0, &mut rng)).count();
        assert!(accepted > 4500 && accepted < 5500, "accepted = {accepted}");
    }

    #[test]
    fn test_replace_keeps_size_and_counts() {
        let mut rng = create_rng(42);
        let mut pop = Population::from_members(vec![
            member(&[0, 1, 2, 3]), // 6
            member(&[0, 2, 1, 3]), // 2
        ]);
        let parent_fitness: Vec<usize> = pop.members().iter().map(|m| m.fitness).collect();
        let offspring = vec![member(&[1, 3, 0, 2]), member(&[0, 1, 2, 3])];

        let replaced = pop.replace(offspring, 3, &mut rng);

        assert_eq!(pop.len(), 2);
        // Child 0 is a solution (elite path) and must win slot 0.
        assert!(pop.members()[0].is_solution());
        // Child 1 is the identity (6 conflicts), never an improvement.
        assert_eq!(pop.members()[1].fitness, parent_fitness[1]);
        assert_eq!(replaced, 1);
    }

    #[test]
    #[should_panic(expected = "offspring count must match population size")]
    fn test_replace_size_mismatch_panics() {
        let mut rng = create_rng(42);
        let mut pop = Population::from_members(vec![member(&[0, 1])]);
        pop.replace(Vec::new(), 3, &mut rng);
    }
}
