//! Permutation-encoded board and its conflict count.
//!
//! A [`Chromosome`] of length `n` places one queen per row: `genes[i]` is the
//! column of the queen in row `i`. When `genes` is a permutation of `0..n`,
//! rows and columns are collision-free by construction and only diagonal
//! attacks remain.

use rand::Rng;
use std::fmt;
use thiserror::Error;

/// Rejected board data, from [`Chromosome::try_from`] and the checked
/// constructors of members and populations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("chromosome must not be empty")]
    EmptyChromosome,

    #[error("gene out of range for board size {size}: {gene}")]
    GeneOutOfRange { gene: usize, size: usize },

    #[error("stored fitness {stored} does not match conflict count {actual}")]
    FitnessMismatch { stored: usize, actual: usize },

    #[error("population must not be empty")]
    EmptyPopulation,

    #[error("all chromosomes must have board size {expected}, found {found}")]
    MixedBoardSizes { expected: usize, found: usize },
}

/// One candidate board.
///
/// With the `serde` feature it serializes as a plain gene list and is
/// validated like [`Chromosome::new`] on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl TryFrom<Vec<usize>> for Chromosome {
    type Error = BoardError;

    fn try_from(genes: Vec<usize>) -> Result<Self, Self::Error> {
        let size = genes.len();
        if size == 0 {
            return Err(BoardError::EmptyChromosome);
        }
        if let Some(&gene) = genes.iter().find(|&&g| g >= size) {
            return Err(BoardError::GeneOutOfRange { gene, size });
        }
        Ok(Self { genes })
    }
}

impl From<Chromosome> for Vec<usize> {
    fn from(chromosome: Chromosome) -> Self {
        chromosome.genes
    }
}

impl Chromosome {
    /// Wraps a gene vector.
    ///
    /// # Panics
    /// Panics if `genes` is empty or any gene is not a valid column
    /// (`>= genes.len()`). Use [`Chromosome::try_from`] to get the error
    /// instead.
    pub fn new(genes: Vec<usize>) -> Self {
        Self::try_from(genes).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The identity arrangement `[0, 1, .., n-1]` (every queen on the main diagonal).
    pub fn identity(n: usize) -> Self {
        Self::new((0..n).collect())
    }

    /// Creates a uniformly shuffled permutation of `0..n`.
    ///
    /// Each call starts from a fresh identity buffer, so no two chromosomes
    /// share backing storage.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut genes: Vec<usize> = (0..n).collect();
        super::operators::shuffle(&mut genes, rng);
        Self::new(genes)
    }

    /// Board size `n`.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Never `true` for a constructed chromosome.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Column per row.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Number of attacking queen pairs. See [`conflicts`].
    pub fn fitness(&self) -> usize {
        conflicts(&self.genes)
    }

    /// Returns `true` if the genes are a permutation of `0..len`.
    pub fn is_permutation(&self) -> bool {
        is_permutation(&self.genes)
    }
}

impl fmt::Display for Chromosome {
    /// Renders the board as `n` lines, `Q` where the queen sits and `•` elsewhere.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.genes.len();
        for &col in &self.genes {
            for j in 0..n {
                f.write_str(if col == j { "Q " } else { "• " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Counts attacking queen pairs.
///
/// For every pair of rows `i < j` the pair conflicts if the queens share a
/// column or a diagonal (`|genes[i] - genes[j]| == j - i`). On a permutation
/// the column clause never fires.
///
/// Evaluates in place with no allocation; O(n²).
///
/// ```
/// use nqueens_ga::ga::conflicts;
///
/// assert_eq!(conflicts(&[1, 3, 0, 2]), 0);
/// assert_eq!(conflicts(&[0, 1, 2, 3]), 6);
/// ```
pub fn conflicts(genes: &[usize]) -> usize {
    let mut count = 0;
    for (i, &gi) in genes.iter().enumerate() {
        for (offset, &gj) in genes[i + 1..].iter().enumerate() {
            let d = gi.abs_diff(gj);
            if d == 0 || d == offset + 1 {
                count += 1;
            }
        }
    }
    count
}

/// Returns `true` if `genes` contains every value of `0..genes.len()` exactly once.
pub fn is_permutation(genes: &[usize]) -> bool {
    let n = genes.len();
    let mut seen = vec![false; n];
    for &g in genes {
        if g >= n || seen[g] {
            return false;
        }
        seen[g] = true;
    }
    true
}
