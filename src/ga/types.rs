//! Shared types for the N-Queens GA.
//!
//! [`Individual`] is the seam between selection and whatever carries a cached
//! fitness; [`Termination`] is the terminal state of a run.

/// Anything with a cached conflict count.
///
/// Lower fitness is better (minimization); 0 is a solved board.
pub trait Individual {
    /// Returns the cached number of conflicting queen pairs.
    fn fitness(&self) -> usize;
}

impl Individual for usize {
    fn fitness(&self) -> usize {
        *self
    }
}

/// Why the generation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Some member of the population reached fitness 0.
    Converged,

    /// The generation cap was reached without a solution.
    Exhausted,
}

impl Termination {
    /// Returns `true` if a solution was found.
    pub fn is_converged(self) -> bool {
        self == Termination::Converged
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Converged => f.write_str("converged"),
            Termination::Exhausted => f.write_str("exhausted"),
        }
    }
}
