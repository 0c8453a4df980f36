use crate::*;
use omab_core::Arm;

/// Structural errors raised by the belief model and the state space.
///
/// Both variants are programming-contract violations. They abort the
/// current solve or trial and are never replaced by a default utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeliefError {
    /// An arm index outside `[0, arms)`.
    InvalidAction { arm: Arm, arms: usize },
    /// A state was looked up on a level the space never populated with it.
    /// Usually an off-by-one in level arithmetic.
    StateNotGenerated { level: usize, state: BeliefState },
}

impl std::fmt::Display for BeliefError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAction { arm, arms } => {
                write!(f, "invalid action: arm {} of {}", arm, arms)
            }
            Self::StateNotGenerated { level, state } => {
                write!(f, "state not generated: {} on level {}", state, level)
            }
        }
    }
}

impl std::error::Error for BeliefError {}
