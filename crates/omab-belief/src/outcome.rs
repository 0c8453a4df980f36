use crate::*;
use omab_core::Arm;
use omab_core::Probability;

/// Result of a single Bernoulli pull.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Both outcomes, success first.
    pub const fn all() -> [Self; 2] {
        [Self::Success, Self::Failure]
    }
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
    /// Probability of this outcome given the arm's success probability.
    pub fn likelihood(&self, success: Probability) -> Probability {
        match self {
            Self::Success => success,
            Self::Failure => 1. - success,
        }
    }
}

impl From<bool> for Outcome {
    fn from(success: bool) -> Self {
        if success { Self::Success } else { Self::Failure }
    }
}

/// A child belief annotated with the pull that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Successor {
    pub arm: Arm,
    pub outcome: Outcome,
    pub state: BeliefState,
}

impl Successor {
    /// Probability of reaching this child from `parent` under the posterior mean.
    pub fn probability(&self, parent: &BeliefState) -> Probability {
        self.outcome.likelihood(parent.mean(self.arm))
    }
}
