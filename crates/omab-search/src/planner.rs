use crate::*;
use omab_belief::BeliefState;
use omab_core::Arm;
use omab_core::Utility;

/// The arm to pull and the Q-value that justified it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub arm: Arm,
    pub value: Utility,
}

impl Decision {
    /// Argmax over per-arm values. Ties go to the lowest arm.
    pub fn greedy(values: impl IntoIterator<Item = Utility>) -> Self {
        values.into_iter().enumerate().fold(
            Self {
                arm: 0,
                value: Utility::NEG_INFINITY,
            },
            |best, (arm, value)| match value > best.value {
                true => Self { arm, value },
                false => best,
            },
        )
    }
}

/// Anything that picks an arm for a belief with a known number of pulls left.
///
/// `timestep` counts pulls already taken in the episode; the planner plans
/// for `horizon - timestep` more. Structural errors abort the call. A budget
/// running out does not: the incumbent decision is returned.
pub trait Planner {
    fn name(&self) -> &'static str;
    fn select(
        &mut self,
        state: &BeliefState,
        timestep: usize,
        checker: &mut dyn TerminationChecker,
    ) -> Result<Decision, SearchError>;
    /// Statistics of the most recent `select`.
    fn stats(&self) -> Stats {
        Stats::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_prefers_first_of_ties() {
        assert_eq!(Decision::greedy([0.5, 0.7, 0.7]).arm, 1);
        assert_eq!(Decision::greedy([1., 1.]).arm, 0);
        assert_eq!(Decision::greedy([0.2]).value, 0.2);
    }

    #[test]
    fn greedy_skips_unvisited() {
        let d = Decision::greedy([Utility::NEG_INFINITY, 0.1, Utility::NEG_INFINITY]);
        assert_eq!(d, Decision { arm: 1, value: 0.1 });
    }
}
