use crate::*;
use omab_belief::StateId;
use omab_belief::StateSpace;
use omab_core::Probability;
use omab_core::Utility;

/// One-step expected return of a pull that succeeds with probability `p`:
/// `p * (reward + success) + (1 - p) * failure`.
pub fn q(p: Probability, reward: Utility, success: Utility, failure: Utility) -> Utility {
    p * (reward + success) + (1. - p) * failure
}

/// Greedy Bellman backup of `id` against the canonical children on the next
/// level, valued by `value`. Success probabilities are posterior means.
///
/// Fails if any child was never materialized.
pub fn bellman<F>(
    space: &StateSpace,
    id: StateId,
    rewards: &[Utility],
    value: F,
) -> Result<Decision, SearchError>
where
    F: Fn(StateId) -> Utility,
{
    let state = space.state(id);
    let values = space
        .successors(id)?
        .into_iter()
        .enumerate()
        .map(|(arm, (win, loss))| q(state.mean(arm), rewards[arm], value(win), value(loss)))
        .collect::<Vec<_>>();
    Ok(Decision::greedy(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use omab_belief::BeliefState;

    #[test]
    fn terminal_children_leave_immediate_reward() {
        let mut space = StateSpace::new(2);
        let root = space.insert(BeliefState::new(vec![3, 1], vec![1, 1]));
        space.children(root);
        let d = bellman(&space, root, &[1., 1.], |_| 0.).unwrap();
        assert_eq!(d, Decision { arm: 0, value: 0.75 });
    }

    #[test]
    fn reward_scales_success_branch_only() {
        assert_eq!(q(0.25, 4., 2., 8.), 0.25 * 6. + 0.75 * 8.);
    }

    #[test]
    fn missing_children_abort() {
        let mut space = StateSpace::new(1);
        let root = space.insert(BeliefState::prior(1));
        assert!(matches!(
            bellman(&space, root, &[1.], |_| 0.),
            Err(SearchError::Belief(_))
        ));
    }
}
