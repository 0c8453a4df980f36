use crate::*;
use omab_belief::BeliefState;
use omab_belief::Memo;
use omab_belief::StateSpace;
use omab_core::Utility;
use std::collections::HashMap;
use std::time::Instant;

/// Exact backward induction over every belief within the horizon.
///
/// Enumerates all levels top-down, then backs up from the last decision level
/// to the root. Each canonical state gets exactly one utility, read by its
/// parents through the state space rather than from a fresh child instance.
/// State count grows as `C(d + 2N - 1, 2N - 1)` per level, so this is the
/// ground truth for small horizons only.
#[derive(Debug, Clone)]
pub struct ValueIteration {
    config: Configuration,
    policy: Option<Policy>,
    stats: Stats,
}

impl ValueIteration {
    pub fn new(config: Configuration) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            policy: None,
            stats: Stats::default(),
        })
    }

    /// Optimal policy for `horizon` pulls from the prior.
    pub fn solve(&self, horizon: usize) -> Result<Policy, SearchError> {
        self.solve_from(&self.config.prior(), horizon)
    }

    /// Optimal policy for `depth` pulls from an arbitrary belief.
    pub fn solve_from(&self, root: &BeliefState, depth: usize) -> Result<Policy, SearchError> {
        let ref mut space = StateSpace::new(self.config.arms);
        let generated = space.expand(root, depth);
        let mut values = Memo::<Utility>::default();
        let mut decisions = HashMap::new();
        let top = root.level();
        let end = top + depth;
        for level in (top..end).rev() {
            for id in space.ids(level) {
                let decision = bellman(space, id, &self.config.rewards, |child| {
                    values.get(child).copied().unwrap_or(0.)
                })?;
                values.set(id, decision.value);
                decisions.insert(space.state(id).clone(), decision);
            }
        }
        log::debug!("{:<32}{:<32}", "value iteration states", generated);
        Ok(Policy::new(root.clone(), decisions, end, generated))
    }
}

impl Planner for ValueIteration {
    fn name(&self) -> &'static str {
        "value iteration"
    }
    fn select(
        &mut self,
        state: &BeliefState,
        timestep: usize,
        checker: &mut dyn TerminationChecker,
    ) -> Result<Decision, SearchError> {
        let remaining = self.config.remaining(state, timestep)?;
        let end = state.level() + remaining;
        checker.init();
        let cached = self
            .policy
            .as_ref()
            .filter(|p| p.end() == end)
            .and_then(|p| p.decision(state));
        if let Some(decision) = cached {
            return Ok(decision);
        }
        let start = Instant::now();
        let policy = self.solve_from(state, remaining)?;
        let decision = policy.decision(state).ok_or_else(|| {
            SearchError::Belief(omab_belief::BeliefError::StateNotGenerated {
                level: state.level(),
                state: state.clone(),
            })
        })?;
        self.stats = Stats {
            trials: remaining,
            states: policy.generated(),
            elapsed: start.elapsed(),
        };
        log::debug!("{:<32}{}", self.name(), self.stats);
        self.policy = Some(policy);
        Ok(decision)
    }
    fn stats(&self) -> Stats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omab_belief::Outcome;

    #[test]
    fn single_pull_is_worth_the_posterior_mean() {
        let solver = ValueIteration::new(Configuration::new(vec![1.], 1)).unwrap();
        let policy = solver.solve(1).unwrap();
        let prior = BeliefState::prior(1);
        assert_eq!(policy.utility(&prior), Some(prior.mean(0)));
        assert_eq!(policy.utility(&prior), Some(0.5));
    }

    #[test]
    fn one_arm_value_is_sum_of_predictive_means() {
        let solver = ValueIteration::new(Configuration::new(vec![1.], 4)).unwrap();
        let value = solver.solve(4).unwrap().utility(&BeliefState::prior(1)).unwrap();
        assert!((value - 2.).abs() < 1e-12);
    }

    #[test]
    fn two_pulls_exploit_a_success() {
        let solver = ValueIteration::new(Configuration::new(vec![1., 1.], 2)).unwrap();
        let policy = solver.solve(2).unwrap();
        let prior = BeliefState::prior(2);
        let value = policy.utility(&prior).unwrap();
        assert!((value - (0.5 + 0.5 * 2. / 3. + 0.5 * 0.5)).abs() < 1e-12);
        let won = prior.next(0, Outcome::Success).unwrap();
        let lost = prior.next(0, Outcome::Failure).unwrap();
        assert_eq!(policy.action(&prior), Some(0));
        assert_eq!(policy.action(&won), Some(0));
        assert_eq!(policy.action(&lost), Some(1));
    }

    #[test]
    fn rewards_shift_the_choice() {
        let solver = ValueIteration::new(Configuration::new(vec![1., 3.], 1)).unwrap();
        let policy = solver.solve(1).unwrap();
        assert_eq!(
            policy.decision(&BeliefState::prior(2)),
            Some(Decision { arm: 1, value: 1.5 })
        );
    }

    #[test]
    fn select_reuses_the_solved_policy() {
        let ref mut solver = ValueIteration::new(Configuration::new(vec![1., 1.], 3)).unwrap();
        let ref mut checker = FakeTermination;
        let prior = BeliefState::prior(2);
        let first = solver.select(&prior, 0, checker).unwrap();
        let next = prior.next(first.arm, Outcome::Failure).unwrap();
        let second = solver.select(&next, 1, checker).unwrap();
        let policy = solver.solve(3).unwrap();
        assert_eq!(Some(second), policy.decision(&next));
        assert!(solver.select(&next, 3, checker).is_err());
    }
}
