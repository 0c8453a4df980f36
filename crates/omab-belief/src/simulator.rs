use crate::*;
use omab_core::Arm;
use omab_core::Utility;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// The belief and reward observed after one pull.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: BeliefState,
    pub reward: Utility,
}

/// The only channel through which planners observe the environment.
///
/// Planners depend on this capability, never on which variant is behind it:
///
/// - [`BanditSimulator`] samples from the belief's own posterior mean, for
///   rollouts that must not know the ground truth
/// - [`BanditWorld`] samples from fixed arm probabilities, for measuring
///   realized reward and regret
pub trait Simulator {
    /// Pull `arm` from `state`. Fails on an arm outside `[0, arms)`.
    fn transition(&mut self, state: &BeliefState, arm: Arm) -> Result<Transition, BeliefError>;
}

/// Generative model: an arm succeeds with its posterior mean probability.
#[derive(Debug, Clone)]
pub struct BanditSimulator {
    rewards: Vec<Utility>,
    rng: SmallRng,
}

impl BanditSimulator {
    pub fn new(rewards: Vec<Utility>) -> Self {
        Self {
            rewards,
            rng: SmallRng::from_os_rng(),
        }
    }
    /// Deterministic variant for reproducible runs.
    pub fn with_seed(rewards: Vec<Utility>, seed: u64) -> Self {
        Self {
            rewards,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
    pub fn rewards(&self) -> &[Utility] {
        &self.rewards
    }
}

impl Simulator for BanditSimulator {
    fn transition(&mut self, state: &BeliefState, arm: Arm) -> Result<Transition, BeliefError> {
        state.check(arm)?;
        let reward = payout(&self.rewards, arm)?;
        let success = self.rng.random_bool(state.mean(arm));
        Ok(Transition {
            state: state.next(arm, Outcome::from(success))?,
            reward: if success { reward } else { 0. },
        })
    }
}

/// Reward paid by `arm` on success.
pub(crate) fn payout(rewards: &[Utility], arm: Arm) -> Result<Utility, BeliefError> {
    rewards
        .get(arm)
        .copied()
        .ok_or(BeliefError::InvalidAction {
            arm,
            arms: rewards.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_moves_one_level_down() {
        let ref mut simulator = BanditSimulator::with_seed(vec![1., 1.], 7);
        let state = BeliefState::prior(2);
        for arm in state.actions() {
            let Transition { state: next, reward } = simulator.transition(&state, arm).unwrap();
            assert_eq!(next.level(), 1);
            assert_eq!(next.sum(arm), state.sum(arm) + 1);
            match next.alpha(arm) > state.alpha(arm) {
                true => assert_eq!(reward, 1.),
                false => assert_eq!(reward, 0.),
            }
        }
    }

    #[test]
    fn transition_rejects_unknown_arm() {
        let ref mut simulator = BanditSimulator::with_seed(vec![1., 1.], 7);
        let state = BeliefState::prior(2);
        assert_eq!(
            simulator.transition(&state, 3),
            Err(BeliefError::InvalidAction { arm: 3, arms: 2 })
        );
    }

    #[test]
    fn success_rate_tracks_posterior_mean() {
        let ref mut simulator = BanditSimulator::with_seed(vec![1.], 11);
        let state = BeliefState::new(vec![9], vec![1]);
        let n = 20_000;
        let wins = (0..n)
            .map(|_| simulator.transition(&state, 0).unwrap().reward)
            .sum::<Utility>();
        assert!((wins / n as Utility - 0.9).abs() < 0.02);
    }
}
