use crate::*;
use crate::simulator::payout;
use omab_core::Arm;
use omab_core::Probability;
use omab_core::Utility;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Ground-truth environment with fixed, externally supplied arm probabilities.
///
/// The belief still advances by Bayes' rule, but success is drawn from the
/// true probability rather than the posterior, so realized rewards measure
/// how well a policy actually does.
#[derive(Debug, Clone)]
pub struct BanditWorld {
    probabilities: Vec<Probability>,
    rewards: Vec<Utility>,
    rng: SmallRng,
}

impl BanditWorld {
    /// Panics unless every probability lies in [0, 1] and each arm has a reward.
    pub fn new(probabilities: Vec<Probability>, rewards: Vec<Utility>) -> Self {
        Self::from_rng(probabilities, rewards, SmallRng::from_os_rng())
    }
    /// Deterministic variant for reproducible runs.
    pub fn with_seed(probabilities: Vec<Probability>, rewards: Vec<Utility>, seed: u64) -> Self {
        Self::from_rng(probabilities, rewards, SmallRng::seed_from_u64(seed))
    }
    fn from_rng(probabilities: Vec<Probability>, rewards: Vec<Utility>, rng: SmallRng) -> Self {
        assert!(probabilities.len() == rewards.len(), "one reward per arm");
        assert!(
            probabilities.iter().all(|p| (0. ..=1.).contains(p)),
            "probabilities within [0, 1]"
        );
        Self {
            probabilities,
            rewards,
            rng,
        }
    }

    pub fn probabilities(&self) -> &[Probability] {
        &self.probabilities
    }
    pub fn rewards(&self) -> &[Utility] {
        &self.rewards
    }
    /// Expected reward of a single pull of `arm`.
    pub fn expected(&self, arm: Arm) -> Utility {
        self.probabilities[arm] * self.rewards[arm]
    }
    /// Expected reward of the best fixed arm, the regret baseline.
    pub fn best(&self) -> Utility {
        (0..self.probabilities.len())
            .map(|arm| self.expected(arm))
            .fold(Utility::NEG_INFINITY, Utility::max)
    }
}

impl Simulator for BanditWorld {
    fn transition(&mut self, state: &BeliefState, arm: Arm) -> Result<Transition, BeliefError> {
        state.check(arm)?;
        let reward = payout(&self.rewards, arm)?;
        let success = self.rng.random_bool(self.probabilities[arm]);
        Ok(Transition {
            state: state.next(arm, Outcome::from(success))?,
            reward: if success { reward } else { 0. },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certain_arms_are_deterministic() {
        let ref mut world = BanditWorld::with_seed(vec![1., 0.], vec![2., 5.], 3);
        let state = BeliefState::prior(2);
        let win = world.transition(&state, 0).unwrap();
        let loss = world.transition(&state, 1).unwrap();
        assert_eq!(win.reward, 2.);
        assert_eq!(win.state, BeliefState::new(vec![2, 1], vec![1, 1]));
        assert_eq!(loss.reward, 0.);
        assert_eq!(loss.state, BeliefState::new(vec![1, 1], vec![1, 2]));
    }

    #[test]
    fn best_weighs_probability_by_reward() {
        let world = BanditWorld::with_seed(vec![0.8, 0.3], vec![1., 3.], 0);
        assert!((world.best() - 0.9).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "probabilities within [0, 1]")]
    fn rejects_impossible_probability() {
        BanditWorld::new(vec![1.5], vec![1.]);
    }
}
