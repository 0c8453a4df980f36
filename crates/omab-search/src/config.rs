use crate::*;
use omab_belief::BeliefState;
use omab_core::DEFAULT_BETA_SAMPLES;
use omab_core::DEFAULT_HORIZON;
use omab_core::DEFAULT_LOOKAHEAD;
use omab_core::Utility;
use serde::Deserialize;
use serde::Serialize;

/// Read-only parameters shared by every planner.
///
/// Missing fields deserialize to their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Number of arms, at least one.
    pub arms: usize,
    /// Reward paid by each arm on success.
    pub rewards: Vec<Utility>,
    /// Number of pulls in an episode.
    pub horizon: usize,
    /// Per-step discount in `(0, 1]`, applied at lookahead leaves.
    pub discount: f64,
    /// Depth of the lookahead tree, at most the horizon.
    pub lookahead: usize,
    /// Joint Beta samples per probability estimate.
    pub beta_sample_count: usize,
    /// Keep only sampled probabilities that are non-increasing by arm index.
    pub constrained_probabilities: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            arms: 2,
            rewards: vec![1.; 2],
            horizon: DEFAULT_HORIZON,
            discount: 1.,
            lookahead: DEFAULT_LOOKAHEAD,
            beta_sample_count: DEFAULT_BETA_SAMPLES,
            constrained_probabilities: false,
        }
    }
}

impl Configuration {
    /// One arm per reward, defaults elsewhere, lookahead capped at the horizon.
    pub fn new(rewards: Vec<Utility>, horizon: usize) -> Self {
        Self {
            arms: rewards.len(),
            rewards,
            horizon,
            lookahead: DEFAULT_LOOKAHEAD.min(horizon),
            ..Self::default()
        }
    }
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }
    pub fn with_constraints(mut self, samples: usize) -> Self {
        self.constrained_probabilities = true;
        self.beta_sample_count = samples;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        let invalid = |reason: String| Err(SearchError::InvalidConfiguration(reason));
        if self.arms == 0 {
            return invalid("at least one arm".to_string());
        }
        if self.rewards.len() != self.arms {
            return invalid(format!("{} rewards for {} arms", self.rewards.len(), self.arms));
        }
        if let Some(r) = self.rewards.iter().find(|r| !r.is_finite() || **r < 0.) {
            return invalid(format!("reward {} is not a finite non-negative number", r));
        }
        if self.lookahead > self.horizon {
            return invalid(format!("lookahead {} beyond horizon {}", self.lookahead, self.horizon));
        }
        if self.beta_sample_count == 0 {
            return invalid("at least one beta sample".to_string());
        }
        if !(self.discount > 0. && self.discount <= 1.) {
            return invalid(format!("discount {} outside (0, 1]", self.discount));
        }
        Ok(())
    }

    /// The uninformed prior over this configuration's arms.
    pub fn prior(&self) -> BeliefState {
        BeliefState::prior(self.arms)
    }
    /// Largest single-pull reward.
    pub fn max_reward(&self) -> Utility {
        self.rewards.iter().copied().fold(0., Utility::max)
    }
    /// Pulls left when acting from `state` at `timestep`.
    pub fn remaining(&self, state: &BeliefState, timestep: usize) -> Result<usize, SearchError> {
        if state.arms() != self.arms {
            return Err(SearchError::InvalidConfiguration(format!(
                "belief over {} arms, configured for {}",
                state.arms(),
                self.arms
            )));
        }
        match timestep < self.horizon {
            true => Ok(self.horizon - timestep),
            false => Err(SearchError::HorizonReached {
                timestep,
                horizon: self.horizon,
            }),
        }
    }
}
