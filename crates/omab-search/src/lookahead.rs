use crate::*;
use omab_belief::BeliefState;
use omab_belief::Memo;
use omab_belief::StateId;
use omab_belief::StateSpace;
use omab_core::Arm;
use omab_core::Probability;
use omab_core::Utility;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::Beta;
use rand_distr::Distribution;
use std::time::Instant;

/// How the frontier of a lookahead tree is valued.
#[derive(Debug, Clone)]
pub enum Leaf {
    /// Expected best single-pull reward under the posterior, earned on every
    /// remaining (discounted) step.
    Optimistic,
    /// Sum over arms of a precomputed per-arm value times its reward,
    /// discounted once.
    Table(ValueTable),
}

/// Truncated backward induction.
///
/// Enumerates every belief within `min(lookahead, remaining)` pulls, values
/// the frontier with a [`Leaf`] estimate, and backs up to the current belief.
/// Arm probabilities are posterior means, or with constrained probabilities
/// the average of joint Beta samples whose arm means are non-increasing.
#[derive(Debug)]
pub struct Lookahead {
    config: Configuration,
    leaf: Leaf,
    rng: SmallRng,
    stats: Stats,
}

impl Lookahead {
    pub fn new(config: Configuration, leaf: Leaf) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            leaf,
            rng: SmallRng::from_os_rng(),
            stats: Stats::default(),
        })
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// `sum_{k=1..steps} discount^k`, or `steps` when undiscounted.
    pub fn discounted(&self, steps: usize) -> Utility {
        let d = self.config.discount;
        match d == 1. {
            true => steps as Utility,
            false => d * (1. - d.powi(steps as i32)) / (1. - d),
        }
    }

    /// `beta_sample_count` joint draws of every arm's success rate, keeping
    /// only non-increasing ones when constrained.
    fn samples(&mut self, state: &BeliefState) -> Result<Vec<Vec<Probability>>, SearchError> {
        let betas = state
            .actions()
            .map(|arm| Beta::new(state.alpha(arm) as f64, state.beta(arm) as f64))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SearchError::InvalidConfiguration(e.to_string()))?;
        let constrained = self.config.constrained_probabilities;
        let rng = &mut self.rng;
        Ok((0..self.config.beta_sample_count)
            .map(|_| betas.iter().map(|b| b.sample(rng)).collect::<Vec<_>>())
            .filter(|draw| !constrained || draw.windows(2).all(|w| w[0] >= w[1]))
            .collect())
    }
    fn probability(&mut self, state: &BeliefState, arm: Arm) -> Result<Probability, SearchError> {
        if !self.config.constrained_probabilities {
            return Ok(state.mean(arm));
        }
        let draws = self.samples(state)?;
        match draws.len() {
            0 => Ok(state.mean(arm)),
            n => Ok(draws.iter().map(|d| d[arm]).sum::<Probability>() / n as Probability),
        }
    }
    /// Estimated return of the `rest` pulls left after the frontier.
    fn leaf(&mut self, state: &BeliefState, rest: usize) -> Result<Utility, SearchError> {
        if rest == 0 {
            return Ok(0.);
        }
        let rewards = &self.config.rewards;
        if let Leaf::Table(table) = &self.leaf {
            let total = state
                .actions()
                .map(|arm| {
                    table
                        .value(state.level(), state.alpha(arm), state.beta(arm))
                        .map(|v| v * rewards[arm])
                })
                .sum::<Result<Utility, _>>()?;
            return Ok(total * self.config.discount);
        }
        let draws = self.samples(state)?;
        let means = state.actions().map(|arm| state.mean(arm)).collect::<Vec<_>>();
        let best = |p: &[Probability]| {
            state
                .actions()
                .map(|arm| p[arm] * self.config.rewards[arm])
                .fold(0., Utility::max)
        };
        let expected = match draws.len() {
            0 => best(&means),
            n => draws.iter().map(|d| best(d)).sum::<Utility>() / n as Utility,
        };
        Ok(expected * self.discounted(rest))
    }
    fn backup(
        &mut self,
        space: &StateSpace,
        id: StateId,
        values: &Memo<Utility>,
    ) -> Result<Decision, SearchError> {
        let state = space.state(id);
        let children = space.successors(id)?;
        let mut qs = Vec::with_capacity(children.len());
        for (arm, (win, loss)) in children.into_iter().enumerate() {
            let p = self.probability(state, arm)?;
            let success = values.get(win).copied().unwrap_or(0.);
            let failure = values.get(loss).copied().unwrap_or(0.);
            qs.push(q(p, self.config.rewards[arm], success, failure));
        }
        Ok(Decision::greedy(qs))
    }
}

impl Planner for Lookahead {
    fn name(&self) -> &'static str {
        match self.leaf {
            Leaf::Optimistic => "optimistic lookahead",
            Leaf::Table(_) => "value table lookahead",
        }
    }
    fn select(
        &mut self,
        state: &BeliefState,
        timestep: usize,
        checker: &mut dyn TerminationChecker,
    ) -> Result<Decision, SearchError> {
        let remaining = self.config.remaining(state, timestep)?;
        let depth = self.config.lookahead.clamp(1, remaining);
        let start = Instant::now();
        checker.init();
        let ref mut space = StateSpace::new(self.config.arms);
        let ref mut values = Memo::<Utility>::default();
        space.expand(state, depth);
        let top = state.level();
        let bottom = top + depth;
        for id in space.ids(bottom) {
            let value = self.leaf(space.state(id), remaining - depth)?;
            values.set(id, value);
        }
        for level in (top..bottom).rev() {
            for id in space.ids(level) {
                let decision = self.backup(space, id, values)?;
                values.set(id, decision.value);
            }
        }
        let root = space.lookup(top, state)?;
        let decision = self.backup(space, root, values)?;
        self.stats = Stats {
            trials: depth,
            states: space.len(),
            elapsed: start.elapsed(),
        };
        log::debug!("{:<32}{}", self.name(), self.stats);
        Ok(decision)
    }
    fn stats(&self) -> Stats {
        self.stats
    }
}
