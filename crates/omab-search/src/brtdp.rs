use crate::*;
use omab_belief::BeliefState;
use omab_belief::Memo;
use omab_belief::StateId;
use omab_belief::StateSpace;
use omab_core::BRTDP_ALPHA;
use omab_core::BRTDP_TAU;
use omab_core::Probability;
use omab_core::Utility;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;
use std::time::Instant;

/// Admissible interval around the optimal utility of a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub upper: Utility,
    pub lower: Utility,
}

impl Bound {
    /// Width of the interval, never negative.
    pub fn gap(&self) -> Utility {
        (self.upper - self.lower).max(0.)
    }
}

/// Bounded RTDP.
///
/// Keeps an upper and a lower bound per visited state instead of one
/// estimate. A fresh state with `r` pulls left is bounded by
/// `[0, r * max_reward]`; a state on the end level by `[0, 0]`. Trials descend
/// by sampling one of the `2N` children in proportion to
/// `p(child) * gap(child)` and stop once that total falls below
/// `gap(root) / tau`. Both bounds are backed up on the way out and only ever
/// tighten. Planning stops when `gap(root) <= alpha`, or earlier if the
/// termination checker fires.
///
/// Acts greedily on the lower bound. Bounds persist across decisions of one
/// episode.
#[derive(Debug)]
pub struct Brtdp {
    config: Configuration,
    alpha: Utility,
    tau: Utility,
    space: StateSpace,
    bounds: Memo<Bound>,
    end: Option<usize>,
    rng: SmallRng,
    stats: Stats,
}

impl Brtdp {
    pub fn new(config: Configuration) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            space: StateSpace::new(config.arms),
            bounds: Memo::default(),
            alpha: BRTDP_ALPHA,
            tau: BRTDP_TAU,
            end: None,
            rng: SmallRng::from_os_rng(),
            stats: Stats::default(),
            config,
        })
    }
    /// Convergence threshold on the root gap.
    pub fn with_alpha(mut self, alpha: Utility) -> Self {
        assert!(alpha > 0., "alpha must be positive");
        self.alpha = alpha;
        self
    }
    /// Trial termination ratio.
    pub fn with_tau(mut self, tau: Utility) -> Self {
        assert!(tau > 0., "tau must be positive");
        self.tau = tau;
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Current bounds on `state`, if it has been visited.
    pub fn bounds(&self, state: &BeliefState) -> Option<Bound> {
        self.space.find(state).map(|id| self.bound(id))
    }

    /// Runs a single trial from `state` and returns its updated bounds.
    pub fn trial(&mut self, state: &BeliefState, timestep: usize) -> Result<Bound, SearchError> {
        let root = self.root(state, timestep)?;
        self.descend(root)?;
        Ok(self.bound(root))
    }

    fn root(&mut self, state: &BeliefState, timestep: usize) -> Result<StateId, SearchError> {
        let end = state.level() + self.config.remaining(state, timestep)?;
        if self.end != Some(end) {
            self.space.clear();
            self.bounds.clear();
            self.end = Some(end);
        }
        Ok(self.space.insert(state.clone()))
    }
    fn bound(&self, id: StateId) -> Bound {
        let end = self.end.unwrap_or(id.level());
        match id.level() >= end {
            true => Bound {
                upper: 0.,
                lower: 0.,
            },
            false => self.bounds.get(id).copied().unwrap_or(Bound {
                upper: (end - id.level()) as Utility * self.config.max_reward(),
                lower: 0.,
            }),
        }
    }
    fn descend(&mut self, root: StateId) -> Result<(), SearchError> {
        let end = self.end.unwrap_or(root.level());
        let threshold = self.bound(root).gap() / self.tau;
        let mut stack = Vec::with_capacity(end - root.level());
        let mut id = root;
        while id.level() < end {
            stack.push(id);
            let children = self
                .space
                .children(id)
                .into_iter()
                .flat_map(|(win, loss)| [win, loss])
                .collect::<Vec<_>>();
            let state = self.space.state(id);
            let weights = children
                .iter()
                .enumerate()
                .map(|(i, &child)| {
                    let p: Probability = match i % 2 {
                        0 => state.mean(i / 2),
                        _ => 1. - state.mean(i / 2),
                    };
                    p * self.bound(child).gap()
                })
                .collect::<Vec<_>>();
            if weights.iter().sum::<Utility>() < threshold {
                break;
            }
            let Ok(wheel) = WeightedIndex::new(&weights) else {
                break;
            };
            id = children[wheel.sample(&mut self.rng)];
        }
        while let Some(id) = stack.pop() {
            self.tighten(id)?;
        }
        Ok(())
    }
    fn tighten(&mut self, id: StateId) -> Result<(), SearchError> {
        let rewards = &self.config.rewards;
        let upper = bellman(&self.space, id, rewards, |c| self.bound(c).upper)?;
        let lower = bellman(&self.space, id, rewards, |c| self.bound(c).lower)?;
        let old = self.bound(id);
        let new = Bound {
            upper: old.upper.min(upper.value),
            lower: old.lower.max(lower.value),
        };
        self.bounds.set(id, new);
        Ok(())
    }
}

impl Planner for Brtdp {
    fn name(&self) -> &'static str {
        "bounded rtdp"
    }
    fn select(
        &mut self,
        state: &BeliefState,
        timestep: usize,
        checker: &mut dyn TerminationChecker,
    ) -> Result<Decision, SearchError> {
        let start = Instant::now();
        let root = self.root(state, timestep)?;
        let mut trials = 0;
        checker.init();
        loop {
            self.descend(root)?;
            trials += 1;
            if self.bound(root).gap() <= self.alpha {
                break;
            }
            if checker.reached() {
                log::warn!(
                    "{:<32}{:<32}",
                    "bounded rtdp stopped early",
                    format!("gap {:.4}", self.bound(root).gap())
                );
                break;
            }
        }
        let decision = bellman(&self.space, root, &self.config.rewards, |c| {
            self.bound(c).lower
        })?;
        self.stats = Stats {
            trials,
            states: self.space.len(),
            elapsed: start.elapsed(),
        };
        log::debug!("{:<32}{}", self.name(), self.stats);
        Ok(decision)
    }
    fn stats(&self) -> Stats {
        self.stats
    }
}
