use crate::*;
use omab_belief::BeliefState;
use omab_belief::Memo;
use omab_belief::Simulator;
use omab_belief::StateId;
use omab_belief::StateSpace;
use omab_belief::Transition;
use omab_core::RTDP_TRIALS;
use omab_core::Utility;
use std::time::Instant;

/// Real-time dynamic programming.
///
/// Each trial walks greedily from the decision state to the horizon, drawing
/// outcomes from the simulator and materializing states as it goes, then backs
/// up every visited state newest-first. Unvisited states are valued at the
/// optimistic `remaining * max_reward`, so values only ever fall toward the
/// optimum and effort concentrates where the greedy policy actually goes.
///
/// The state space and utilities persist across decisions of one episode.
#[derive(Debug)]
pub struct Rtdp<S>
where
    S: Simulator,
{
    config: Configuration,
    simulator: S,
    trials: usize,
    space: StateSpace,
    values: Memo<Utility>,
    end: Option<usize>,
    stats: Stats,
}

impl<S> Rtdp<S>
where
    S: Simulator,
{
    pub fn new(config: Configuration, simulator: S) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            space: StateSpace::new(config.arms),
            values: Memo::default(),
            trials: RTDP_TRIALS,
            end: None,
            stats: Stats::default(),
            simulator,
            config,
        })
    }
    /// Trials per decision, at least one.
    pub fn with_trials(mut self, trials: usize) -> Self {
        assert!(trials > 0, "at least one trial");
        self.trials = trials;
        self
    }

    /// Current estimate for `state`, if it has been visited.
    pub fn utility(&self, state: &BeliefState) -> Option<Utility> {
        self.space
            .find(state)
            .and_then(|id| self.values.get(id))
            .copied()
    }

    fn value(&self, id: StateId) -> Utility {
        let end = self.end.unwrap_or(id.level());
        match id.level() >= end {
            true => 0.,
            false => self
                .values
                .get(id)
                .copied()
                .unwrap_or((end - id.level()) as Utility * self.config.max_reward()),
        }
    }
    fn backup(&self, id: StateId) -> Result<Decision, SearchError> {
        bellman(&self.space, id, &self.config.rewards, |child| self.value(child))
    }
    fn trial(&mut self, root: StateId, end: usize) -> Result<(), SearchError> {
        let mut stack = Vec::with_capacity(end - root.level());
        let mut id = root;
        while id.level() < end {
            stack.push(id);
            self.space.children(id);
            let decision = self.backup(id)?;
            let Transition { state, .. } = self
                .simulator
                .transition(self.space.state(id), decision.arm)?;
            id = self.space.insert(state);
        }
        while let Some(id) = stack.pop() {
            let decision = self.backup(id)?;
            self.values.set(id, decision.value);
        }
        Ok(())
    }
}

impl<S> Planner for Rtdp<S>
where
    S: Simulator,
{
    fn name(&self) -> &'static str {
        "rtdp"
    }
    fn select(
        &mut self,
        state: &BeliefState,
        timestep: usize,
        checker: &mut dyn TerminationChecker,
    ) -> Result<Decision, SearchError> {
        let remaining = self.config.remaining(state, timestep)?;
        let end = state.level() + remaining;
        if self.end != Some(end) {
            self.space.clear();
            self.values.clear();
            self.end = Some(end);
        }
        let start = Instant::now();
        let root = self.space.insert(state.clone());
        let mut trials = 0;
        checker.init();
        loop {
            self.trial(root, end)?;
            trials += 1;
            if trials >= self.trials || checker.reached() {
                break;
            }
        }
        let decision = self.backup(root)?;
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
