use crate::*;
use omab_belief::BeliefState;
use omab_core::Arm;
use omab_core::Utility;
use std::collections::HashMap;

/// Exact decisions for every non-terminal state below a root, as produced
/// by [`ValueIteration::solve`].
#[derive(Debug, Clone)]
pub struct Policy {
    root: BeliefState,
    decisions: HashMap<BeliefState, Decision>,
    end: usize,
    generated: usize,
}

impl Policy {
    pub(crate) fn new(
        root: BeliefState,
        decisions: HashMap<BeliefState, Decision>,
        end: usize,
        generated: usize,
    ) -> Self {
        Self {
            root,
            decisions,
            end,
            generated,
        }
    }

    /// Belief the policy was solved from.
    pub fn root(&self) -> &BeliefState {
        &self.root
    }

    /// Level at which the episode ends and utilities are zero.
    pub fn end(&self) -> usize {
        self.end
    }
    /// Number of states with a decision.
    pub fn len(&self) -> usize {
        self.decisions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
    /// Number of states enumerated while solving, terminal ones included.
    pub fn generated(&self) -> usize {
        self.generated
    }
    pub fn decision(&self, state: &BeliefState) -> Option<Decision> {
        self.decisions.get(state).copied()
    }
    pub fn action(&self, state: &BeliefState) -> Option<Arm> {
        self.decision(state).map(|d| d.arm)
    }
    /// Optimal expected return from `state`; zero on the end level.
    /// `None` for beliefs the solve never enumerated.
    pub fn utility(&self, state: &BeliefState) -> Option<Utility> {
        match state.level() == self.end {
            true => self.covers(state).then_some(0.),
            false => self.decision(state).map(|d| d.value),
        }
    }
    /// True when `state` is reachable from the root, i.e. no count is below
    /// the root's.
    fn covers(&self, state: &BeliefState) -> bool {
        state.arms() == self.root.arms()
            && state.actions().all(|arm| {
                state.alpha(arm) >= self.root.alpha(arm) && state.beta(arm) >= self.root.beta(arm)
            })
    }
    pub fn iter(&self) -> impl Iterator<Item = (&BeliefState, &Decision)> {
        self.decisions.iter()
    }
}
