//! Canonical, level-indexed arena of belief states.
//!
//! Every belief reachable within a bounded number of pulls lives here exactly
//! once. Planners refer to states through copyable [`StateId`] handles and
//! keep their own per-state data in [`Memo`] side stores, so one logical
//! belief always maps to one utility (or bound, or tree node) no matter how
//! many pull sequences lead to it.
//!
//! # Lifecycle
//!
//! - Exact solvers populate whole levels top-down with [`StateSpace::expand`]
//!   and then back them up bottom-up.
//! - Online planners materialize only what they visit, via
//!   [`StateSpace::insert`] and [`StateSpace::children`].
use crate::*;
use std::collections::HashMap;

/// Handle to a canonical state: its level and its position within the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId {
    level: usize,
    index: usize,
}

impl StateId {
    /// Pulls taken since the prior.
    pub fn level(&self) -> usize {
        self.level
    }
    /// Position within the level, in insertion order.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One level of the arena: dense storage plus reverse lookup.
#[derive(Debug, Clone, Default)]
struct Layer {
    states: Vec<BeliefState>,
    lookup: HashMap<BeliefState, usize>,
}

/// Per-level canonical map from belief to its unique instance.
///
/// Not shared across threads: each planner instance owns its space.
#[derive(Debug, Clone)]
pub struct StateSpace {
    arms: usize,
    layers: Vec<Layer>,
}

impl StateSpace {
    /// Empty space over beliefs with `arms` arms.
    pub fn new(arms: usize) -> Self {
        assert!(arms > 0, "at least one arm");
        Self {
            arms,
            layers: Vec::new(),
        }
    }

    /// Arm count shared by every stored belief.
    pub fn arms(&self) -> usize {
        self.arms
    }
    /// Number of levels with storage allocated.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
    /// Total number of canonical states.
    pub fn len(&self) -> usize {
        self.layers.iter().map(|l| l.states.len()).sum()
    }
    /// True when no state has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Drops every state. Handles issued so far become invalid.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Canonicalizes `state`: returns the existing handle if this belief is
    /// already known, otherwise stores it and returns the new handle.
    pub fn insert(&mut self, state: BeliefState) -> StateId {
        assert!(state.arms() == self.arms, "belief over a different arm count");
        let level = state.level();
        if self.layers.len() <= level {
            self.layers.resize_with(level + 1, Layer::default);
        }
        let layer = &mut self.layers[level];
        if let Some(&index) = layer.lookup.get(&state) {
            return StateId { level, index };
        }
        let index = layer.states.len();
        layer.lookup.insert(state.clone(), index);
        layer.states.push(state);
        StateId { level, index }
    }
    /// Handle of `state` if it has been materialized.
    pub fn find(&self, state: &BeliefState) -> Option<StateId> {
        let level = state.level();
        self.layers
            .get(level)
            .and_then(|layer| layer.lookup.get(state))
            .map(|&index| StateId { level, index })
    }
    /// Handle of `state` on `level`. A miss is a bookkeeping error, never
    /// silently defaulted.
    pub fn lookup(&self, level: usize, state: &BeliefState) -> Result<StateId, BeliefError> {
        self.find(state)
            .filter(|id| id.level() == level)
            .ok_or_else(|| BeliefError::StateNotGenerated {
                level,
                state: state.clone(),
            })
    }
    /// The canonical belief behind `id`.
    pub fn state(&self, id: StateId) -> &BeliefState {
        &self.layers[id.level].states[id.index]
    }
    /// All canonical states on `level`, in insertion order.
    pub fn states(&self, level: usize) -> &[BeliefState] {
        self.layers
            .get(level)
            .map(|layer| layer.states.as_slice())
            .unwrap_or_default()
    }
    /// Handles of all canonical states on `level`, in insertion order.
    pub fn ids(&self, level: usize) -> impl Iterator<Item = StateId> + use<> {
        let n = self.states(level).len();
        (0..n).map(move |index| StateId { level, index })
    }

    /// Materializes every belief exactly `depth` pulls below `root` by
    /// spreading the pulls over the 2N alpha/beta slots.
    pub fn generate(&mut self, root: &BeliefState, depth: usize) -> Vec<StateId> {
        Compositions::new(depth as u32, 2 * self.arms)
            .map(|slots| {
                let alphas = root
                    .actions()
                    .map(|arm| root.alpha(arm) + slots[2 * arm])
                    .collect();
                let betas = root
                    .actions()
                    .map(|arm| root.beta(arm) + slots[2 * arm + 1])
                    .collect();
                BeliefState::new(alphas, betas)
            })
            .map(|state| self.insert(state))
            .collect()
    }
    /// Materializes every belief within `depth` pulls of `root` (inclusive).
    /// Returns the number of states now on those levels.
    pub fn expand(&mut self, root: &BeliefState, depth: usize) -> usize {
        let total = (0..=depth)
            .map(|d| {
                self.generate(root, d);
                self.states(root.level() + d).len()
            })
            .sum();
        log::trace!("{:<32}{:<32}", format!("expanded {} below {}", depth, root), total);
        total
    }
    /// Materializes the one-pull children of `id`; for every arm in index
    /// order, the (success, failure) handles.
    pub fn children(&mut self, id: StateId) -> Vec<(StateId, StateId)> {
        let state = self.state(id).clone();
        state
            .successors()
            .map(|(success, failure)| (self.insert(success.state), self.insert(failure.state)))
            .collect()
    }
    /// Like [`children`](Self::children) but without materializing: every
    /// child must already be on the next level.
    pub fn successors(&self, id: StateId) -> Result<Vec<(StateId, StateId)>, BeliefError> {
        let next = id.level() + 1;
        self.state(id)
            .successors()
            .map(|(success, failure)| -> Result<_, BeliefError> {
                Ok((
                    self.lookup(next, &success.state)?,
                    self.lookup(next, &failure.state)?,
                ))
            })
            .collect()
    }
}
