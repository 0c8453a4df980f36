//! Belief-state planning for the finite-horizon Bayesian Bernoulli bandit.
//!
//! This facade crate re-exports every omab crate.
//!
//! ## Crate Organization
//!
//! - [`core`]: type aliases, planner constants, logging setup
//! - [`belief`]: belief states, simulators, the canonical state space
//! - [`search`]: value iteration, RTDP, bounded RTDP, UCT, lookahead

pub use omab_belief as belief;
pub use omab_core   as core;
pub use omab_search as search;

// Re-export commonly used types at the root
pub use omab_core::*;
