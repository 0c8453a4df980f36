//! Planners for the finite-horizon Bayesian Bernoulli bandit.
//!
//! Every planner answers the same question (which arm to pull from this
//! belief, with this many pulls left) and is interchangeable behind the
//! [`Planner`] trait.
//!
//! # Module Structure
//!
//! - `config`: [`Configuration`], the validated parameter record
//! - `termination`: [`TerminationChecker`] budgets checked between trials
//! - `planner`: the [`Planner`] trait and the [`Decision`] it returns
//! - `bellman`: the shared one-step backup
//! - `iteration`: exact backward induction ([`ValueIteration`], [`Policy`])
//! - `rtdp`: greedy trials with trailing backups ([`Rtdp`])
//! - `brtdp`: trials over upper and lower bounds ([`Brtdp`])
//! - `uct`: Monte-Carlo tree search with UCB1 ([`Uct`])
//! - `lookahead`: truncated backward induction with estimated leaves
//! - `table`: precomputed per-arm value tables
//! - `episode`: one horizon-long run against a fixed world

mod bellman;
mod brtdp;
mod config;
mod episode;
mod error;
mod iteration;
mod lookahead;
mod metrics;
mod planner;
mod policy;
mod rtdp;
mod table;
mod termination;
mod uct;

#[cfg(test)]
mod tests;

pub use bellman::*;
pub use brtdp::*;
pub use config::*;
pub use episode::*;
pub use error::*;
pub use iteration::*;
pub use lookahead::*;
pub use metrics::*;
pub use planner::*;
pub use policy::*;
pub use rtdp::*;
pub use table::*;
pub use termination::*;
pub use uct::*;
