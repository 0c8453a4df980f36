//! Belief-state model for the Bernoulli bandit.
//!
//! An agent's knowledge about N arms is a vector of Beta posteriors. Pulling
//! an arm moves the belief to one of two children (success or failure), so the
//! reachable beliefs form a layered DAG indexed by the number of pulls taken.
//!
//! # Module Structure
//!
//! - `belief`: [`BeliefState`], the immutable per-arm (alpha, beta) record
//! - `outcome`: [`Outcome`] and [`Successor`], the two children of a pull
//! - `simulator`: the [`Simulator`] capability and the generative variant
//! - `world`: [`BanditWorld`], the fixed-probability variant
//! - `space`: [`StateSpace`], the canonical per-level arena, and [`StateId`]
//! - `memo`: [`Memo`], per-state side stores for planner data
//! - `compositions`: enumeration of all ways to spread pulls over counts
//! - `error`: structural errors shared by every planner

mod belief;
mod compositions;
mod error;
mod memo;
mod outcome;
mod simulator;
mod space;
mod world;

pub use belief::*;
pub use compositions::*;
pub use error::*;
pub use memo::*;
pub use outcome::*;
pub use simulator::*;
pub use space::*;
pub use world::*;
