//! Core type aliases and constants for Bayesian bandit planning.
//!
//! This crate provides the foundational types and tuning parameters
//! used throughout the omab workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Expected returns, rewards, regrets, and value bounds.
pub type Utility = f64;
/// Arm success rates, posterior means, and sampling weights.
pub type Probability = f64;
/// Index of a bandit arm, always in `[0, arms)`.
pub type Arm = usize;

// ============================================================================
// BELIEF MODEL
// ============================================================================
/// Beta prior successes for every arm (uniform prior).
pub const PRIOR_ALPHA: u32 = 1;
/// Beta prior failures for every arm (uniform prior).
pub const PRIOR_BETA: u32 = 1;

// ============================================================================
// EXPERIMENT DEFAULTS
// ============================================================================
/// Number of pulls in an episode.
pub const DEFAULT_HORIZON: usize = 100;
/// Depth of the lookahead tree before leaves are estimated.
pub const DEFAULT_LOOKAHEAD: usize = 4;
/// Joint Beta samples drawn per probability estimate.
pub const DEFAULT_BETA_SAMPLES: usize = 32;

// ============================================================================
// RTDP
// Greedy trials from the current belief with trailing Bellman backups.
// ============================================================================
/// Trials per decision.
pub const RTDP_TRIALS: usize = 10;

// ============================================================================
// BOUNDED RTDP
// Trials continue until U(s) - L(s) <= alpha at the decision state.
// ============================================================================
/// Convergence threshold (alpha) on the root bound gap.
pub const BRTDP_ALPHA: f64 = 0.01;
/// Trial termination ratio (T). A trial stops once the weighted successor gap
/// falls below (U(root) - L(root)) / T.
pub const BRTDP_TAU: f64 = 50.0;

// ============================================================================
// UCT
// UCB1 over arms at every tree node: q(a) + sqrt(c * ln N / n(a)).
// ============================================================================
/// Simulations per decision.
pub const UCT_SIMULATIONS: usize = 1000;
/// Exploration scale, multiplied by the remaining steps to the horizon.
pub const UCT_EXPLORATION: f64 = 2.0;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "logging")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
