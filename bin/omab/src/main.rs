//! Bandit Episode Binary
//!
//! Plays one episode of one planner against a fixed-probability world and
//! prints it as JSON.
//!
//! Usage: omab <exact|rtdp|brtdp|uct|lookahead> [--config file.json]
//! [--world p1,p2,..] [--budget ms], with `lookahead --table file.csv`.
use clap::Parser;
use clap::Subcommand;
use omab_belief::BanditSimulator;
use omab_belief::BanditWorld;
use omab_search::*;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    mode: Mode,
    /// JSON configuration; defaults to two unit-reward arms over 20 pulls
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// True success probability of every arm, comma separated
    #[arg(long, global = true, value_delimiter = ',', value_parser = probability)]
    world: Vec<f64>,
    /// Time budget per decision in milliseconds
    #[arg(long, global = true, default_value_t = 100)]
    budget: u64,
}

/// Planner selection
#[derive(Subcommand)]
enum Mode {
    #[command(about = "Exact value iteration over the whole horizon", alias = "vi")]
    Exact,
    #[command(about = "Real-time dynamic programming")]
    Rtdp,
    #[command(about = "Bounded real-time dynamic programming")]
    Brtdp,
    #[command(about = "Monte Carlo tree search with UCB1")]
    Uct,
    #[command(about = "Truncated backward induction", alias = "la")]
    Lookahead {
        /// CSV value table for the frontier; optimistic leaves otherwise
        #[arg(long)]
        table: Option<PathBuf>,
    },
}

impl Mode {
    fn planner(&self, config: &Configuration) -> anyhow::Result<Box<dyn Planner>> {
        let simulator = || BanditSimulator::new(config.rewards.clone());
        let planner: Box<dyn Planner> = match self {
            Self::Exact => Box::new(ValueIteration::new(config.clone())?),
            Self::Rtdp => Box::new(Rtdp::new(config.clone(), simulator())?),
            Self::Brtdp => Box::new(Brtdp::new(config.clone())?),
            Self::Uct => Box::new(Uct::new(config.clone(), simulator())?),
            Self::Lookahead { table: Some(path) } => {
                let table = std::fs::read_to_string(path)?.parse::<ValueTable>()?;
                Box::new(Lookahead::new(config.clone(), Leaf::Table(table))?)
            }
            Self::Lookahead { table: None } => {
                Box::new(Lookahead::new(config.clone(), Leaf::Optimistic)?)
            }
        };
        Ok(planner)
    }
}

impl Args {
    fn configuration(&self) -> anyhow::Result<Configuration> {
        let config: Configuration = match &self.config {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => Configuration::new(vec![1.; 2], 20),
        };
        config.validate()?;
        Ok(config)
    }

    /// Arm probabilities from `--world`, or evenly spaced in (0, 1).
    fn probabilities(&self, arms: usize) -> anyhow::Result<Vec<f64>> {
        match self.world.len() {
            0 => Ok((1..=arms).map(|a| a as f64 / (arms + 1) as f64).collect()),
            n if n == arms => Ok(self.world.clone()),
            n => anyhow::bail!("expected {} probabilities, got {}", arms, n),
        }
    }
}

fn probability(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(p) if (0. ..=1.).contains(&p) => Ok(p),
        Ok(p) => Err(format!("{} is not in [0, 1]", p)),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    omab_core::log();
    let config = args.configuration()?;
    let probabilities = args.probabilities(config.arms)?;
    let ref mut world = BanditWorld::new(probabilities, config.rewards.clone());
    let ref mut checker = TimeTermination::new(Duration::from_millis(args.budget));
    let mut planner = args.mode.planner(&config)?;
    let episode = Episode::play(planner.as_mut(), world, &config, checker)?;
    log::info!("{:<32}{}", "last decision", planner.stats());
    println!("{}", serde_json::to_string(&episode)?);
    Ok(())
}
