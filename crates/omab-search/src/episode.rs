use crate::*;
use omab_belief::BanditWorld;
use omab_belief::Simulator;
use omab_belief::Transition;
use omab_core::Arm;
use omab_core::Utility;
use serde::Serialize;

/// One horizon-long run of a planner against a fixed-probability world.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Episode {
    /// Arm pulled at every step.
    pub arms: Vec<Arm>,
    /// Reward observed at every step.
    pub rewards: Vec<Utility>,
    /// Cumulative regret against the best fixed arm after every step.
    pub regrets: Vec<Utility>,
}

impl Episode {
    /// Plays `config.horizon` pulls from the prior. The planner sees only the
    /// belief; the world decides outcomes.
    pub fn play<P>(
        planner: &mut P,
        world: &mut BanditWorld,
        config: &Configuration,
        checker: &mut dyn TerminationChecker,
    ) -> Result<Self, SearchError>
    where
        P: Planner + ?Sized,
    {
        config.validate()?;
        if world.probabilities().len() != config.arms {
            return Err(SearchError::InvalidConfiguration(format!(
                "world has {} arms, configured for {}",
                world.probabilities().len(),
                config.arms
            )));
        }
        let best = world.best();
        let mut episode = Self::default();
        let mut regret = 0.;
        let mut state = config.prior();
        for timestep in 0..config.horizon {
            let decision = planner.select(&state, timestep, checker)?;
            let Transition { state: next, reward } = world.transition(&state, decision.arm)?;
            regret += best - reward;
            log::debug!(
                "{:<32}{:<32}",
                format!("{} step {}", planner.name(), timestep),
                format!("arm {} reward {:.2} regret {:.2}", decision.arm, reward, regret)
            );
            episode.arms.push(decision.arm);
            episode.rewards.push(reward);
            episode.regrets.push(regret);
            state = next;
        }
        log::info!(
            "{:<32}{:<32}",
            planner.name(),
            format!("reward {:.2} regret {:.2}", episode.total(), episode.regret())
        );
        Ok(episode)
    }

    /// Sum of realized rewards.
    pub fn total(&self) -> Utility {
        self.rewards.iter().sum()
    }
    /// Final cumulative regret.
    pub fn regret(&self) -> Utility {
        self.regrets.last().copied().unwrap_or(0.)
    }
}
