use std::time::Duration;

/// Effort spent on one planning call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    /// Trials, simulations, or levels backed up.
    pub trials: usize,
    /// Canonical states materialized.
    pub states: usize,
    pub elapsed: Duration,
}

impl Stats {
    pub fn format(&self) -> String {
        let rate = self.trials as f64 / self.elapsed.as_secs_f64().max(1e-6);
        format!(
            "{:<20}{:<20}{:<20}{:<20}",
            format!("trials {}", self.trials),
            format!("states {}", self.states),
            format!("ms {}", self.elapsed.as_millis()),
            format!("T/sec {:.1}", rate),
        )
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}
