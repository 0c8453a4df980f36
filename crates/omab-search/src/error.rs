use omab_belief::BeliefError;

/// Errors surfaced by planner entry points.
///
/// Running out of trials or time is not an error: planners return the best
/// decision found so far.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Structural failure in the belief model or the state space.
    Belief(BeliefError),
    /// Parameters outside their documented ranges.
    InvalidConfiguration(String),
    /// A value table has no entry for this key.
    MissingValue { level: usize, alpha: u32, beta: u32 },
    /// Asked to act with no pulls left.
    HorizonReached { timestep: usize, horizon: usize },
}

impl From<BeliefError> for SearchError {
    fn from(e: BeliefError) -> Self {
        Self::Belief(e)
    }
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Belief(e) => write!(f, "{}", e),
            Self::InvalidConfiguration(reason) => write!(f, "invalid configuration: {}", reason),
            Self::MissingValue { level, alpha, beta } => {
                write!(f, "missing value for level {} alpha {} beta {}", level, alpha, beta)
            }
            Self::HorizonReached { timestep, horizon } => {
                write!(f, "timestep {} is past horizon {}", timestep, horizon)
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Belief(e) => Some(e),
            _ => None,
        }
    }
}
