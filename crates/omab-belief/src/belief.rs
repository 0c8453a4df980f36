use crate::*;
use omab_core::Arm;
use omab_core::PRIOR_ALPHA;
use omab_core::PRIOR_BETA;
use omab_core::Probability;

/// Posterior belief over the success rates of N Bernoulli arms.
///
/// Arm `i` is believed to succeed with probability `Beta(alphas[i], betas[i])`.
/// The record is immutable: pulling an arm produces a new state, and two
/// states with the same counts are the same belief. Anything cached about a
/// belief (utilities, bounds, tree statistics) lives in a side store keyed by
/// the state, never on the state itself.
///
/// # Invariants
///
/// - `alphas.len() == betas.len() >= 1`
/// - every count is at least the prior (1)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BeliefState {
    alphas: Box<[u32]>,
    betas: Box<[u32]>,
}

impl BeliefState {
    /// Builds a belief from explicit counts. Panics on malformed counts.
    pub fn new(alphas: Vec<u32>, betas: Vec<u32>) -> Self {
        assert!(!alphas.is_empty(), "at least one arm");
        assert!(alphas.len() == betas.len(), "alphas and betas per arm");
        assert!(alphas.iter().all(|&a| a >= PRIOR_ALPHA), "alpha below prior");
        assert!(betas.iter().all(|&b| b >= PRIOR_BETA), "beta below prior");
        Self {
            alphas: alphas.into_boxed_slice(),
            betas: betas.into_boxed_slice(),
        }
    }
    /// The uninformed prior over `arms` arms.
    pub fn prior(arms: usize) -> Self {
        Self::new(vec![PRIOR_ALPHA; arms], vec![PRIOR_BETA; arms])
    }

    /// Number of arms.
    pub fn arms(&self) -> usize {
        self.alphas.len()
    }
    /// Every valid arm index.
    pub fn actions(&self) -> std::ops::Range<Arm> {
        0..self.arms()
    }
    /// Success counts, one per arm.
    pub fn alphas(&self) -> &[u32] {
        &self.alphas
    }
    /// Failure counts, one per arm.
    pub fn betas(&self) -> &[u32] {
        &self.betas
    }
    /// Success count of an arm.
    pub fn alpha(&self, arm: Arm) -> u32 {
        self.alphas[arm]
    }
    /// Failure count of an arm.
    pub fn beta(&self, arm: Arm) -> u32 {
        self.betas[arm]
    }
    /// Posterior mean success rate of an arm. Always in (0, 1).
    pub fn mean(&self, arm: Arm) -> Probability {
        self.alphas[arm] as Probability / self.sum(arm) as Probability
    }
    /// alpha + beta of an arm.
    pub fn sum(&self, arm: Arm) -> u32 {
        self.alphas[arm] + self.betas[arm]
    }
    /// Number of pulls taken since the prior.
    pub fn level(&self) -> usize {
        let prior = (PRIOR_ALPHA + PRIOR_BETA) as usize * self.arms();
        let total = self
            .actions()
            .map(|arm| self.sum(arm) as usize)
            .sum::<usize>();
        total - prior
    }

    /// The belief after pulling `arm` and observing `outcome`.
    pub fn next(&self, arm: Arm, outcome: Outcome) -> Result<Self, BeliefError> {
        self.check(arm)?;
        Ok(self.advance(arm, outcome))
    }
    /// Both children of pulling `arm`, success first.
    pub fn branch(&self, arm: Arm) -> Result<(Successor, Successor), BeliefError> {
        self.check(arm)?;
        Ok(self.split(arm))
    }
    /// For every arm in index order, its (success, failure) children.
    pub fn successors(&self) -> impl Iterator<Item = (Successor, Successor)> + '_ {
        self.actions().map(|arm| self.split(arm))
    }
    /// Fails unless `arm` indexes one of this belief's arms.
    pub fn check(&self, arm: Arm) -> Result<(), BeliefError> {
        match arm < self.arms() {
            true => Ok(()),
            false => Err(BeliefError::InvalidAction {
                arm,
                arms: self.arms(),
            }),
        }
    }

    /// True when posterior means are non-increasing by arm index.
    /// Compared exactly by cross-multiplying the counts.
    pub fn is_consistent(&self) -> bool {
        self.actions().skip(1).all(|arm| {
            let (a0, n0) = (self.alphas[arm - 1] as u64, self.sum(arm - 1) as u64);
            let (a1, n1) = (self.alphas[arm] as u64, self.sum(arm) as u64);
            a0 * n1 >= a1 * n0
        })
    }

    fn split(&self, arm: Arm) -> (Successor, Successor) {
        let success = Successor {
            arm,
            outcome: Outcome::Success,
            state: self.advance(arm, Outcome::Success),
        };
        let failure = Successor {
            arm,
            outcome: Outcome::Failure,
            state: self.advance(arm, Outcome::Failure),
        };
        (success, failure)
    }
    fn advance(&self, arm: Arm, outcome: Outcome) -> Self {
        let mut next = self.clone();
        match outcome {
            Outcome::Success => next.alphas[arm] += 1,
            Outcome::Failure => next.betas[arm] += 1,
        }
        next
    }
}

impl std::fmt::Display for BeliefState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for arm in self.actions() {
            if arm > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}/{}", self.alphas[arm], self.betas[arm])?;
        }
        write!(f, "]")
    }
}
