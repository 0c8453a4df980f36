use crate::*;
use omab_belief::BeliefState;
use omab_belief::Memo;
use omab_belief::Simulator;
use omab_belief::StateId;
use omab_belief::StateSpace;
use omab_belief::Transition;
use omab_core::Arm;
use omab_core::UCT_EXPLORATION;
use omab_core::UCT_SIMULATIONS;
use omab_core::Utility;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Instant;

/// Per-arm running statistics of one tree node.
#[derive(Debug, Clone)]
struct Node {
    q: Vec<Utility>,
    n: Vec<u32>,
}

impl Node {
    fn new(arms: usize) -> Self {
        Self {
            q: vec![0.; arms],
            n: vec![0; arms],
        }
    }
    fn visits(&self) -> u32 {
        self.n.iter().sum()
    }
    /// UCB1 score; unvisited arms come first.
    fn score(&self, arm: Arm, c: f64) -> Utility {
        match self.n[arm] {
            0 => Utility::INFINITY,
            n => self.q[arm] + (c * (self.visits() as f64).ln() / n as f64).sqrt(),
        }
    }
    fn choose(&self, c: f64) -> Arm {
        Decision::greedy((0..self.q.len()).map(|arm| self.score(arm, c))).arm
    }
    fn update(&mut self, arm: Arm, observed: Utility) {
        self.n[arm] += 1;
        self.q[arm] += (observed - self.q[arm]) / self.n[arm] as Utility;
    }
    /// Argmax of q over visited arms.
    fn best(&self) -> Decision {
        Decision::greedy((0..self.q.len()).map(|arm| match self.n[arm] {
            0 => Utility::NEG_INFINITY,
            _ => self.q[arm],
        }))
    }
}

/// Monte-Carlo tree search with UCB1 at every node.
///
/// A simulation descends through existing nodes choosing
/// `argmax q(a) + sqrt(c ln N / n(a))` with `c = exploration * remaining`,
/// stepping through the simulator. At the first state without a node it
/// rolls out uniformly random arms to the horizon and seeds a node there
/// with the rollout's first arm and return. Returns are then averaged into
/// every node on the path. Below `max_depth` pulls from the root no nodes are
/// created and rollouts take over.
///
/// The tree is rebuilt for every decision.
#[derive(Debug)]
pub struct Uct<S>
where
    S: Simulator,
{
    config: Configuration,
    simulator: S,
    simulations: usize,
    exploration: f64,
    max_depth: Option<usize>,
    rng: SmallRng,
    space: StateSpace,
    nodes: Memo<Node>,
    stats: Stats,
}

impl<S> Uct<S>
where
    S: Simulator,
{
    pub fn new(config: Configuration, simulator: S) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            space: StateSpace::new(config.arms),
            nodes: Memo::default(),
            simulations: UCT_SIMULATIONS,
            exploration: UCT_EXPLORATION,
            max_depth: None,
            rng: SmallRng::from_os_rng(),
            stats: Stats::default(),
            simulator,
            config,
        })
    }
    /// Simulations per decision, at least one.
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        assert!(simulations > 0, "at least one simulation");
        self.simulations = simulations;
        self
    }
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }
    /// Pulls below the root past which the tree stops growing, at least one.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0, "the root needs a node");
        self.max_depth = Some(depth);
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Number of tree nodes built by the last decision.
    pub fn nodes(&self) -> usize {
        self.nodes.len()
    }

    fn expandable(&self, root: StateId, id: StateId) -> bool {
        self.max_depth
            .is_none_or(|depth| id.level() - root.level() < depth)
    }
    fn simulate(&mut self, root: StateId, end: usize) -> Result<(), SearchError> {
        let mut path = Vec::<(StateId, Arm, Utility)>::new();
        let mut id = root;
        let mut observed = 0.;
        while id.level() < end {
            let c = self.exploration * (end - id.level()) as f64;
            let expandable = self.expandable(root, id);
            let chosen = self
                .nodes
                .get(id)
                .filter(|_| expandable)
                .map(|node| node.choose(c));
            let Some(arm) = chosen else {
                let (arm, total) = self.rollout(id, end)?;
                if expandable {
                    let mut node = Node::new(self.config.arms);
                    node.update(arm, total);
                    self.nodes.set(id, node);
                }
                observed = total;
                break;
            };
            let Transition { state, reward } =
                self.simulator.transition(self.space.state(id), arm)?;
            path.push((id, arm, reward));
            id = self.space.insert(state);
        }
        while let Some((id, arm, reward)) = path.pop() {
            observed += reward;
            if let Some(node) = self.nodes.get_mut(id) {
                node.update(arm, observed);
            }
        }
        Ok(())
    }
    /// Uniformly random pulls from `id` to the end level. Returns the first
    /// arm and the summed reward.
    fn rollout(&mut self, id: StateId, end: usize) -> Result<(Arm, Utility), SearchError> {
        let mut state = self.space.state(id).clone();
        let first = self.rng.random_range(0..self.config.arms);
        let mut arm = first;
        let mut total = 0.;
        while state.level() < end {
            let transition = self.simulator.transition(&state, arm)?;
            total += transition.reward;
            state = transition.state;
            arm = self.rng.random_range(0..self.config.arms);
        }
        Ok((first, total))
    }
}

impl<S> Planner for Uct<S>
where
    S: Simulator,
{
    fn name(&self) -> &'static str {
        "uct"
    }
    fn select(
        &mut self,
        state: &BeliefState,
        timestep: usize,
        checker: &mut dyn TerminationChecker,
    ) -> Result<Decision, SearchError> {
        let end = state.level() + self.config.remaining(state, timestep)?;
        let start = Instant::now();
        self.space.clear();
        self.nodes.clear();
        let root = self.space.insert(state.clone());
        let mut simulations = 0;
        checker.init();
        loop {
            self.simulate(root, end)?;
            simulations += 1;
            if simulations >= self.simulations || checker.reached() {
                break;
            }
        }
        let decision = self
            .nodes
            .get(root)
            .map(Node::best)
            .ok_or_else(|| SearchError::InvalidConfiguration("search tree has no root".into()))?;
        self.stats = Stats {
            trials: simulations,
            states: self.space.len(),
            elapsed: start.elapsed(),
        };
        log::debug!("{:<32}{}", self.name(), self.stats);
        Ok(decision)
    }
    fn stats(&self) -> Stats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omab_belief::BanditSimulator;

    fn planner(rewards: Vec<Utility>, horizon: usize) -> Uct<BanditSimulator> {
        let simulator = BanditSimulator::with_seed(rewards.clone(), 23);
        Uct::new(Configuration::new(rewards, horizon), simulator)
            .unwrap()
            .with_seed(29)
    }

    #[test]
    fn running_mean_update() {
        let mut node = Node::new(2);
        node.update(1, 3.);
        node.update(1, 1.);
        assert_eq!(node.q, vec![0., 2.]);
        assert_eq!(node.n, vec![0, 2]);
        assert_eq!(node.choose(1.), 0);
        assert_eq!(node.best(), Decision { arm: 1, value: 2. });
    }

    #[test]
    fn one_simulation_is_enough_to_answer() {
        let ref mut uct = planner(vec![1., 1., 1.], 10);
        let decision = uct
            .select(&BeliefState::prior(3), 0, &mut CountTermination::new(1))
            .unwrap();
        assert!(decision.arm < 3);
        assert_eq!(uct.stats().trials, 1);
        assert_eq!(uct.nodes(), 1);
    }

    #[test]
    fn tree_grows_one_node_per_simulation() {
        let ref mut uct = planner(vec![1., 1.], 6).with_simulations(50);
        uct.select(&BeliefState::prior(2), 0, &mut FakeTermination)
            .unwrap();
        assert_eq!(uct.stats().trials, 50);
        assert!(uct.nodes() <= 50);
        assert!(uct.nodes() > 1);
    }

    #[test]
    fn max_depth_caps_the_tree() {
        let ref mut uct = planner(vec![1., 1.], 6)
            .with_simulations(200)
            .with_max_depth(1);
        uct.select(&BeliefState::prior(2), 0, &mut FakeTermination)
            .unwrap();
        assert_eq!(uct.nodes(), 1);
    }
}
