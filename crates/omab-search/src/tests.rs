use crate::*;
use omab_belief::BanditSimulator;
use omab_belief::BanditWorld;
use omab_belief::BeliefState;
use omab_belief::StateSpace;
use omab_core::Utility;

fn exact(rewards: Vec<Utility>, horizon: usize) -> Policy {
    ValueIteration::new(Configuration::new(rewards, horizon))
        .unwrap()
        .solve(horizon)
        .unwrap()
}

#[test]
fn two_arm_three_pull_policy() {
    let policy = exact(vec![1., 1.], 3);
    let mut space = StateSpace::new(2);
    space.expand(&BeliefState::prior(2), 3);
    assert_eq!(space.states(3).len(), 20);
    assert_eq!(policy.generated(), 1 + 4 + 10 + 20);
    assert_eq!(policy.len(), 1 + 4 + 10);
    let value = policy.utility(&BeliefState::prior(2)).unwrap();
    assert!(value > 1.5 && value < 3.0, "{}", value);
    assert_eq!(policy.end(), 3);
    assert!(space.states(3).iter().all(|s| policy.utility(s) == Some(0.)));
}

#[test]
fn policy_is_deterministic() {
    let a = exact(vec![1., 1.], 4);
    let b = exact(vec![1., 1.], 4);
    assert_eq!(a.len(), b.len());
    assert!(a.iter().all(|(s, d)| b.decision(s) == Some(*d)));
}

#[test]
fn brtdp_bounds_contain_the_optimum() {
    let horizon = 5;
    let policy = exact(vec![1., 1.], horizon);
    let ref mut brtdp = Brtdp::new(Configuration::new(vec![1., 1.], horizon))
        .unwrap()
        .with_seed(41);
    let prior = BeliefState::prior(2);
    let optimum = policy.utility(&prior).unwrap();
    for _ in 0..100 {
        let bound = brtdp.trial(&prior, 0).unwrap();
        assert!(bound.lower <= optimum + 1e-9);
        assert!(bound.upper >= optimum - 1e-9);
    }
}

#[test]
fn brtdp_converges_to_the_optimum() {
    let horizon = 4;
    let policy = exact(vec![1., 1.], horizon);
    let ref mut brtdp = Brtdp::new(Configuration::new(vec![1., 1.], horizon))
        .unwrap()
        .with_alpha(1e-3)
        .with_seed(43);
    let prior = BeliefState::prior(2);
    let decision = brtdp.select(&prior, 0, &mut FakeTermination).unwrap();
    let optimum = policy.utility(&prior).unwrap();
    assert!((decision.value - optimum).abs() <= 1e-3 + 1e-9);
}

#[test]
fn rtdp_stays_above_the_optimum() {
    let horizon = 4;
    let policy = exact(vec![1., 1.], horizon);
    let simulator = BanditSimulator::with_seed(vec![1., 1.], 47);
    let ref mut rtdp = Rtdp::new(Configuration::new(vec![1., 1.], horizon), simulator)
        .unwrap()
        .with_trials(25);
    let prior = BeliefState::prior(2);
    let decision = rtdp.select(&prior, 0, &mut FakeTermination).unwrap();
    assert!(decision.value >= policy.utility(&prior).unwrap() - 1e-9);
}

#[test]
fn rtdp_matches_value_iteration_on_a_clear_choice() {
    let state = BeliefState::new(vec![9, 1], vec![1, 9]);
    let config = Configuration::new(vec![1., 1.], 2);
    let solver = ValueIteration::new(config.clone()).unwrap();
    let optimum = solver.solve_from(&state, 2).unwrap().utility(&state).unwrap();
    let simulator = BanditSimulator::with_seed(vec![1., 1.], 53);
    let ref mut rtdp = Rtdp::new(config, simulator).unwrap().with_trials(200);
    let decision = rtdp.select(&state, 0, &mut FakeTermination).unwrap();
    assert_eq!(decision.arm, 0);
    assert!((decision.value - optimum).abs() < 1e-9);
}

#[test]
fn uct_finds_the_clear_choice() {
    let state = BeliefState::new(vec![9, 1], vec![1, 9]);
    let simulator = BanditSimulator::with_seed(vec![1., 1.], 59);
    let ref mut uct = Uct::new(Configuration::new(vec![1., 1.], 3), simulator)
        .unwrap()
        .with_simulations(2000)
        .with_seed(61);
    let decision = uct.select(&state, 0, &mut FakeTermination).unwrap();
    assert_eq!(decision.arm, 0);
}

#[test]
fn uct_answers_with_a_single_simulation() {
    let simulator = BanditSimulator::with_seed(vec![1., 1.], 67);
    let ref mut uct = Uct::new(Configuration::new(vec![1., 1.], 8), simulator)
        .unwrap()
        .with_seed(71);
    for timestep in 0..8 {
        let decision = uct
            .select(&BeliefState::prior(2), timestep, &mut CountTermination::new(1))
            .unwrap();
        assert!(decision.arm < 2);
        assert!(decision.value.is_finite());
        assert_eq!(uct.nodes(), 1);
    }
}

#[test]
fn every_planner_rejects_a_spent_horizon() {
    let config = Configuration::new(vec![1., 1.], 2);
    let prior = BeliefState::prior(2);
    let simulator = || BanditSimulator::with_seed(vec![1., 1.], 0);
    let mut planners: Vec<Box<dyn Planner>> = vec![
        Box::new(ValueIteration::new(config.clone()).unwrap()),
        Box::new(Rtdp::new(config.clone(), simulator()).unwrap()),
        Box::new(Brtdp::new(config.clone()).unwrap()),
        Box::new(Uct::new(config.clone(), simulator()).unwrap()),
        Box::new(Lookahead::new(config.clone(), Leaf::Optimistic).unwrap()),
    ];
    for planner in planners.iter_mut() {
        assert_eq!(
            planner.select(&prior, 2, &mut FakeTermination),
            Err(SearchError::HorizonReached { timestep: 2, horizon: 2 }),
            "{}",
            planner.name()
        );
    }
}

#[test]
fn invalid_configuration_is_refused() {
    let config = Configuration::new(vec![1., 1.], 2).with_lookahead(5);
    assert!(ValueIteration::new(config.clone()).is_err());
    assert!(Brtdp::new(config.clone()).is_err());
    assert!(Lookahead::new(config, Leaf::Optimistic).is_err());
}

#[test]
fn certain_world_episode_has_no_regret() {
    let config = Configuration::new(vec![1., 1.], 6);
    let ref mut world = BanditWorld::with_seed(vec![1., 0.], vec![1., 1.], 73);
    let ref mut planner = ValueIteration::new(config.clone()).unwrap();
    let episode = Episode::play(planner, world, &config, &mut FakeTermination).unwrap();
    assert_eq!(episode.arms, vec![0; 6]);
    assert_eq!(episode.total(), 6.);
    assert_eq!(episode.regret(), 0.);
    assert_eq!(episode.regrets.len(), 6);
}

#[test]
fn episode_regret_accumulates() {
    let config = Configuration::new(vec![1., 1.], 10);
    let ref mut world = BanditWorld::with_seed(vec![0.2, 0.7], vec![1., 1.], 79);
    let simulator = BanditSimulator::with_seed(vec![1., 1.], 83);
    let ref mut planner = Uct::new(config.clone(), simulator)
        .unwrap()
        .with_simulations(100)
        .with_seed(89);
    let episode = Episode::play(planner, world, &config, &mut FakeTermination).unwrap();
    assert_eq!(episode.rewards.len(), 10);
    let expected = episode
        .rewards
        .iter()
        .map(|r| 0.7 - r)
        .sum::<Utility>();
    assert!((episode.regret() - expected).abs() < 1e-9);
    let json = serde_json::to_string(&episode).unwrap();
    assert!(json.contains("\"regrets\""));
}

#[test]
fn episode_rejects_mismatched_world() {
    let config = Configuration::new(vec![1., 1.], 3);
    let ref mut world = BanditWorld::with_seed(vec![0.5], vec![1.], 0);
    let ref mut planner = ValueIteration::new(config.clone()).unwrap();
    assert!(matches!(
        Episode::play(planner, world, &config, &mut FakeTermination),
        Err(SearchError::InvalidConfiguration(_))
    ));
}
