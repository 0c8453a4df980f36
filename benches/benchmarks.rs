criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        enumerating_state_space,
        solving_value_iteration,
        planning_rtdp,
        planning_brtdp,
        planning_uct,
        planning_lookahead,
}

use omab::belief::*;
use omab::search::*;

const HORIZON: usize = 12;

fn config() -> Configuration {
    Configuration::new(vec![1., 1.], HORIZON)
}

fn enumerating_state_space(c: &mut criterion::Criterion) {
    c.bench_function("expand 2-arm beliefs 12 levels deep", |b| {
        b.iter(|| StateSpace::new(2).expand(&BeliefState::prior(2), HORIZON))
    });
}

fn solving_value_iteration(c: &mut criterion::Criterion) {
    let solver = ValueIteration::new(config()).unwrap();
    c.bench_function("solve 2-arm horizon 12 exactly", |b| {
        b.iter(|| solver.solve(HORIZON).unwrap())
    });
}

fn planning_rtdp(c: &mut criterion::Criterion) {
    c.bench_function("select with 100 RTDP trials", |b| {
        b.iter(|| {
            let simulator = BanditSimulator::with_seed(vec![1., 1.], 0);
            Rtdp::new(config(), simulator)
                .unwrap()
                .with_trials(100)
                .select(&BeliefState::prior(2), 0, &mut FakeTermination)
                .unwrap()
        })
    });
}

fn planning_brtdp(c: &mut criterion::Criterion) {
    c.bench_function("select with bounded RTDP to alpha 0.1", |b| {
        b.iter(|| {
            Brtdp::new(config())
                .unwrap()
                .with_alpha(0.1)
                .with_seed(0)
                .select(&BeliefState::prior(2), 0, &mut FakeTermination)
                .unwrap()
        })
    });
}

fn planning_uct(c: &mut criterion::Criterion) {
    c.bench_function("select with 1000 UCT simulations", |b| {
        b.iter(|| {
            let simulator = BanditSimulator::with_seed(vec![1., 1.], 0);
            Uct::new(config(), simulator)
                .unwrap()
                .with_seed(0)
                .select(&BeliefState::prior(2), 0, &mut FakeTermination)
                .unwrap()
        })
    });
}

fn planning_lookahead(c: &mut criterion::Criterion) {
    let ref mut planner = Lookahead::new(config(), Leaf::Optimistic)
        .unwrap()
        .with_seed(0);
    c.bench_function("select with 4-deep optimistic lookahead", |b| {
        b.iter(|| {
            planner
                .select(&BeliefState::prior(2), 0, &mut FakeTermination)
                .unwrap()
        })
    });
}
