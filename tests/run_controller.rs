//! End-to-end runs through the controller and animator

use std::time::Duration;

use swarmlab::prelude::*;

fn pso_scenario() -> RunConfig {
    RunConfig::new(PsoConfig {
        num_particles: 5,
        dimensions: 2,
        max_iterations: 10,
        w: 0.5,
        c1: 1.5,
        c2: 1.5,
    })
    .with_seed(42)
}

#[test]
fn pso_scenario_is_reproducible() {
    let mut first = RunController::new().configured(pso_scenario()).unwrap();
    let mut second = RunController::new().configured(pso_scenario()).unwrap();

    let a = first.run_to_completion().unwrap();
    let b = second.run_to_completion().unwrap();

    assert_eq!(a.iteration, 10);
    assert_eq!(a.global_best, b.global_best);
    assert_eq!(a.history, b.history);
    assert_eq!(a.population, b.population);
    assert!(a.global_best.fitness <= a.history[0]);
}

#[test]
fn pso_scenario_final_best_is_pinned() {
    let mut controller = RunController::new().configured(pso_scenario()).unwrap();
    let snapshot = controller.run_to_completion().unwrap();

    let best = &snapshot.global_best;
    assert!((best.fitness - 1.0636255288326346).abs() < 1e-12, "{}", best.fitness);
    assert!((best.position[0] - 0.9777523267082959).abs() < 1e-12);
    assert!((best.position[1] + 0.007129985753504153).abs() < 1e-12);

    assert_eq!(snapshot.history.len(), 11);
    assert!((snapshot.history[0] - 21.1352).abs() < 1e-4);
    assert!((snapshot.history[1] - 3.9496).abs() < 1e-4);
    assert_eq!(*snapshot.history.last().unwrap(), best.fitness);
}

#[test]
fn different_seeds_diverge() {
    let mut first = RunController::new().configured(pso_scenario()).unwrap();
    let mut second = RunController::new()
        .configured(pso_scenario().with_seed(43))
        .unwrap();

    let a = first.run_to_completion().unwrap();
    let b = second.run_to_completion().unwrap();
    assert_ne!(a.population, b.population);
}

#[test]
fn grey_wolf_control_parameter_anneals() {
    let config = RunConfig::new(GwoConfig {
        population_size: 6,
        dimensions: 2,
        max_iterations: 50,
        a: 2.0,
    })
    .with_seed(7);
    let mut controller = RunController::new().configured(config).unwrap();
    controller.start().unwrap();

    let mut controls = vec![controller.snapshot().unwrap().control_parameter.unwrap()];
    while controller.status() == RunStatus::Running {
        controller.step().unwrap();
        controls.push(controller.snapshot().unwrap().control_parameter.unwrap());
    }

    assert_eq!(controls.len(), 51);
    assert_eq!(controls[0], 2.0);
    assert!(controls[50].abs() < 1e-12);
    for pair in controls.windows(2) {
        assert!((pair[0] - pair[1] - 2.0 / 50.0).abs() < 1e-12);
    }
}

#[test]
fn bats_grow_quiet_and_pulse_faster() {
    let config = RunConfig::new(BaConfig {
        population_size: 10,
        dimensions: 2,
        max_iterations: 200,
        ..Default::default()
    })
    .with_seed(11);
    let mut controller = RunController::new().configured(config).unwrap();
    let snapshot = controller.run_to_completion().unwrap();

    for bat in &snapshot.population {
        let state = bat.bat().expect("bat state");
        assert!(state.loudness < 1e-6, "loudness {}", state.loudness);
        assert!(state.pulse_rate > 1.0 - 1e-6, "pulse rate {}", state.pulse_rate);
    }
}

#[test]
fn every_algorithm_runs_its_default_budget() {
    for algorithm in Algorithm::ALL {
        let config = RunConfig::new(AlgorithmConfig::default_for(algorithm)).with_seed(2024);
        let mut controller = RunController::new().configured(config).unwrap();
        let snapshot = controller.run_to_completion().unwrap();

        assert_eq!(snapshot.algorithm, algorithm);
        assert_eq!(snapshot.stop_reason, Some(StopReason::MaxIterations));
        assert!(
            snapshot.global_best.fitness <= snapshot.history[0],
            "{} got worse",
            algorithm
        );
        assert!(snapshot.global_best.fitness.is_finite());
        assert_eq!(snapshot.history.len(), 101);

        let last = *snapshot.history.last().unwrap();
        let flat_tail = snapshot.history.iter().rev().take_while(|&&f| f == last).count();
        assert_eq!(snapshot.stagnation, flat_tail - 1);
    }
}

#[test]
fn configuration_from_json_drives_a_run() {
    let config = RunConfig::from_json(
        r#"{
            "algorithm": "fa",
            "numFireflies": 8,
            "dimensions": 2,
            "maxIterations": 5,
            "alpha": 0.2,
            "seed": 5
        }"#,
    )
    .unwrap();
    let mut controller = RunController::new().configured(config).unwrap();
    let snapshot = controller.run_to_completion().unwrap();

    assert_eq!(snapshot.algorithm, Algorithm::Fa);
    assert_eq!(snapshot.population.len(), 8);
    assert_eq!(snapshot.history.len(), 6);
}

#[test]
fn invalid_configuration_never_runs() {
    let err = RunConfig::from_json(r#"{"algorithm": "pso", "dimensions": 5}"#).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::Dimension(5))
    ));

    let err = RunConfig::from_json(r#"{"algorithm": "ga", "bounds": {"min": 3.0, "max": -3.0}}"#)
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigError::Bounds { .. })
    ));
}

#[test]
fn custom_objective_and_bounds() {
    let shifted = |x: &[f64]| x.iter().map(|v| (v - 1.0).powi(2)).sum::<f64>();
    let config = RunConfig::new(DeConfig {
        population_size: 20,
        dimensions: 3,
        max_iterations: 150,
        ..Default::default()
    })
    .with_bounds(Bounds::new(-2.0, 2.0))
    .with_seed(3);
    let mut controller = RunController::with_objective(shifted)
        .configured(config)
        .unwrap();
    let snapshot = controller.run_to_completion().unwrap();

    for coordinate in &snapshot.global_best.position {
        assert!((coordinate - 1.0).abs() < 0.1, "{:?}", snapshot.global_best.position);
    }
}

#[test]
fn animator_plays_frames_and_stops_on_request() {
    let controller = RunController::new().configured(pso_scenario()).unwrap();
    let mut animator = Animator::new(controller);

    animator.start().unwrap();
    assert_eq!(animator.advance(DEFAULT_FRAME_DELAY * 3).unwrap(), 3);
    animator.stop();
    assert_eq!(animator.advance(Duration::from_secs(5)).unwrap(), 0);

    let snapshot = animator.snapshot().unwrap();
    assert_eq!(snapshot.iteration, 3);
    assert_eq!(snapshot.stop_reason, Some(StopReason::Requested));
}

#[test]
fn animator_matches_direct_run() {
    let controller = RunController::new().configured(pso_scenario()).unwrap();
    let animated = Animator::new(controller).run_to_completion().unwrap();

    let mut direct = RunController::new().configured(pso_scenario()).unwrap();
    let expected = direct.run_to_completion().unwrap();

    assert_eq!(animated.global_best, expected.global_best);
    assert_eq!(animated.history, expected.history);
}
