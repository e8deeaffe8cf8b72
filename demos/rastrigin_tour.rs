//! Rastrigin Tour
//!
//! Runs each of the six optimizers on the 3D Rastrigin function with the
//! default parameters and prints how the best fitness evolved.
//!
//! Pass an algorithm name (`pso`, `ga`, `de`, `fa`, `ba`, `gwo`) to run only
//! that one, and set `RUST_LOG=swarmlab=debug` to see every iteration.

use std::time::Duration;

use swarmlab::prelude::*;
use tracing::info;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn parse_algorithm(name: &str) -> Option<Algorithm> {
    Algorithm::ALL
        .into_iter()
        .find(|a| a.name().eq_ignore_ascii_case(name))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let selected: Vec<Algorithm> = match std::env::args().nth(1) {
        Some(name) => vec![parse_algorithm(&name).ok_or(format!("unknown algorithm {}", name))?],
        None => Algorithm::ALL.to_vec(),
    };

    println!("=== Rastrigin Tour ===\n");

    for algorithm in selected {
        let config = RunConfig::new(AlgorithmConfig::default_for(algorithm)).with_seed(42);
        let controller = RunController::new().configured(config)?;
        let mut animator = Animator::new(controller).with_frame_delay(Duration::ZERO);

        info!(%algorithm, "starting");
        let snapshot = animator.run_to_completion()?;

        println!("{} ({} iterations)", algorithm, snapshot.iteration);
        for (i, best) in snapshot.history.iter().enumerate().step_by(20) {
            println!("  iter {:>3}: best {:.6}", i, best);
        }
        println!(
            "  final   : best {:.6} at {:?}",
            snapshot.global_best.fitness, snapshot.global_best.position
        );
        println!(
            "  population: mean {:.4}, diversity {:.4}\n",
            snapshot.stats.mean_fitness, snapshot.stats.diversity
        );
    }

    Ok(())
}
