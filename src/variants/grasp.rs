use crate::{
    clustering::{self, Cluster}, inits::randomizedgreedy, memory::*, objective,
    variants::localsearch, GraspConfig, GraspError, GraspState, RestartSummary, Result
};
use std::time::Instant;
use tracing::{debug, info};

struct Incumbent<T: Primitive> {
    cost: T,
    initial_cost: T,
    clusters: Vec<Cluster>,
    centroids: Centroids<T>
}

/// Outer GRASP loop.
///
/// Every restart builds a randomized greedy solution, refines it with the local search and replaces
/// the incumbent if its refined cost is strictly lower. All restarts draw from the same random
/// generator, which is never re-seeded during the run.
pub(crate) fn calculate<'a, T: Primitive>(points: &PointSet<T>, k: usize, threshold: T, config: &GraspConfig<'a, T>) -> Result<GraspState<T>> {
    randomizedgreedy::validate(points.len(), k, threshold)?;
    if config.restarts == 0 {
        return Err(GraspError::InvalidConfiguration("at least one restart is required".into()));
    }

    let started = Instant::now();
    let mut rnd = config.rnd.borrow_mut();
    let mut best: Option<Incumbent<T>> = None;
    let mut restart_history = Vec::with_capacity(config.restarts);

    for restart in 0..config.restarts {
        let mut clusters = randomizedgreedy::build(points, &mut *rnd, k, threshold)?;
        let mut centroids = clustering::compute_all(points, &clusters)?;
        let greedy_cost = objective::total_cost(points, &clusters, &centroids);
        (config.construction_done)(restart, &clusters, greedy_cost);

        let outcome = localsearch::refine(points, &mut clusters, &mut centroids, greedy_cost, config.max_iterations)?;
        let improved = best.as_ref().map_or(true, |b| outcome.cost < b.cost);
        debug!(restart, greedy_cost = %greedy_cost, refined_cost = %outcome.cost, status = ?outcome.status,
               attempts = outcome.attempts, moves = outcome.moves, improved, "restart finished");

        if improved {
            best = Some(Incumbent { cost: outcome.cost, initial_cost: greedy_cost, clusters, centroids });
        }
        let summary = RestartSummary {
            restart,
            greedy_cost,
            refined_cost: outcome.cost,
            status: outcome.status,
            attempts: outcome.attempts,
            moves: outcome.moves,
            improved
        };
        if let Some(b) = best.as_ref() {
            (config.restart_done)(&summary, b.cost);
        }
        restart_history.push(summary);
    }

    let best = best.ok_or_else(|| GraspError::InternalConsistency("no restart produced a solution".into()))?;
    let elapsed = started.elapsed();
    info!(k, restarts = config.restarts, initial_cost = %best.initial_cost, cost = %best.cost, ?elapsed, "GRASP finished");

    Ok(GraspState {
        k,
        cost: best.cost,
        initial_cost: best.initial_cost,
        assignments: clustering::assignments(points.len(), &best.clusters)?,
        clusters: best.clusters,
        centroids: best.centroids,
        restart_history,
        elapsed,
        seed: config.seed
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing;
    use crate::SearchStatus;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;
    use std::cell::Cell;

    #[test] fn restarts_keep_invariants_f32() { restarts_keep_invariants::<f32>(1e-2); }
    #[test] fn restarts_keep_invariants_f64() { restarts_keep_invariants::<f64>(1e-8); }

    fn restarts_keep_invariants<T: Primitive>(max_diff: T) {
        let points = testing::random_points::<T>(&mut ChaCha8Rng::seed_from_u64(1337), 250, 4);
        let constructions = Cell::new(0);
        let construction_done = |_: usize, clusters: &[Cluster], _: T| {
            testing::assert_partition(clusters, points.len());
            constructions.set(constructions.get() + 1);
        };
        let config = GraspConfig::build()
            .seed(2024)
            .restarts(10)
            .construction_done(&construction_done)
            .build();

        let state = calculate(&points, 6, T::from(0.3).unwrap(), &config).unwrap();
        assert_eq!(constructions.get(), 10);
        assert_eq!(state.restart_history.len(), 10);
        testing::assert_partition(&state.clusters, points.len());

        let mut incumbent = T::infinity();
        for summary in &state.restart_history {
            assert!(summary.refined_cost <= summary.greedy_cost);
            assert_eq!(summary.improved, summary.refined_cost < incumbent);
            if summary.improved {
                incumbent = summary.refined_cost;
            }
        }
        assert_eq!(state.cost, incumbent);
        let winner = state.restart_history.iter().filter(|s| s.improved).last().unwrap();
        assert_eq!(state.initial_cost, winner.greedy_cost);

        let recalculated = clustering::compute_all(&points, &state.clusters).unwrap();
        assert_approx_eq!(state.cost, objective::total_cost(&points, &state.clusters, &recalculated), max_diff);
        for (idx, cluster) in state.clusters.iter().enumerate() {
            assert!(cluster.iter().all(|p| state.assignments[p] == idx));
        }
    }

    #[test]
    fn incumbent_never_gets_worse() {
        let points = testing::random_points::<f64>(&mut ChaCha8Rng::seed_from_u64(3), 100, 2);
        let incumbents = std::cell::RefCell::new(Vec::new());
        let restart_done = |_: &RestartSummary<f64>, incumbent: f64| incumbents.borrow_mut().push(incumbent);
        let state = {
            let config = GraspConfig::build().seed(8).restarts(15).restart_done(&restart_done).build();
            calculate(&points, 4, 0.6, &config).unwrap()
        };
        let incumbents = incumbents.into_inner();
        assert_eq!(incumbents.len(), 15);
        assert!(incumbents.windows(2).all(|w| w[1] <= w[0]), "{:?}", incumbents);
        assert_eq!(*incumbents.last().unwrap(), state.cost);
    }

    #[test]
    fn random_stream_is_shared_across_restarts() {
        // Restarts are not re-seeded, so with a random-heavy threshold they explore different solutions
        let points = testing::random_points::<f64>(&mut ChaCha8Rng::seed_from_u64(17), 120, 2);
        let config = GraspConfig::build().seed(1).restarts(6).build();
        let state = calculate(&points, 5, 1.0, &config).unwrap();
        let first = state.restart_history[0].greedy_cost;
        assert!(state.restart_history.iter().any(|s| s.greedy_cost != first));
    }

    #[test]
    fn iteration_cap_is_forwarded() {
        let points = testing::random_points::<f64>(&mut ChaCha8Rng::seed_from_u64(5), 200, 2);
        let config = GraspConfig::build().seed(5).restarts(3).max_iterations(7).build();
        let state = calculate(&points, 3, 1.0, &config).unwrap();
        for summary in &state.restart_history {
            assert!(summary.attempts <= 7);
            assert_eq!(summary.status, SearchStatus::IterationCapReached);
        }
    }

    #[test]
    fn rejects_invalid_configuration_before_any_work() {
        let points = testing::two_blobs::<f64>();
        let construction_done = |_: usize, _: &[Cluster], _: f64| panic!("construction must not start");
        let no_restarts = GraspConfig::build().seed(1).restarts(0).construction_done(&construction_done).build();
        assert!(matches!(calculate(&points, 2, 0.5, &no_restarts), Err(GraspError::InvalidConfiguration(_))));

        let config = GraspConfig::build().seed(1).construction_done(&construction_done).build();
        assert!(matches!(calculate(&points, 0, 0.5, &config), Err(GraspError::InvalidConfiguration(_))));
        assert!(matches!(calculate(&points, 2, 2.0, &config), Err(GraspError::InvalidConfiguration(_))));
    }
}
