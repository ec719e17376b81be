use crate::{clustering::{self, Cluster}, memory::*, objective, GraspError, Result};
use tracing::trace;

/// Default limit of move attempts for a single local search.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Only clusters with more members than this are used as the source of a move.
pub const SIZE_FLOOR: usize = 3;

/// Terminal state of a local search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// A full sweep found no improving move.
    Converged,
    /// The allowed amount of move attempts was used up before convergence.
    IterationCapReached
}

/// Result of [`refine`].
///
/// ## Fields
/// - **cost**: Final cost, tracked incrementally from the initial cost by adding every accepted delta
/// - **status**: Why the search stopped
/// - **attempts**: Amount of evaluated moves (accepted or not)
/// - **moves**: Amount of accepted moves
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalSearchOutcome<T: Primitive> {
    pub cost: T,
    pub status: SearchStatus,
    pub attempts: usize,
    pub moves: usize
}

/// First-improvement local search, relocating single points between clusters.
///
/// Sweeps clusters (outer), point positions (middle) and target clusters (inner). The first move
/// with a negative delta is committed right away: the point is appended to the target, both
/// centroids are recalculated and the same slot of the source cluster (now holding the next point)
/// is examined again. Sweeping repeats until a full pass brings no improvement, or until
/// **max_iterations** moves were attempted.
pub(crate) fn refine<T: Primitive>(points: &PointSet<T>, clusters: &mut [Cluster], centroids: &mut Centroids<T>,
                                   initial_cost: T, max_iterations: usize) -> Result<LocalSearchOutcome<T>> {
    if centroids.len() != clusters.len() || centroids.dims() != points.dims() {
        return Err(GraspError::InvalidConfiguration(format!(
            "{} centroids of dimension {} do not fit {} clusters of dimension {}",
            centroids.len(), centroids.dims(), clusters.len(), points.dims())));
    }
    let k = clusters.len();
    let mut outcome = LocalSearchOutcome {
        cost: initial_cost,
        status: SearchStatus::Converged,
        attempts: 0,
        moves: 0
    };

    loop {
        let mut improvement = false;
        for source in 0..k {
            let mut position = 0;
            while position < clusters[source].len() {
                let mut moved = false;
                for target in 0..k {
                    if target == source || clusters[source].len() <= SIZE_FLOOR {
                        continue;
                    }
                    if outcome.attempts >= max_iterations {
                        outcome.status = SearchStatus::IterationCapReached;
                        return Ok(outcome);
                    }
                    let delta = objective::move_delta(points, clusters, centroids, target, source, position);
                    outcome.attempts += 1;
                    if delta < T::zero() {
                        let point = clusters[source].remove(position);
                        clusters[target].push(point);
                        clustering::refresh(points, &clusters[source], centroids, source)?;
                        clustering::refresh(points, &clusters[target], centroids, target)?;
                        outcome.cost += delta;
                        outcome.moves += 1;
                        trace!(point, source, target, delta = %delta, cost = %outcome.cost, "accepted move");
                        improvement = true;
                        moved = true;
                        break;
                    }
                }
                // The next point shifted into this slot, look at it again
                if !moved {
                    position += 1;
                }
            }
        }
        if !improvement {
            return Ok(outcome);
        }
    }
}
