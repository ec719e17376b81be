//! Dispersion objective minimized by GRASP.

use crate::{clustering::Cluster, memory::*};

/// Squared Euclidean distance between two feature vectors of equal dimension.
#[inline(always)]
pub(crate) fn squared_distance<T: Primitive>(a: &[T], b: &[T]) -> T {
    a.iter().cloned().zip(b.iter().cloned())
        .map(|(av, bv)| av - bv)        // <a> - <b>
        .map(|v| v * v)                 // <vec_components> ^2
        .sum()
}

/// Sum over all clusters of the squared distances of their members to the cluster's centroid.
pub(crate) fn total_cost<T: Primitive>(points: &PointSet<T>, clusters: &[Cluster], centroids: &Centroids<T>) -> T {
    clusters.iter().enumerate()
        .map(|(idx, cluster)| {
            let centroid = centroids.get(idx);
            cluster.iter().map(|p| squared_distance(points.point(p), centroid)).sum::<T>()
        })
        .sum()
}

/// Exact change of [`total_cost`] if the point at **position** within cluster **source** was moved
/// to cluster **target**, without performing the move.
///
/// Requires the centroids to be the current means of their clusters. With `n_s`/`n_t` being the
/// sizes of source and target cluster before the move:
/// ```text
/// Δ = n_t / (n_t + 1) * ‖x - c_t‖² - n_s / (n_s - 1) * ‖x - c_s‖²
/// ```
/// Moving the last member out of a cluster would leave it without a centroid, so that move is
/// reported as `+∞`. Moving a point into its own cluster changes nothing.
pub(crate) fn move_delta<T: Primitive>(points: &PointSet<T>, clusters: &[Cluster], centroids: &Centroids<T>,
                                       target: usize, source: usize, position: usize) -> T {
    if target == source {
        return T::zero();
    }
    let (n_s, n_t) = (clusters[source].len(), clusters[target].len());
    if n_s <= 1 {
        return T::infinity();
    }
    let point = points.point(clusters[source].get(position));
    let (n_s, n_t) = (from_usize::<T>(n_s), from_usize::<T>(n_t));

    let gain = n_t / (n_t + T::one()) * squared_distance(point, centroids.get(target));
    let loss = n_s / (n_s - T::one()) * squared_distance(point, centroids.get(source));
    gain - loss
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::compute_all;
    use crate::helpers::testing;
    use rand::prelude::*;

    #[test]
    fn total_cost_of_known_layout() {
        // centroids (1,0) and (10,10)
        let points = PointSet::new(vec![0.0f64, 0.0, 2.0, 0.0, 9.0, 10.0, 11.0, 10.0, 10.0, 10.0], 5, 2).unwrap();
        let clusters = vec![Cluster::with_members(vec![0, 1]), Cluster::with_members(vec![2, 3, 4])];
        let centroids = compute_all(&points, &clusters).unwrap();
        assert_approx_eq!(total_cost(&points, &clusters, &centroids), 4.0, 1e-12);
    }

    #[test] fn move_delta_matches_materialized_move_f32() { move_delta_matches_materialized_move::<f32>(1e-2); }
    #[test] fn move_delta_matches_materialized_move_f64() { move_delta_matches_materialized_move::<f64>(1e-9); }

    fn move_delta_matches_materialized_move<T: Primitive>(max_diff: T) {
        let mut rnd = rand_chacha::ChaCha8Rng::seed_from_u64(1337);
        let points = testing::random_points::<T>(&mut rnd, 40, 3);
        let clusters: Vec<Cluster> = (0..4)
            .map(|c| Cluster::with_members((0..40).filter(|p| p % 4 == c).collect()))
            .collect();
        let centroids = compute_all(&points, &clusters).unwrap();
        let cost = total_cost(&points, &clusters, &centroids);

        for source in 0..clusters.len() {
            for position in 0..clusters[source].len() {
                for target in (0..clusters.len()).filter(|&t| t != source) {
                    let delta = move_delta(&points, &clusters, &centroids, target, source, position);

                    let mut moved = clusters.clone();
                    let point = moved[source].remove(position);
                    moved[target].push(point);
                    let moved_centroids = compute_all(&points, &moved).unwrap();
                    let moved_cost = total_cost(&points, &moved, &moved_centroids);

                    assert_approx_eq!(cost + delta, moved_cost, max_diff);
                }
            }
        }
    }

    #[test]
    fn emptying_a_cluster_never_improves() {
        let points = PointSet::new(vec![0.0f64, 1.0, 50.0], 3, 1).unwrap();
        let clusters = vec![Cluster::with_members(vec![0, 1]), Cluster::with_members(vec![2])];
        let centroids = compute_all(&points, &clusters).unwrap();
        assert_eq!(move_delta(&points, &clusters, &centroids, 0, 1, 0), f64::INFINITY);
    }

    #[test]
    fn moving_within_a_cluster_changes_nothing() {
        let points = testing::two_blobs::<f64>();
        let clusters = vec![Cluster::with_members(vec![0, 1, 2, 3]), Cluster::with_members(vec![4, 5])];
        let centroids = compute_all(&points, &clusters).unwrap();
        for position in 0..4 {
            assert_eq!(move_delta(&points, &clusters, &centroids, 0, 0, position), 0.0);
        }
        assert_eq!(move_delta(&points, &clusters, &centroids, 1, 1, 0), 0.0);
    }
}
