use crate::{clustering::Cluster, memory::*, objective::squared_distance, GraspError, Result};
use rand::prelude::*;
use tracing::trace;

/// Fail fast on parameters no solution can be built for.
pub(crate) fn validate<T: Primitive>(sample_cnt: usize, k: usize, threshold: T) -> Result<()> {
    if k == 0 {
        return Err(GraspError::InvalidConfiguration("at least one cluster is required".into()));
    }
    if k > sample_cnt {
        return Err(GraspError::InvalidConfiguration(
            format!("cannot build {} clusters from {} points", k, sample_cnt)));
    }
    if !threshold.is_finite() || threshold < T::zero() || threshold > T::one() {
        return Err(GraspError::InvalidConfiguration(
            format!("threshold {} is outside of [0, 1]", threshold)));
    }
    Ok(())
}

fn bounds<T: Primitive>(values: impl Iterator<Item = T>) -> (T, T) {
    values.fold((T::infinity(), T::neg_infinity()), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn pick<R: Rng + ?Sized>(rcl: &[usize], rnd: &mut R) -> Result<usize> {
    rcl.choose(rnd).cloned()
        .ok_or_else(|| GraspError::InternalConsistency("restricted candidate list is empty".into()))
}

/// Randomized greedy construction of **k** clusters.
///
/// ## Description
/// The first point of every cluster is chosen by a randomized farthest-first traversal: the first
/// seed is drawn uniformly, every following one uniformly from the points whose squared distance
/// `s` to their nearest seed satisfies `s_max - s <= threshold * (s_max - s_min)`.
///
/// All other points are then visited in a random order. For each of them, the squared distance to
/// the running mean of every cluster is calculated, and the point is appended to a cluster drawn
/// uniformly from those with `d - d_min <= threshold * (d_max - d_min)`.
///
/// A **threshold** of `0` is pure greedy (only ties are drawn), `1` accepts every candidate.
pub(crate) fn build<T: Primitive>(points: &PointSet<T>, rnd: &mut dyn RngCore, k: usize, threshold: T) -> Result<Vec<Cluster>> {
    validate(points.len(), k, threshold)?;
    let sample_cnt = points.len();
    let mut clusters = vec![Cluster::new(); k];
    let mut seeded = vec![false; sample_cnt];

    let first = rnd.gen_range(0..sample_cnt);
    seeded[first] = true;
    clusters[0].push(first);
    let mut seed_distances: Vec<T> = points.iter()
        .map(|p| squared_distance(p, points.point(first)))
        .collect();

    for cluster in clusters.iter_mut().skip(1) {
        let candidates: Vec<usize> = (0..sample_cnt).filter(|&p| !seeded[p]).collect();
        let (lo, hi) = bounds(candidates.iter().map(|&p| seed_distances[p]));
        let limit = threshold * (hi - lo);
        let rcl: Vec<usize> = candidates.into_iter()
            .filter(|&p| hi - seed_distances[p] <= limit)
            .collect();

        let chosen = pick(&rcl, rnd)?;
        trace!(seed = chosen, candidates = rcl.len(), "seeded cluster");
        seeded[chosen] = true;
        cluster.push(chosen);
        let seed = points.point(chosen);
        seed_distances.iter_mut().zip(points.iter()).for_each(|(d, p)| {
            let dist = squared_distance(p, seed);
            if dist < *d {
                *d = dist;
            }
        });
    }

    // Running means of all clusters, starting at their seeds
    let mut provisional = Centroids::new(k, points.dims());
    for (idx, cluster) in clusters.iter().enumerate() {
        provisional.set_nth_from_iter(idx, points.point(cluster.get(0)).iter().cloned());
    }

    let mut order: Vec<usize> = (0..sample_cnt).filter(|&p| !seeded[p]).collect();
    order.shuffle(rnd);
    for p in order {
        let point = points.point(p);
        let costs: Vec<T> = provisional.iter().map(|c| squared_distance(point, c)).collect();
        let (lo, hi) = bounds(costs.iter().cloned());
        let limit = threshold * (hi - lo);
        let rcl: Vec<usize> = costs.iter().enumerate()
            .filter(|&(_, &cost)| cost - lo <= limit)
            .map(|(idx, _)| idx)
            .collect();

        let chosen = pick(&rcl, rnd)?;
        clusters[chosen].push(p);
        let cnt = from_usize::<T>(clusters[chosen].len());
        let updated: Vec<T> = provisional.get(chosen).iter().cloned()
            .zip(point.iter().cloned())
            .map(|(c, v)| c + (v - c) / cnt)
            .collect();
        provisional.set_nth_from_iter(chosen, updated.into_iter());
    }

    Ok(clusters)
}
