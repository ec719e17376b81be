use crate::{memory::*, GraspError, Result};

/// An ordered group of point indices (into a [`PointSet`]) that currently share a centroid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cluster {
    members: Vec<usize>
}
impl Cluster {
    pub fn new() -> Self { Self::default() }

    pub fn with_members(members: Vec<usize>) -> Self { Self { members } }

    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }

    /// Point indices, in insertion order.
    pub fn members(&self) -> &[usize] { &self.members }

    /// Point index stored at **position**.
    #[inline(always)]
    pub fn get(&self, position: usize) -> usize { self.members[position] }

    pub fn push(&mut self, point_idx: usize) { self.members.push(point_idx); }

    /// Remove the point stored at **position**, shifting all following members one slot down.
    pub fn remove(&mut self, position: usize) -> usize { self.members.remove(position) }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ { self.members.iter().cloned() }
}


/// Element-wise mean of all members of **cluster**.
pub(crate) fn centroid_of<T: Primitive>(points: &PointSet<T>, cluster: &Cluster) -> Result<Vec<T>> {
    if cluster.is_empty() {
        return Err(GraspError::InternalConsistency("centroid requested for an empty cluster".into()));
    }
    let mut sum = vec![T::zero(); points.dims()];
    cluster.iter().for_each(|idx| {
        sum.iter_mut().zip(points.point(idx).iter().cloned()).for_each(|(s, v)| *s += v);
    });
    let cnt = from_usize::<T>(cluster.len());
    Ok(sum.into_iter().map(|s| s / cnt).collect())
}

/// Calculate one centroid per cluster, in the order of **clusters**.
pub(crate) fn compute_all<T: Primitive>(points: &PointSet<T>, clusters: &[Cluster]) -> Result<Centroids<T>> {
    let mut centroids = Centroids::new(clusters.len(), points.dims());
    for (idx, cluster) in clusters.iter().enumerate() {
        refresh(points, cluster, &mut centroids, idx)
            .map_err(|_| GraspError::InternalConsistency(format!("cluster {} is empty", idx)))?;
    }
    Ok(centroids)
}

/// Replace centroid **idx** with the current mean of **cluster**.
pub(crate) fn refresh<T: Primitive>(points: &PointSet<T>, cluster: &Cluster, centroids: &mut Centroids<T>, idx: usize) -> Result<()> {
    let centroid = centroid_of(points, cluster)?;
    centroids.set_nth_from_iter(idx, centroid.into_iter());
    Ok(())
}

/// Map each point to the index of the cluster it belongs to.
pub(crate) fn assignments(sample_cnt: usize, clusters: &[Cluster]) -> Result<Vec<usize>> {
    let mut assignments = vec![usize::MAX; sample_cnt];
    for (cluster_idx, cluster) in clusters.iter().enumerate() {
        for point_idx in cluster.iter() {
            match assignments.get_mut(point_idx) {
                Some(a) if *a == usize::MAX => *a = cluster_idx,
                Some(_) => return Err(GraspError::InternalConsistency(
                    format!("point {} is assigned to more than one cluster", point_idx))),
                None => return Err(GraspError::InternalConsistency(
                    format!("cluster {} references unknown point {}", cluster_idx, point_idx)))
            }
        }
    }
    if let Some(point_idx) = assignments.iter().position(|&a| a == usize::MAX) {
        return Err(GraspError::InternalConsistency(format!("point {} is not assigned to any cluster", point_idx)));
    }
    Ok(assignments)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn centroids_are_means_f32() { centroids_are_means::<f32>(1e-5); }
    #[test] fn centroids_are_means_f64() { centroids_are_means::<f64>(1e-12); }

    fn centroids_are_means<T: Primitive>(max_diff: T) {
        let samples = [0.0, 0.0, 2.0, 4.0, 4.0, 2.0, 10.0, 10.0, 11.0, 13.0]
            .iter().map(|&v| T::from(v).unwrap()).collect();
        let points = PointSet::new(samples, 5, 2).unwrap();
        let clusters = vec![Cluster::with_members(vec![0, 1, 2]), Cluster::with_members(vec![4, 3])];

        let centroids = compute_all(&points, &clusters).unwrap();
        assert_eq!(centroids.len(), 2);
        let should = [2.0, 2.0, 10.5, 11.5];
        for (c, s) in centroids.as_slice().iter().zip(should.iter()) {
            assert_approx_eq!(*c, T::from(*s).unwrap(), max_diff);
        }
    }

    #[test]
    fn empty_cluster_has_no_centroid() {
        let points = PointSet::new(vec![1.0f64, 2.0], 2, 1).unwrap();
        let clusters = vec![Cluster::with_members(vec![0, 1]), Cluster::new()];
        assert!(matches!(compute_all(&points, &clusters), Err(GraspError::InternalConsistency(_))));
    }

    #[test]
    fn cluster_membership_shifts_on_remove() {
        let mut cluster = Cluster::with_members(vec![4, 7, 9]);
        assert_eq!(cluster.remove(1), 7);
        assert_eq!(cluster.get(1), 9);
        cluster.push(7);
        assert_eq!(cluster.members(), &[4, 9, 7]);
    }

    #[test]
    fn assignments_detect_broken_partitions() {
        let clusters = vec![Cluster::with_members(vec![0, 2]), Cluster::with_members(vec![1])];
        assert_eq!(assignments(3, &clusters).unwrap(), vec![0, 1, 0]);

        let duplicate = vec![Cluster::with_members(vec![0, 1]), Cluster::with_members(vec![1, 2])];
        assert!(matches!(assignments(3, &duplicate), Err(GraspError::InternalConsistency(_))));

        let missing = vec![Cluster::with_members(vec![0]), Cluster::with_members(vec![2])];
        assert!(matches!(assignments(3, &missing), Err(GraspError::InternalConsistency(_))));
    }
}
