use crate::{GraspError, Result};
use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp}, iter::Sum, ops::{AddAssign, SubAssign}
};

pub trait Primitive: AddAssign + Sum + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Lossless for every count this crate deals with; saturates instead of failing otherwise.
#[inline(always)]
pub(crate) fn from_usize<T: Primitive>(v: usize) -> T {
    <T as NumCast>::from(v).unwrap_or_else(T::max_value)
}


/// Immutable, row-major storage of all points that take part in a clustering run.
///
/// Points are identified by their row index. Clusters never own points, they only hold indices
/// into this structure.
#[derive(Clone, Debug)]
pub struct PointSet<T: Primitive> {
    samples: Vec<T>,
    sample_cnt: usize,
    sample_dims: usize
}
impl<T: Primitive> PointSet<T> {
    /// Create a new [`PointSet`].
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    ///
    /// ## Errors
    /// [`GraspError::DataFormat`] if the vector length does not match, if **sample_dims** is zero,
    /// if any value is not finite or if the points are spread so far apart that squared distances
    /// (summed over all points) would overflow **T**.
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<Self> {
        if sample_dims == 0 {
            return Err(GraspError::data_format(0, "points need at least one feature"));
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(GraspError::data_format(0, format!(
                "expected {} values for {} points of dimension {}, got {}",
                sample_cnt * sample_dims, sample_cnt, sample_dims, samples.len())));
        }
        if let Some(pos) = samples.iter().position(|v| !v.is_finite()) {
            return Err(GraspError::data_format(0, format!(
                "feature {} of point {} is not finite", pos % sample_dims, pos / sample_dims)));
        }
        // Squared diagonal of the bounding box bounds every point-to-point and point-to-mean distance
        let diagonal: T = (0..sample_dims)
            .map(|d| {
                let (lo, hi) = samples.iter().skip(d).step_by(sample_dims)
                    .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| (lo.min(v), hi.max(v)));
                (hi - lo) * (hi - lo)
            })
            .sum();
        if sample_cnt > 0 && !(diagonal * from_usize::<T>(sample_cnt)).is_finite() {
            return Err(GraspError::data_format(0, format!(
                "points are spread too far apart, squared distances overflow {}", std::any::type_name::<T>())));
        }
        Ok(Self { samples, sample_cnt, sample_dims })
    }

    pub fn len(&self) -> usize { self.sample_cnt }
    pub fn is_empty(&self) -> bool { self.sample_cnt == 0 }
    pub fn dims(&self) -> usize { self.sample_dims }

    /// Feature vector of the point with index **idx**.
    #[inline(always)]
    pub fn point(&self, idx: usize) -> &[T] {
        &self.samples[idx * self.sample_dims..(idx + 1) * self.sample_dims]
    }

    pub fn iter(&self) -> std::slice::ChunksExact<'_, T> {
        self.samples.chunks_exact(self.sample_dims)
    }
}


/// Row-major centroid storage: [<centroid0>,<centroid1>,<centroid2>,...]
#[derive(Clone, Debug, PartialEq)]
pub struct Centroids<T: Primitive> {
    values: Vec<T>,
    dims: usize
}
impl<T: Primitive> Centroids<T> {
    pub(crate) fn new(k: usize, dims: usize) -> Self {
        Self { values: vec![T::zero(); k * dims], dims }
    }

    /// Amount of centroids.
    pub fn len(&self) -> usize { self.values.len() / self.dims }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
    pub fn dims(&self) -> usize { self.dims }

    #[inline(always)]
    pub fn get(&self, idx: usize) -> &[T] {
        &self.values[idx * self.dims..(idx + 1) * self.dims]
    }

    pub fn iter(&self) -> std::slice::ChunksExact<'_, T> {
        self.values.chunks_exact(self.dims)
    }

    pub fn as_slice(&self) -> &[T] { &self.values }

    /// Replace the whole centroid **idx** with the values yielded by **src**.
    pub(crate) fn set_nth_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.values.iter_mut().skip(self.dims * idx).take(self.dims)
            .zip(src)
            .for_each(|(c,s)| *c = s);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_access() {
        let points = PointSet::new(vec![0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0], 3, 2).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points.dims(), 2);
        assert_eq!(points.point(1), &[2.0, 3.0]);
        assert_eq!(points.iter().last().unwrap(), &[4.0, 5.0]);
    }

    #[test]
    fn rejects_malformed_samples() {
        assert!(matches!(PointSet::new(vec![0.0f32; 5], 3, 2), Err(GraspError::DataFormat { .. })));
        assert!(matches!(PointSet::new(Vec::<f64>::new(), 0, 0), Err(GraspError::DataFormat { .. })));
        assert!(matches!(PointSet::new(vec![0.0, f64::NAN], 1, 2), Err(GraspError::DataFormat { .. })));
        assert!(matches!(PointSet::new(vec![f32::INFINITY, 0.0], 2, 1), Err(GraspError::DataFormat { .. })));
    }

    #[test]
    fn rejects_overflowing_spread() {
        let huge = vec![-1e200f64, -0.9e200, -0.8e200, 0.8e200, 0.9e200, 1e200];
        assert!(matches!(PointSet::new(huge, 6, 1), Err(GraspError::DataFormat { .. })));
        let huge = vec![-3e19f32, -2e19, 2e19, 3e19];
        assert!(matches!(PointSet::new(huge, 4, 1), Err(GraspError::DataFormat { .. })));
        // Same shape, one dimension at a time far out
        let huge = vec![0.0f64, 1e160, 0.0, -1e160];
        assert!(matches!(PointSet::new(huge, 2, 2), Err(GraspError::DataFormat { .. })));

        assert!(PointSet::new(vec![-1e100f64, 1e100], 2, 1).is_ok());
        assert!(PointSet::new(vec![-1e9f32, 1e9], 2, 1).is_ok());
    }

    #[test]
    fn centroids_are_replaced_wholesale() {
        let mut centroids = Centroids::<f64>::new(3, 2);
        centroids.set_nth_from_iter(1, [7.0, 8.0].iter().cloned());
        assert_eq!(centroids.len(), 3);
        assert_eq!(centroids.get(0), &[0.0, 0.0]);
        assert_eq!(centroids.get(1), &[7.0, 8.0]);
        assert_eq!(centroids.as_slice(), &[0.0, 0.0, 7.0, 8.0, 0.0, 0.0]);
    }
}
