use crate::{memory::*, GraspState};
use std::fmt;

/// Human-readable report of a finished GRASP run.
///
/// ## Example
/// ```rust
/// use grasp::*;
/// let grasp = Grasp::new(vec![0.0f64, 0.1, 0.2, 5.0, 5.1, 5.2], 6, 1).unwrap();
/// let state = grasp.optimize(2, 0.0, &GraspConfig::build().seed(3).restarts(2).build()).unwrap();
/// println!("{}", Report::new("inline", grasp.points(), &state));
/// ```
pub struct Report<'a, T: Primitive> {
    source: &'a str,
    points: &'a PointSet<T>,
    state: &'a GraspState<T>
}
impl<'a, T: Primitive> Report<'a, T> {
    pub fn new(source: &'a str, points: &'a PointSet<T>, state: &'a GraspState<T>) -> Self {
        Self { source, points, state }
    }
}

struct Features<'a, T>(&'a [T]);
impl<'a, T: Primitive> fmt::Display for Features<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, v) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", v)?;
        }
        write!(f, ")")
    }
}

impl<'a, T: Primitive> fmt::Display for Report<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        writeln!(f, "Dataset:       {}", self.source)?;
        writeln!(f, "Points:        {} (dimension {})", self.points.len(), self.points.dims())?;
        writeln!(f, "Clusters:      {}", state.k)?;
        match state.seed {
            Some(seed) => writeln!(f, "Seed:          {}", seed)?,
            None => writeln!(f, "Seed:          (unseeded)")?
        }
        writeln!(f, "Restarts:      {}", state.restart_history.len())?;
        writeln!(f, "Initial cost:  {:.6}", state.initial_cost)?;
        writeln!(f, "Final cost:    {:.6}", state.cost)?;
        writeln!(f, "Elapsed:       {} ms", state.elapsed.as_millis())?;
        for (idx, (cluster, centroid)) in state.clusters.iter().zip(state.centroids.iter()).enumerate() {
            writeln!(f)?;
            writeln!(f, "Cluster {} ({} points), centroid {}", idx, cluster.len(), Features(centroid))?;
            let members: Vec<String> = cluster.members().iter().map(|m| m.to_string()).collect();
            writeln!(f, "  members: {}", members.join(" "))?;
        }
        Ok(())
    }
}
