use crate::{
    clustering::{self, Cluster}, inits::randomizedgreedy, memory::*, objective,
    variants::{self, LocalSearchOutcome, SearchStatus}, Result
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::{cell::RefCell, time::Duration};

pub type ConstructionDoneCallbackFn<'a, T> = &'a dyn Fn(usize, &[Cluster], T);
pub type RestartDoneCallbackFn<'a, T> = &'a dyn Fn(&RestartSummary<T>, T);

/// This is a structure holding the configuration of a GRASP run: the random number generator, the
/// amount of restarts, the local search iteration cap, and a couple of callbacks that can be set to
/// get status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`GraspConfigBuilder`].
pub struct GraspConfig<'a, T: Primitive> {
    /// Callback that is called once the greedy construction of a restart finished
    /// ## Arguments
    /// - **restart**: Number of the current restart (starting at 0)
    /// - **clusters**: The greedy solution, before the local search
    /// - **greedy_cost**: Cost of the greedy solution
    pub(crate) construction_done: ConstructionDoneCallbackFn<'a, T>,
    /// Callback that is called after each restart
    /// ## Arguments
    /// - **summary**: [`RestartSummary`] of the finished restart
    /// - **best_cost**: Cost of the best solution found so far (including this restart)
    pub(crate) restart_done: RestartDoneCallbackFn<'a, T>,
    /// Random number generator shared by all restarts
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Seed of **rnd**, if it was created through [`GraspConfigBuilder::seed`]
    pub(crate) seed: Option<u64>,
    pub(crate) restarts: usize,
    pub(crate) max_iterations: usize
}
impl<'a, T: Primitive> Default for GraspConfig<'a, T> {
    fn default() -> Self {
        Self {
            construction_done: &|_,_,_| {},
            restart_done: &|_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            seed: None,
            restarts: 25,
            max_iterations: variants::DEFAULT_MAX_ITERATIONS
        }
    }
}
impl<'a, T: Primitive> GraspConfig<'a, T> {
    /// Use the [`GraspConfigBuilder`] to build a [`GraspConfig`] instance.
    pub fn build() -> GraspConfigBuilder<'a, T> {
        GraspConfigBuilder { config: GraspConfig::default() }
    }
    pub fn restarts(&self) -> usize { self.restarts }
    pub fn max_iterations(&self) -> usize { self.max_iterations }
    pub fn seed(&self) -> Option<u64> { self.seed }
}
impl<'a, T: Primitive> std::fmt::Debug for GraspConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraspConfig")
            .field("seed", &self.seed)
            .field("restarts", &self.restarts)
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}

pub struct GraspConfigBuilder<'a, T: Primitive> {
    config: GraspConfig<'a, T>
}
impl<'a, T: Primitive> GraspConfigBuilder<'a, T> {
    /// Set the callback that should be called after each greedy construction, before its local search.
    pub fn construction_done(mut self, construction_done: ConstructionDoneCallbackFn<'a, T>) -> Self {
        self.config.construction_done = construction_done; self
    }
    /// Set the callback that should be called after each restart.
    pub fn restart_done(mut self, restart_done: RestartDoneCallbackFn<'a, T>) -> Self {
        self.config.restart_done = restart_done; self
    }
    /// Set the random number generator that should be used in the calculation.
    /// For deterministically repeatable results, prefer [`GraspConfigBuilder::seed`].
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd));
        self.config.seed = None;
        self
    }
    /// Use a [`ChaCha8Rng`] seeded with **seed**. Identical seeds (and inputs) yield identical results.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.rnd = Box::new(RefCell::new(ChaCha8Rng::seed_from_u64(seed)));
        self.config.seed = Some(seed);
        self
    }
    /// Set the amount of independent GRASP iterations.
    /// ## Default
    /// `25`
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.config.restarts = restarts; self
    }
    /// Set the maximum amount of move attempts per local search.
    /// ## Default
    /// `10000`
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> GraspConfig<'a, T> { self.config }
}


/// Summary of a single GRASP restart.
///
/// ## Fields
/// - **restart**: Number of the restart (starting at 0)
/// - **greedy_cost**: Cost right after the randomized greedy construction
/// - **refined_cost**: Cost after the local search
/// - **status**: How the local search terminated
/// - **attempts**: Amount of moves the local search evaluated
/// - **moves**: Amount of moves the local search accepted
/// - **improved**: Whether this restart replaced the best solution found so far
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestartSummary<T: Primitive> {
    pub restart: usize,
    pub greedy_cost: T,
    pub refined_cost: T,
    pub status: SearchStatus,
    pub attempts: usize,
    pub moves: usize,
    pub improved: bool
}

/// Result of a GRASP run, describing the best solution over all restarts.
///
/// ## Fields
/// - **k**: The amount of clusters that were requested
/// - **cost**: Total sum of squared distances from all points to their centroid (after local search)
/// - **initial_cost**: Greedy cost of the restart that produced the best solution (before local search)
/// - **clusters**: Point indices of every cluster
/// - **centroids**: Centroid of every cluster, in the order of **clusters**
/// - **assignments**: Vector mapping each point to its cluster
/// - **restart_history**: One [`RestartSummary`] per restart, in execution order
/// - **elapsed**: Wall-clock duration of the whole run
/// - **seed**: Seed of the random number generator, when the run was seeded
#[derive(Clone, Debug)]
pub struct GraspState<T: Primitive> {
    pub k: usize,
    pub cost: T,
    pub initial_cost: T,
    pub clusters: Vec<Cluster>,
    pub centroids: Centroids<T>,
    pub assignments: Vec<usize>,
    pub restart_history: Vec<RestartSummary<T>>,
    pub elapsed: Duration,
    pub seed: Option<u64>
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the points you want to cluster. The primitive type of
/// the points will be the type used internally for all calculations, as well as for the costs in
/// the returned [`GraspState`].
///
/// Besides the complete run ([`Grasp::optimize`]), the single building blocks of GRASP are exposed
/// as well: construction, centroid calculation, the objective function and the local search.
pub struct Grasp<T: Primitive> {
    points: PointSet<T>
}
impl<T: Primitive> Grasp<T> {
    /// Create a new instance of the [`Grasp`] structure.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<Self> {
        Ok(Self::from_points(PointSet::new(samples, sample_cnt, sample_dims)?))
    }

    pub fn from_points(points: PointSet<T>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &PointSet<T> { &self.points }

    /// GRASP: randomized greedy construction followed by first-improvement local search, repeated
    /// for the configured amount of restarts, keeping the best solution.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to build (`1 <= k <= sample_cnt`)
    /// - **threshold**: Width of the restricted candidate list, within `[0, 1]` (`0` = pure greedy)
    /// - **config**: [`GraspConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`GraspState`], describing the best solution.
    ///
    /// ## Example
    /// ```rust
    /// use grasp::*;
    /// fn main() {
    ///     let (sample_cnt, sample_dims, k) = (200, 2, 4);
    ///
    ///     // Generate some random data
    ///     let mut samples = vec![0.0f64;sample_cnt * sample_dims];
    ///     samples.iter_mut().for_each(|v| *v = rand::random());
    ///
    ///     let grasp = Grasp::new(samples, sample_cnt, sample_dims).unwrap();
    ///     let conf = GraspConfig::build().seed(1337).build();
    ///     let result = grasp.optimize(k, 0.3, &conf).unwrap();
    ///
    ///     println!("Centroids: {:?}", result.centroids);
    ///     println!("Cluster-Assignments: {:?}", result.assignments);
    ///     println!("Cost: {} (greedy: {})", result.cost, result.initial_cost);
    /// }
    /// ```
    pub fn optimize<'a>(&self, k: usize, threshold: T, config: &GraspConfig<'a, T>) -> Result<GraspState<T>> {
        variants::grasp::calculate(&self.points, k, threshold, config)
    }

    /// Randomized greedy construction of a single solution.
    ///
    /// ## Description
    /// Cluster seeds are drawn by a randomized farthest-first traversal, then the remaining points
    /// are visited in random order and appended to a cluster drawn from those whose running mean
    /// is within **threshold** (relative to the spread between nearest and farthest) of the nearest.
    pub fn construct(&self, k: usize, threshold: T, rnd: &mut dyn RngCore) -> Result<Vec<Cluster>> {
        randomizedgreedy::build(&self.points, rnd, k, threshold)
    }

    /// Element-wise mean of every cluster, in the order of **clusters**.
    pub fn compute_centroids(&self, clusters: &[Cluster]) -> Result<Centroids<T>> {
        clustering::compute_all(&self.points, clusters)
    }

    /// Sum of squared distances of all points to the centroid of their cluster.
    pub fn total_cost(&self, clusters: &[Cluster], centroids: &Centroids<T>) -> T {
        objective::total_cost(&self.points, clusters, centroids)
    }

    /// Change of [`Grasp::total_cost`] if the point at **position** in cluster **source** moved to
    /// cluster **target**. Negative values are improvements, `target == source` yields zero.
    ///
    /// ## Panics
    /// If one of the indices is out of range, or if **centroids** holds fewer entries than **clusters**.
    pub fn move_delta(&self, clusters: &[Cluster], centroids: &Centroids<T>, target: usize, source: usize, position: usize) -> T {
        objective::move_delta(&self.points, clusters, centroids, target, source, position)
    }

    /// First-improvement local search on a given solution, mutating **clusters** and **centroids**.
    ///
    /// ## Errors
    /// [`crate::GraspError::InvalidConfiguration`] if **centroids** does not hold one centroid of the points'
    /// dimension per cluster.
    pub fn refine(&self, clusters: &mut [Cluster], centroids: &mut Centroids<T>, initial_cost: T,
                  max_iterations: usize) -> Result<LocalSearchOutcome<T>> {
        variants::localsearch::refine(&self.points, clusters, centroids, initial_cost, max_iterations)
    }
}
