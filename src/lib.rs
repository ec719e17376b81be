//! # grasp - API documentation
//!
//! Grasp is a small rust library for partitional clustering: it splits N points into K groups,
//! minimizing the sum of squared Euclidean distances between every point and the centroid of its
//! group, using the GRASP metaheuristic (Greedy Randomized Adaptive Search Procedure).
//!
//! ## Algorithm
//! Each of the (by default 25) restarts consists of two phases:
//! - **Construction**: A randomized greedy assignment. Cluster seeds are chosen by a randomized
//!   farthest-first traversal, then every other point is appended to one of the clusters whose
//!   running mean is close to the point. How close is controlled by the `threshold` ∈ `[0, 1]`,
//!   which bounds the restricted candidate list (`0` = pure greedy, `1` = uniformly random).
//! - **Local search**: First-improvement hill climbing that moves single points between clusters
//!   while the cost strictly decreases. Clusters with 3 or fewer members are never used as source
//!   of a move, and the amount of evaluated moves is capped (by default at 10000).
//!
//! The best solution over all restarts is returned. All restarts share one random number generator,
//! so a seeded run is fully reproducible.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use grasp::*;
//!
//! fn main() {
//!     let (sample_cnt, sample_dims, k, threshold) = (500, 3, 4, 0.3);
//!
//!     // Generate some random data
//!     let mut samples = vec![0.0f64;sample_cnt * sample_dims];
//!     samples.iter_mut().for_each(|v| *v = rand::random());
//!
//!     let grasp = Grasp::new(samples, sample_cnt, sample_dims).unwrap();
//!     let result = grasp.optimize(k, threshold, &GraspConfig::build().seed(42).build()).unwrap();
//!
//!     println!("Centroids: {:?}", result.centroids);
//!     println!("Cluster-Assignments: {:?}", result.assignments);
//!     println!("Cost: {} (greedy: {})", result.cost, result.initial_cost);
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use grasp::*;
//!
//! fn main() {
//!     let (sample_cnt, sample_dims, k) = (500, 3, 4);
//!
//!     let mut samples = vec![0.0f64;sample_cnt * sample_dims];
//!     samples.iter_mut().for_each(|v| *v = rand::random());
//!
//!     let conf = GraspConfig::build()
//!         .seed(7)
//!         .restarts(10)
//!         .restart_done(&|s, best|
//!             println!("Restart {} - Cost: {:.2} -> {:.2} ({:?}) | Best: {:.2}",
//!                 s.restart, s.greedy_cost, s.refined_cost, s.status, best))
//!         .build();
//!
//!     let grasp = Grasp::new(samples, sample_cnt, sample_dims).unwrap();
//!     let result = grasp.optimize(k, 0.5, &conf).unwrap();
//!     println!("Cost: {}", result.cost);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`Grasp`] struct, taking over the points into its ownership.
//! Calling [`Grasp::optimize`] does not mutate it; the state of a run lives in the returned
//! [`GraspState`]. The building blocks of a run (construction, centroids, cost, local search) are
//! available as separate methods on [`Grasp`] as well.
//!
//! Points can also be read from delimited text files using [`loader`], and a finished run can be
//! printed using [`Report`].

#[macro_use] mod helpers;
mod error;
mod memory;
mod api;
mod clustering;
mod objective;
mod inits;
mod variants;
pub mod loader;
mod report;

pub use api::{
    ConstructionDoneCallbackFn, Grasp, GraspConfig, GraspConfigBuilder, GraspState, RestartDoneCallbackFn, RestartSummary
};
pub use clustering::Cluster;
pub use error::{GraspError, Result};
pub use memory::{Centroids, PointSet, Primitive};
pub use report::Report;
pub use variants::{LocalSearchOutcome, SearchStatus, DEFAULT_MAX_ITERATIONS, SIZE_FLOOR};
