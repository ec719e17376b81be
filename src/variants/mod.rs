pub(crate) mod grasp;
pub(crate) mod localsearch;

pub use localsearch::{LocalSearchOutcome, SearchStatus, DEFAULT_MAX_ITERATIONS, SIZE_FLOOR};
