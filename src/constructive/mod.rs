//! Constructive heuristics for building CVRP solutions.
//!
//! - [`GreedySolver`] — Nearest-feasible-neighbor construction, O(n²)

mod greedy;

pub use greedy::GreedySolver;
