//! Ant Colony Optimization for the CVRP.
//!
//! - [`AntColonySolver`] — iterative multi-ant construction with pheromone learning
//! - [`AcoConfig`] — solver parameters
//! - [`CandidateLists`] — per-node nearest-neighbor shortlists
//! - [`PheromoneMap`] — per-edge pheromone trails
//! - [`permute_short_tours`] — exact re-ordering of tours with at most
//!   [`MAX_PERMUTED_TOUR_LEN`] clients

mod candidates;
mod colony;
mod config;
mod pheromone;
mod refine;

pub use candidates::CandidateLists;
pub use colony::{AcoOutcome, AntColonySolver};
pub use config::{AcoConfig, AntCount};
pub use pheromone::PheromoneMap;
pub use refine::{permute_short_tours, MAX_PERMUTED_TOUR_LEN};
