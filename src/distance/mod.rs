//! Edge costs between locations.
//!
//! Provides a dense cost matrix for routing problems.

mod matrix;

pub use matrix::DistanceMatrix;
