//! # u-cvrp
//!
//! Capacitated vehicle routing library: a truck feasibility simulator, a
//! greedy constructor, an ant colony solver, and an independent solution
//! validator.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, ProblemGraph, ProblemDefinition, Solution)
//! - [`distance`] — Edge cost matrix
//! - [`evaluation`] — Truck simulator and solution validator
//! - [`constructive`] — Greedy nearest-neighbor construction
//! - [`aco`] — Ant Colony Optimization
//! - [`solver`] — Common solver interface
//! - [`error`] — Error types

pub mod aco;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod solver;
