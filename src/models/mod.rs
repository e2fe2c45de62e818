//! Domain model types for capacitated vehicle routing.
//!
//! Nodes live in an arena with the depot at index 0. A [`ProblemGraph`]
//! holds the nodes and their edge costs, a [`ProblemDefinition`] adds the
//! truck constraints, and a [`Solution`] records the committed truck moves.

mod graph;
mod node;
mod problem;
mod solution;

pub use graph::ProblemGraph;
pub use node::{Node, DEPOT};
pub use problem::ProblemDefinition;
pub use solution::{tour_edges, Solution, TruckMove};
