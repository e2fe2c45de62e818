//! Problem definition consumed by the solvers.

use crate::error::CvrpError;

use super::ProblemGraph;

/// A CVRP instance: cost graph, truck capacity, and per-tour route limit.
///
/// Immutable for the duration of a solve and safe to share across threads.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemGraph, ProblemDefinition};
///
/// let graph = ProblemGraph::euclidean(vec![
///     Node::depot(0.0, 0.0),
///     Node::client(1, 3.0, 4.0, 10.0),
/// ])
/// .unwrap();
/// let problem = ProblemDefinition::new("tiny", graph, 100.0)
///     .unwrap()
///     .with_route_limit(50.0)
///     .unwrap();
/// assert_eq!(problem.truck_capacity(), 100.0);
/// assert_eq!(problem.truck_route_limit(), 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemDefinition {
    graph: ProblemGraph,
    truck_capacity: f64,
    truck_route_limit: f64,
    instance_name: String,
}

impl ProblemDefinition {
    /// Creates a problem without a route limit.
    ///
    /// Fails if the capacity is not a positive finite number.
    pub fn new(
        instance_name: impl Into<String>,
        graph: ProblemGraph,
        truck_capacity: f64,
    ) -> Result<Self, CvrpError> {
        if !truck_capacity.is_finite() || truck_capacity <= 0.0 {
            return Err(CvrpError::InvalidProblem(format!(
                "truck capacity must be positive, got {}",
                truck_capacity
            )));
        }
        Ok(Self {
            graph,
            truck_capacity,
            truck_route_limit: f64::INFINITY,
            instance_name: instance_name.into(),
        })
    }

    /// Sets the maximum travel distance of a single tour.
    ///
    /// `f64::INFINITY` removes the limit.
    pub fn with_route_limit(mut self, limit: f64) -> Result<Self, CvrpError> {
        if limit.is_nan() || limit <= 0.0 {
            return Err(CvrpError::InvalidProblem(format!(
                "route limit must be positive, got {}",
                limit
            )));
        }
        self.truck_route_limit = limit;
        Ok(self)
    }

    /// The cost graph.
    pub fn graph(&self) -> &ProblemGraph {
        &self.graph
    }

    /// Truck capacity.
    pub fn truck_capacity(&self) -> f64 {
        self.truck_capacity
    }

    /// Maximum travel distance per tour (`f64::INFINITY` if unlimited).
    pub fn truck_route_limit(&self) -> f64 {
        self.truck_route_limit
    }

    /// Instance name, used for logging and reporting.
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }
}
