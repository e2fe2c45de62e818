//! Complete directed cost graph over the depot and its clients.

use crate::distance::DistanceMatrix;
use crate::error::CvrpError;

use super::node::{Node, DEPOT};
use super::solution::tour_edges;

/// Immutable cost graph over `{depot} ∪ clients`.
///
/// Nodes live in an arena indexed by id, with the depot at index 0. Every
/// ordered pair of distinct nodes has a cost unless the matrix marks the
/// edge as missing.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemGraph};
///
/// let graph = ProblemGraph::euclidean(vec![
///     Node::depot(0.0, 0.0),
///     Node::client(1, 10.0, 0.0, 5.0),
///     Node::client(2, 20.0, 0.0, 5.0),
/// ])
/// .unwrap();
/// assert_eq!(graph.num_clients(), 2);
/// assert_eq!(graph.cost(1, 2), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemGraph {
    nodes: Vec<Node>,
    costs: DistanceMatrix,
}

impl ProblemGraph {
    /// Creates a graph from nodes and an explicit cost matrix.
    ///
    /// Fails with [`CvrpError::InvalidProblem`] unless node 0 is the depot,
    /// ids match arena positions, at least one client exists, demands are
    /// finite and non-negative, and costs are non-negative.
    pub fn new(nodes: Vec<Node>, costs: DistanceMatrix) -> Result<Self, CvrpError> {
        match nodes.first() {
            Some(depot) if depot.is_depot() && depot.demand() == 0.0 => {}
            _ => {
                return Err(CvrpError::InvalidProblem(
                    "node 0 must be the depot with zero demand".into(),
                ))
            }
        }
        if nodes.len() < 2 {
            return Err(CvrpError::InvalidProblem("graph has no clients".into()));
        }
        for (idx, node) in nodes.iter().enumerate() {
            if node.id() != idx {
                return Err(CvrpError::InvalidProblem(format!(
                    "node at position {} has id {}",
                    idx,
                    node.id()
                )));
            }
            if !node.demand().is_finite() || node.demand() < 0.0 {
                return Err(CvrpError::InvalidProblem(format!(
                    "client {} has invalid demand {}",
                    idx,
                    node.demand()
                )));
            }
        }
        if costs.size() != nodes.len() {
            return Err(CvrpError::InvalidProblem(format!(
                "cost matrix size {} does not match {} nodes",
                costs.size(),
                nodes.len()
            )));
        }
        if costs.values().iter().any(|c| c.is_nan() || *c < 0.0) {
            return Err(CvrpError::InvalidProblem(
                "edge costs must be non-negative".into(),
            ));
        }
        Ok(Self { nodes, costs })
    }

    /// Creates a graph with rounded Euclidean costs between node positions.
    pub fn euclidean(nodes: Vec<Node>) -> Result<Self, CvrpError> {
        let costs = DistanceMatrix::from_nodes(&nodes);
        Self::new(nodes, costs)
    }

    /// All nodes, depot first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node at the given index.
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// The underlying cost matrix.
    pub fn costs(&self) -> &DistanceMatrix {
        &self.costs
    }

    /// Number of nodes including the depot.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a valid graph holds a depot and at least one client.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of clients (excluding the depot).
    pub fn num_clients(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Client ids in ascending order.
    pub fn clients(&self) -> impl Iterator<Item = usize> {
        1..self.nodes.len()
    }

    /// Demand of a node.
    pub fn demand(&self, id: usize) -> f64 {
        self.nodes[id].demand()
    }

    /// Cost of the edge `from → to`.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs.get(from, to)
    }

    /// Returns `true` if the edge `from → to` exists.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.costs.has_edge(from, to)
    }

    /// Out-neighbors of `v` in ascending id order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&u| self.has_edge(v, u))
    }

    /// Cost of the depot round trip `depot → client → depot`.
    pub fn round_trip(&self, client: usize) -> f64 {
        self.cost(DEPOT, client) + self.cost(client, DEPOT)
    }

    /// Cost of a closed tour starting and ending at the depot.
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        tour_edges(tour).map(|(u, v)| self.cost(u, v)).sum()
    }
}
