//! Truck moves and the solution graph they form.

use serde::{Deserialize, Serialize};

use super::node::{Node, DEPOT};
use super::ProblemGraph;
use crate::error::CvrpError;

/// One committed directed edge of a truck's route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruckMove {
    /// Node the truck left.
    pub src: usize,
    /// Node the truck arrived at.
    pub dest: usize,
    /// Cost of the edge `src → dest`.
    pub cost: f64,
}

/// Directed edges of a tour: `depot → tour[0] → … → tour[n-1] → depot`.
///
/// An empty tour has no edges.
pub fn tour_edges(tour: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let edges = if tour.is_empty() { 0 } else { tour.len() + 1 };
    let stops = std::iter::once(DEPOT)
        .chain(tour.iter().copied())
        .chain(std::iter::once(DEPOT));
    stops.clone().zip(stops.skip(1)).take(edges)
}

/// A set of depot-rooted tours stored as a directed graph.
///
/// Nodes are the problem's nodes (carrying demand) and edges are exactly the
/// committed [`TruckMove`]s, in commit order. In a well-formed solution every
/// client has in- and out-degree 1 and the depot's degree equals the number
/// of tours.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemGraph, Solution};
///
/// let graph = ProblemGraph::euclidean(vec![
///     Node::depot(0.0, 0.0),
///     Node::client(1, 1.0, 0.0, 10.0),
///     Node::client(2, 2.0, 0.0, 10.0),
/// ])
/// .unwrap();
/// let sol = Solution::from_tours(&graph, &[vec![1, 2]]);
/// assert_eq!(sol.num_tours(), 1);
/// assert_eq!(sol.route_len(), 4.0);
/// assert_eq!(sol.tours(), vec![vec![1, 2]]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SolutionData")]
pub struct Solution {
    nodes: Vec<Node>,
    moves: Vec<TruckMove>,
    #[serde(skip)]
    outgoing: Vec<Vec<usize>>,
    #[serde(skip)]
    in_degree: Vec<usize>,
}

/// Serialized form of a [`Solution`]; the adjacency indexes are rebuilt on
/// load.
#[derive(Deserialize)]
struct SolutionData {
    nodes: Vec<Node>,
    moves: Vec<TruckMove>,
}

impl TryFrom<SolutionData> for Solution {
    type Error = CvrpError;

    fn try_from(data: SolutionData) -> Result<Self, Self::Error> {
        let n = data.nodes.len();
        let mut solution = Solution::new(data.nodes);
        for mv in data.moves {
            if mv.src >= n || mv.dest >= n {
                return Err(CvrpError::InvalidProblem(format!(
                    "move {} -> {} references a node outside 0..{}",
                    mv.src, mv.dest, n
                )));
            }
            solution.add_move(mv);
        }
        Ok(solution)
    }
}

impl Solution {
    /// Creates a solution with the given nodes and no edges.
    pub fn new(nodes: Vec<Node>) -> Self {
        let n = nodes.len();
        Self {
            nodes,
            moves: Vec::new(),
            outgoing: vec![Vec::new(); n],
            in_degree: vec![0; n],
        }
    }

    /// Creates an empty solution over the nodes of a graph.
    pub fn for_graph(graph: &ProblemGraph) -> Self {
        Self::new(graph.nodes().to_vec())
    }

    /// Builds a solution from client sequences, closing each at the depot.
    ///
    /// Empty sequences are skipped.
    pub fn from_tours(graph: &ProblemGraph, tours: &[Vec<usize>]) -> Self {
        let mut solution = Self::for_graph(graph);
        for (src, dest) in tours.iter().flat_map(|t| tour_edges(t)) {
            solution.add_move(TruckMove {
                src,
                dest,
                cost: graph.cost(src, dest),
            });
        }
        solution
    }

    /// Records a committed move.
    pub fn add_move(&mut self, mv: TruckMove) {
        self.outgoing[mv.src].push(self.moves.len());
        self.in_degree[mv.dest] += 1;
        self.moves.push(mv);
    }

    /// All moves in commit order.
    pub fn moves(&self) -> &[TruckMove] {
        &self.moves
    }

    /// All nodes, depot first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes including the depot.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Demand of a node.
    pub fn demand(&self, id: usize) -> f64 {
        self.nodes[id].demand()
    }

    /// Outgoing moves of a node, in commit order.
    pub fn successors(&self, id: usize) -> impl Iterator<Item = &TruckMove> + '_ {
        self.outgoing[id].iter().map(move |&i| &self.moves[i])
    }

    /// Number of outgoing moves.
    pub fn out_degree(&self, id: usize) -> usize {
        self.outgoing[id].len()
    }

    /// Number of incoming moves.
    pub fn in_degree(&self, id: usize) -> usize {
        self.in_degree[id]
    }

    /// Number of tours (depot out-degree).
    pub fn num_tours(&self) -> usize {
        self.out_degree(DEPOT)
    }

    /// Total cost of all moves.
    pub fn route_len(&self) -> f64 {
        self.moves.iter().map(|m| m.cost).sum()
    }

    /// Client sequences of every tour, in the order tours leave the depot.
    ///
    /// Each chain follows the first successor of every node; a chain that
    /// does not return to the depot is cut after visiting every node once.
    pub fn tours(&self) -> Vec<Vec<usize>> {
        self.successors(DEPOT)
            .map(|first| {
                let mut tour = Vec::new();
                let mut current = first.dest;
                while current != DEPOT && tour.len() < self.nodes.len() {
                    tour.push(current);
                    match self.successors(current).next() {
                        Some(mv) => current = mv.dest,
                        None => break,
                    }
                }
                tour
            })
            .collect()
    }
}
