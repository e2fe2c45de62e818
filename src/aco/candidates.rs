//! Nearest-neighbor candidate lists.
//!
//! Restricting each decision to a node's closest neighbors keeps the
//! per-step work bounded on larger instances. The restriction only affects
//! speed: when every candidate is already visited, the colony falls back to
//! the full neighborhood.

use crate::models::{ProblemGraph, DEPOT};

/// Per-node shortlist of out-neighbors, computed once per solve.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateLists {
    lists: Vec<Vec<usize>>,
}

impl CandidateLists {
    /// Builds the lists for `graph`.
    ///
    /// With `fraction >= 1` every neighbor is a candidate, in ascending id
    /// order. Otherwise each node keeps its `round(n · fraction)` cheapest
    /// out-neighbors, with the depot ranked behind every client.
    pub fn build(graph: &ProblemGraph, fraction: f64) -> Self {
        let n = graph.len();
        if fraction >= 1.0 {
            let lists = (0..n).map(|v| graph.neighbors(v).collect()).collect();
            return Self { lists };
        }

        let keep = (n as f64 * fraction).round_ties_even() as usize;
        let rank = |v: usize, u: usize| {
            if u == DEPOT {
                f64::INFINITY
            } else {
                graph.cost(v, u)
            }
        };

        let lists = (0..n)
            .map(|v| {
                let mut neighbors: Vec<usize> = graph.neighbors(v).collect();
                neighbors.sort_by(|&a, &b| rank(v, a).total_cmp(&rank(v, b)));
                neighbors.truncate(keep);
                neighbors
            })
            .collect();
        Self { lists }
    }

    /// Candidates of node `v`.
    pub fn get(&self, v: usize) -> &[usize] {
        &self.lists[v]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn graph() -> ProblemGraph {
        ProblemGraph::euclidean(vec![
            Node::depot(0.0, 0.0),
            Node::client(1, 50.0, 0.0, 1.0),
            Node::client(2, 2.0, 0.0, 1.0),
            Node::client(3, 10.0, 0.0, 1.0),
            Node::client(4, 30.0, 0.0, 1.0),
        ])
        .expect("valid")
    }

    #[test]
    fn test_full_lists() {
        let c = CandidateLists::build(&graph(), 1.0);
        assert_eq!(c.get(0), &[1, 2, 3, 4]);
        assert_eq!(c.get(2), &[0, 1, 3, 4]);
    }

    #[test]
    fn test_nearest_lists() {
        // round(5 * 0.4) = 2
        let c = CandidateLists::build(&graph(), 0.4);
        assert_eq!(c.get(0), &[2, 3]);
        assert_eq!(c.get(1), &[4, 3]);
        // the depot is the closest node to client 2 but is ranked last
        assert_eq!(c.get(2), &[3, 4]);
    }

    #[test]
    fn test_depot_kept_as_last_resort() {
        // round(5 * 0.6) = 3 fills the list with clients before the depot
        let c = CandidateLists::build(&graph(), 0.6);
        assert_eq!(c.get(2), &[3, 4, 1]);

        let c = CandidateLists::build(&graph(), 0.99);
        assert_eq!(c.get(2).last(), Some(&DEPOT));
    }
}
