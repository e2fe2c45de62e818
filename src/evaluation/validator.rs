//! Solution validator.
//!
//! Walks every depot-rooted chain of a [`Solution`] and checks it against
//! the capacity and route-limit rules, independently of how the solution
//! was built.

use std::collections::HashSet;

use crate::models::{Solution, DEPOT};

/// A rule broken by a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A client appears on more than one chain, or twice on the same one.
    ClientRevisited {
        /// The repeated client.
        client: usize,
    },
    /// Cumulative demand on a tour exceeds truck capacity.
    CapacityExceeded {
        /// Client at which the load went over.
        client: usize,
        /// Load after serving that client.
        load: f64,
        /// Truck capacity.
        capacity: f64,
    },
    /// Cumulative distance on a tour exceeds the route limit.
    RouteLimitExceeded {
        /// Client whose outgoing edge went over.
        client: usize,
        /// Distance after taking that edge.
        distance: f64,
        /// Route limit.
        route_limit: f64,
    },
    /// A client does not have exactly one outgoing edge.
    Branching {
        /// The offending client.
        client: usize,
        /// Its out-degree.
        out_degree: usize,
    },
    /// Some clients are not reachable from the depot.
    MissingClients {
        /// Clients reached by the chains.
        visited: usize,
        /// Clients in the solution.
        expected: usize,
    },
}

/// Returns the first rule the solution breaks, or `None` if it is valid.
///
/// Chains are walked in the order the depot's edges were committed; the
/// walk stops at the first violation.
pub fn find_violation(solution: &Solution, capacity: f64, route_limit: f64) -> Option<Violation> {
    let mut visited: HashSet<usize> = HashSet::new();

    for first in solution.successors(DEPOT) {
        let mut current = first.dest;
        let mut load = 0.0;
        let mut distance = first.cost;

        while current != DEPOT {
            if !visited.insert(current) {
                return Some(Violation::ClientRevisited { client: current });
            }

            load += solution.demand(current);
            if load > capacity {
                return Some(Violation::CapacityExceeded {
                    client: current,
                    load,
                    capacity,
                });
            }

            let out_degree = solution.out_degree(current);
            let next = match solution.successors(current).next() {
                Some(mv) if out_degree == 1 => mv,
                _ => {
                    return Some(Violation::Branching {
                        client: current,
                        out_degree,
                    })
                }
            };

            distance += next.cost;
            if distance > route_limit {
                return Some(Violation::RouteLimitExceeded {
                    client: current,
                    distance,
                    route_limit,
                });
            }

            current = next.dest;
        }
    }

    let expected = solution.node_count() - 1;
    if visited.len() != expected {
        return Some(Violation::MissingClients {
            visited: visited.len(),
            expected,
        });
    }
    None
}

/// Returns `true` if the solution covers every client exactly once with
/// tours that respect capacity and route limit.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemGraph, Solution};
/// use u_cvrp::evaluation::is_valid;
///
/// let graph = ProblemGraph::euclidean(vec![
///     Node::depot(0.0, 0.0),
///     Node::client(1, 10.0, 0.0, 5.0),
///     Node::client(2, 20.0, 0.0, 5.0),
/// ])
/// .unwrap();
/// let sol = Solution::from_tours(&graph, &[vec![1, 2]]);
/// assert!(is_valid(&sol, 10.0, f64::INFINITY));
/// assert!(!is_valid(&sol, 9.0, f64::INFINITY));
/// assert!(!is_valid(&sol, 10.0, 39.0));
/// ```
pub fn is_valid(solution: &Solution, capacity: f64, route_limit: f64) -> bool {
    find_violation(solution, capacity, route_limit).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, ProblemGraph, TruckMove};

    fn graph() -> ProblemGraph {
        ProblemGraph::euclidean(vec![
            Node::depot(0.0, 0.0),
            Node::client(1, 10.0, 0.0, 5.0),
            Node::client(2, 20.0, 0.0, 5.0),
            Node::client(3, 30.0, 0.0, 5.0),
        ])
        .expect("valid")
    }

    fn mv(graph: &ProblemGraph, src: usize, dest: usize) -> TruckMove {
        TruckMove {
            src,
            dest,
            cost: graph.cost(src, dest),
        }
    }

    #[test]
    fn test_valid_solution() {
        let g = graph();
        let sol = Solution::from_tours(&g, &[vec![1, 2], vec![3]]);
        assert!(is_valid(&sol, 10.0, 60.0));
        assert_eq!(find_violation(&sol, 10.0, 60.0), None);
    }

    #[test]
    fn test_capacity_exceeded() {
        let g = graph();
        let sol = Solution::from_tours(&g, &[vec![1, 2, 3]]);
        assert_eq!(
            find_violation(&sol, 10.0, f64::INFINITY),
            Some(Violation::CapacityExceeded {
                client: 3,
                load: 15.0,
                capacity: 10.0,
            })
        );
    }

    #[test]
    fn test_route_limit_counts_return_edge() {
        let g = graph();
        let sol = Solution::from_tours(&g, &[vec![3]]);
        assert!(is_valid(&sol, 10.0, 60.0));
        assert!(matches!(
            find_violation(&sol, 10.0, 59.0),
            Some(Violation::RouteLimitExceeded { client: 3, .. })
        ));
    }

    #[test]
    fn test_missing_clients() {
        let g = graph();
        let sol = Solution::from_tours(&g, &[vec![1, 2]]);
        assert_eq!(
            find_violation(&sol, 100.0, f64::INFINITY),
            Some(Violation::MissingClients {
                visited: 2,
                expected: 3,
            })
        );
    }

    #[test]
    fn test_revisit_across_tours() {
        let g = graph();
        let sol = Solution::from_tours(&g, &[vec![1, 2], vec![2, 3]]);
        assert!(matches!(
            find_violation(&sol, 100.0, f64::INFINITY),
            Some(Violation::Branching { client: 2, out_degree: 2 })
                | Some(Violation::ClientRevisited { client: 2 })
        ));
        assert!(!is_valid(&sol, 100.0, f64::INFINITY));
    }

    #[test]
    fn test_cycle_detected() {
        let g = graph();
        let mut sol = Solution::for_graph(&g);
        sol.add_move(mv(&g, 0, 1));
        sol.add_move(mv(&g, 1, 2));
        sol.add_move(mv(&g, 2, 1));
        sol.add_move(mv(&g, 0, 3));
        sol.add_move(mv(&g, 3, 0));
        assert_eq!(
            find_violation(&sol, 100.0, f64::INFINITY),
            Some(Violation::ClientRevisited { client: 1 })
        );
    }

    #[test]
    fn test_branching() {
        let g = graph();
        let mut sol = Solution::for_graph(&g);
        sol.add_move(mv(&g, 0, 1));
        sol.add_move(mv(&g, 1, 2));
        sol.add_move(mv(&g, 1, 3));
        sol.add_move(mv(&g, 2, 0));
        sol.add_move(mv(&g, 3, 0));
        assert_eq!(
            find_violation(&sol, 100.0, f64::INFINITY),
            Some(Violation::Branching {
                client: 1,
                out_degree: 2,
            })
        );
    }

    #[test]
    fn test_dead_end() {
        let g = graph();
        let mut sol = Solution::for_graph(&g);
        sol.add_move(mv(&g, 0, 1));
        assert!(matches!(
            find_violation(&sol, 100.0, f64::INFINITY),
            Some(Violation::Branching { client: 1, out_degree: 0 })
        ));
    }
}
