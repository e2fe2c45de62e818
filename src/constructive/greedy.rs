//! Greedy nearest-feasible-neighbor constructor.
//!
//! Drives a single [`Truck`] from the depot, always requesting the cheapest
//! unvisited client from the truck's current node. The truck decides whether
//! the move is feasible; if not, it returns to the depot and the search
//! resumes from there.
//!
//! # Complexity
//!
//! O(n²) where n = number of clients.

use tracing::{info, info_span};

use crate::error::{CvrpError, Infeasibility};
use crate::evaluation::Truck;
use crate::models::{ProblemDefinition, Solution, DEPOT};
use crate::solver::CvrpSolver;

/// Deterministic nearest-neighbor solver.
///
/// Ties between equally near clients go to the lower node id.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemGraph, ProblemDefinition};
/// use u_cvrp::constructive::GreedySolver;
/// use u_cvrp::solver::CvrpSolver;
///
/// let graph = ProblemGraph::euclidean(vec![
///     Node::depot(0.0, 0.0),
///     Node::client(1, 1.0, 0.0, 10.0),
///     Node::client(2, 2.0, 0.0, 10.0),
///     Node::client(3, 3.0, 0.0, 10.0),
/// ])
/// .unwrap();
/// let problem = ProblemDefinition::new("line", graph, 30.0).unwrap();
///
/// let solution = GreedySolver.solve(&problem).unwrap();
/// assert_eq!(solution.tours(), vec![vec![1, 2, 3]]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl CvrpSolver for GreedySolver {
    fn solve(&self, problem: &ProblemDefinition) -> Result<Solution, CvrpError> {
        let _span = info_span!("greedy", instance = problem.instance_name()).entered();

        let graph = problem.graph();
        let mut truck = Truck::new(
            graph,
            problem.truck_capacity(),
            problem.truck_route_limit(),
        );
        let mut solution = Solution::for_graph(graph);

        let mut visited = vec![false; graph.len()];
        visited[DEPOT] = true;
        let mut remaining = graph.num_clients();

        while remaining > 0 {
            let current = truck.current_node();
            let next = graph
                .costs()
                .nearest_neighbor(current, graph.clients(), &visited);

            let mv = match next {
                Some(target) => truck.attempt_move(target)?,
                None if current == DEPOT => {
                    let client = visited.iter().position(|v| !v).unwrap_or(DEPOT);
                    return Err(CvrpError::InfeasibleProblem(
                        Infeasibility::ClientUnreachable { client },
                    ));
                }
                None => truck.return_to_depot()?,
            };

            if mv.dest != DEPOT {
                visited[mv.dest] = true;
                remaining -= 1;
            }
            solution.add_move(mv);
        }

        if !truck.is_at_depot() {
            solution.add_move(truck.return_to_depot()?);
        }

        info!(
            route_len = solution.route_len(),
            tours = solution.num_tours(),
            "greedy solution built"
        );
        Ok(solution)
    }

    fn label(&self) -> String {
        "Greedy".to_string()
    }
}
