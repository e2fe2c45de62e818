//! Common interface of the CVRP solvers.

use crate::error::CvrpError;
use crate::models::{ProblemDefinition, Solution};

/// A strategy that turns a problem definition into a solution.
///
/// Implementations keep no state between calls, so one solver value can
/// serve many problems, including from several threads at once.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemGraph, ProblemDefinition};
/// use u_cvrp::constructive::GreedySolver;
/// use u_cvrp::aco::{AcoConfig, AntColonySolver};
/// use u_cvrp::solver::CvrpSolver;
///
/// let graph = ProblemGraph::euclidean(vec![
///     Node::depot(0.0, 0.0),
///     Node::client(1, 1.0, 0.0, 10.0),
///     Node::client(2, 2.0, 0.0, 10.0),
/// ])
/// .unwrap();
/// let problem = ProblemDefinition::new("line", graph, 10.0).unwrap();
///
/// let solvers: Vec<Box<dyn CvrpSolver>> = vec![
///     Box::new(GreedySolver),
///     Box::new(AntColonySolver::new(AcoConfig::default().with_iterations(5))),
/// ];
/// for solver in &solvers {
///     let solution = solver.solve(&problem).unwrap();
///     assert_eq!(solution.num_tours(), 2, "{}", solver.label());
/// }
/// ```
pub trait CvrpSolver: Send + Sync {
    /// Builds a solution for the problem.
    ///
    /// # Errors
    ///
    /// [`CvrpError::InfeasibleProblem`] when some client cannot be served
    /// under the problem's constraints.
    fn solve(&self, problem: &ProblemDefinition) -> Result<Solution, CvrpError>;

    /// Human-readable name for reports.
    fn label(&self) -> String;
}
