//! Ant colony solver.
//!
//! # Algorithm
//!
//! Each iteration sends out a batch of ants. An ant drives its own
//! [`Truck`] from the depot and repeatedly picks the next client among the
//! current node's candidates:
//!
//! ```text
//! desirability(u, v) = pheromone(u, v)^α · (1 / cost(u, v))^β
//! ```
//!
//! With probability `rand_chance` the pick is a weighted draw over the
//! candidates' desirability (exploration); otherwise the most desirable
//! candidate wins (exploitation). The truck turns infeasible picks into depot
//! returns. After all ants finish, every edge an ant used is evaporated and
//! reinforced by `deposit / route_len`, once per ant that used it.
//!
//! # Reference
//!
//! Dorigo, M. & Stützle, T. (2004). *Ant Colony Optimization*, MIT Press.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, info_span};

use crate::error::{CvrpError, Infeasibility};
use crate::evaluation::Truck;
use crate::models::{ProblemDefinition, ProblemGraph, Solution, DEPOT};
use crate::solver::CvrpSolver;

use super::candidates::CandidateLists;
use super::config::AcoConfig;
use super::pheromone::PheromoneMap;
use super::refine::permute_short_tours;

/// Result of an ant colony run.
#[derive(Debug, Clone)]
pub struct AcoOutcome {
    /// Best solution found.
    pub solution: Solution,
    /// Total cost of the best solution.
    pub best_len: f64,
    /// Iteration (0-based) in which the best solution was found.
    pub best_iteration: usize,
    /// Shortest route length found in each iteration.
    pub iteration_best: Vec<f64>,
}

/// Tours built by one ant, with their total cost.
#[derive(Debug, Clone)]
struct AntRoute {
    tours: Vec<Vec<usize>>,
    len: f64,
}

/// Per-solve state shared by all ants of an iteration.
struct Colony<'a> {
    problem: &'a ProblemDefinition,
    pheromone: PheromoneMap,
    candidates: CandidateLists,
}

/// Ant Colony Optimization solver for the CVRP.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cvrp::models::{Node, ProblemGraph, ProblemDefinition};
/// use u_cvrp::aco::{AcoConfig, AntColonySolver};
/// use u_cvrp::evaluation::is_valid;
///
/// let graph = ProblemGraph::euclidean(vec![
///     Node::depot(0.0, 0.0),
///     Node::client(1, 10.0, 0.0, 5.0),
///     Node::client(2, 20.0, 0.0, 5.0),
///     Node::client(3, 30.0, 0.0, 5.0),
/// ])
/// .unwrap();
/// let problem = ProblemDefinition::new("line", graph, 10.0).unwrap();
///
/// let solver = AntColonySolver::new(AcoConfig::default().with_iterations(20));
/// let mut rng = StdRng::seed_from_u64(1);
/// let solution = solver.solve_with_rng(&problem, &mut rng).unwrap();
/// assert!(is_valid(&solution, 10.0, f64::INFINITY));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AntColonySolver {
    config: AcoConfig,
}

impl AntColonySolver {
    /// Creates a solver with the given parameters.
    pub fn new(config: AcoConfig) -> Self {
        Self { config }
    }

    /// Solver parameters.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs the colony with a caller-owned random source.
    pub fn solve_with_rng<R: Rng + ?Sized>(
        &self,
        problem: &ProblemDefinition,
        rng: &mut R,
    ) -> Result<Solution, CvrpError> {
        self.solve_detailed(problem, rng).map(|outcome| outcome.solution)
    }

    /// Runs the colony and reports convergence data alongside the solution.
    ///
    /// # Errors
    ///
    /// [`CvrpError::InvalidConfig`] for out-of-range parameters,
    /// [`CvrpError::InfeasibleProblem`] if an ant meets a client that cannot
    /// be served.
    pub fn solve_detailed<R: Rng + ?Sized>(
        &self,
        problem: &ProblemDefinition,
        rng: &mut R,
    ) -> Result<AcoOutcome, CvrpError> {
        self.config.validate()?;
        let cfg = &self.config;
        let graph = problem.graph();

        let _span = info_span!(
            "aco",
            instance = problem.instance_name(),
            label = %self.label()
        )
        .entered();

        let mut colony = Colony {
            problem,
            pheromone: PheromoneMap::new(graph.len(), cfg.init_pheromone),
            candidates: CandidateLists::build(graph, cfg.candidate_fraction),
        };
        let ants = cfg.ants.resolve(graph.len());
        info!(
            iterations = cfg.iterations,
            ants,
            clients = graph.num_clients(),
            "starting ant colony"
        );

        let mut best: Option<AntRoute> = None;
        let mut best_iteration = 0;
        let mut iteration_best = Vec::with_capacity(cfg.iterations);

        for iteration in 0..cfg.iterations {
            let mut routes = Vec::new();
            let mut round_best = f64::INFINITY;

            for _ in 0..ants {
                let route = colony.build_route(cfg, rng)?;
                round_best = round_best.min(route.len);
                if best.as_ref().map_or(true, |b| route.len < b.len) {
                    best = Some(route.clone());
                    best_iteration = iteration;
                }
                routes.push(route);
            }

            for route in &routes {
                colony.pheromone.reinforce(
                    &route.tours,
                    route.len,
                    cfg.evaporation_factor,
                    cfg.deposit_factor,
                );
            }

            iteration_best.push(round_best);
            debug!(
                iteration,
                round_best,
                best = best.as_ref().map_or(f64::INFINITY, |b| b.len),
                min_pheromone = colony.pheromone.min_value(),
                "iteration finished"
            );
        }

        // validate() guarantees at least one iteration with one ant
        let best = best.ok_or_else(|| CvrpError::InvalidConfig("no ants were run".into()))?;
        let solution = Solution::from_tours(graph, &best.tours);
        info!(
            best_len = best.len,
            best_iteration,
            tours = solution.num_tours(),
            "ant colony finished"
        );

        Ok(AcoOutcome {
            solution,
            best_len: best.len,
            best_iteration,
            iteration_best,
        })
    }
}

impl CvrpSolver for AntColonySolver {
    /// Runs the colony with a fresh `StdRng` seeded from the config.
    fn solve(&self, problem: &ProblemDefinition) -> Result<Solution, CvrpError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.solve_with_rng(problem, &mut rng)
    }

    fn label(&self) -> String {
        let mut label = format!("ACO {} it", self.config.iterations);
        if self.config.permute_routes {
            label.push_str(" +perm");
        }
        if self.config.candidate_fraction < 1.0 {
            label.push_str(&format!(" cand={}", self.config.candidate_fraction));
        }
        label
    }
}

impl Colony<'_> {
    fn graph(&self) -> &ProblemGraph {
        self.problem.graph()
    }

    /// Lets one ant visit every client.
    fn build_route<R: Rng + ?Sized>(
        &self,
        cfg: &AcoConfig,
        rng: &mut R,
    ) -> Result<AntRoute, CvrpError> {
        let graph = self.graph();
        let mut truck = Truck::new(
            graph,
            self.problem.truck_capacity(),
            self.problem.truck_route_limit(),
        );
        let mut visited = vec![false; graph.len()];
        visited[DEPOT] = true;
        let mut remaining = graph.num_clients();

        let mut tours: Vec<Vec<usize>> = Vec::new();
        let mut tour: Vec<usize> = Vec::new();

        while remaining > 0 {
            let current = truck.current_node();
            let mv = match self.next_node(cfg, current, &visited, rng) {
                Some(target) => truck.attempt_move(target)?,
                None if current == DEPOT => {
                    let client = visited.iter().position(|v| !v).unwrap_or(DEPOT);
                    return Err(CvrpError::InfeasibleProblem(
                        Infeasibility::ClientUnreachable { client },
                    ));
                }
                None => truck.return_to_depot()?,
            };

            if mv.dest == DEPOT {
                tours.push(std::mem::take(&mut tour));
            } else {
                visited[mv.dest] = true;
                remaining -= 1;
                tour.push(mv.dest);
            }
        }

        if !truck.is_at_depot() {
            truck.return_to_depot()?;
            tours.push(tour);
        }

        if cfg.permute_routes {
            permute_short_tours(
                graph,
                &mut tours,
                self.problem.truck_capacity(),
                self.problem.truck_route_limit(),
            );
        }

        let len = tours.iter().map(|t| graph.tour_cost(t)).sum();
        Ok(AntRoute { tours, len })
    }

    /// Picks the next node for an ant at `current`, or `None` if every
    /// reachable node is forbidden.
    fn next_node<R: Rng + ?Sized>(
        &self,
        cfg: &AcoConfig,
        current: usize,
        forbidden: &[bool],
        rng: &mut R,
    ) -> Option<usize> {
        let graph = self.graph();
        let mut targets: Vec<usize> = self
            .candidates
            .get(current)
            .iter()
            .copied()
            .filter(|&v| !forbidden[v])
            .collect();
        if targets.is_empty() {
            targets = graph.neighbors(current).filter(|&v| !forbidden[v]).collect();
        }
        if targets.is_empty() {
            return None;
        }

        let weights: Vec<f64> = targets
            .iter()
            .map(|&v| self.desirability(cfg, current, v))
            .collect();

        if rng.random::<f64>() < cfg.rand_chance {
            let idx = match WeightedIndex::new(&weights) {
                Ok(dist) => dist.sample(rng),
                Err(_) => rng.random_range(0..targets.len()),
            };
            return Some(targets[idx]);
        }

        let mut best = 0;
        for (i, &w) in weights.iter().enumerate().skip(1) {
            if w > weights[best] {
                best = i;
            }
        }
        Some(targets[best])
    }

    fn desirability(&self, cfg: &AcoConfig, u: usize, v: usize) -> f64 {
        let cost = self.graph().cost(u, v);
        let cost = if cost == 0.0 { 1.0 } else { cost };
        self.pheromone.get(u, v).powf(cfg.alpha) * (1.0 / cost).powf(cfg.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::AntCount;
    use crate::constructive::GreedySolver;
    use crate::evaluation::{find_violation, is_valid};
    use crate::models::Node;

    fn colinear(capacity: f64) -> ProblemDefinition {
        let graph = ProblemGraph::euclidean(vec![
            Node::depot(0.0, 0.0),
            Node::client(1, 10.0, 0.0, 5.0),
            Node::client(2, 20.0, 0.0, 5.0),
            Node::client(3, 30.0, 0.0, 5.0),
        ])
        .expect("valid");
        ProblemDefinition::new("colinear", graph, capacity).expect("valid")
    }

    fn grid() -> ProblemDefinition {
        let mut nodes = vec![Node::depot(50.0, 50.0)];
        for i in 0..24 {
            let x = (i % 5) as f64 * 20.0 + 3.0 * (i % 3) as f64;
            let y = (i / 5) as f64 * 20.0 + 5.0 * (i % 4) as f64;
            nodes.push(Node::client(i + 1, x, y, 3.0 + (i % 7) as f64));
        }
        let graph = ProblemGraph::euclidean(nodes).expect("valid");
        ProblemDefinition::new("grid", graph, 30.0)
            .expect("valid")
            .with_route_limit(250.0)
            .expect("valid")
    }

    fn small_config() -> AcoConfig {
        AcoConfig::default()
            .with_iterations(15)
            .with_ants(AntCount::Fixed(8))
    }

    #[test]
    fn test_colinear_feasible() {
        let problem = colinear(10.0);
        let solver = AntColonySolver::new(small_config());
        let mut rng = StdRng::seed_from_u64(3);
        let sol = solver.solve_with_rng(&problem, &mut rng).expect("feasible");
        assert!(is_valid(&sol, 10.0, f64::INFINITY));
        assert_eq!(sol.num_tours(), 2);
    }

    #[test]
    fn test_grid_valid_with_route_limit() {
        let problem = grid();
        for config in [
            small_config(),
            small_config().with_permute_routes(true),
            small_config().with_candidate_fraction(0.25),
        ] {
            let solver = AntColonySolver::new(config);
            let sol = solver.solve(&problem).expect("feasible");
            assert!(is_valid(&sol, 30.0, 250.0), "{}", solver.label());
        }
    }

    #[test]
    fn test_same_seed_same_solution() {
        let problem = grid();
        let solver = AntColonySolver::new(small_config().with_seed(11));
        let a = solver.solve_detailed(&problem, &mut StdRng::seed_from_u64(11));
        let b = solver.solve(&problem);
        let a = a.expect("feasible");
        let b = b.expect("feasible");
        assert_eq!(a.solution, b);
        assert_eq!(a.best_len, b.route_len());
    }

    #[test]
    fn test_outcome_tracks_best() {
        let problem = grid();
        let solver = AntColonySolver::new(small_config());
        let outcome = solver
            .solve_detailed(&problem, &mut StdRng::seed_from_u64(5))
            .expect("feasible");
        assert_eq!(outcome.iteration_best.len(), 15);
        assert!(outcome.best_iteration < 15);
        let min = outcome
            .iteration_best
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(outcome.best_len, min);
        assert_eq!(outcome.iteration_best[outcome.best_iteration], min);
        assert!((outcome.solution.route_len() - outcome.best_len).abs() < 1e-9);
    }

    #[test]
    fn test_pure_exploitation_matches_greedy_first_ant() {
        // With β dominating and uniform pheromone, exploitation picks the
        // nearest candidate, just like the greedy constructor.
        let problem = grid();
        let config = AcoConfig::default()
            .with_iterations(1)
            .with_ants(AntCount::Fixed(1))
            .with_rand_chance(0.0);
        let aco = AntColonySolver::new(config)
            .solve(&problem)
            .expect("feasible");
        let greedy = GreedySolver.solve(&problem).expect("feasible");
        assert_eq!(aco.tours(), greedy.tours());
    }

    #[test]
    fn test_pure_exploration_still_feasible() {
        let problem = grid();
        let solver = AntColonySolver::new(small_config().with_rand_chance(1.0));
        let sol = solver
            .solve_with_rng(&problem, &mut StdRng::seed_from_u64(9))
            .expect("feasible");
        assert!(is_valid(&sol, 30.0, 250.0));
    }

    #[test]
    fn test_zero_pheromone_exploration_falls_back_to_uniform() {
        let problem = colinear(10.0);
        let config = small_config()
            .with_init_pheromone(0.0)
            .with_rand_chance(1.0);
        let sol = AntColonySolver::new(config)
            .solve(&problem)
            .expect("feasible");
        assert!(is_valid(&sol, 10.0, f64::INFINITY));
    }

    #[test]
    fn test_capacity_below_demand() {
        let err = AntColonySolver::new(small_config())
            .solve(&colinear(4.0))
            .unwrap_err();
        assert!(matches!(
            err,
            CvrpError::InfeasibleProblem(Infeasibility::ClientUnreachable { .. })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let solver = AntColonySolver::new(small_config().with_evaporation_factor(1.0));
        assert!(matches!(
            solver.solve(&colinear(10.0)),
            Err(CvrpError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_permutation_never_hurts_single_ant() {
        let problem = grid();
        let base = AcoConfig::default()
            .with_iterations(1)
            .with_ants(AntCount::Fixed(1))
            .with_rand_chance(0.0);
        let plain = AntColonySolver::new(base.clone())
            .solve(&problem)
            .expect("feasible");
        let permuted = AntColonySolver::new(base.with_permute_routes(true))
            .solve(&problem)
            .expect("feasible");
        assert!(permuted.route_len() <= plain.route_len());
        assert!(is_valid(&permuted, 30.0, 250.0));
    }

    #[test]
    fn test_permuted_tour_passes_validator_with_fractional_demands() {
        use crate::distance::DistanceMatrix;

        // The ant follows 0→3→2→1→0; the reverse cycle is far cheaper but
        // 0.1 + 0.2 + 0.3 sums above 0.6 in f64.
        let nodes = vec![
            Node::depot(0.0, 0.0),
            Node::client(1, 0.0, 0.0, 0.1),
            Node::client(2, 0.0, 0.0, 0.2),
            Node::client(3, 0.0, 0.0, 0.3),
        ];
        #[rustfmt::skip]
        let costs = DistanceMatrix::from_data(4, vec![
            0.0, 2.0, 20.0, 1.0,
            50.0, 0.0, 2.0, 20.0,
            20.0, 1.0, 0.0, 2.0,
            2.0, 20.0, 1.0, 0.0,
        ])
        .expect("sized");
        let graph = ProblemGraph::new(nodes, costs).expect("valid");
        let problem = ProblemDefinition::new("fractional", graph, 0.6).expect("valid");

        let config = AcoConfig::default()
            .with_iterations(1)
            .with_ants(AntCount::Fixed(1))
            .with_rand_chance(0.0);
        let plain = AntColonySolver::new(config.clone())
            .solve(&problem)
            .expect("feasible");
        assert_eq!(plain.tours(), vec![vec![3, 2, 1]]);

        let permuted = AntColonySolver::new(config.with_permute_routes(true))
            .solve(&problem)
            .expect("feasible");
        assert_eq!(find_violation(&permuted, 0.6, f64::INFINITY), None);
        assert_eq!(permuted.tours(), vec![vec![3, 2, 1]]);
    }

    #[test]
    fn test_labels() {
        let s = AntColonySolver::new(AcoConfig::default().with_iterations(1000));
        assert_eq!(s.label(), "ACO 1000 it");
        let s = AntColonySolver::new(
            AcoConfig::default()
                .with_iterations(3000)
                .with_candidate_fraction(0.25)
                .with_permute_routes(true),
        );
        assert_eq!(s.label(), "ACO 3000 it +perm cand=0.25");
    }
}
