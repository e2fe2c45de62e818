//! Truck feasibility simulator.

use tracing::trace;

use crate::error::{CvrpError, Infeasibility};
use crate::models::{ProblemGraph, TruckMove, DEPOT};

/// Load and distance accumulated since the truck last left the depot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruckState {
    /// Node the truck is at.
    pub current: usize,
    /// Demand loaded on the current tour.
    pub load: f64,
    /// Distance travelled on the current tour.
    pub route_distance: f64,
}

impl TruckState {
    fn at_depot() -> Self {
        Self {
            current: DEPOT,
            load: 0.0,
            route_distance: 0.0,
        }
    }
}

/// Simulates a single truck building tours one move at a time.
///
/// Each requested move is checked against capacity (no lookahead) and the
/// route limit (with lookahead for the trip back to the depot). A move that
/// would break either rule turns into a forced return to the depot.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, ProblemGraph, DEPOT};
/// use u_cvrp::evaluation::Truck;
///
/// let graph = ProblemGraph::euclidean(vec![
///     Node::depot(0.0, 0.0),
///     Node::client(1, 10.0, 0.0, 5.0),
///     Node::client(2, 20.0, 0.0, 5.0),
/// ])
/// .unwrap();
/// let mut truck = Truck::new(&graph, 5.0, f64::INFINITY);
///
/// let mv = truck.attempt_move(1).unwrap();
/// assert_eq!((mv.src, mv.dest), (DEPOT, 1));
///
/// // Client 2 does not fit: the truck goes home instead.
/// let mv = truck.attempt_move(2).unwrap();
/// assert_eq!((mv.src, mv.dest), (1, DEPOT));
/// assert!(truck.is_at_depot());
/// ```
#[derive(Debug, Clone)]
pub struct Truck<'a> {
    graph: &'a ProblemGraph,
    capacity: f64,
    route_limit: f64,
    state: TruckState,
}

impl<'a> Truck<'a> {
    /// Creates a truck parked at the depot.
    pub fn new(graph: &'a ProblemGraph, capacity: f64, route_limit: f64) -> Self {
        Self {
            graph,
            capacity,
            route_limit,
            state: TruckState::at_depot(),
        }
    }

    /// Current state of the truck.
    pub fn state(&self) -> TruckState {
        self.state
    }

    /// Node the truck is at.
    pub fn current_node(&self) -> usize {
        self.state.current
    }

    /// Returns `true` if the truck is at the depot.
    pub fn is_at_depot(&self) -> bool {
        self.state.current == DEPOT
    }

    /// Moves to `target`, or returns to the depot if the move is infeasible.
    ///
    /// A `target` of [`DEPOT`] closes the current tour like
    /// [`return_to_depot`](Self::return_to_depot).
    ///
    /// # Errors
    ///
    /// [`Infeasibility::ClientUnreachable`] if an empty truck at the depot
    /// cannot serve `target`; [`Infeasibility::NoRouteToDepot`] if a forced
    /// return is needed from a client without an edge to the depot;
    /// [`CvrpError::InvalidMove`] if `target` is the depot and the truck is
    /// already there.
    pub fn attempt_move(&mut self, target: usize) -> Result<TruckMove, CvrpError> {
        if target == DEPOT {
            return self.return_to_depot();
        }
        let current = self.state.current;
        let demand = self.graph.demand(target);

        if self.state.load + demand > self.capacity || !self.graph.has_edge(current, target) {
            return self.forced_return(target);
        }

        let to_target = self.graph.cost(current, target);
        let back = self.graph.cost(target, DEPOT);
        if self.state.route_distance + to_target + back > self.route_limit {
            return self.forced_return(target);
        }

        self.state.load += demand;
        self.state.route_distance += to_target;
        self.state.current = target;

        Ok(TruckMove {
            src: current,
            dest: target,
            cost: to_target,
        })
    }

    /// Drives back to the depot and resets the tour state.
    ///
    /// # Errors
    ///
    /// [`CvrpError::InvalidMove`] if the truck is already at the depot;
    /// [`Infeasibility::NoRouteToDepot`] if the current client has no edge to
    /// the depot.
    pub fn return_to_depot(&mut self) -> Result<TruckMove, CvrpError> {
        let current = self.state.current;
        if current == DEPOT {
            return Err(CvrpError::InvalidMove(
                "truck is already at the depot".into(),
            ));
        }
        if !self.graph.has_edge(current, DEPOT) {
            return Err(CvrpError::InfeasibleProblem(Infeasibility::NoRouteToDepot {
                from: current,
            }));
        }
        let mv = TruckMove {
            src: current,
            dest: DEPOT,
            cost: self.graph.cost(current, DEPOT),
        };
        self.state = TruckState::at_depot();
        Ok(mv)
    }

    fn forced_return(&mut self, target: usize) -> Result<TruckMove, CvrpError> {
        if self.is_at_depot() {
            return Err(CvrpError::InfeasibleProblem(
                Infeasibility::ClientUnreachable { client: target },
            ));
        }
        trace!(
            from = self.state.current,
            target,
            load = self.state.load,
            "forced depot return"
        );
        self.return_to_depot()
    }
}
