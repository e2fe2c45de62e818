//! Error types for problem construction and solving.

use std::fmt;

/// Reason a problem definition cannot be satisfied under its constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infeasibility {
    /// An empty truck at the depot cannot serve this client: its demand
    /// alone exceeds capacity, its round trip alone exceeds the route limit,
    /// or no edge leads to it.
    ClientUnreachable {
        /// Client the truck was asked to move to.
        client: usize,
    },
    /// The truck is at a client with no edge back to the depot.
    NoRouteToDepot {
        /// Client the truck is stranded at.
        from: usize,
    },
}

/// Error type for CVRP operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CvrpError {
    /// The problem cannot be solved under its capacity and route-limit rules.
    InfeasibleProblem(Infeasibility),
    /// A graph or problem definition was rejected at construction.
    InvalidProblem(String),
    /// Solver parameters are out of range.
    InvalidConfig(String),
    /// A truck was asked for a move that has no meaning in its state.
    InvalidMove(String),
}

impl fmt::Display for CvrpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CvrpError::InfeasibleProblem(Infeasibility::ClientUnreachable { client }) => write!(
                f,
                "Infeasible problem: client {} cannot be served from the depot",
                client
            ),
            CvrpError::InfeasibleProblem(Infeasibility::NoRouteToDepot { from }) => write!(
                f,
                "Infeasible problem: no route to depot from client {}",
                from
            ),
            CvrpError::InvalidProblem(msg) => write!(f, "Invalid problem: {}", msg),
            CvrpError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            CvrpError::InvalidMove(msg) => write!(f, "Invalid move: {}", msg),
        }
    }
}

impl std::error::Error for CvrpError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_infeasible() {
        let e = CvrpError::InfeasibleProblem(Infeasibility::ClientUnreachable { client: 3 });
        assert_eq!(
            e.to_string(),
            "Infeasible problem: client 3 cannot be served from the depot"
        );
        let e = CvrpError::InfeasibleProblem(Infeasibility::NoRouteToDepot { from: 7 });
        assert!(e.to_string().contains("client 7"));
    }

    #[test]
    fn test_display_invalid() {
        let e = CvrpError::InvalidConfig("alpha must be finite".into());
        assert_eq!(e.to_string(), "Invalid config: alpha must be finite");
        let e = CvrpError::InvalidMove("truck is already at the depot".into());
        assert_eq!(e.to_string(), "Invalid move: truck is already at the depot");
    }
}
