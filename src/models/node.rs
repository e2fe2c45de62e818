//! Depot and client nodes.

use serde::{Deserialize, Serialize};

/// Arena index reserved for the depot.
pub const DEPOT: usize = 0;

/// A depot or client location in a routing problem.
///
/// Node 0 is always the depot. Clients have a position and a non-negative
/// demand; the depot's demand is zero.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, DEPOT};
///
/// let depot = Node::depot(35.0, 35.0);
/// assert_eq!(depot.id(), DEPOT);
/// assert!(depot.is_depot());
///
/// let c = Node::client(1, 41.0, 49.0, 10.0);
/// assert_eq!(c.demand(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
    demand: f64,
}

impl Node {
    /// Creates a depot at the given coordinates.
    pub fn depot(x: f64, y: f64) -> Self {
        Self {
            id: DEPOT,
            x,
            y,
            demand: 0.0,
        }
    }

    /// Creates a client.
    pub fn client(id: usize, x: f64, y: f64, demand: f64) -> Self {
        Self { id, x, y, demand }
    }

    /// Arena index (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand to deliver at this node.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Returns `true` for the depot sentinel.
    pub fn is_depot(&self) -> bool {
        self.id == DEPOT
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
