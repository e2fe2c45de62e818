//! Dense cost matrix.

use crate::models::Node;

/// A dense n×n cost matrix stored in row-major order.
///
/// Supports rounded Euclidean costs computed from node coordinates and
/// explicit cost specification for synthetic instances. A cost of
/// `f64::INFINITY` marks a missing edge; the diagonal is never an edge.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Node;
/// use u_cvrp::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::depot(0.0, 0.0),
///     Node::client(1, 3.0, 4.0, 10.0),
///     Node::client(2, 6.0, 8.0, 20.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a cost matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes Euclidean costs from node coordinates, rounded to the
    /// nearest integer (ties to even).
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]).round_ties_even();
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a cost matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Removes the edge from `from` to `to`.
    pub fn remove_edge(&mut self, from: usize, to: usize) {
        self.set(from, to, f64::INFINITY);
    }

    /// Returns `true` if a directed edge `from → to` exists.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from != to && self.get(from, to).is_finite()
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All stored costs in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the cheapest reachable node from `from` among the candidates
    /// that are not forbidden.
    ///
    /// Ties keep the earliest candidate. Returns `None` if no candidate is
    /// reachable.
    pub fn nearest_neighbor<I>(&self, from: usize, candidates: I, forbidden: &[bool]) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut best: Option<(usize, f64)> = None;
        for c in candidates {
            if forbidden[c] || !self.has_edge(from, c) {
                continue;
            }
            let d = self.get(from, c);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((c, d)),
            }
        }
        best.map(|(c, _)| c)
    }
}
