//! Per-edge pheromone trails.

use crate::models::tour_edges;

/// Dense n×n pheromone matrix, row-major like the cost matrix.
///
/// Owned by a single solve. Values only change through [`reinforce`],
/// which the colony calls between iterations.
///
/// [`reinforce`]: PheromoneMap::reinforce
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMap {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMap {
    /// Creates a map with `init` pheromone on every edge.
    pub fn new(size: usize, init: f64) -> Self {
        Self {
            data: vec![init; size * size],
            size,
        }
    }

    /// Pheromone on the edge `from → to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Evaporates and deposits on every edge of one ant's tours.
    ///
    /// Each touched edge becomes
    /// `(1 - evaporation) * pheromone + deposit / route_len`; untouched edges
    /// keep their value. A zero-length route deposits as if its length were 1.
    pub fn reinforce(
        &mut self,
        tours: &[Vec<usize>],
        route_len: f64,
        evaporation: f64,
        deposit: f64,
    ) {
        let amount = deposit / if route_len > 0.0 { route_len } else { 1.0 };
        for (u, v) in tours.iter().flat_map(|t| tour_edges(t)) {
            let cell = &mut self.data[u * self.size + v];
            *cell = (1.0 - evaporation) * *cell + amount;
        }
    }

    /// Smallest pheromone value over all edges (diagonal excluded).
    pub fn min_value(&self) -> f64 {
        (0..self.size)
            .flat_map(|u| (0..self.size).filter(move |&v| v != u).map(move |v| (u, v)))
            .map(|(u, v)| self.get(u, v))
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        let p = PheromoneMap::new(3, 1.0);
        assert_eq!(p.get(0, 2), 1.0);
        assert_eq!(p.min_value(), 1.0);
    }

    #[test]
    fn test_reinforce_touched_edges_only() {
        let mut p = PheromoneMap::new(4, 1.0);
        p.reinforce(&[vec![1, 2]], 50.0, 0.1, 1.0);
        let expected = 0.9 + 1.0 / 50.0;
        assert!((p.get(0, 1) - expected).abs() < 1e-12);
        assert!((p.get(1, 2) - expected).abs() < 1e-12);
        assert!((p.get(2, 0) - expected).abs() < 1e-12);
        assert_eq!(p.get(1, 0), 1.0);
        assert_eq!(p.get(0, 3), 1.0);
    }

    #[test]
    fn test_reinforce_accumulates_per_route() {
        let mut p = PheromoneMap::new(3, 1.0);
        p.reinforce(&[vec![1]], 10.0, 0.5, 2.0);
        p.reinforce(&[vec![1], vec![2]], 20.0, 0.5, 2.0);
        // (0.5 * 1.0 + 0.2) * 0.5 + 0.1
        assert!((p.get(0, 1) - 0.45).abs() < 1e-12);
        // 0.5 * 1.0 + 0.1
        assert!((p.get(0, 2) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_route() {
        let mut p = PheromoneMap::new(2, 0.0);
        p.reinforce(&[vec![1]], 0.0, 0.1, 1.0);
        assert_eq!(p.get(0, 1), 1.0);
    }

    #[test]
    fn test_stays_positive() {
        let mut p = PheromoneMap::new(3, 1.0);
        for _ in 0..10_000 {
            p.reinforce(&[vec![1, 2]], 1e6, 0.99, 1e-3);
        }
        assert!(p.min_value() > 0.0);
    }
}
