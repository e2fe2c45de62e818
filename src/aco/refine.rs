//! Exact re-ordering of short tours.
//!
//! Every tour of at most [`MAX_PERMUTED_TOUR_LEN`] clients is replaced by
//! its cheapest feasible visiting order, found by enumerating all
//! permutations (at most 5! = 120). Longer tours are left as built.

use itertools::Itertools;

use crate::models::{ProblemGraph, DEPOT};

/// Longest tour (in clients) that is re-ordered by exhaustive search.
pub const MAX_PERMUTED_TOUR_LEN: usize = 5;

/// Re-orders every short tour in place. Returns the total cost saved.
///
/// A new order is taken only if it is strictly cheaper and its running load
/// and running distance, summed in visiting order, stay within `capacity`
/// and `route_limit`. Ties keep the original order.
pub fn permute_short_tours(
    graph: &ProblemGraph,
    tours: &mut [Vec<usize>],
    capacity: f64,
    route_limit: f64,
) -> f64 {
    tours
        .iter_mut()
        .filter(|t| t.len() > 1 && t.len() <= MAX_PERMUTED_TOUR_LEN)
        .map(|tour| best_permutation(graph, tour, capacity, route_limit))
        .sum()
}

fn best_permutation(
    graph: &ProblemGraph,
    tour: &mut Vec<usize>,
    capacity: f64,
    route_limit: f64,
) -> f64 {
    let original = graph.tour_cost(tour);
    let mut best_cost = original;
    let mut best: Option<Vec<usize>> = None;

    for perm in tour.iter().copied().permutations(tour.len()) {
        let cost = graph.tour_cost(&perm);
        if cost < best_cost && fits(graph, &perm, capacity, route_limit) {
            best_cost = cost;
            best = Some(perm);
        }
    }

    match best {
        Some(order) => {
            *tour = order;
            original - best_cost
        }
        None => 0.0,
    }
}

/// Checks a non-empty order with the same float sums the validator uses:
/// load after each client, distance after each client's outgoing edge.
fn fits(graph: &ProblemGraph, order: &[usize], capacity: f64, route_limit: f64) -> bool {
    let mut load = 0.0;
    let mut distance = graph.cost(DEPOT, order[0]);
    for (i, &client) in order.iter().enumerate() {
        load += graph.demand(client);
        let next = order.get(i + 1).copied().unwrap_or(DEPOT);
        distance += graph.cost(client, next);
        if load > capacity || distance > route_limit {
            return false;
        }
    }
    true
}
