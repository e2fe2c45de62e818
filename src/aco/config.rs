//! Ant colony parameters.

use serde::{Deserialize, Serialize};

use crate::error::CvrpError;

/// Number of ants sent out per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntCount {
    /// A fixed number of ants.
    Fixed(usize),
    /// This many ants per graph node (depot included).
    PerNode(usize),
}

impl AntCount {
    /// Ants per iteration for a graph with `num_nodes` nodes.
    pub fn resolve(&self, num_nodes: usize) -> usize {
        match *self {
            AntCount::Fixed(n) => n,
            AntCount::PerNode(k) => k.saturating_mul(num_nodes),
        }
    }
}

/// Configuration of the ant colony solver.
///
/// Every field has a default, so partial configs deserialize.
///
/// # Examples
///
/// ```
/// use u_cvrp::aco::{AcoConfig, AntCount};
///
/// let config = AcoConfig::default()
///     .with_iterations(500)
///     .with_ants(AntCount::Fixed(20))
///     .with_candidate_fraction(0.25)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.iterations, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcoConfig {
    /// Number of iterations.
    pub iterations: usize,
    /// Ants per iteration.
    pub ants: AntCount,
    /// Pheromone on every edge before the first iteration.
    pub init_pheromone: f64,
    /// Pheromone deposited per unit of inverse route length.
    pub deposit_factor: f64,
    /// Fraction of pheromone lost on an edge each time it is reinforced.
    pub evaporation_factor: f64,
    /// Pheromone weight (α).
    pub alpha: f64,
    /// Cost weight (β).
    pub beta: f64,
    /// Probability of an exploratory (random) step.
    pub rand_chance: f64,
    /// Share of nodes kept in each node's candidate list.
    pub candidate_fraction: f64,
    /// Re-order short tours by exhaustive search.
    pub permute_routes: bool,
    /// Seed for [`CvrpSolver::solve`](crate::solver::CvrpSolver::solve).
    pub seed: u64,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            ants: AntCount::PerNode(1),
            init_pheromone: 1.0,
            deposit_factor: 1.0,
            evaporation_factor: 0.1,
            alpha: 1.0,
            beta: 2.3,
            rand_chance: 0.1,
            candidate_fraction: 1.0,
            permute_routes: false,
            seed: 42,
        }
    }
}

impl AcoConfig {
    /// Sets the iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the number of ants per iteration.
    pub fn with_ants(mut self, ants: AntCount) -> Self {
        self.ants = ants;
        self
    }

    /// Sets the initial pheromone.
    pub fn with_init_pheromone(mut self, value: f64) -> Self {
        self.init_pheromone = value;
        self
    }

    /// Sets the deposit factor.
    pub fn with_deposit_factor(mut self, value: f64) -> Self {
        self.deposit_factor = value;
        self
    }

    /// Sets the evaporation factor.
    pub fn with_evaporation_factor(mut self, value: f64) -> Self {
        self.evaporation_factor = value;
        self
    }

    /// Sets the pheromone and cost exponents.
    pub fn with_weights(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Sets the exploration probability.
    pub fn with_rand_chance(mut self, value: f64) -> Self {
        self.rand_chance = value;
        self
    }

    /// Sets the candidate list fraction.
    pub fn with_candidate_fraction(mut self, value: f64) -> Self {
        self.candidate_fraction = value;
        self
    }

    /// Enables or disables short-tour permutation.
    pub fn with_permute_routes(mut self, enabled: bool) -> Self {
        self.permute_routes = enabled;
        self
    }

    /// Sets the seed used by the seeded entry point.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks that every parameter is in range.
    pub fn validate(&self) -> Result<(), CvrpError> {
        fn invalid(msg: String) -> Result<(), CvrpError> {
            Err(CvrpError::InvalidConfig(msg))
        }

        if self.iterations == 0 {
            return invalid("iterations must be at least 1".into());
        }
        if self.ants.resolve(1) == 0 {
            return invalid(format!("ant count must be at least 1, got {:?}", self.ants));
        }
        if !self.init_pheromone.is_finite() || self.init_pheromone < 0.0 {
            return invalid(format!(
                "init_pheromone must be non-negative, got {}",
                self.init_pheromone
            ));
        }
        if !self.deposit_factor.is_finite() || self.deposit_factor <= 0.0 {
            return invalid(format!(
                "deposit_factor must be positive, got {}",
                self.deposit_factor
            ));
        }
        if !(0.0..1.0).contains(&self.evaporation_factor) {
            return invalid(format!(
                "evaporation_factor must be in [0, 1), got {}",
                self.evaporation_factor
            ));
        }
        if !self.alpha.is_finite() || !self.beta.is_finite() {
            return invalid(format!(
                "alpha and beta must be finite, got {} and {}",
                self.alpha, self.beta
            ));
        }
        if !(0.0..=1.0).contains(&self.rand_chance) {
            return invalid(format!(
                "rand_chance must be in [0, 1], got {}",
                self.rand_chance
            ));
        }
        if !(self.candidate_fraction > 0.0 && self.candidate_fraction <= 1.0) {
            return invalid(format!(
                "candidate_fraction must be in (0, 1], got {}",
                self.candidate_fraction
            ));
        }
        Ok(())
    }
}
