//! Optimization direction and the best-so-far transform.

use serde::{Deserialize, Serialize};

/// Whether we are maximizing or minimizing the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Minimize,
    Maximize,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Minimize
    }
}

impl Direction {
    /// Returns `true` if `candidate` improves on `incumbent`.
    pub fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Minimize => candidate < incumbent,
            Self::Maximize => candidate > incumbent,
        }
    }

    /// The worst representable objective value for this direction.
    pub fn worst(&self) -> f64 {
        match self {
            Self::Minimize => f64::INFINITY,
            Self::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Map an objective value into minimization space.
    ///
    /// Samplers model everything as minimization internally; maximized
    /// objectives are negated on the way in.
    pub fn as_minimization(&self, value: f64) -> f64 {
        match self {
            Self::Minimize => value,
            Self::Maximize => -value,
        }
    }

    /// Best value observed up to and including each index of `values`.
    ///
    /// The result is monotone (non-increasing for minimize, non-decreasing
    /// for maximize) and the transform is idempotent.
    pub fn running_best(&self, values: &[f64]) -> Vec<f64> {
        let mut best = self.worst();
        values
            .iter()
            .map(|&v| {
                if self.improves(v, best) {
                    best = v;
                }
                best
            })
            .collect()
    }

    /// Index and value of the best entry, if any.
    pub fn best_of(&self, values: &[f64]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in values.iter().enumerate() {
            match best {
                Some((_, incumbent)) if !self.improves(v, incumbent) => {}
                _ => best = Some((i, v)),
            }
        }
        best
    }
}
