//! # bo-functions
//!
//! Deterministic single-objective test functions for the acquisition
//! benchmark. Every function exposes its search-space description, a
//! batch evaluation operation, and a random-sampling operation for
//! drawing initial points.

mod single_objective;

pub use single_objective::{
    FiveWellPotential, Hartmann6, Hartmann6Cat2, StyblinskiTang, SumOfDiffSquares, SumOfSquares,
};

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use bo_types::SearchSpace;

/// A deterministic objective over a fixed input domain.
pub trait TestFunction: Send + Sync {
    /// Experiment identifier used for output directories and plot titles.
    fn name(&self) -> &str;

    /// The search-space description; its order defines the vector layout.
    fn space(&self) -> &SearchSpace;

    /// Evaluate one input row.
    fn evaluate_one(&self, x: &[f64]) -> f64;

    /// Evaluate a batch of input rows, one objective value per row.
    fn evaluate(&self, xs: &[Vec<f64>]) -> Vec<f64> {
        xs.iter().map(|x| self.evaluate_one(x)).collect()
    }

    /// Draw one random valid input row.
    fn sample_row(&self, rng: &mut StdRng) -> Vec<f64> {
        self.space().sample_row(rng)
    }
}

/// The fixed set of experiment identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestFunctionId {
    Hartmann6,
    Hartmann6Cat2,
    StyblinskiTang8,
    StyblinskiTang40,
    FiveWellPotential,
    SumOfSquares40,
    SumOfDiffSquares40,
}

impl TestFunctionId {
    /// Construct the test function this identifier names.
    pub fn build(&self) -> Box<dyn TestFunction> {
        match self {
            Self::Hartmann6 => Box::new(Hartmann6::new()),
            Self::Hartmann6Cat2 => Box::new(Hartmann6Cat2::new()),
            Self::StyblinskiTang8 => Box::new(StyblinskiTang::new(8)),
            Self::StyblinskiTang40 => Box::new(StyblinskiTang::new(40)),
            Self::FiveWellPotential => Box::new(FiveWellPotential::new()),
            Self::SumOfSquares40 => Box::new(SumOfSquares::new(40)),
            Self::SumOfDiffSquares40 => Box::new(SumOfDiffSquares::new(40)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hartmann6 => "Hartmann6",
            Self::Hartmann6Cat2 => "Hartmann6Cat2",
            Self::StyblinskiTang8 => "StyblinskiTang8",
            Self::StyblinskiTang40 => "StyblinskiTang40",
            Self::FiveWellPotential => "FiveWellPotential",
            Self::SumOfSquares40 => "SumOfSquares40",
            Self::SumOfDiffSquares40 => "SumOfDiffSquares40",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn build_matches_identifier() {
        let f = TestFunctionId::StyblinskiTang8.build();
        assert_eq!(f.name(), "StyblinskiTang8");
        assert_eq!(f.space().dim(), 8);
    }

    #[test]
    fn batch_evaluation_preserves_length() {
        let f = TestFunctionId::Hartmann6.build();
        let mut rng = StdRng::seed_from_u64(3);
        let xs: Vec<Vec<f64>> = (0..7).map(|_| f.sample_row(&mut rng)).collect();
        let ys = f.evaluate(&xs);
        assert_eq!(ys.len(), 7);
        assert!(ys.iter().all(|y| y.is_finite()));
    }

    #[test]
    fn sampled_rows_are_valid() {
        let mut rng = StdRng::seed_from_u64(11);
        for id in [
            TestFunctionId::Hartmann6,
            TestFunctionId::Hartmann6Cat2,
            TestFunctionId::FiveWellPotential,
            TestFunctionId::SumOfSquares40,
        ] {
            let f = id.build();
            for _ in 0..50 {
                let row = f.sample_row(&mut rng);
                assert!(f.space().check_vector(&row).is_ok());
                for (value, param) in row.iter().zip(&f.space().parameters) {
                    assert!(param.kind.contains(*value));
                }
            }
        }
    }
}
