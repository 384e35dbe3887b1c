//! Search-space definitions.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::SpaceError;

/// A single feature dimension in the search space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    /// Feature name (e.g. "x0").
    pub name: String,
    /// The kind of distribution the feature is drawn from.
    pub kind: ParamKind,
}

/// Describes how a feature is sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamKind {
    /// Continuous uniform range [low, high].
    Float { low: f64, high: f64 },
    /// Categorical over a fixed set of numeric choices.
    Categorical { choices: Vec<f64> },
}

impl ParamKind {
    /// Whether `value` is a valid draw from this distribution.
    pub fn contains(&self, value: f64) -> bool {
        match self {
            Self::Float { low, high } => value >= *low && value <= *high,
            Self::Categorical { choices } => choices.iter().any(|&c| c == value),
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Float { .. })
    }

    /// Bounds of the continuous range, or the smallest/largest choice.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Float { low, high } => (*low, *high),
            Self::Categorical { choices } => {
                let low = choices.iter().copied().fold(f64::INFINITY, f64::min);
                let high = choices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (low, high)
            }
        }
    }

    fn sample(&self, rng: &mut StdRng) -> f64 {
        match self {
            Self::Float { low, high } => rng.random_range(*low..=*high),
            Self::Categorical { choices } => choices[rng.random_range(0..choices.len())],
        }
    }
}

/// The full search space: an ordered list of feature definitions.
///
/// The order of the list defines the positional order used to assemble
/// and disassemble observation vectors. It is constant for a given test
/// function.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchSpace {
    pub parameters: Vec<ParamDef>,
}

impl SearchSpace {
    pub fn new() -> Self {
        Self {
            parameters: Vec::new(),
        }
    }

    pub fn add_float(mut self, name: impl Into<String>, low: f64, high: f64) -> Self {
        self.parameters.push(ParamDef {
            name: name.into(),
            kind: ParamKind::Float { low, high },
        });
        self
    }

    pub fn add_categorical(mut self, name: impl Into<String>, choices: Vec<f64>) -> Self {
        self.parameters.push(ParamDef {
            name: name.into(),
            kind: ParamKind::Categorical { choices },
        });
        self
    }

    /// Number of feature dimensions.
    pub fn dim(&self) -> usize {
        self.parameters.len()
    }

    /// Feature names in positional order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    /// Check that every declared distribution is well formed.
    pub fn validate(&self) -> Result<(), SpaceError> {
        for param in &self.parameters {
            match &param.kind {
                ParamKind::Float { low, high } => {
                    if !(low < high) {
                        return Err(SpaceError::InvalidBounds {
                            name: param.name.clone(),
                            low: *low,
                            high: *high,
                        });
                    }
                }
                ParamKind::Categorical { choices } => {
                    if choices.is_empty() {
                        return Err(SpaceError::EmptyChoices {
                            name: param.name.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Check that `x` has exactly one value per dimension.
    pub fn check_vector(&self, x: &[f64]) -> Result<(), SpaceError> {
        if x.len() != self.dim() {
            return Err(SpaceError::DimensionMismatch {
                expected: self.dim(),
                actual: x.len(),
            });
        }
        Ok(())
    }

    /// Draw one uniformly random valid input row.
    pub fn sample_row(&self, rng: &mut StdRng) -> Vec<f64> {
        self.parameters.iter().map(|p| p.kind.sample(rng)).collect()
    }
}
