//! The pluggable strategy contract and the trial record it consumes.

use std::collections::HashMap;

use bo_types::{BoResult, Direction, SearchSpace, SpaceError};

/// One registered observation: named feature values and the objective
/// value they produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTrial {
    pub params: HashMap<String, f64>,
    pub value: f64,
}

impl CompletedTrial {
    pub fn new(params: HashMap<String, f64>, value: f64) -> Self {
        Self { params, value }
    }

    /// Assemble the feature values into a vector in the space's key order.
    pub fn positional(&self, space: &SearchSpace) -> Result<Vec<f64>, SpaceError> {
        space
            .names()
            .map(|name| {
                self.params
                    .get(name)
                    .copied()
                    .ok_or_else(|| SpaceError::UnknownFeature {
                        name: name.to_string(),
                    })
            })
            .collect()
    }
}

/// A rule that proposes the next input to evaluate.
///
/// Implementations receive the full observation history on every call;
/// they hold no history of their own, only sampler configuration and RNG
/// state.
pub trait Sampler: Send {
    /// Human-readable strategy name.
    fn name(&self) -> &'static str;

    /// Propose one candidate row in the space's positional order.
    fn suggest(
        &mut self,
        space: &SearchSpace,
        direction: Direction,
        history: &[CompletedTrial],
    ) -> BoResult<Vec<f64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_follows_space_order() {
        let space = bo_types::SearchSpace::new()
            .add_float("a", 0.0, 1.0)
            .add_float("b", 0.0, 1.0);
        let trial = CompletedTrial::new(
            HashMap::from([("b".to_string(), 2.0), ("a".to_string(), 1.0)]),
            0.0,
        );
        assert_eq!(trial.positional(&space).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn positional_rejects_missing_feature() {
        let space = bo_types::SearchSpace::new().add_float("a", 0.0, 1.0);
        let trial = CompletedTrial::new(HashMap::new(), 0.0);
        assert!(matches!(
            trial.positional(&space),
            Err(SpaceError::UnknownFeature { .. })
        ));
    }
}
