//! Per-iteration optimizer session.

use std::collections::HashMap;

use bo_types::{BoResult, Direction, SamplerError, SearchSpace};

use bo_samplers::{CompletedTrial, Sampler};

/// A fresh, iteration-scoped optimizer session.
///
/// The session is created empty, seeded by replaying the full observation
/// set, asked for exactly one candidate, and then discarded. It has no
/// identity across iterations; only the borrowed sampler's RNG state
/// persists.
pub struct OptimizerSession<'a> {
    sampler: &'a mut dyn Sampler,
    space: &'a SearchSpace,
    direction: Direction,
    trials: Vec<CompletedTrial>,
}

impl<'a> OptimizerSession<'a> {
    pub fn new(
        sampler: &'a mut dyn Sampler,
        space: &'a SearchSpace,
        direction: Direction,
    ) -> Self {
        Self {
            sampler,
            space,
            direction,
            trials: Vec::new(),
        }
    }

    /// Register one observation as a completed trial.
    ///
    /// The input vector is mapped back into named feature values using
    /// the search-space mapping's key order. Registration order is
    /// preserved; order-sensitive strategies see observations exactly as
    /// they were produced. A non-finite output aborts the run.
    pub fn record(&mut self, x: &[f64], y: f64) -> BoResult<()> {
        self.space.check_vector(x)?;
        if !y.is_finite() {
            return Err(SamplerError::NonFiniteObservation {
                index: self.trials.len(),
                value: y,
            }
            .into());
        }

        let params: HashMap<String, f64> = self
            .space
            .names()
            .zip(x.iter().copied())
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        self.trials.push(CompletedTrial::new(params, y));
        Ok(())
    }

    /// Number of registered trials.
    pub fn n_trials(&self) -> usize {
        self.trials.len()
    }

    /// Ask the strategy for exactly one new candidate.
    ///
    /// Every returned value is validated against its declared
    /// distribution: continuous values must lie within `[low, high]`,
    /// categorical values must be one of the declared choices. The
    /// validated candidate is returned as one `1 × dim` row.
    pub fn propose(mut self) -> BoResult<Vec<f64>> {
        let candidate = self
            .sampler
            .suggest(self.space, self.direction, &self.trials)?;
        self.space.check_vector(&candidate)?;

        for (param, &value) in self.space.parameters.iter().zip(&candidate) {
            if !param.kind.contains(value) {
                return Err(SamplerError::CandidateOutOfBounds {
                    feature: param.name.clone(),
                    value,
                }
                .into());
            }
        }

        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_types::{BoError, ParamKind};

    /// Echoes a fixed candidate and records what it was shown.
    struct ProbeSampler {
        candidate: Vec<f64>,
        seen_values: Vec<f64>,
    }

    impl Sampler for ProbeSampler {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn suggest(
            &mut self,
            _space: &SearchSpace,
            _direction: Direction,
            history: &[CompletedTrial],
        ) -> BoResult<Vec<f64>> {
            self.seen_values = history.iter().map(|t| t.value).collect();
            Ok(self.candidate.clone())
        }
    }

    fn space() -> SearchSpace {
        SearchSpace::new()
            .add_float("x0", -5.0, 5.0)
            .add_categorical("c0", vec![0.0, 1.0])
    }

    #[test]
    fn record_maps_vectors_to_named_features() {
        let space = space();
        let mut sampler = ProbeSampler {
            candidate: vec![0.0, 1.0],
            seen_values: vec![],
        };
        let mut session = OptimizerSession::new(&mut sampler, &space, Direction::Minimize);
        session.record(&[1.5, 0.0], 3.0).unwrap();
        assert_eq!(session.n_trials(), 1);
        assert_eq!(session.trials[0].params["x0"], 1.5);
        assert_eq!(session.trials[0].params["c0"], 0.0);
    }

    #[test]
    fn replay_order_is_preserved() {
        let space = space();
        let mut sampler = ProbeSampler {
            candidate: vec![0.0, 1.0],
            seen_values: vec![],
        };
        let mut session = OptimizerSession::new(&mut sampler, &space, Direction::Minimize);
        for (i, y) in [5.0, 1.0, 3.0].iter().enumerate() {
            session.record(&[i as f64, 0.0], *y).unwrap();
        }
        session.propose().unwrap();
        assert_eq!(sampler.seen_values, vec![5.0, 1.0, 3.0]);
    }

    #[test]
    fn non_finite_output_aborts() {
        let space = space();
        let mut sampler = ProbeSampler {
            candidate: vec![0.0, 1.0],
            seen_values: vec![],
        };
        let mut session = OptimizerSession::new(&mut sampler, &space, Direction::Minimize);
        let err = session.record(&[0.0, 0.0], f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            BoError::Sampler(SamplerError::NonFiniteObservation { .. })
        ));
    }

    #[test]
    fn out_of_bounds_candidate_is_rejected() {
        let space = space();
        let mut sampler = ProbeSampler {
            candidate: vec![7.0, 1.0],
            seen_values: vec![],
        };
        let mut session = OptimizerSession::new(&mut sampler, &space, Direction::Minimize);
        session.record(&[0.0, 0.0], 1.0).unwrap();
        let err = session.propose().unwrap_err();
        match err {
            BoError::Sampler(SamplerError::CandidateOutOfBounds { feature, value }) => {
                assert_eq!(feature, "x0");
                assert_eq!(value, 7.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn off_choice_categorical_candidate_is_rejected() {
        let space = space();
        let mut sampler = ProbeSampler {
            candidate: vec![0.0, 0.5],
            seen_values: vec![],
        };
        let mut session = OptimizerSession::new(&mut sampler, &space, Direction::Minimize);
        session.record(&[0.0, 0.0], 1.0).unwrap();
        assert!(session.propose().is_err());
        assert!(matches!(
            space.parameters[1].kind,
            ParamKind::Categorical { .. }
        ));
    }
}
