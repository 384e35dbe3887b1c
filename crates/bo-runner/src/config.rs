//! Experiment configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use bo_functions::TestFunctionId;
use bo_samplers::StrategyId;
use bo_types::{config_error, BoResult, Direction};

/// Top-level configuration for one experiment.
///
/// The selection surface is in-code: the test function, the strategy
/// list, the direction and the three counts are fixed values assembled
/// by the binary, not runtime flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub function: TestFunctionId,
    pub direction: Direction,

    /// Independent repetitions of the full experiment.
    pub n_trials: usize,

    /// Optimization iterations after the initial batch.
    pub n_iterations: usize,

    /// Randomly sampled points seeding every strategy run.
    pub n_initial: usize,

    /// The strategies to compare (the random baseline always runs).
    pub strategies: Vec<StrategyId>,

    /// Result tables land under `<output_root>/<function name>/`.
    pub output_root: PathBuf,

    /// Base seed; per-trial and per-strategy streams derive from it.
    pub seed: u64,
}

impl ExperimentConfig {
    pub fn new(function: TestFunctionId) -> Self {
        Self {
            function,
            direction: Direction::Minimize,
            n_trials: 3,
            n_iterations: 100,
            n_initial: 10,
            strategies: vec![
                StrategyId::EiGammaPrior,
                StrategyId::EiDimScaledPrior,
                StrategyId::LogEiGammaPrior,
                StrategyId::LogEiDimScaledPrior,
            ],
            output_root: PathBuf::from("exp_result"),
            seed: 42,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_trials(mut self, n: usize) -> Self {
        self.n_trials = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    pub fn with_initial_batch(mut self, n: usize) -> Self {
        self.n_initial = n;
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<StrategyId>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> BoResult<()> {
        if self.n_trials == 0 {
            return Err(config_error!("n_trials must be at least 1"));
        }
        if self.n_iterations == 0 {
            return Err(config_error!("n_iterations must be at least 1"));
        }
        if self.n_initial == 0 {
            return Err(config_error!("n_initial must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ExperimentConfig::new(TestFunctionId::Hartmann6);
        assert!(config.validate().is_ok());
        assert_eq!(config.n_initial, 10);
    }

    #[test]
    fn builder_overrides_apply() {
        let config = ExperimentConfig::new(TestFunctionId::Hartmann6)
            .with_trials(2)
            .with_iterations(5)
            .with_initial_batch(4)
            .with_seed(7)
            .with_strategies(vec![StrategyId::Tpe]);
        assert_eq!(config.n_trials, 2);
        assert_eq!(config.n_iterations, 5);
        assert_eq!(config.n_initial, 4);
        assert_eq!(config.seed, 7);
        assert_eq!(config.strategies, vec![StrategyId::Tpe]);
    }

    #[test]
    fn zero_counts_are_rejected() {
        let config = ExperimentConfig::new(TestFunctionId::Hartmann6).with_trials(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("n_trials"));
    }
}
