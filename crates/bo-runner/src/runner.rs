//! The experiment loop: trials × (random baseline + strategies).

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use bo_driver::{ObservationStore, ReplayDriver};
use bo_functions::TestFunction;
use bo_types::BoResult;

use crate::config::ExperimentConfig;
use crate::table::ResultTable;

/// Column name of the random-search baseline.
pub const RANDOM_COLUMN: &str = "Random";

const INIT_LANE: u64 = 0;
const RANDOM_LANE: u64 = 1;
const STRATEGY_LANE_BASE: u64 = 2;

/// Derive an independent seed per (trial, lane) from the base seed.
fn derive_seed(base: u64, trial: usize, lane: u64) -> u64 {
    base ^ (trial as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ lane.wrapping_mul(0xD1B5_4A32_D192_ED03)
}

/// Run one independent trial and return its result table.
///
/// The initial batch is drawn once and seeds every strategy run; the
/// random-search baseline extends a separate sequence and never shares
/// state with any strategy.
pub fn run_trial(
    function: &dyn TestFunction,
    config: &ExperimentConfig,
    trial: usize,
) -> BoResult<ResultTable> {
    let space = function.space().clone();
    space.validate()?;

    let mut init_rng = StdRng::seed_from_u64(derive_seed(config.seed, trial, INIT_LANE));
    let initial_xs: Vec<Vec<f64>> = (0..config.n_initial)
        .map(|_| function.sample_row(&mut init_rng))
        .collect();
    let initial_ys = function.evaluate(&initial_xs);

    let mut table = ResultTable::new();

    // Random-search baseline.
    let mut random_rng = StdRng::seed_from_u64(derive_seed(config.seed, trial, RANDOM_LANE));
    let mut random_ys = initial_ys.clone();
    for _ in 0..config.n_iterations {
        let x = function.sample_row(&mut random_rng);
        let y = function.evaluate(std::slice::from_ref(&x))[0];
        random_ys.push(y);
    }
    table.push_column(RANDOM_COLUMN, random_ys);

    // Each strategy starts fresh from the same initial batch.
    for (lane, strategy) in config.strategies.iter().enumerate() {
        info!(trial, strategy = strategy.label(), "starting optimization");
        let mut store = ObservationStore::new(initial_xs.clone(), initial_ys.clone())?;
        let mut driver = ReplayDriver::new(
            *strategy,
            space.clone(),
            config.direction,
            derive_seed(config.seed, trial, STRATEGY_LANE_BASE + lane as u64),
        );

        for iteration in 1..=config.n_iterations {
            let x = driver.next_candidate(&store)?;
            let y = function.evaluate(std::slice::from_ref(&x))[0];
            store.append(x, y)?;

            if let Some((_, best)) = config.direction.best_of(store.ys()) {
                debug!(
                    trial,
                    strategy = strategy.label(),
                    iteration,
                    best,
                    "iteration complete"
                );
            }
        }

        table.push_column(strategy.label(), store.ys().to_vec());
    }

    Ok(table)
}

/// Run the configured number of trials and write one CSV table per trial.
///
/// Creates `<output_root>/<function name>/` if absent and overwrites any
/// existing `run_{j}.csv` for the same trial number. Returns the written
/// paths in trial order.
pub fn run_experiment(config: &ExperimentConfig) -> BoResult<Vec<PathBuf>> {
    config.validate()?;
    let function = config.function.build();

    let out_dir = config.output_root.join(config.function.name());
    fs::create_dir_all(&out_dir)?;

    info!(
        experiment = config.function.name(),
        trials = config.n_trials,
        iterations = config.n_iterations,
        initial = config.n_initial,
        "running experiment"
    );

    let mut written = Vec::with_capacity(config.n_trials);
    for trial in 1..=config.n_trials {
        info!(trial, "starting trial");
        let table = run_trial(function.as_ref(), config, trial)?;

        let path = out_dir.join(format!("run_{trial}.csv"));
        table.write_csv(&path)?;
        info!(trial, path = %path.display(), "wrote trial results");
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_functions::{SumOfSquares, TestFunctionId};
    use bo_samplers::StrategyId;
    use bo_types::Direction;
    use tempfile::tempdir;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig::new(TestFunctionId::FiveWellPotential)
            .with_trials(2)
            .with_iterations(3)
            .with_initial_batch(4)
            .with_strategies(vec![StrategyId::Tpe])
            .with_seed(11)
    }

    #[test]
    fn every_column_has_initial_plus_iteration_rows() {
        let function = SumOfSquares::new(2);
        let config = small_config().with_strategies(vec![StrategyId::Tpe, StrategyId::Lcb]);
        let table = run_trial(&function, &config, 1).unwrap();

        assert_eq!(table.columns().len(), 3);
        for column in table.columns() {
            assert_eq!(column.values.len(), config.n_initial + config.n_iterations);
        }
        assert!(table.column(RANDOM_COLUMN).is_some());
    }

    #[test]
    fn end_to_end_on_a_two_dimensional_domain() {
        // 10 initial points on [-5, 5]^2, minimizing, 5 iterations.
        let function = SumOfSquares::new(2);
        let config = ExperimentConfig::new(TestFunctionId::FiveWellPotential)
            .with_trials(1)
            .with_iterations(5)
            .with_initial_batch(10)
            .with_strategies(vec![StrategyId::EiGammaPrior])
            .with_seed(3);

        let table = run_trial(&function, &config, 1).unwrap();
        let column = table.column("EI GammaPrior").unwrap();
        assert_eq!(column.values.len(), 15);

        let best = Direction::Minimize.running_best(&column.values);
        assert!(best[14] <= best[9]);
    }

    #[test]
    fn trials_write_independent_files() {
        let dir = tempdir().unwrap();
        let config = small_config().with_output_root(dir.path());

        let written = run_experiment(&config).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("FiveWellPotential/run_1.csv"));
        assert!(written[1].ends_with("FiveWellPotential/run_2.csv"));

        let first = ResultTable::read_csv(&written[0]).unwrap();
        let second = ResultTable::read_csv(&written[1]).unwrap();
        assert_eq!(first.n_rows(), second.n_rows());
        // Fresh initial batches per trial: the raw series differ.
        assert_ne!(
            first.column(RANDOM_COLUMN).unwrap().values,
            second.column(RANDOM_COLUMN).unwrap().values
        );
    }

    #[test]
    fn rerunning_a_trial_overwrites_its_file() {
        let dir = tempdir().unwrap();
        let config = small_config()
            .with_trials(1)
            .with_output_root(dir.path());

        let first = run_experiment(&config).unwrap();
        let second = run_experiment(&config).unwrap();
        assert_eq!(first, second);
        // Same seed, same config: identical contents after the overwrite.
        let a = ResultTable::read_csv(&first[0]).unwrap();
        let b = ResultTable::read_csv(&second[0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_config_fails_before_any_io() {
        let dir = tempdir().unwrap();
        let config = small_config()
            .with_trials(0)
            .with_output_root(dir.path().join("never"));
        assert!(run_experiment(&config).is_err());
        assert!(!dir.path().join("never").exists());
    }
}
