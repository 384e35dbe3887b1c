use tracing_subscriber::EnvFilter;

use bo_functions::TestFunctionId;
use bo_runner::ExperimentConfig;
use bo_samplers::StrategyId;
use bo_types::Direction;

fn main() -> anyhow::Result<()> {
    // Logging is configured once, explicitly, at process start.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Experiment selection lives here, in code.
    let config = ExperimentConfig::new(TestFunctionId::SumOfSquares40)
        .with_direction(Direction::Minimize)
        .with_trials(3)
        .with_iterations(100)
        .with_initial_batch(10)
        .with_strategies(vec![
            StrategyId::EiGammaPrior,
            StrategyId::EiDimScaledPrior,
            StrategyId::LogEiGammaPrior,
            StrategyId::LogEiDimScaledPrior,
        ]);

    let written = bo_runner::run_experiment(&config)?;
    for path in written {
        println!("{}", path.display());
    }

    Ok(())
}
