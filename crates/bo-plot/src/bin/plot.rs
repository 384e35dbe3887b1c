use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use bo_functions::TestFunctionId;
use bo_types::Direction;

fn main() -> anyhow::Result<()> {
    // Logging is configured once, explicitly, at process start.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Must match the experiment the bench binary ran.
    let function = TestFunctionId::SumOfSquares40;
    let direction = Direction::Minimize;
    let n_trials = 3;
    let output_root = PathBuf::from("exp_result");

    let (all_path, avg_path) =
        bo_plot::render_experiment(&output_root, function.name(), n_trials, direction)?;

    println!("{}", all_path.display());
    println!("{}", avg_path.display());

    Ok(())
}
