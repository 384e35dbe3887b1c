//! # bo-plot
//!
//! Reads the per-trial result tables back from disk and renders two
//! figures per experiment: every trial's raw samples with their
//! running-best curves, and the running best averaged across trials.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use bo_runner::ResultTable;
use bo_types::{BoError, BoResult, Direction};

fn plot_err<E: std::fmt::Display>(e: E) -> BoError {
    BoError::Plot(e.to_string())
}

/// Load the `run_{j}.csv` tables of one experiment in trial order.
pub fn load_tables(
    output_root: &Path,
    function_name: &str,
    n_trials: usize,
) -> BoResult<Vec<ResultTable>> {
    let dir = output_root.join(function_name);
    (1..=n_trials)
        .map(|trial| ResultTable::read_csv(&dir.join(format!("run_{trial}.csv"))))
        .collect()
}

/// Value range covering every column of every table, padded a little so
/// markers at the extremes stay visible.
fn value_range(tables: &[ResultTable]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for table in tables {
        for column in table.columns() {
            for &v in &column.values {
                min = min.min(v);
                max = max.max(v);
            }
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(1e-9);
    (min - pad, max + pad)
}

/// One subplot per trial: a scatter of the raw samples plus the
/// running-best line per strategy.
pub fn render_trials(
    tables: &[ResultTable],
    direction: Direction,
    path: &Path,
) -> BoResult<()> {
    let n_trials = tables.len().max(1);
    let (y_min, y_max) = value_range(tables);
    let n_rows = tables.iter().map(ResultTable::n_rows).max().unwrap_or(0);

    let root = BitMapBackend::new(path, (420 * n_trials as u32, 360)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let areas = root.split_evenly((1, n_trials));

    for (trial_idx, (table, area)) in tables.iter().zip(areas.iter()).enumerate() {
        let mut chart = ChartBuilder::on(area)
            .caption(format!("Trial:{}", trial_idx + 1), ("sans-serif", 18))
            .margin(8)
            .x_label_area_size(28)
            .y_label_area_size(46)
            .build_cartesian_2d(0f64..n_rows as f64, y_min..y_max)
            .map_err(plot_err)?;
        chart.configure_mesh().draw().map_err(plot_err)?;

        for (color_idx, column) in table.columns().iter().enumerate() {
            let color = Palette99::pick(color_idx).to_rgba();

            chart
                .draw_series(
                    column
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| Circle::new((i as f64, v), 2, color.filled())),
                )
                .map_err(plot_err)?;

            let best = direction.running_best(&column.values);
            chart
                .draw_series(LineSeries::new(
                    best.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                    &color,
                ))
                .map_err(plot_err)?
                .label(column.name.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color)
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

/// The running best averaged across trials, one line per strategy.
pub fn render_average(
    tables: &[ResultTable],
    direction: Direction,
    title: &str,
    path: &Path,
) -> BoResult<()> {
    let first = tables
        .first()
        .ok_or_else(|| BoError::Plot("no tables to average".to_string()))?;
    let n_rows = first.n_rows();

    // Average the running-best curves column by column across trials.
    let mut averages: Vec<(String, Vec<f64>)> = Vec::new();
    for column in first.columns() {
        let mut sum = vec![0.0; n_rows];
        let mut count = 0usize;
        for table in tables {
            if let Some(other) = table.column(&column.name) {
                for (acc, v) in sum.iter_mut().zip(direction.running_best(&other.values)) {
                    *acc += v;
                }
                count += 1;
            }
        }
        let mean: Vec<f64> = sum.into_iter().map(|s| s / count as f64).collect();
        averages.push((column.name.clone(), mean));
    }

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, values) in &averages {
        for &v in values {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    let pad = ((y_max - y_min) * 0.05).max(1e-9);

    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(32)
        .y_label_area_size(52)
        .build_cartesian_2d(0f64..n_rows as f64, (y_min - pad)..(y_max + pad))
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .y_desc("best_f")
        .draw()
        .map_err(plot_err)?;

    for (color_idx, (name, values)) in averages.iter().enumerate() {
        let color = Palette99::pick(color_idx).to_rgba();
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                &color,
            ))
            .map_err(plot_err)?
            .label(name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Render both figures for one experiment and return their paths.
pub fn render_experiment(
    output_root: &Path,
    function_name: &str,
    n_trials: usize,
    direction: Direction,
) -> BoResult<(PathBuf, PathBuf)> {
    let tables = load_tables(output_root, function_name, n_trials)?;
    let dir = output_root.join(function_name);

    let all_path = dir.join(format!("{function_name}_all.png"));
    render_trials(&tables, direction, &all_path)?;
    info!(path = %all_path.display(), "wrote per-trial figure");

    let avg_path = dir.join(format!("{function_name}_performance.png"));
    render_average(
        &tables,
        direction,
        &format!("{function_name} (average)"),
        &avg_path,
    )?;
    info!(path = %avg_path.display(), "wrote averaged figure");

    Ok((all_path, avg_path))
}
