//! Chart rendering over projected series
//!
//! Thin plotters wrapper around [`crate::project`]: one SVG line chart per
//! algorithm variant (execution time in seconds, linear axis, one line per
//! optimization level) and one comparison chart per optimization level (raw
//! milliseconds, log axis, one line per variant). File stems match the
//! original artifact names (`no_opt`, `compare_O2`, ...).

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::aggregate::Aggregate;
use crate::error::{Result, TrazarError};
use crate::project;
use crate::record::{OptLevel, Variant};

const CHART_SIZE: (u32, u32) = (1000, 600);
const TITLE_FONT_SIZE: u32 = 32;
const AXIS_LABEL_FONT_SIZE: u32 = 20;

/// One color per series, indexed by level/variant position
const SERIES_COLORS: [RGBColor; 4] = [
    RGBColor(66, 133, 244),  // blue
    RGBColor(219, 68, 55),   // red
    RGBColor(244, 180, 0),   // yellow
    RGBColor(15, 157, 88),   // green
];

/// Render the per-variant chart: seconds on a linear y-axis, one line per level
///
/// The output file is `<variant_with_underscores>.svg` under `out_dir`.
///
/// # Errors
///
/// Returns `MissingDataPoint` if the aggregate is missing any (level, size)
/// cell for this variant, or `Render` if the drawing backend fails.
pub fn variant_chart(
    aggregate: &Aggregate,
    variant: Variant,
    sizes: &[u32],
    out_dir: &Path,
) -> Result<PathBuf> {
    let projected = project::by_variant(aggregate, variant, &OptLevel::all(), sizes)?;
    let series: Vec<(String, Vec<f64>)> = projected
        .iter()
        .map(|(level, millis)| (level.to_string(), project::seconds_series(millis)))
        .collect();
    let path = out_dir.join(format!("{}.svg", variant.file_stem()));

    draw_linear_chart(&path, variant.description(), sizes, &series).map_err(|e| {
        TrazarError::Render {
            chart: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(path)
}

/// Render the cross-variant comparison chart for one level: raw milliseconds
/// on a log y-axis, one line per variant
///
/// The output file is `compare_<level-without-leading-dash>.svg` under
/// `out_dir`.
///
/// # Errors
///
/// Returns `MissingDataPoint` if the aggregate is missing any (variant, size)
/// cell for this level, or `Render` if the drawing backend fails.
pub fn level_chart(
    aggregate: &Aggregate,
    level: OptLevel,
    sizes: &[u32],
    out_dir: &Path,
) -> Result<PathBuf> {
    let projected = project::by_level(aggregate, level, &Variant::all(), sizes)?;
    let series: Vec<(String, Vec<f64>)> = projected
        .iter()
        .map(|(variant, millis)| {
            (
                variant.to_string(),
                millis.iter().map(|&ms| ms as f64).collect(),
            )
        })
        .collect();
    let path = out_dir.join(format!("compare_{}.svg", level.file_tag()));

    let title = format!("Comparison between algorithms with {level}");
    draw_log_chart(&path, &title, sizes, &series).map_err(|e| TrazarError::Render {
        chart: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(path)
}

/// Render every view: one chart per variant, one comparison chart per level
///
/// Checks the complete-grid precondition once up front so a hole in the data
/// fails before any artifact is written.
///
/// # Errors
///
/// Returns `EmptyAggregate` if no size axis can be derived,
/// `MissingDataPoint` if the grid is incomplete, `Io` if the output
/// directory cannot be created, or `Render` on backend failure.
pub fn render_all(aggregate: &Aggregate, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let sizes = aggregate.size_axis()?;
    aggregate.verify_complete_grid(&sizes)?;

    std::fs::create_dir_all(out_dir).map_err(|e| TrazarError::Io {
        path: out_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut paths = Vec::with_capacity(Variant::all().len() + OptLevel::all().len());
    for variant in Variant::all() {
        paths.push(variant_chart(aggregate, variant, &sizes, out_dir)?);
    }
    for level in OptLevel::all() {
        paths.push(level_chart(aggregate, level, &sizes, out_dir)?);
    }
    Ok(paths)
}

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

fn x_range(sizes: &[u32]) -> std::ops::Range<f64> {
    let x_min = f64::from(*sizes.first().unwrap_or(&0));
    // degenerate single-size axis still needs a non-empty range
    let x_max = f64::from(*sizes.last().unwrap_or(&0)).max(x_min + 1.0);
    x_min..x_max
}

fn series_points(sizes: &[u32], values: &[f64]) -> Vec<(f64, f64)> {
    sizes
        .iter()
        .zip(values.iter())
        .map(|(&size, &value)| (f64::from(size), value))
        .collect()
}

fn draw_linear_chart(
    path: &Path,
    title: &str,
    sizes: &[u32],
    series: &[(String, Vec<f64>)],
) -> DrawResult {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = series
        .iter()
        .flat_map(|(_, values)| values.iter().copied())
        .fold(0.0_f64, f64::max)
        .max(0.001)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range(sizes), 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Matrix size NxN")
        .y_desc("Execution time (s)")
        .label_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (idx, (label, values)) in series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                series_points(sizes, values),
                color.stroke_width(3),
            ))?
            .label(label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_log_chart(
    path: &Path,
    title: &str,
    sizes: &[u32],
    series: &[(String, Vec<f64>)],
) -> DrawResult {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // log axis needs a strictly positive, non-empty range
    let y_min = series
        .iter()
        .flat_map(|(_, values)| values.iter().copied())
        .fold(f64::MAX, f64::min)
        .max(1.0);
    let y_max = series
        .iter()
        .flat_map(|(_, values)| values.iter().copied())
        .fold(0.0_f64, f64::max)
        * 2.0;
    let y_max = y_max.max(y_min * 10.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range(sizes), (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Matrix size NxN")
        .y_desc("Execution time (ms)")
        .label_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()?;

    for (idx, (label, values)) in series.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                series_points(sizes, values),
                color.stroke_width(3),
            ))?
            .label(label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
