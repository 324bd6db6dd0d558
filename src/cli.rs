//! CLI command implementations
//!
//! Business logic for the CLI commands, extracted from main.rs for
//! testability. Each command reads the benchmark log, builds the aggregate,
//! and either renders charts, prints a summary table, or exports JSON.

use std::path::Path;

use crate::aggregate::{Aggregate, AggregateReport, MergeStrategy};
use crate::chart;
use crate::error::{Result, TrazarError};

/// Resolve the `--merge` flag spelling into a strategy
///
/// # Errors
///
/// Returns `FormatError` for spellings outside `pairwise` / `mean`.
pub fn parse_merge(merge: &str) -> Result<MergeStrategy> {
    MergeStrategy::parse(merge).ok_or_else(|| TrazarError::FormatError {
        reason: format!("unknown merge strategy '{merge}' (expected 'pairwise' or 'mean')"),
    })
}

/// `plot`: aggregate the log and write every chart artifact
///
/// # Errors
///
/// Propagates parse, grid, I/O, and render failures.
pub fn run_plot(input: &str, out_dir: &str, merge: &str) -> Result<()> {
    let strategy = parse_merge(merge)?;
    let aggregate = Aggregate::from_path(Path::new(input), strategy)?;

    println!("=== Benchmark Plot ===");
    println!();
    println!("Input: {input}");
    println!("Merge strategy: {strategy}");
    println!("Aggregated cells: {}", aggregate.len());
    println!();

    let paths = chart::render_all(&aggregate, Path::new(out_dir))?;
    for path in &paths {
        println!("Generated: {}", path.display());
    }
    Ok(())
}

/// `summary`: aggregate the log and print a markdown table to stdout
///
/// # Errors
///
/// Propagates parse and I/O failures.
pub fn run_summary(input: &str, merge: &str) -> Result<()> {
    let strategy = parse_merge(merge)?;
    let aggregate = Aggregate::from_path(Path::new(input), strategy)?;

    println!("Benchmark summary for {input} (elapsed ms, merge: {strategy})");
    println!();
    print!("{}", aggregate.to_markdown_table());
    Ok(())
}

/// `export`: aggregate the log and write the report JSON
///
/// Writes to `output`, or stdout when `output` is `None`.
///
/// # Errors
///
/// Propagates parse and I/O failures; serialization failures surface as
/// `FormatError`.
pub fn run_export(input: &str, output: Option<&str>, merge: &str) -> Result<()> {
    let strategy = parse_merge(merge)?;
    let aggregate = Aggregate::from_path(Path::new(input), strategy)?;

    let report = AggregateReport::new(aggregate);
    let json = report.to_json().map_err(|e| TrazarError::FormatError {
        reason: format!("failed to serialize report: {e}"),
    })?;

    match output {
        Some(path) => {
            std::fs::write(path, &json).map_err(|e| TrazarError::Io {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            println!("Exported: {path}");
        },
        None => println!("{json}"),
    }
    Ok(())
}

/// Print info about trazar
pub fn print_info() {
    println!("Trazar v{}", crate::VERSION);
    println!("Matmul benchmark log aggregation and comparison plotting");
    println!();
    println!("Views:");
    println!("  - One chart per algorithm variant (seconds, linear axis)");
    println!("  - One comparison chart per optimization level (ms, log axis)");
    println!();
    println!("Input format: LEVEL:SIZE:VARIANT:ELAPSED per line");
}
