//! Trazar CLI - matmul benchmark plotting
//!
//! # Commands
//!
//! - `plot` - Aggregate a benchmark log and render all chart views
//! - `summary` - Print the aggregate as a markdown table
//! - `export` - Export the aggregate as a versioned JSON report
//! - `info` - Show version info

use clap::{Parser, Subcommand};

use trazar::cli;

/// Trazar - matmul benchmark log aggregation and comparison plotting
///
/// Reads a `LEVEL:SIZE:VARIANT:ELAPSED` benchmark log and produces one chart
/// per algorithm variant plus one comparison chart per optimization level.
#[derive(Parser)]
#[command(name = "trazar")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a benchmark log and render all chart views
    ///
    /// Examples:
    ///   trazar plot
    ///   trazar plot --input results/output.csv --out-dir plots
    ///   trazar plot --merge mean
    Plot {
        /// Benchmark log to read
        #[arg(short, long, default_value = "output.csv")]
        input: String,

        /// Directory to write chart artifacts into
        #[arg(short, long, default_value = ".")]
        out_dir: String,

        /// Repeated-measurement merge strategy: pairwise or mean
        #[arg(short, long, default_value = "pairwise")]
        merge: String,
    },
    /// Print the aggregate as a markdown table
    Summary {
        /// Benchmark log to read
        #[arg(short, long, default_value = "output.csv")]
        input: String,

        /// Repeated-measurement merge strategy: pairwise or mean
        #[arg(short, long, default_value = "pairwise")]
        merge: String,
    },
    /// Export the aggregate as a versioned JSON report
    Export {
        /// Benchmark log to read
        #[arg(short, long, default_value = "output.csv")]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Repeated-measurement merge strategy: pairwise or mean
        #[arg(short, long, default_value = "pairwise")]
        merge: String,
    },
    /// Show version info
    Info,
}

fn main() {
    let args = Cli::parse();

    let result = match args.command {
        Commands::Plot {
            input,
            out_dir,
            merge,
        } => cli::run_plot(&input, &out_dir, &merge),
        Commands::Summary { input, merge } => cli::run_summary(&input, &merge),
        Commands::Export {
            input,
            output,
            merge,
        } => cli::run_export(&input, output.as_deref(), &merge),
        Commands::Info => {
            cli::print_info();
            Ok(())
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
