//! # Trazar
//!
//! Trazar (Spanish: "to plot, to trace") aggregates a log of matrix
//! multiplication benchmark measurements and renders visual comparisons of
//! execution time across algorithm variants and compiler optimization
//! levels.
//!
//! ## Pipeline
//!
//! 1. **Parse & aggregate**: each `LEVEL:SIZE:VARIANT:ELAPSED` line is
//!    decoded into a [`record::Record`] and folded into a read-once
//!    [`aggregate::Aggregate`], merging repeated measurements per
//!    (variant, level, size) triple.
//! 2. **Project & render**: the finished aggregate is sliced into ordered
//!    series ([`project`]) and drawn as SVG line charts ([`chart`]) - one
//!    chart per variant (seconds, linear axis) and one comparison chart per
//!    optimization level (milliseconds, log axis).
//!
//! ## Example
//!
//! ```rust
//! use trazar::aggregate::{Aggregate, MergeStrategy};
//! use trazar::record::{OptLevel, Variant};
//!
//! let aggregate = Aggregate::from_lines(
//!     ["-O0:100:no opt:50", "-O0:200:no opt:80", "-O0:100:no opt:70"],
//!     MergeStrategy::PairwiseFloor,
//! )
//! .unwrap();
//!
//! // repeated measurement merged: floor((50 + 70) / 2)
//! assert_eq!(aggregate.get(Variant::NoOpt, OptLevel::O0, 100), Some(60));
//! assert_eq!(aggregate.get(Variant::NoOpt, OptLevel::O0, 200), Some(80));
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Clippy allows (MUST come after deny/warn to override them)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // u64 ms -> f64 chart values
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

pub mod aggregate;
pub mod chart;
/// CLI command implementations (extracted for testability)
pub mod cli;
pub mod error;
pub mod project;
pub mod record;

// Re-exports for convenience
pub use aggregate::{Aggregate, AggregateReport, MergeStrategy};
pub use error::{Result, TrazarError};
pub use record::{OptLevel, Record, Variant};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
