//! Error types for trazar
//!
//! All failures are fatal to the current run and carry enough context to
//! identify the offending input line or aggregate key.

use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TrazarError>;

/// Errors produced while parsing, aggregating, or rendering benchmark data
#[derive(Debug, Error)]
pub enum TrazarError {
    /// An input line did not decode into a benchmark record
    #[error("malformed record at line {line_no}: {reason}: {line:?}")]
    MalformedRecord {
        /// 1-based line number in the input
        line_no: usize,
        /// The offending line content
        line: String,
        /// Why the line was rejected
        reason: String,
    },

    /// A projection requested a (variant, level, size) cell with no data
    #[error("missing data point: variant '{variant}', level {level}, size {size}")]
    MissingDataPoint {
        /// Algorithm variant of the missing cell
        variant: String,
        /// Optimization level of the missing cell
        level: String,
        /// Matrix size of the missing cell
        size: u32,
    },

    /// The aggregate holds no data under the reference (variant, level) pair
    #[error("aggregate is empty: no sizes recorded under the reference pair")]
    EmptyAggregate,

    /// Reading input or writing an artifact failed
    #[error("I/O error on {path}: {reason}")]
    Io {
        /// Path that was being read or written
        path: String,
        /// Underlying failure description
        reason: String,
    },

    /// Chart rendering failed
    #[error("failed to render {chart}: {reason}")]
    Render {
        /// Name of the chart artifact being rendered
        chart: String,
        /// Underlying failure description
        reason: String,
    },

    /// JSON serialization or an invalid option value
    #[error("format error: {reason}")]
    FormatError {
        /// Why the value could not be formatted or parsed
        reason: String,
    },
}
