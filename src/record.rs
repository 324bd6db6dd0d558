//! Benchmark record vocabulary and line decoding
//!
//! A record is one observation from the benchmark log: which compiler
//! optimization level the variant was built with, the matrix dimension,
//! which algorithm variant ran, and the elapsed wall time in milliseconds.
//! The level and variant vocabularies are closed sets; any other spelling
//! in the input is a malformed record.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrazarError};

/// Compiler optimization level a variant was built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptLevel {
    /// `-O0` (no optimization)
    O0,
    /// `-O1`
    O1,
    /// `-O2`
    O2,
    /// `-O3`
    O3,
}

impl std::fmt::Display for OptLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::O0 => write!(f, "-O0"),
            Self::O1 => write!(f, "-O1"),
            Self::O2 => write!(f, "-O2"),
            Self::O3 => write!(f, "-O3"),
        }
    }
}

impl OptLevel {
    /// Parse from the log spelling (`-O0`..`-O3`)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "-O0" => Some(Self::O0),
            "-O1" => Some(Self::O1),
            "-O2" => Some(Self::O2),
            "-O3" => Some(Self::O3),
            _ => None,
        }
    }

    /// All levels in canonical order
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::O0, Self::O1, Self::O2, Self::O3]
    }

    /// Level name without the leading dash, used in comparison filenames
    #[must_use]
    pub const fn file_tag(&self) -> &'static str {
        match self {
            Self::O0 => "O0",
            Self::O1 => "O1",
            Self::O2 => "O2",
            Self::O3 => "O3",
        }
    }
}

/// Matrix multiplication algorithm variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Naive algorithm, no optimizations
    NoOpt,
    /// Naive algorithm with nested loop tiling
    WithOpt,
    /// Naive unoptimized algorithm in parallel
    Parallel,
    /// Tiled algorithm in parallel
    WithOptParallel,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoOpt => write!(f, "no opt"),
            Self::WithOpt => write!(f, "with opt"),
            Self::Parallel => write!(f, "parallel"),
            Self::WithOptParallel => write!(f, "with opt+parallel"),
        }
    }
}

impl Variant {
    /// Parse from the log spelling
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "no opt" => Some(Self::NoOpt),
            "with opt" => Some(Self::WithOpt),
            "parallel" => Some(Self::Parallel),
            "with opt+parallel" => Some(Self::WithOptParallel),
            _ => None,
        }
    }

    /// All variants in canonical order
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::NoOpt,
            Self::WithOpt,
            Self::Parallel,
            Self::WithOptParallel,
        ]
    }

    /// Chart title for this variant
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NoOpt => "Naive algorithm with no optimisations",
            Self::WithOpt => "Naive algorithm with nested loop tiling",
            Self::Parallel => "Naive unoptimised algorithm in parallel",
            Self::WithOptParallel => "Naive algorithm with nested loop tiling in parallel",
        }
    }

    /// Artifact file stem: the log spelling with spaces replaced by underscores
    #[must_use]
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::NoOpt => "no_opt",
            Self::WithOpt => "with_opt",
            Self::Parallel => "parallel",
            Self::WithOptParallel => "with_opt+parallel",
        }
    }
}

/// A single decoded benchmark observation
///
/// Immutable once decoded; one input line maps to exactly one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Optimization level the variant was built with
    pub level: OptLevel,
    /// Matrix dimension N (the matrices are NxN)
    pub size: u32,
    /// Algorithm variant that was timed
    pub variant: Variant,
    /// Elapsed wall time in milliseconds
    pub elapsed_ms: u64,
}

impl Record {
    /// Decode one `level:size:variant:elapsed` line
    ///
    /// `line_no` is 1-based and only used in error reporting.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` if the line does not split into exactly four
    /// colon-separated fields, the numeric fields do not parse, or the level
    /// or variant spelling is outside the closed vocabulary.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let malformed = |reason: String| TrazarError::MalformedRecord {
            line_no,
            line: line.to_string(),
            reason,
        };

        let trimmed = line.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = trimmed.split(':').collect();
        if fields.len() != 4 {
            return Err(malformed(format!("expected 4 fields, got {}", fields.len())));
        }

        let level = OptLevel::parse(fields[0])
            .ok_or_else(|| malformed(format!("unknown optimization level '{}'", fields[0])))?;
        let size: u32 = fields[1]
            .trim()
            .parse()
            .map_err(|_| malformed(format!("invalid size '{}'", fields[1])))?;
        if size == 0 {
            return Err(malformed("size must be positive".to_string()));
        }
        let variant = Variant::parse(fields[2])
            .ok_or_else(|| malformed(format!("unknown variant '{}'", fields[2])))?;
        let elapsed_ms: u64 = fields[3]
            .trim()
            .parse()
            .map_err(|_| malformed(format!("invalid elapsed time '{}'", fields[3])))?;

        Ok(Self {
            level,
            size,
            variant,
            elapsed_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // OptLevel Tests
    // =========================================================================

    #[test]
    fn test_opt_level_display() {
        assert_eq!(format!("{}", OptLevel::O0), "-O0");
        assert_eq!(format!("{}", OptLevel::O3), "-O3");
    }

    #[test]
    fn test_opt_level_parse() {
        assert_eq!(OptLevel::parse("-O0"), Some(OptLevel::O0));
        assert_eq!(OptLevel::parse("-O2"), Some(OptLevel::O2));
        assert_eq!(OptLevel::parse("O2"), None);
        assert_eq!(OptLevel::parse("-O4"), None);
    }

    #[test]
    fn test_opt_level_all_ordered() {
        let all = OptLevel::all();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], OptLevel::O0);
        assert_eq!(all[3], OptLevel::O3);
    }

    #[test]
    fn test_opt_level_file_tag() {
        assert_eq!(OptLevel::O1.file_tag(), "O1");
    }

    // =========================================================================
    // Variant Tests
    // =========================================================================

    #[test]
    fn test_variant_display_round_trip() {
        for variant in Variant::all() {
            assert_eq!(Variant::parse(&variant.to_string()), Some(variant));
        }
    }

    #[test]
    fn test_variant_parse_unknown() {
        assert_eq!(Variant::parse("blocked"), None);
        assert_eq!(Variant::parse("No Opt"), None);
    }

    #[test]
    fn test_variant_file_stem() {
        assert_eq!(Variant::NoOpt.file_stem(), "no_opt");
        assert_eq!(Variant::WithOptParallel.file_stem(), "with_opt+parallel");
    }

    #[test]
    fn test_variant_description() {
        assert!(Variant::WithOpt.description().contains("tiling"));
    }

    // =========================================================================
    // Record Tests
    // =========================================================================

    #[test]
    fn test_parse_line_valid() {
        let record = Record::parse_line("-O2:500:with opt:1234", 1).unwrap();
        assert_eq!(record.level, OptLevel::O2);
        assert_eq!(record.size, 500);
        assert_eq!(record.variant, Variant::WithOpt);
        assert_eq!(record.elapsed_ms, 1234);
    }

    #[test]
    fn test_parse_line_trailing_newline() {
        let record = Record::parse_line("-O0:100:no opt:50\n", 1).unwrap();
        assert_eq!(record.elapsed_ms, 50);
    }

    #[test]
    fn test_parse_line_too_few_fields() {
        let err = Record::parse_line("-O0:100:no opt", 7).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("expected 4 fields"));
        assert!(msg.contains("-O0:100:no opt"));
    }

    #[test]
    fn test_parse_line_too_many_fields() {
        assert!(Record::parse_line("-O0:100:no opt:50:extra", 1).is_err());
    }

    #[test]
    fn test_parse_line_bad_size() {
        let err = Record::parse_line("-O0:abc:no opt:50", 1).unwrap_err();
        assert!(err.to_string().contains("invalid size"));
    }

    #[test]
    fn test_parse_line_zero_size() {
        let err = Record::parse_line("-O0:0:no opt:50", 1).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_parse_line_bad_elapsed() {
        let err = Record::parse_line("-O0:100:no opt:-5", 1).unwrap_err();
        assert!(err.to_string().contains("invalid elapsed"));
    }

    #[test]
    fn test_parse_line_unknown_level() {
        let err = Record::parse_line("-Ofast:100:no opt:50", 1).unwrap_err();
        assert!(err.to_string().contains("unknown optimization level"));
    }

    #[test]
    fn test_parse_line_unknown_variant() {
        let err = Record::parse_line("-O0:100:strassen:50", 1).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn test_record_serialize() {
        let record = Record {
            level: OptLevel::O3,
            size: 1000,
            variant: Variant::Parallel,
            elapsed_ms: 42,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("O3"));
        assert!(json.contains("Parallel"));
        assert!(json.contains("42"));
    }
}
