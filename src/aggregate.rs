//! Nested benchmark aggregate and the sequential record fold
//!
//! The aggregate maps variant -> level -> size -> averaged elapsed time.
//! It is created empty, populated by exactly one sequential pass over the
//! input lines, then treated as read-only by projection and rendering.
//! Repeated measurements for the same (variant, level, size) triple are
//! merged according to a [`MergeStrategy`]; only the merged value is kept,
//! never the raw samples.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrazarError};
use crate::record::{OptLevel, Record, Variant};

/// How repeated measurements for the same triple are merged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeStrategy {
    /// Reference semantics: replace the stored value `v` with
    /// `floor((v + new) / 2)`. Order sensitive for three or more samples —
    /// later samples weigh more heavily. Kept as the default so output is
    /// bit-for-bit reproducible against the original plots.
    #[default]
    PairwiseFloor,
    /// True running mean: sum and count are tracked per triple and the
    /// stored value is `floor(sum / count)`. Order independent.
    RunningMean,
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PairwiseFloor => write!(f, "pairwise"),
            Self::RunningMean => write!(f, "mean"),
        }
    }
}

impl MergeStrategy {
    /// Parse from a CLI spelling
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pairwise" => Some(Self::PairwiseFloor),
            "mean" | "running-mean" => Some(Self::RunningMean),
            _ => None,
        }
    }
}

/// Three-level mapping of variant -> level -> size -> averaged elapsed ms
///
/// `BTreeMap` nesting keeps iteration deterministic for serialization and
/// table rendering. Size keys are open (any positive integer seen in input);
/// variant and level keys are the closed enums from [`crate::record`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aggregate {
    strategy: MergeStrategy,
    cells: BTreeMap<Variant, BTreeMap<OptLevel, BTreeMap<u32, u64>>>,
    /// (sum, count) per triple, only maintained under `RunningMean`.
    /// Not part of the serialized form; a deserialized aggregate is
    /// read-only anyway.
    #[serde(skip)]
    tallies: HashMap<(Variant, OptLevel, u32), (u64, u64)>,
}

impl Aggregate {
    /// Create an empty aggregate with the given merge strategy
    #[must_use]
    pub fn new(strategy: MergeStrategy) -> Self {
        Self {
            strategy,
            cells: BTreeMap::new(),
            tallies: HashMap::new(),
        }
    }

    /// Merge strategy this aggregate was built with
    #[must_use]
    pub const fn strategy(&self) -> MergeStrategy {
        self.strategy
    }

    /// Fold one record into the aggregate
    ///
    /// First sighting of a triple stores the raw elapsed value; subsequent
    /// sightings apply the merge rule.
    pub fn insert(&mut self, record: Record) {
        let cell = self
            .cells
            .entry(record.variant)
            .or_default()
            .entry(record.level)
            .or_default();
        match self.strategy {
            MergeStrategy::PairwiseFloor => {
                cell.entry(record.size)
                    .and_modify(|v| *v = (*v + record.elapsed_ms) / 2)
                    .or_insert(record.elapsed_ms);
            },
            MergeStrategy::RunningMean => {
                let tally = self
                    .tallies
                    .entry((record.variant, record.level, record.size))
                    .or_insert((0, 0));
                tally.0 += record.elapsed_ms;
                tally.1 += 1;
                cell.insert(record.size, tally.0 / tally.1);
            },
        }
    }

    /// Build an aggregate from a sequence of raw input lines
    ///
    /// This is the whole parse pass: one sequential fold, no side effects.
    /// The pass aborts on the first malformed line — a partial aggregate is
    /// never returned.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` with the 1-based line number and content of
    /// the first line that fails to decode.
    pub fn from_lines<I, S>(lines: I, strategy: MergeStrategy) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut aggregate = Self::new(strategy);
        for (idx, line) in lines.into_iter().enumerate() {
            let record = Record::parse_line(line.as_ref(), idx + 1)?;
            aggregate.insert(record);
        }
        Ok(aggregate)
    }

    /// Build an aggregate from a log file on disk
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, or `MalformedRecord` from
    /// the underlying parse pass.
    pub fn from_path(path: &Path, strategy: MergeStrategy) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TrazarError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_lines(content.lines(), strategy)
    }

    /// Look up the averaged elapsed time for one triple
    #[must_use]
    pub fn get(&self, variant: Variant, level: OptLevel, size: u32) -> Option<u64> {
        self.cells.get(&variant)?.get(&level)?.get(&size).copied()
    }

    /// Number of stored (variant, level, size) cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    /// Whether the aggregate holds no cells at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The common x-axis: sorted distinct sizes under the reference pair
    /// (`no opt`, `-O0`)
    ///
    /// # Errors
    ///
    /// Returns `EmptyAggregate` if the reference pair has no entries.
    pub fn size_axis(&self) -> Result<Vec<u32>> {
        let sizes: Vec<u32> = self
            .cells
            .get(&Variant::NoOpt)
            .and_then(|levels| levels.get(&OptLevel::O0))
            .map(|cell| cell.keys().copied().collect())
            .unwrap_or_default();
        if sizes.is_empty() {
            return Err(TrazarError::EmptyAggregate);
        }
        Ok(sizes)
    }

    /// Check that every (variant, level) pair has a value for every size
    ///
    /// The rendering views assume rectangular data; this makes the
    /// assumption an explicit precondition instead of a lookup failure
    /// halfway through a chart.
    ///
    /// # Errors
    ///
    /// Returns `MissingDataPoint` naming the first absent cell.
    pub fn verify_complete_grid(&self, sizes: &[u32]) -> Result<()> {
        for variant in Variant::all() {
            for level in OptLevel::all() {
                for &size in sizes {
                    if self.get(variant, level, size).is_none() {
                        return Err(TrazarError::MissingDataPoint {
                            variant: variant.to_string(),
                            level: level.to_string(),
                            size,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Sorted union of every size seen anywhere in the aggregate
    #[must_use]
    pub fn all_sizes(&self) -> Vec<u32> {
        self.cells
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(BTreeMap::keys)
            .copied()
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect()
    }

    /// Render the aggregate as a markdown table, one row per
    /// (variant, level) pair, one column per size
    #[must_use]
    pub fn to_markdown_table(&self) -> String {
        let sizes = self.all_sizes();
        let mut table = String::new();

        let _ = write!(table, "| Variant | Level |");
        for size in &sizes {
            let _ = write!(table, " {size} |");
        }
        table.push('\n');
        let _ = write!(table, "|---------|-------|");
        for _ in &sizes {
            table.push_str("----|");
        }
        table.push('\n');

        for variant in Variant::all() {
            for level in OptLevel::all() {
                let _ = write!(table, "| {variant} | {level} |");
                for &size in &sizes {
                    match self.get(variant, level, size) {
                        Some(ms) => {
                            let _ = write!(table, " {ms} |");
                        },
                        None => table.push_str(" - |"),
                    }
                }
                table.push('\n');
            }
        }

        table
    }
}

/// Versioned, timestamped envelope for persisting an aggregate as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Schema version
    pub version: String,
    /// ISO 8601 timestamp of when the report was produced
    pub timestamp: String,
    /// The aggregated data itself
    pub aggregate: Aggregate,
}

impl AggregateReport {
    /// Wrap a finished aggregate in a report envelope
    #[must_use]
    pub fn new(aggregate: Aggregate) -> Self {
        Self {
            version: "1.0".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            aggregate,
        }
    }

    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    ///
    /// # Errors
    ///
    /// Returns error if JSON is invalid.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
