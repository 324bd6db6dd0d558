//! Ordered series projection over a finished aggregate
//!
//! Projection slices the read-only aggregate into the value sequences the
//! charts consume: one sequence per level for a fixed variant, or one per
//! variant for a fixed level, always ordered to match the shared size axis.
//!
//! The two chart families deliberately use different units: per-variant
//! charts plot seconds, cross-variant comparison charts plot raw
//! milliseconds on a log axis. The conversion is a separate, explicit step
//! (`seconds_series`) rather than a unit-generic renderer.

use std::collections::BTreeMap;

use crate::aggregate::Aggregate;
use crate::error::{Result, TrazarError};
use crate::record::{OptLevel, Variant};

/// Project one millisecond sequence per level for a fixed variant
///
/// Each sequence is ordered to match `sizes`.
///
/// # Errors
///
/// Returns `MissingDataPoint` naming the first (level, size) pair absent
/// from the aggregate.
pub fn by_variant(
    aggregate: &Aggregate,
    variant: Variant,
    levels: &[OptLevel],
    sizes: &[u32],
) -> Result<BTreeMap<OptLevel, Vec<u64>>> {
    let mut series = BTreeMap::new();
    for &level in levels {
        series.insert(level, lookup_series(aggregate, variant, level, sizes)?);
    }
    Ok(series)
}

/// Project one millisecond sequence per variant for a fixed level
///
/// Symmetric to [`by_variant`].
///
/// # Errors
///
/// Returns `MissingDataPoint` naming the first (variant, size) pair absent
/// from the aggregate.
pub fn by_level(
    aggregate: &Aggregate,
    level: OptLevel,
    variants: &[Variant],
    sizes: &[u32],
) -> Result<BTreeMap<Variant, Vec<u64>>> {
    let mut series = BTreeMap::new();
    for &variant in variants {
        series.insert(variant, lookup_series(aggregate, variant, level, sizes)?);
    }
    Ok(series)
}

/// Convert a millisecond sequence to seconds for the per-variant charts
#[must_use]
pub fn seconds_series(millis: &[u64]) -> Vec<f64> {
    millis.iter().map(|&ms| ms as f64 / 1000.0).collect()
}

fn lookup_series(
    aggregate: &Aggregate,
    variant: Variant,
    level: OptLevel,
    sizes: &[u32],
) -> Result<Vec<u64>> {
    sizes
        .iter()
        .map(|&size| {
            aggregate
                .get(variant, level, size)
                .ok_or_else(|| TrazarError::MissingDataPoint {
                    variant: variant.to_string(),
                    level: level.to_string(),
                    size,
                })
        })
        .collect()
}
