//! End-to-end pipeline tests
//!
//! Drives the full path the CLI takes: benchmark log on disk -> aggregate ->
//! projection -> rendered SVG artifacts / exported JSON report.

use std::io::Write;

use trazar::aggregate::{Aggregate, AggregateReport, MergeStrategy};
use trazar::record::{OptLevel, Variant};
use trazar::{chart, project};

// ============================================================================
// Helper Functions
// ============================================================================

/// Write a complete grid log for sizes 100/200/500, plus a duplicate
/// measurement for (no opt, -O0, 100)
fn write_grid_log(file: &mut impl Write) {
    for variant in Variant::all() {
        for level in OptLevel::all() {
            for size in [100u32, 200, 500] {
                writeln!(file, "{level}:{size}:{variant}:{}", u64::from(size * 3)).unwrap();
            }
        }
    }
    // repeated measurement: merges with the earlier 300 to floor((300+500)/2)
    writeln!(file, "-O0:100:no opt:500").unwrap();
}

// ============================================================================
// Aggregation Tests
// ============================================================================

#[test]
fn test_aggregate_from_file_with_duplicate_measurement() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_grid_log(&mut file);
    file.flush().unwrap();

    let aggregate = Aggregate::from_path(file.path(), MergeStrategy::PairwiseFloor).unwrap();
    // floor((300 + 500) / 2) = 400
    assert_eq!(aggregate.get(Variant::NoOpt, OptLevel::O0, 100), Some(400));
    // single measurements stored exactly
    assert_eq!(aggregate.get(Variant::NoOpt, OptLevel::O0, 200), Some(600));
    assert_eq!(aggregate.get(Variant::Parallel, OptLevel::O3, 500), Some(1500));

    let sizes = aggregate.size_axis().unwrap();
    assert_eq!(sizes, vec![100, 200, 500]);
    assert!(aggregate.verify_complete_grid(&sizes).is_ok());
}

#[test]
fn test_malformed_file_aborts_whole_pass() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "-O0:100:no opt:50").unwrap();
    writeln!(file, "-O0:not-a-number:no opt:50").unwrap();
    file.flush().unwrap();

    let err = Aggregate::from_path(file.path(), MergeStrategy::PairwiseFloor).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line 2"));
    assert!(msg.contains("not-a-number"));
}

#[test]
fn test_reference_order_sensitivity_through_file() {
    // Same three records, two orders, different pairwise results
    let mut first = tempfile::NamedTempFile::new().unwrap();
    for elapsed in [10, 20, 100] {
        writeln!(first, "-O0:100:no opt:{elapsed}").unwrap();
    }
    first.flush().unwrap();

    let mut second = tempfile::NamedTempFile::new().unwrap();
    for elapsed in [100, 10, 20] {
        writeln!(second, "-O0:100:no opt:{elapsed}").unwrap();
    }
    second.flush().unwrap();

    let a = Aggregate::from_path(first.path(), MergeStrategy::PairwiseFloor).unwrap();
    let b = Aggregate::from_path(second.path(), MergeStrategy::PairwiseFloor).unwrap();
    assert_eq!(a.get(Variant::NoOpt, OptLevel::O0, 100), Some(57));
    assert_eq!(b.get(Variant::NoOpt, OptLevel::O0, 100), Some(37));
}

// ============================================================================
// Projection Tests
// ============================================================================

#[test]
fn test_projection_views_agree_on_shared_cells() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_grid_log(&mut file);
    file.flush().unwrap();
    let aggregate = Aggregate::from_path(file.path(), MergeStrategy::PairwiseFloor).unwrap();
    let sizes = aggregate.size_axis().unwrap();

    let by_variant =
        project::by_variant(&aggregate, Variant::WithOpt, &OptLevel::all(), &sizes).unwrap();
    let by_level =
        project::by_level(&aggregate, OptLevel::O1, &Variant::all(), &sizes).unwrap();

    // the (with opt, -O1) series must be identical in both views
    assert_eq!(by_variant[&OptLevel::O1], by_level[&Variant::WithOpt]);
}

// ============================================================================
// Rendering & Export Tests
// ============================================================================

#[test]
fn test_render_all_artifact_names() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_grid_log(&mut file);
    file.flush().unwrap();
    let aggregate = Aggregate::from_path(file.path(), MergeStrategy::PairwiseFloor).unwrap();

    let out = tempfile::tempdir().unwrap();
    let paths = chart::render_all(&aggregate, out.path()).unwrap();
    assert_eq!(paths.len(), 8);

    for stem in ["no_opt", "with_opt", "parallel", "with_opt+parallel"] {
        assert!(out.path().join(format!("{stem}.svg")).exists());
    }
    for tag in ["O0", "O1", "O2", "O3"] {
        assert!(out.path().join(format!("compare_{tag}.svg")).exists());
    }
}

#[test]
fn test_report_round_trip_preserves_cells() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_grid_log(&mut file);
    file.flush().unwrap();
    let aggregate = Aggregate::from_path(file.path(), MergeStrategy::RunningMean).unwrap();
    // running mean of [300, 500] is exact: 400
    assert_eq!(aggregate.get(Variant::NoOpt, OptLevel::O0, 100), Some(400));

    let json = AggregateReport::new(aggregate.clone()).to_json().unwrap();
    let parsed = AggregateReport::from_json(&json).unwrap();
    for variant in Variant::all() {
        for level in OptLevel::all() {
            for size in [100, 200, 500] {
                assert_eq!(
                    parsed.aggregate.get(variant, level, size),
                    aggregate.get(variant, level, size),
                );
            }
        }
    }
}
