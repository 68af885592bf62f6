//! Integration tests for dataset and filter configuration files.

mod common;

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use common::sample_dataset;
use oifits::persistence::{DatasetReader, DatasetWriter, JsonFormat, read_with, write_with};
use oifits::{Bounds, FilterSpec, OiError, filter, read_dataset, write_dataset};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

#[test]
fn test_write_and_read_dataset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("night1").join("gravity.json");
    let dataset = sample_dataset();

    write_dataset(&dataset, &path).unwrap();
    assert!(path.exists());

    let loaded = read_dataset(&path).unwrap();
    assert_eq!(loaded, dataset);
    assert_eq!(loaded.lookup_wavelength("GRAVITY_FT").unwrap().nwave(), 3);
    assert!(loaded.lookup_element("VLTI", 4).is_some());
}

#[test]
fn test_compact_format_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("compact.json");
    let format = JsonFormat { pretty: false };
    let dataset = filter(
        &sample_dataset(),
        &FilterSpec::new().with_target_id(3),
    );

    write_with(&format, &dataset, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\n'));

    let loaded = read_with(&format, &path).unwrap();
    assert_eq!(loaded, dataset);
}

#[test]
fn test_format_traits_on_streams() {
    let dataset = sample_dataset();
    let format = JsonFormat::default();

    let mut bytes = Vec::new();
    format.write(&dataset, &mut bytes).unwrap();
    let loaded = format.read(&mut bytes.as_slice()).unwrap();
    assert_eq!(loaded, dataset);
}

#[test]
fn test_disabled_content_survives_round_trip() {
    let mut spec = FilterSpec::new();
    spec.accept_t3phi = false;
    let dataset = filter(&sample_dataset(), &spec);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_phase.json");
    write_dataset(&dataset, &path).unwrap();
    let loaded = read_dataset(&path).unwrap();

    let record = &loaded.t3[0].records[0];
    assert!(record.t3phi.iter().all(|v| v.is_nan()));
    assert!(record.t3phierr.iter().all(|v| v.is_nan()));
    assert_eq!(record.t3amp, dataset.t3[0].records[0].t3amp);
}

#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    match read_dataset(&path) {
        Err(OiError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected IO error, got {other:?}"),
    }
}

#[test]
fn test_read_malformed_dataset() {
    let file = create_test_file("{\"vis2\": [{\"insname\": 5}]}");
    let err = read_dataset(file.path()).unwrap_err();
    assert!(matches!(err, OiError::Persistence(_)));
    assert!(err.to_string().contains("Failed to read dataset"));
}

#[test]
fn test_partial_dataset_defaults() {
    let file = create_test_file(
        r#"{"targets": {"revision": 2, "targets": [{"target_id": 1, "target": "Vega"}]}}"#,
    );
    let loaded = read_dataset(file.path()).unwrap();

    assert_eq!(loaded.targets.len(), 1);
    assert_eq!(loaded.lookup_target(1).unwrap().target, "Vega");
    assert!(loaded.wavelengths().is_empty());
    assert_eq!(loaded.num_measurement_tables(), 0);
}

#[test]
fn test_dangling_reference_still_loads() {
    let mut dataset = sample_dataset();
    dataset.vis2[0].insname = "MISSING".to_string();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dangling.json");

    write_dataset(&dataset, &path).unwrap();
    let loaded = read_dataset(&path).unwrap();
    let missing = loaded.missing_references();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].to_string(), "OI_VIS2 #1 INSNAME='MISSING' not found");
}

#[test]
fn test_filter_spec_from_file() {
    let file = create_test_file(
        r#"{
            "arrname": "VLTI",
            "target_id": 2,
            "baseline_range": {"min": 40.0, "max": 120.0},
            "accept_flagged": false
        }"#,
    );
    let spec = FilterSpec::from_json_file(file.path()).unwrap();

    assert_eq!(spec.arrname.as_str(), "VLTI");
    assert_eq!(spec.baseline_range, Bounds::new(40.0, 120.0));
    assert!(!spec.accept_flagged);

    let output = filter(&sample_dataset(), &spec);
    assert!(output
        .vis2
        .iter()
        .flat_map(|t| &t.records)
        .all(|r| r.sta_index != [1, 2]));
}

#[test]
fn test_filter_spec_file_errors() {
    let missing = FilterSpec::from_json_file("/nonexistent/filter.json");
    assert!(matches!(missing, Err(OiError::Io { .. })));

    let bad_range = create_test_file(r#"{"wavelength_range": {"min": 3e-6, "max": 1e-6}}"#);
    assert!(matches!(
        FilterSpec::from_json_file(bad_range.path()),
        Err(OiError::Config(_))
    ));

    let bad_json = create_test_file("not json");
    assert!(matches!(
        FilterSpec::from_json_file(bad_json.path()),
        Err(OiError::Json(_))
    ));
}
