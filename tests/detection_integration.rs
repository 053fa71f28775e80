//! End-to-end tests for the import pipeline: file adapters into
//! detection, resolution planning, and report generation.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::io::Write;

use vrpdedup::io::read_batch;
use vrpdedup::{
    DetectionConfig, DuplicateDetector, EntityType, Error, MatchType, Record, Resolution,
    generate_report, resolve_duplicates,
};

fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_csv_to_plan_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let import = write_temp(
        &dir,
        "import.csv",
        "\
_id,description,profile,startLat,startLon
v1,Truck A,car,52.52,13.40
,Truck Alfa,car,48.85,2.35
,Completely New Vehicle,bike,40.71,-74.00
",
    );
    let existing = write_temp(
        &dir,
        "existing.csv",
        "\
_id,description,profile,startLat,startLon
v1,Truck A Updated,car,52.52,13.40
v2,Truck Alpha,car,48.85,2.35
",
    );

    let import_batch = read_batch(&import).unwrap();
    let existing_batch = read_batch(&existing).unwrap();
    assert_eq!(import_batch.len(), 3);
    assert_eq!(existing_batch.len(), 2);

    let result = DuplicateDetector::new().detect(
        &import_batch,
        &existing_batch,
        EntityType::Vehicles,
        &DetectionConfig::default(),
    );

    assert_eq!(result.stats.total_rows, 3);
    assert_eq!(result.stats.duplicate_rows, 2);
    assert_eq!(result.stats.unique_rows, 1);
    assert_eq!(result.duplicates[0].match_type, MatchType::Id);
    assert_eq!(result.duplicates[1].match_type, MatchType::Fuzzy);

    let plan = resolve_duplicates(result.duplicates.clone(), Resolution::Replace);
    assert_eq!(plan.to_replace.len(), 2);
    assert!(plan.to_create.is_empty() && plan.to_skip.is_empty());

    let report = generate_report(&result);
    assert!(report.contains("Total rows:      3"));
    assert!(report.contains("Row 1: id match, 100.0% confidence (matched v1)"));
    assert!(report.contains("conflicting fields: description"));
}

#[test]
fn test_json_batch_natural_key_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let import = write_temp(
        &dir,
        "import.json",
        r#"[{"description": "Delivery 12", "locationLat": 52.52, "locationLon": 13.4}]"#,
    );
    let existing = write_temp(
        &dir,
        "existing.json",
        r#"[{"_id": "j9", "description": "delivery 12", "locationLat": 52.52, "locationLon": 13.4}]"#,
    );

    let result = DuplicateDetector::new().detect(
        &read_batch(&import).unwrap(),
        &read_batch(&existing).unwrap(),
        EntityType::Jobs,
        &DetectionConfig::default(),
    );

    assert_eq!(result.duplicates.len(), 1);
    assert_eq!(result.duplicates[0].match_type, MatchType::NaturalKey);
    assert_eq!(result.duplicates[0].confidence, 0.95);
}

#[test]
fn test_mixed_formats_csv_import_against_json_existing() {
    // CSV cells arrive as typed values; natural-key comparison coerces
    // numeric and text forms, so a CSV batch matches a JSON dataset.
    let dir = tempfile::tempdir().unwrap();
    let import = write_temp(&dir, "import.csv", "name,address\nWarehouse,Main St 1\n");
    let existing = write_temp(
        &dir,
        "existing.json",
        r#"[{"_id": "L1", "name": "warehouse", "address": "Main St 1"}]"#,
    );

    let result = DuplicateDetector::new().detect(
        &read_batch(&import).unwrap(),
        &read_batch(&existing).unwrap(),
        EntityType::Locations,
        &DetectionConfig::default(),
    );

    assert_eq!(result.duplicates.len(), 1);
    assert_eq!(result.duplicates[0].match_type, MatchType::NaturalKey);
}

#[test]
fn test_tsv_batch_parses_per_column() {
    let dir = tempfile::tempdir().unwrap();
    let import = write_temp(&dir, "import.tsv", "_id\tdescription\nv1\tTruck A\n");
    let existing = write_temp(
        &dir,
        "existing.csv",
        "_id,description\nv1,Truck A Updated\n",
    );

    let import_batch = read_batch(&import).unwrap();
    assert_eq!(import_batch.len(), 1);
    // Tab-separated cells land in separate fields, not one mangled column
    assert_eq!(
        import_batch[0].id().and_then(|v| v.as_text()),
        Some("v1")
    );

    let result = DuplicateDetector::new().detect(
        &import_batch,
        &read_batch(&existing).unwrap(),
        EntityType::Vehicles,
        &DetectionConfig::default(),
    );

    assert_eq!(result.duplicates.len(), 1);
    assert_eq!(result.duplicates[0].match_type, MatchType::Id);
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "import.xlsx", "not really a spreadsheet");

    let err = read_batch(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_missing_file_fails_with_operation_error() {
    let err = read_batch(std::path::Path::new("/nonexistent/batch.csv")).unwrap_err();
    assert!(matches!(err, Error::OperationFailed { .. }));
}

#[test]
fn test_threshold_boundary_through_public_api() {
    let import = vec![Record::new().with_field("description", "Truck Alpha")];
    let existing = vec![Record::new()
        .with_field("_id", "v2")
        .with_field("description", "Truck Alfa")];

    // Only description is comparable: similarity is exactly 9/11
    let score = 9.0 / 11.0;

    let at_threshold = DuplicateDetector::new().detect(
        &import,
        &existing,
        EntityType::Vehicles,
        &DetectionConfig::default().with_fuzzy_threshold(score),
    );
    assert_eq!(at_threshold.stats.fuzzy_matches, 1);
    assert_eq!(at_threshold.duplicates[0].confidence, score);

    let above_threshold = DuplicateDetector::new().detect(
        &import,
        &existing,
        EntityType::Vehicles,
        &DetectionConfig::default().with_fuzzy_threshold(score + 1e-9),
    );
    assert_eq!(above_threshold.stats.fuzzy_matches, 0);
    assert_eq!(above_threshold.stats.unique_rows, 1);
}

#[test]
fn test_case_sensitive_matching_still_reports_no_conflicts() {
    // ignore_case off: "Warehouse" does not natural-key match "warehouse",
    // but conflict analysis (always case-insensitive) is unaffected on
    // rows that do match.
    let import = vec![Record::new()
        .with_field("_id", "L1")
        .with_field("name", "WAREHOUSE")];
    let existing = vec![Record::new()
        .with_field("_id", "L1")
        .with_field("name", "warehouse")];

    let result = DuplicateDetector::new().detect(
        &import,
        &existing,
        EntityType::Locations,
        &DetectionConfig::default().with_ignore_case(false),
    );

    assert_eq!(result.duplicates[0].match_type, MatchType::Id);
    assert!(result.duplicates[0].conflicting_fields.is_empty());
}

#[test]
fn test_error_types() {
    let err = Error::InvalidInput("test message".to_string());
    let display = format!("{err}");
    assert!(display.contains("invalid input"));
    assert!(display.contains("test message"));

    let err = Error::OperationFailed {
        operation: "read".to_string(),
        cause: "file not found".to_string(),
    };
    let display = format!("{err}");
    assert!(display.contains("read"));
    assert!(display.contains("file not found"));
}
