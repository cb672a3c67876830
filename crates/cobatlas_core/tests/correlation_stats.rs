use cobatlas_core::{correlation_matrix, summary_statistics, Record, RecordStore};

fn record(region: &str, year: i32, nation: &str, benefit_type: &str, value: f64) -> Record {
    Record {
        region: region.to_string(),
        year,
        nation: nation.to_string(),
        benefit_type: benefit_type.to_string(),
        value_total: value,
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn summary_statistics_for_noise_values() {
    let store = RecordStore::from_records(vec![
        record("RegionA", 2024, "England", "noise", 2.0),
        record("RegionB", 2024, "Scotland", "noise", 4.0),
        record("RegionC", 2024, "Wales", "noise", 6.0),
    ]);

    let summaries = summary_statistics(&store);
    let noise = summaries.get("noise").unwrap();

    assert_close(noise.mean, 4.0);
    assert_close(noise.median, 4.0);
    assert_eq!(noise.min, 2.0);
    assert_eq!(noise.max, 6.0);
    assert_close(noise.std_dev.unwrap(), 2.0);
}

#[test]
fn summary_statistics_cover_every_present_benefit_type() {
    let store = RecordStore::from_records(vec![
        record("RegionA", 2024, "England", "noise", 1.0),
        record("RegionA", 2024, "England", "air_quality", 2.0),
        record("RegionB", 2025, "Scotland", "congestion", 3.0),
    ]);

    let summaries = summary_statistics(&store);
    let keys: Vec<&String> = summaries.keys().collect();
    assert_eq!(keys, vec!["air_quality", "congestion", "noise"]);
}

#[test]
fn single_observation_has_undefined_std_dev() {
    let store = RecordStore::from_records(vec![record(
        "RegionA",
        2024,
        "England",
        "physical_activity",
        9.0,
    )]);

    let summaries = summary_statistics(&store);
    let stats = summaries.get("physical_activity").unwrap();

    assert_eq!(stats.mean, 9.0);
    assert_eq!(stats.median, 9.0);
    assert_eq!(stats.min, 9.0);
    assert_eq!(stats.max, 9.0);
    assert_eq!(stats.std_dev, None);
}

#[test]
fn summary_statistics_serialize_undefined_std_as_null() {
    let store = RecordStore::from_records(vec![record(
        "RegionA",
        2024,
        "England",
        "road_repairs",
        1.5,
    )]);

    let json = serde_json::to_value(summary_statistics(&store)).unwrap();
    assert_eq!(json["road_repairs"]["mean"], 1.5);
    assert!(json["road_repairs"]["std"].is_null());
}

/// Three regions where noise is exactly twice air quality, with the
/// air-quality cells built from duplicate rows that must be summed
/// before correlating.
fn correlated_store() -> RecordStore {
    RecordStore::from_records(vec![
        record("RegionA", 2024, "England", "air_quality", 0.5),
        record("RegionA", 2024, "England", "air_quality", 0.5),
        record("RegionB", 2024, "Scotland", "air_quality", 2.0),
        record("RegionC", 2024, "Wales", "air_quality", 3.0),
        record("RegionA", 2024, "England", "noise", 2.0),
        record("RegionB", 2024, "Scotland", "noise", 4.0),
        record("RegionC", 2024, "Wales", "noise", 6.0),
    ])
}

#[test]
fn correlation_matrix_sums_duplicates_before_correlating() {
    let matrix = correlation_matrix(&correlated_store(), None);

    let cell = matrix["air_quality"]["noise"].unwrap();
    assert_close(cell, 1.0);
}

#[test]
fn correlation_matrix_is_symmetric_with_unit_diagonal() {
    let matrix = correlation_matrix(&correlated_store(), None);

    for (left, row) in &matrix {
        for (right, cell) in row {
            assert_eq!(
                cell.is_some(),
                matrix[right][left].is_some(),
                "asymmetric definedness for ({left}, {right})"
            );
            if let (Some(a), Some(b)) = (cell, matrix[right][left]) {
                assert_close(*a, b);
            }
        }
        assert_close(row[left].unwrap(), 1.0);
    }
}

#[test]
fn sparse_overlap_yields_undefined_cells_not_errors() {
    let mut records = correlated_store().records().to_vec();
    // `congestion` exists for a single (region, year) row only, so every
    // pairing against it has fewer than two overlapping observations.
    records.push(record("RegionA", 2024, "England", "congestion", 1.0));
    let store = RecordStore::from_records(records);

    let matrix = correlation_matrix(&store, None);
    assert_eq!(matrix["congestion"]["air_quality"], None);
    assert_eq!(matrix["air_quality"]["congestion"], None);
    assert_eq!(matrix["congestion"]["congestion"], None);

    // The well-populated pair stays defined.
    assert!(matrix["air_quality"]["noise"].is_some());
}

#[test]
fn undefined_cells_serialize_as_null() {
    let store = RecordStore::from_records(vec![
        record("RegionA", 2024, "England", "air_quality", 1.0),
        record("RegionA", 2024, "England", "noise", 2.0),
    ]);

    let json = serde_json::to_value(correlation_matrix(&store, None)).unwrap();
    assert!(json["air_quality"]["noise"].is_null());
}

#[test]
fn year_filter_restricts_the_observation_rows() {
    let mut records = correlated_store().records().to_vec();
    // 2025 reverses the relationship, cancelling the overall correlation.
    records.extend([
        record("RegionA", 2025, "England", "air_quality", 1.0),
        record("RegionB", 2025, "Scotland", "air_quality", 2.0),
        record("RegionC", 2025, "Wales", "air_quality", 3.0),
        record("RegionA", 2025, "England", "noise", 6.0),
        record("RegionB", 2025, "Scotland", "noise", 4.0),
        record("RegionC", 2025, "Wales", "noise", 2.0),
    ]);
    let store = RecordStore::from_records(records);

    let unfiltered = correlation_matrix(&store, None);
    assert_close(unfiltered["air_quality"]["noise"].unwrap(), 0.0);

    let filtered = correlation_matrix(&store, Some(2024));
    assert_close(filtered["air_quality"]["noise"].unwrap(), 1.0);
}

#[test]
fn year_filter_with_no_matching_records_yields_an_empty_matrix() {
    let matrix = correlation_matrix(&correlated_store(), Some(1900));
    assert!(matrix.is_empty());
}
