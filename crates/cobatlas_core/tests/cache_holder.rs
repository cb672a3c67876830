use cobatlas_core::{DataCache, DataConfig, DataLoadError};
use std::sync::Arc;
use tempfile::TempDir;

const RECORDS_CSV: &str = "\
local_authority,year,nation,co_benefit_type,value_total
Aberdeen City,2024,Scotland,air_quality,10.0
Cardiff,2024,Wales,noise,3.0
";

const BOUNDARIES_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "local_authority": "Aberdeen City" },
            "geometry": { "type": "Polygon", "coordinates": [] }
        }
    ]
}"#;

fn seeded_config(dir: &TempDir) -> DataConfig {
    let config = DataConfig::from_dir(dir.path());
    std::fs::write(&config.record_file, RECORDS_CSV).unwrap();
    std::fs::write(&config.boundary_file, BOUNDARIES_GEOJSON).unwrap();
    config
}

#[test]
fn records_load_once_and_share_one_instance() {
    let dir = TempDir::new().unwrap();
    let cache = DataCache::new(seeded_config(&dir));

    let first = cache.records().unwrap();
    let second = cache.records().unwrap();

    assert_eq!(first.len(), 2);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn boundaries_load_once_and_share_one_instance() {
    let dir = TempDir::new().unwrap();
    let cache = DataCache::new(seeded_config(&dir));

    let first = cache.boundaries().unwrap();
    let second = cache.boundaries().unwrap();

    assert_eq!(first.feature_count(), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn construction_does_not_touch_the_sources() {
    let dir = TempDir::new().unwrap();
    // Neither source file exists; constructing the cache must not fail.
    let _cache = DataCache::new(DataConfig::from_dir(dir.path().join("absent")));
}

#[test]
fn the_two_datasets_load_independently() {
    let dir = TempDir::new().unwrap();
    let config = DataConfig::from_dir(dir.path());
    std::fs::write(&config.record_file, RECORDS_CSV).unwrap();
    // No boundary file on disk.
    let cache = DataCache::new(config);

    assert!(cache.records().is_ok());
    assert!(matches!(
        cache.boundaries(),
        Err(DataLoadError::Io { .. })
    ));
}

#[test]
fn a_failed_load_is_not_cached_and_retries() {
    let dir = TempDir::new().unwrap();
    let config = DataConfig::from_dir(dir.path());
    let cache = DataCache::new(config.clone());

    assert!(matches!(cache.records(), Err(DataLoadError::Io { .. })));

    // The source appearing later must let the next access succeed.
    std::fs::write(&config.record_file, RECORDS_CSV).unwrap();
    let store = cache.records().unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn concurrent_first_access_observes_a_single_instance() {
    let dir = TempDir::new().unwrap();
    let cache = DataCache::new(seeded_config(&dir));

    let handles: Vec<_> = std::thread::scope(|scope| {
        (0..8)
            .map(|_| scope.spawn(|| cache.records().unwrap()))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let first = &handles[0];
    for other in &handles[1..] {
        assert!(Arc::ptr_eq(first, other));
    }
}
