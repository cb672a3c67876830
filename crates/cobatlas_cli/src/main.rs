//! Dataset verification entry point.
//!
//! # Responsibility
//! - Load both data sources through the shared cache and report counts.
//! - Surface region names that fail the exact-match boundary join.
//!
//! # Invariants
//! - Output stays deterministic for a given pair of source files.
//! - Join detection lives here, outside the core: a mismatch is a
//!   data-quality report line, never a core error.

use cobatlas_core::{
    distinct_benefit_types, distinct_regions, distinct_years, BenefitKind, DataCache, DataConfig,
    DataLoadError,
};
use std::collections::BTreeSet;
use std::process::ExitCode;

const MAX_MISMATCH_SAMPLES: usize = 5;

fn main() -> ExitCode {
    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    let config = DataConfig::from_dir(&data_dir);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("verification failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &DataConfig) -> Result<(), DataLoadError> {
    let cache = DataCache::new(config.clone());
    let records = cache.records()?;
    let boundaries = cache.boundaries()?;

    println!("cobatlas_core version={}", cobatlas_core::core_version());
    println!(
        "records={} source={}",
        records.len(),
        config.record_file.display()
    );

    println!("benefit types:");
    for kind in distinct_benefit_types(&records) {
        let count = records
            .records()
            .iter()
            .filter(|record| record.benefit_type == kind)
            .count();
        match BenefitKind::parse(&kind) {
            Some(known) => println!("  {kind} ({}): {count} records", known.label()),
            None => println!("  {kind} (unknown category): {count} records"),
        }
    }

    let years = distinct_years(&records);
    if let (Some(first), Some(last)) = (years.first(), years.last()) {
        println!("years: {first}..={last} ({} distinct)", years.len());
    }

    let record_regions: BTreeSet<String> = distinct_regions(&records).into_iter().collect();
    let boundary_regions = boundaries.property_values(&config.matching_property);
    let matched = record_regions.intersection(&boundary_regions).count();

    println!(
        "boundary features={} source={}",
        boundaries.feature_count(),
        config.boundary_file.display()
    );
    println!(
        "join: matched {matched} of {} record regions against property `{}` ({})",
        record_regions.len(),
        config.matching_property,
        match_rate(matched, record_regions.len())
    );

    report_difference(
        "records without a boundary",
        &record_regions,
        &boundary_regions,
    );
    report_difference(
        "boundaries without records",
        &boundary_regions,
        &record_regions,
    );

    Ok(())
}

fn match_rate(matched: usize, total: usize) -> String {
    if total == 0 {
        return "n/a".to_string();
    }
    format!("{:.1}%", matched as f64 / total as f64 * 100.0)
}

fn report_difference(label: &str, left: &BTreeSet<String>, right: &BTreeSet<String>) {
    let missing: Vec<&String> = left.difference(right).collect();
    if missing.is_empty() {
        return;
    }

    let samples: Vec<&str> = missing
        .iter()
        .take(MAX_MISMATCH_SAMPLES)
        .map(|name| name.as_str())
        .collect();
    println!("{label}: {} (first {}: {samples:?})", missing.len(), samples.len());
}
