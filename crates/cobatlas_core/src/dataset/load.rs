//! Source file loaders.
//!
//! # Responsibility
//! - Read the CSV record source into a typed [`RecordStore`].
//! - Read the GeoJSON boundary document without interpreting geometry.
//! - Emit load lifecycle logging events with durations.
//!
//! # Invariants
//! - Column indices are resolved once against the header before any row
//!   is parsed.
//! - Row numbers in errors are 1-based and header-inclusive: the first
//!   data row is row 2.

use crate::config::{
    COLUMN_BENEFIT_TYPE, COLUMN_NATION, COLUMN_REGION, COLUMN_VALUE_TOTAL, COLUMN_YEAR,
};
use crate::dataset::{DataLoadError, DatasetResult};
use crate::model::boundary::BoundaryDocument;
use crate::model::record::{Record, RecordStore};
use csv::StringRecord;
use log::{error, info};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

/// Loads and type-coerces the tabular record source.
///
/// # Errors
/// - [`DataLoadError::Io`] / [`DataLoadError::Csv`] when the file is
///   unreadable or not CSV.
/// - [`DataLoadError::MissingColumn`] when a required column is absent.
/// - [`DataLoadError::InvalidYear`] / [`DataLoadError::InvalidValue`]
///   when any row fails coercion; no partial store is returned.
pub fn load_records(path: impl AsRef<Path>) -> DatasetResult<RecordStore> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=record_load module=dataset status=start path={}",
        path.display()
    );

    match read_records(path) {
        Ok(store) => {
            info!(
                "event=record_load module=dataset status=ok rows={} duration_ms={}",
                store.len(),
                started_at.elapsed().as_millis()
            );
            Ok(store)
        }
        Err(err) => {
            error!(
                "event=record_load module=dataset status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Loads the boundary document, keeping geometry opaque.
///
/// # Errors
/// - [`DataLoadError::Io`] when the file is unreadable.
/// - [`DataLoadError::Json`] when the document does not match the
///   feature collection shape.
pub fn load_boundaries(path: impl AsRef<Path>) -> DatasetResult<BoundaryDocument> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=boundary_load module=dataset status=start path={}",
        path.display()
    );

    match read_boundaries(path) {
        Ok(document) => {
            info!(
                "event=boundary_load module=dataset status=ok features={} duration_ms={}",
                document.feature_count(),
                started_at.elapsed().as_millis()
            );
            Ok(document)
        }
        Err(err) => {
            error!(
                "event=boundary_load module=dataset status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn read_records(path: &Path) -> DatasetResult<RecordStore> {
    let file = File::open(path).map_err(|err| DataLoadError::Io {
        path: path.to_path_buf(),
        source: err,
    })?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|err| csv_error(path, err))?
        .clone();
    let region_idx = column_index(&headers, COLUMN_REGION)?;
    let year_idx = column_index(&headers, COLUMN_YEAR)?;
    let nation_idx = column_index(&headers, COLUMN_NATION)?;
    let benefit_idx = column_index(&headers, COLUMN_BENEFIT_TYPE)?;
    let value_idx = column_index(&headers, COLUMN_VALUE_TOTAL)?;

    let mut records = Vec::new();
    for (position, row) in reader.records().enumerate() {
        let row = row.map_err(|err| csv_error(path, err))?;
        // The header occupies row 1, so the first data row is row 2.
        let row_number = position + 2;

        let year_cell = cell(&row, year_idx);
        let year = coerce_year(year_cell).ok_or_else(|| DataLoadError::InvalidYear {
            row: row_number,
            value: year_cell.to_string(),
        })?;

        let value_cell = cell(&row, value_idx);
        let value_total = coerce_value(value_cell).ok_or_else(|| DataLoadError::InvalidValue {
            row: row_number,
            value: value_cell.to_string(),
        })?;

        records.push(Record {
            region: cell(&row, region_idx).to_string(),
            year,
            nation: cell(&row, nation_idx).to_string(),
            benefit_type: cell(&row, benefit_idx).to_string(),
            value_total,
        });
    }

    Ok(RecordStore::from_records(records))
}

fn read_boundaries(path: &Path) -> DatasetResult<BoundaryDocument> {
    let file = File::open(path).map_err(|err| DataLoadError::Io {
        path: path.to_path_buf(),
        source: err,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| DataLoadError::Json {
        path: path.to_path_buf(),
        source: err,
    })
}

fn column_index(headers: &StringRecord, column: &'static str) -> DatasetResult<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or(DataLoadError::MissingColumn { column })
}

fn cell<'row>(row: &'row StringRecord, index: usize) -> &'row str {
    row.get(index).unwrap_or("")
}

/// Coerces a year cell to an integer.
///
/// Accepts plain integer text and float text with a zero fraction;
/// sources exported through floating-point tooling carry years like
/// `2025.0`.
fn coerce_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }

    let float_year = trimmed.parse::<f64>().ok()?;
    if !float_year.is_finite() || float_year.fract() != 0.0 {
        return None;
    }
    if float_year < f64::from(i32::MIN) || float_year > f64::from(i32::MAX) {
        return None;
    }
    Some(float_year as i32)
}

fn coerce_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn csv_error(path: &Path, source: csv::Error) -> DataLoadError {
    DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    }
}
