//! Dataset loading and type coercion entry points.
//!
//! # Responsibility
//! - Load the tabular record source and the boundary document from disk.
//! - Apply the two type coercions: `year` to integer, `value_total` to
//!   float.
//!
//! # Invariants
//! - A coercion failure in any row fails the entire load; there is no
//!   partial record store.
//! - Loaders never retry internally; retry policy belongs to callers.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod load;

pub use load::{load_boundaries, load_records};

/// Result type for dataset loading APIs.
pub type DatasetResult<T> = Result<T, DataLoadError>;

/// Load-time failure for either data source.
///
/// Carries the underlying cause (I/O, CSV, JSON) or the offending row
/// and cell for coercion failures.
#[derive(Debug)]
pub enum DataLoadError {
    /// Source file missing or unreadable.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Tabular source is not parseable CSV.
    Csv { path: PathBuf, source: csv::Error },
    /// Boundary source is not parseable JSON.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A required column is absent from the tabular header.
    MissingColumn { column: &'static str },
    /// A `year` cell that cannot be coerced to an integer.
    InvalidYear { row: usize, value: String },
    /// A `value_total` cell that cannot be coerced to a float.
    InvalidValue { row: usize, value: String },
}

impl Display for DataLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "invalid tabular data in `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(
                    f,
                    "invalid boundary document in `{}`: {source}",
                    path.display()
                )
            }
            Self::MissingColumn { column } => {
                write!(f, "tabular source is missing required column `{column}`")
            }
            Self::InvalidYear { row, value } => {
                write!(f, "row {row}: cannot coerce year `{value}` to an integer")
            }
            Self::InvalidValue { row, value } => {
                write!(
                    f,
                    "row {row}: cannot coerce value_total `{value}` to a float"
                )
            }
        }
    }
}

impl Error for DataLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::MissingColumn { .. } => None,
            Self::InvalidYear { .. } => None,
            Self::InvalidValue { .. } => None,
        }
    }
}
