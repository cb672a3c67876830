//! Lazy one-time dataset cache.
//!
//! # Responsibility
//! - Own the shared record store and boundary document for the process
//!   lifetime.
//! - Perform each underlying load at most once per successful access.
//!
//! # Invariants
//! - Concurrent first accesses are serialized behind the cell's gate;
//!   every caller observes the same shared instance after a successful
//!   load.
//! - A failed load is not cached; the next access attempts the load
//!   again.
//! - There is no invalidation or reload path.

use crate::config::DataConfig;
use crate::dataset::{load_boundaries, load_records, DatasetResult};
use crate::model::boundary::BoundaryDocument;
use crate::model::record::RecordStore;
use log::info;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Shared holder for the two immutable datasets.
///
/// Construct one per process and hand references to every query-serving
/// context; queries run against the `Arc`s it returns.
#[derive(Debug, Default)]
pub struct DataCache {
    config: DataConfig,
    records: OnceCell<Arc<RecordStore>>,
    boundaries: OnceCell<Arc<BoundaryDocument>>,
}

impl DataCache {
    /// Creates an empty cache; nothing is loaded until first access.
    pub fn new(config: DataConfig) -> Self {
        Self {
            config,
            records: OnceCell::new(),
            boundaries: OnceCell::new(),
        }
    }

    /// The configuration this cache loads from.
    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Returns the shared record store, loading it on first access.
    ///
    /// # Errors
    /// - Propagates [`crate::dataset::DataLoadError`] from the
    ///   underlying load; the failure is not cached and a later call
    ///   retries.
    pub fn records(&self) -> DatasetResult<Arc<RecordStore>> {
        self.records
            .get_or_try_init(|| {
                let store = load_records(&self.config.record_file)?;
                info!(
                    "event=cache_init module=cache dataset=records status=ok rows={}",
                    store.len()
                );
                Ok(Arc::new(store))
            })
            .cloned()
    }

    /// Returns the shared boundary document, loading it on first access.
    ///
    /// # Errors
    /// - Propagates [`crate::dataset::DataLoadError`] from the
    ///   underlying load; the failure is not cached and a later call
    ///   retries.
    pub fn boundaries(&self) -> DatasetResult<Arc<BoundaryDocument>> {
        self.boundaries
            .get_or_try_init(|| {
                let document = load_boundaries(&self.config.boundary_file)?;
                info!(
                    "event=cache_init module=cache dataset=boundaries status=ok features={}",
                    document.feature_count()
                );
                Ok(Arc::new(document))
            })
            .cloned()
    }
}
