//! Core aggregation and query engine for co-benefit analytics.
//! This crate is the single source of truth for grouping, pivoting and
//! numeric semantics over the loaded dataset.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod model;
pub mod query;

pub use cache::DataCache;
pub use config::{DataConfig, DEFAULT_MAP_BENEFIT, DEFAULT_YEAR};
pub use dataset::{load_boundaries, load_records, DataLoadError, DatasetResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::boundary::{BoundaryDocument, BoundaryFeature};
pub use model::record::{BenefitKind, Record, RecordStore};
pub use query::engine::{
    chart_series, correlation_matrix, distinct_benefit_types, distinct_nations, distinct_regions,
    distinct_years, grouped_aggregate, heatmap_grid, map_aggregate, summary_statistics,
    top_regions, trend_series, ChartQuery, ChartRow, CorrelationMatrix, GroupDimension,
    GroupedRow, HeatmapGrid, HeatmapQuery, RankedRegion, RankingQuery, RegionValue, SortDirection,
    SummaryStats, TrendRow,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
