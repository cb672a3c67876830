//! Query engine operations.
//!
//! # Responsibility
//! - Implement the filtering, grouping, pivoting, ranking, correlation
//!   and summary operations over the loaded record store.
//! - Shape results into explicit row types with external wire names.
//!
//! # Invariants
//! - Grouping always sums `value_total` across duplicate
//!   (region, year, benefit_type) rows.
//! - Missing-cell semantics are per operation: chart and map cells are
//!   absent, heatmap cells are zero-filled, non-computable statistics
//!   are `None`.
//! - Unknown filter values yield empty results, never errors.

use crate::model::record::{Record, RecordStore};
use crate::query::stats;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Sorted distinct region names.
pub fn distinct_regions(store: &RecordStore) -> Vec<String> {
    let regions: BTreeSet<&str> = store
        .records()
        .iter()
        .map(|record| record.region.as_str())
        .collect();
    regions.into_iter().map(str::to_string).collect()
}

/// Sorted distinct nation names.
pub fn distinct_nations(store: &RecordStore) -> Vec<String> {
    let nations: BTreeSet<&str> = store
        .records()
        .iter()
        .map(|record| record.nation.as_str())
        .collect();
    nations.into_iter().map(str::to_string).collect()
}

/// Sorted distinct years.
pub fn distinct_years(store: &RecordStore) -> Vec<i32> {
    let years: BTreeSet<i32> = store.records().iter().map(|record| record.year).collect();
    years.into_iter().collect()
}

/// Sorted distinct benefit types present in the data.
pub fn distinct_benefit_types(store: &RecordStore) -> Vec<String> {
    let kinds: BTreeSet<&str> = store
        .records()
        .iter()
        .map(|record| record.benefit_type.as_str())
        .collect();
    kinds.into_iter().map(str::to_string).collect()
}

/// One region's summed total for a (year, benefit_type) slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionValue {
    #[serde(rename = "local_authority")]
    pub region: String,
    pub value: f64,
}

/// Per-region totals for one (year, benefit_type) slice.
///
/// # Contract
/// - Regions with no matching record are absent, not zero.
/// - Duplicate source rows for a region are summed.
/// - Rows are sorted by region name.
pub fn map_aggregate(store: &RecordStore, year: i32, benefit_type: &str) -> Vec<RegionValue> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in store.records() {
        if record.year != year || record.benefit_type != benefit_type {
            continue;
        }
        *totals.entry(record.region.as_str()).or_insert(0.0) += record.value_total;
    }

    totals
        .into_iter()
        .map(|(region, value)| RegionValue {
            region: region.to_string(),
            value,
        })
        .collect()
}

/// Options for the per-region time-series pivot.
#[derive(Debug, Clone, Default)]
pub struct ChartQuery {
    /// Region whose series is requested.
    pub region: String,
    /// Optional restriction to a subset of benefit types. `None` keeps
    /// all types present for the region.
    pub benefit_types: Option<Vec<String>>,
}

impl ChartQuery {
    /// Creates a query for one region with no type restriction.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            benefit_types: None,
        }
    }
}

/// One pivoted time-series row: a year plus one cell per benefit type
/// present in that year.
///
/// Absent cells mean "no contribution" and are omitted rather than
/// serialized as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub year: i32,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

/// Year-by-benefit-type pivot for one region, sorted by year.
pub fn chart_series(store: &RecordStore, query: &ChartQuery) -> Vec<ChartRow> {
    let mut pivot: BTreeMap<i32, BTreeMap<String, f64>> = BTreeMap::new();
    for record in store.records() {
        if record.region != query.region {
            continue;
        }
        if let Some(kinds) = &query.benefit_types {
            if !kinds.iter().any(|kind| *kind == record.benefit_type) {
                continue;
            }
        }
        *pivot
            .entry(record.year)
            .or_default()
            .entry(record.benefit_type.clone())
            .or_insert(0.0) += record.value_total;
    }

    pivot
        .into_iter()
        .map(|(year, values)| ChartRow { year, values })
        .collect()
}

/// Square pairwise Pearson matrix keyed by benefit type on both axes.
///
/// `None` cells are "not computable": fewer than two overlapping
/// (region, year) observations, or a zero-variance column. This is a
/// valid result, not an error.
pub type CorrelationMatrix = BTreeMap<String, BTreeMap<String, Option<f64>>>;

/// Pairwise correlation between benefit types, optionally restricted to
/// one year.
///
/// Records are first pivoted to one row per (region, year) pair with one
/// summed column per benefit type; each coefficient uses only the rows
/// where both columns have a value.
pub fn correlation_matrix(store: &RecordStore, year: Option<i32>) -> CorrelationMatrix {
    let mut rows: BTreeMap<(&str, i32), BTreeMap<&str, f64>> = BTreeMap::new();
    let mut columns: BTreeSet<&str> = BTreeSet::new();
    for record in store.records() {
        if let Some(year) = year {
            if record.year != year {
                continue;
            }
        }
        columns.insert(record.benefit_type.as_str());
        *rows
            .entry((record.region.as_str(), record.year))
            .or_default()
            .entry(record.benefit_type.as_str())
            .or_insert(0.0) += record.value_total;
    }

    let mut matrix = CorrelationMatrix::new();
    for &left in &columns {
        let mut matrix_row = BTreeMap::new();
        for &right in &columns {
            let mut lefts = Vec::new();
            let mut rights = Vec::new();
            for cells in rows.values() {
                if let (Some(&a), Some(&b)) = (cells.get(left), cells.get(right)) {
                    lefts.push(a);
                    rights.push(b);
                }
            }
            matrix_row.insert(right.to_string(), stats::pearson(&lefts, &rights));
        }
        matrix.insert(left.to_string(), matrix_row);
    }
    matrix
}

/// One (year, benefit_type) total for a region's trend view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub year: i32,
    #[serde(rename = "co_benefit_type")]
    pub benefit_type: String,
    #[serde(rename = "value_total")]
    pub value: f64,
}

/// Year-by-benefit-type totals for one region, sorted by (year, type).
pub fn trend_series(store: &RecordStore, region: &str) -> Vec<TrendRow> {
    let mut totals: BTreeMap<(i32, &str), f64> = BTreeMap::new();
    for record in store.records() {
        if record.region != region {
            continue;
        }
        *totals
            .entry((record.year, record.benefit_type.as_str()))
            .or_insert(0.0) += record.value_total;
    }

    totals
        .into_iter()
        .map(|((year, benefit_type), value)| TrendRow {
            year,
            benefit_type: benefit_type.to_string(),
            value,
        })
        .collect()
}

/// Options for the region-by-year heatmap pivot.
#[derive(Debug, Clone, Default)]
pub struct HeatmapQuery {
    /// Benefit type selecting the slice to pivot.
    pub benefit_type: String,
    /// Inclusive lower year bound. `None` keeps the earliest data.
    pub year_start: Option<i32>,
    /// Inclusive upper year bound. `None` keeps the latest data.
    pub year_end: Option<i32>,
}

impl HeatmapQuery {
    /// Creates a query for one benefit type over all years.
    pub fn new(benefit_type: impl Into<String>) -> Self {
        Self {
            benefit_type: benefit_type.into(),
            year_start: None,
            year_end: None,
        }
    }
}

/// Region-by-year grid for one benefit type.
///
/// Cells with no underlying data hold `0.0`. This deliberately differs
/// from the chart and map operations, which omit missing cells: the
/// consuming heatmap renders a dense grid and treats absence as additive
/// identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapGrid {
    /// Row labels: sorted region names.
    #[serde(rename = "index")]
    pub regions: Vec<String>,
    /// Column labels: sorted years.
    #[serde(rename = "columns")]
    pub years: Vec<i32>,
    /// Dense row-major cell values aligned with `regions` x `years`.
    #[serde(rename = "data")]
    pub values: Vec<Vec<f64>>,
}

/// Pivots one benefit type's records to a dense region-by-year grid
/// over the inclusive year range.
pub fn heatmap_grid(store: &RecordStore, query: &HeatmapQuery) -> HeatmapGrid {
    let mut totals: BTreeMap<(&str, i32), f64> = BTreeMap::new();
    let mut regions: BTreeSet<&str> = BTreeSet::new();
    let mut years: BTreeSet<i32> = BTreeSet::new();
    for record in store.records() {
        if record.benefit_type != query.benefit_type {
            continue;
        }
        if query.year_start.is_some_and(|start| record.year < start) {
            continue;
        }
        if query.year_end.is_some_and(|end| record.year > end) {
            continue;
        }
        regions.insert(record.region.as_str());
        years.insert(record.year);
        *totals
            .entry((record.region.as_str(), record.year))
            .or_insert(0.0) += record.value_total;
    }

    let years: Vec<i32> = years.into_iter().collect();
    let values: Vec<Vec<f64>> = regions
        .iter()
        .map(|&region| {
            years
                .iter()
                .map(|&year| totals.get(&(region, year)).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    HeatmapGrid {
        regions: regions.into_iter().map(str::to_string).collect(),
        years,
        values,
    }
}

/// Per-benefit-type summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` for a single observation.
    #[serde(rename = "std")]
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Summary statistics of `value_total` for every benefit type present.
pub fn summary_statistics(store: &RecordStore) -> BTreeMap<String, SummaryStats> {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in store.records() {
        grouped
            .entry(record.benefit_type.as_str())
            .or_default()
            .push(record.value_total);
    }

    let mut summaries = BTreeMap::new();
    for (benefit_type, values) in grouped {
        // Groups are built from present records, so both are always Some.
        let (Some(mean), Some(median)) = (stats::mean(&values), stats::median(&values)) else {
            continue;
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        summaries.insert(
            benefit_type.to_string(),
            SummaryStats {
                mean,
                median,
                std_dev: stats::sample_std_dev(&values),
                min,
                max,
            },
        );
    }
    summaries
}

/// Ranking order for [`top_regions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Options for the top-N region ranking.
#[derive(Debug, Clone)]
pub struct RankingQuery {
    /// Benefit type selecting the slice to rank.
    pub benefit_type: String,
    /// Year selecting the slice to rank.
    pub year: i32,
    /// Maximum number of rows returned.
    pub limit: usize,
    /// Sort order applied to `value_total`.
    pub direction: SortDirection,
}

/// One ranked row carrying the region, its raw row value and its nation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRegion {
    #[serde(rename = "local_authority")]
    pub region: String,
    #[serde(rename = "value_total")]
    pub value: f64,
    pub nation: String,
}

/// First `limit` rows of the (benefit_type, year) slice sorted by value.
///
/// # Contract
/// - Source rows are ranked as-is; duplicate (region, year,
///   benefit_type) rows are not pre-aggregated.
/// - The sort is stable: tied values keep original record order.
pub fn top_regions(store: &RecordStore, query: &RankingQuery) -> Vec<RankedRegion> {
    let mut rows: Vec<&Record> = store
        .records()
        .iter()
        .filter(|record| record.benefit_type == query.benefit_type && record.year == query.year)
        .collect();

    rows.sort_by(|a, b| {
        let ordering = a.value_total.total_cmp(&b.value_total);
        match query.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows.truncate(query.limit);

    rows.into_iter()
        .map(|record| RankedRegion {
            region: record.region.clone(),
            value: record.value_total,
            nation: record.nation.clone(),
        })
        .collect()
}

/// Grouping dimension for [`grouped_aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupDimension {
    Nation,
    Region,
}

/// One (area, year, benefit_type) total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedRow {
    /// Nation or region name, depending on the requested dimension.
    pub area: String,
    pub year: i32,
    #[serde(rename = "co_benefit_type")]
    pub benefit_type: String,
    #[serde(rename = "value_total")]
    pub value: f64,
}

/// Totals grouped by (dimension, year, benefit_type), sorted by that
/// key.
pub fn grouped_aggregate(store: &RecordStore, dimension: GroupDimension) -> Vec<GroupedRow> {
    let mut totals: BTreeMap<(&str, i32, &str), f64> = BTreeMap::new();
    for record in store.records() {
        let area = match dimension {
            GroupDimension::Nation => record.nation.as_str(),
            GroupDimension::Region => record.region.as_str(),
        };
        *totals
            .entry((area, record.year, record.benefit_type.as_str()))
            .or_insert(0.0) += record.value_total;
    }

    totals
        .into_iter()
        .map(|((area, year, benefit_type), value)| GroupedRow {
            area: area.to_string(),
            year,
            benefit_type: benefit_type.to_string(),
            value,
        })
        .collect()
}
