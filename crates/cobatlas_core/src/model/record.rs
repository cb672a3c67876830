//! Tabular record domain model.
//!
//! # Responsibility
//! - Define the canonical co-benefit record and the loaded record store.
//! - Model the closed set of known benefit categories with their
//!   presentation metadata.
//!
//! # Invariants
//! - Records are immutable once loaded; query operations never mutate
//!   the store.
//! - (region, year, benefit_type) is not unique in the source; grouping
//!   operations must sum `value_total` across duplicates.

use serde::{Deserialize, Serialize};

/// One row of the loaded tabular dataset.
///
/// `benefit_type` stays an open string so rows carrying a category
/// outside [`BenefitKind`] still load; a filter on an unknown category
/// matches nothing instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Local authority name. Serialized as `local_authority` to match
    /// the external schema naming.
    #[serde(rename = "local_authority")]
    pub region: String,
    /// Calendar year used for temporal grouping.
    pub year: i32,
    /// Coarser geographic grouping containing multiple regions.
    pub nation: String,
    /// Co-benefit category. One of the [`BenefitKind`] values in
    /// well-formed sources.
    #[serde(rename = "co_benefit_type")]
    pub benefit_type: String,
    /// Numeric contribution of this row.
    pub value_total: f64,
}

/// The five known co-benefit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitKind {
    /// Benefit from improved air quality.
    AirQuality,
    /// Impact on traffic congestion levels.
    Congestion,
    /// Effect on ambient noise levels.
    Noise,
    /// Benefit from increased physical activity.
    PhysicalActivity,
    /// Road repair cost and surface condition.
    RoadRepairs,
}

impl BenefitKind {
    /// All known categories in stable display order.
    pub const ALL: [BenefitKind; 5] = [
        BenefitKind::AirQuality,
        BenefitKind::Congestion,
        BenefitKind::Noise,
        BenefitKind::PhysicalActivity,
        BenefitKind::RoadRepairs,
    ];

    /// Wire name used in the tabular source and query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            BenefitKind::AirQuality => "air_quality",
            BenefitKind::Congestion => "congestion",
            BenefitKind::Noise => "noise",
            BenefitKind::PhysicalActivity => "physical_activity",
            BenefitKind::RoadRepairs => "road_repairs",
        }
    }

    /// Parses a wire name back into a known category.
    pub fn parse(value: &str) -> Option<BenefitKind> {
        match value {
            "air_quality" => Some(BenefitKind::AirQuality),
            "congestion" => Some(BenefitKind::Congestion),
            "noise" => Some(BenefitKind::Noise),
            "physical_activity" => Some(BenefitKind::PhysicalActivity),
            "road_repairs" => Some(BenefitKind::RoadRepairs),
            _ => None,
        }
    }

    /// Human-readable label for legends and selectors.
    pub fn label(self) -> &'static str {
        match self {
            BenefitKind::AirQuality => "Air quality",
            BenefitKind::Congestion => "Congestion",
            BenefitKind::Noise => "Noise",
            BenefitKind::PhysicalActivity => "Physical activity",
            BenefitKind::RoadRepairs => "Road repairs",
        }
    }

    /// Chart color assigned to this category.
    pub fn color(self) -> &'static str {
        match self {
            BenefitKind::AirQuality => "#4CAF50",
            BenefitKind::Congestion => "#FF9800",
            BenefitKind::Noise => "#9C27B0",
            BenefitKind::PhysicalActivity => "#FFC107",
            BenefitKind::RoadRepairs => "#2196F3",
        }
    }
}

/// Ordered, immutable collection of records loaded from the tabular
/// source.
///
/// Source order is preserved; ranking operations rely on it for stable
/// tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Wraps already-coerced records, preserving their order.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// The loaded records in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{BenefitKind, Record};

    #[test]
    fn benefit_kind_wire_names_roundtrip() {
        for kind in BenefitKind::ALL {
            assert_eq!(BenefitKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(BenefitKind::parse("biodiversity"), None);
    }

    #[test]
    fn benefit_kind_serde_matches_wire_names() {
        let json = serde_json::to_value(BenefitKind::PhysicalActivity).unwrap();
        assert_eq!(json, "physical_activity");

        let decoded: BenefitKind = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, BenefitKind::PhysicalActivity);
    }

    #[test]
    fn record_serialization_uses_external_schema_names() {
        let record = Record {
            region: "Aberdeen City".to_string(),
            year: 2025,
            nation: "Scotland".to_string(),
            benefit_type: "air_quality".to_string(),
            value_total: 12.5,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["local_authority"], "Aberdeen City");
        assert_eq!(json["year"], 2025);
        assert_eq!(json["nation"], "Scotland");
        assert_eq!(json["co_benefit_type"], "air_quality");
        assert_eq!(json["value_total"], 12.5);

        let decoded: Record = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, record);
    }
}
