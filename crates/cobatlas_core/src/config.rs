//! Data source configuration.
//!
//! # Responsibility
//! - Name the on-disk locations of the tabular and boundary sources.
//! - Fix the column names and boundary join property the loaders depend
//!   on.
//!
//! # Invariants
//! - Column constants match the external schema exactly; a source
//!   missing any of them fails the load.
//! - The boundary join is configured by property name only; value
//!   comparison stays exact string equality.

use crate::model::record::BenefitKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Region column of the tabular source.
pub const COLUMN_REGION: &str = "local_authority";
/// Year column of the tabular source.
pub const COLUMN_YEAR: &str = "year";
/// Nation column of the tabular source.
pub const COLUMN_NATION: &str = "nation";
/// Benefit category column of the tabular source.
pub const COLUMN_BENEFIT_TYPE: &str = "co_benefit_type";
/// Numeric value column of the tabular source.
pub const COLUMN_VALUE_TOTAL: &str = "value_total";

/// Year preselected by consumers when a request carries none.
pub const DEFAULT_YEAR: i32 = 2025;

/// Category preselected for single-choice map views.
pub const DEFAULT_MAP_BENEFIT: BenefitKind = BenefitKind::AirQuality;

/// Locations and join settings for the two data sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Tabular record source (CSV).
    pub record_file: PathBuf,
    /// Geographic boundary source (GeoJSON feature collection).
    pub boundary_file: PathBuf,
    /// Feature property joined against `Record::region` by exact
    /// equality.
    pub matching_property: String,
}

impl DataConfig {
    /// Builds a config pointing at the conventional file names under
    /// `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            record_file: dir.join("normalized_data.csv"),
            boundary_file: dir.join("lad_boundaries.geojson"),
            matching_property: COLUMN_REGION.to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::from_dir("data")
    }
}

/// Benefit categories selected when a request names none.
pub fn default_benefit_types() -> Vec<BenefitKind> {
    BenefitKind::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::{default_benefit_types, DataConfig, COLUMN_REGION};
    use std::path::Path;

    #[test]
    fn default_config_points_at_conventional_data_dir() {
        let config = DataConfig::default();
        assert_eq!(config.record_file, Path::new("data/normalized_data.csv"));
        assert_eq!(
            config.boundary_file,
            Path::new("data/lad_boundaries.geojson")
        );
        assert_eq!(config.matching_property, COLUMN_REGION);
    }

    #[test]
    fn from_dir_keeps_conventional_file_names() {
        let config = DataConfig::from_dir("/srv/cobatlas");
        assert_eq!(
            config.record_file,
            Path::new("/srv/cobatlas/normalized_data.csv")
        );
    }

    #[test]
    fn default_selection_covers_all_known_categories() {
        assert_eq!(default_benefit_types().len(), 5);
    }

    #[test]
    fn config_serializes_and_deserializes() {
        let config = DataConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        let decoded: DataConfig = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, config);
    }
}
