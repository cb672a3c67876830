//! Geographic boundary document model.
//!
//! # Responsibility
//! - Mirror the GeoJSON feature collection shape for load and
//!   passthrough.
//! - Expose join-key property values for region matching.
//!
//! # Invariants
//! - Geometry is opaque to the core; it is never parsed or validated.
//! - Region matching uses exact string equality, no normalization;
//!   mismatches surface as empty intersections downstream, not errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A named collection of geographic shapes, loaded once per process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDocument {
    /// Document type marker, `FeatureCollection` in well-formed sources.
    #[serde(rename = "type")]
    pub kind: String,
    /// Member shapes in source order.
    pub features: Vec<BoundaryFeature>,
}

/// One geographic shape plus its property mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFeature {
    /// Feature type marker, `Feature` in well-formed sources.
    #[serde(rename = "type")]
    pub kind: String,
    /// Property mapping; one configured key is expected to carry a
    /// region name.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Opaque geometry payload, passed through untouched.
    #[serde(default)]
    pub geometry: Value,
}

impl BoundaryDocument {
    /// Number of features in the document.
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Distinct string values of `property` across all features.
    ///
    /// Features without the property, or with a non-string value, are
    /// skipped rather than treated as an error.
    pub fn property_values(&self, property: &str) -> BTreeSet<String> {
        self.features
            .iter()
            .filter_map(|feature| feature.property_str(property))
            .map(str::to_string)
            .collect()
    }
}

impl BoundaryFeature {
    /// String value of `property`, when present and a string.
    pub fn property_str(&self, property: &str) -> Option<&str> {
        self.properties.get(property).and_then(Value::as_str)
    }
}
