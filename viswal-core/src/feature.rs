//! Features and feature collections

use crate::geometry::Geometry;
use serde_json::{Map, Value};

/// Property key under which a feature's importance order is stored
pub const ORDER_PROPERTY: &str = "Order";

/// A geometry together with an open-ended property map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feature {
    /// Optional feature identifier (string or number)
    pub id: Option<Value>,
    pub geometry: Option<Geometry>,
    pub properties: Map<String, Value>,
}

/// An ordered collection of features
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl Feature {
    /// Create a feature with a geometry and no properties
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: Map::new(),
        }
    }

    /// Add a property
    pub fn with_property<S: Into<String>>(mut self, key: S, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Look up a string property
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// The `name` property, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.property_str("name")
    }

    /// The importance order stored on this feature, if any
    pub fn order(&self) -> Option<&Value> {
        self.properties.get(ORDER_PROPERTY)
    }
}

impl FeatureCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from features
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Get the number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Add a feature
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}
