#[cfg(feature = "jsonconf")]
use serde::{Deserialize, Serialize};

use indexmap::IndexMap;

pub type Properties = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "jsonconf", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "jsonconf", serde(tag = "type"))]
pub enum Geometry {
    /// `[longitude, latitude]`
    Point { coordinates: [f64; 2] },
}

/// A point feature. The properties never contain the fields used as latitude/longitude.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "jsonconf", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "jsonconf", serde(tag = "type"))]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    pub fn point(longitude: f64, latitude: f64, properties: Properties) -> Self {
        Self {
            geometry: Geometry::Point {
                coordinates: [longitude, latitude],
            },
            properties,
        }
    }

    pub fn coordinates(&self) -> [f64; 2] {
        match self.geometry {
            Geometry::Point { coordinates } => coordinates,
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates()[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates()[1]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "jsonconf", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "jsonconf", serde(tag = "type"))]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            features: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    #[cfg(feature = "jsonconf")]
    pub fn to_geojson_string(&self) -> crate::errors::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[cfg(feature = "jsonconf")]
    pub fn to_geojson_value(&self) -> crate::errors::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn madrid() -> Feature {
        let mut props = Properties::new();
        props.insert("popup".into(), "Madrid".into());
        Feature::point(-3.5, 40.1, props)
    }

    #[test]
    fn coordinates_are_lon_lat() {
        let f = madrid();
        assert_eq!(f.coordinates(), [-3.5, 40.1]);
        assert_eq!(f.longitude(), -3.5);
        assert_eq!(f.latitude(), 40.1);
    }

    #[cfg(feature = "jsonconf")]
    #[test]
    fn serializes_as_geojson() {
        let fc: FeatureCollection = vec![madrid()].into();
        let exp = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-3.5, 40.1] },
                "properties": { "popup": "Madrid" }
            }]
        });
        assert_eq!(fc.to_geojson_value().unwrap(), exp);
    }

    #[cfg(feature = "jsonconf")]
    #[test]
    fn deserializes_from_geojson() {
        let data = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-3.5, 40.1] },
                    "properties": { "popup": "Madrid" }
                }
            ]
        }
        "#;
        let fc: FeatureCollection = serde_json::from_str(data).expect("could not deserialize ");
        assert_eq!(fc, FeatureCollection::from(vec![madrid()]));
    }

    #[cfg(feature = "jsonconf")]
    #[test]
    fn empty_collection_to_string() {
        assert_eq!(
            FeatureCollection::new().to_geojson_string().unwrap(),
            r#"{"type":"FeatureCollection","features":[]}"#
        );
    }
}
