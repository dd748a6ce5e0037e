//! GeoJSON encoding of point layers.
//!
//! Only the subset this system emits: `Point` features with a
//! properties map, wrapped in a `FeatureCollection`. Coordinates are
//! geographic (lon, lat), per the GeoJSON spec.

use layers::PointCollection;
use serde::Serialize;
use serde_json::{Map, Number, Value as JsonValue};
use survey::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub geometry: Geometry,
    pub properties: Map<String, JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Feature>,
}

/// Encodes a point collection as a GeoJSON feature collection, one
/// feature per record, attributes carried as properties.
pub fn feature_collection(points: &PointCollection) -> FeatureCollection {
    let coords = points.wgs84_coords();
    let features = points
        .points()
        .iter()
        .zip(coords)
        .map(|(point, coord)| {
            let mut properties = Map::new();
            for (name, value) in points.attr_names().iter().zip(&point.attrs) {
                properties.insert(name.clone(), to_json(value));
            }
            Feature {
                kind: "Feature",
                geometry: Geometry::Point {
                    coordinates: [coord.x, coord.y],
                },
                properties,
            }
        })
        .collect();
    FeatureCollection {
        kind: "FeatureCollection",
        features,
    }
}

fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Num(n) => Number::from_f64(*n).map_or(JsonValue::Null, JsonValue::Number),
        Value::Text(s) => JsonValue::String(s.clone()),
    }
}
