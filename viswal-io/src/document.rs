//! Conversion between GeoJSON documents and viswal features

use crate::error::{IoError, Result};
use geojson::{feature::Id, GeoJson, Value};
use serde_json::Value as JsonValue;
use viswal_core::{Coord, Feature, FeatureCollection, Geometry, LineString, Polygon};

/// Parse GeoJSON bytes into a feature collection.
///
/// A bare Feature or Geometry document becomes a one-feature collection.
/// Malformed JSON is a [`IoError::Json`]; well-formed JSON that is not valid
/// GeoJSON is a [`IoError::ParseError`].
pub fn parse_feature_collection(bytes: &[u8]) -> Result<FeatureCollection> {
    let json: JsonValue = serde_json::from_slice(bytes)?;
    let document = GeoJson::from_json_value(json)?;
    match document {
        GeoJson::FeatureCollection(fc) => fc.features.into_iter().map(feature_from_geojson).collect(),
        GeoJson::Feature(feature) => Ok(FeatureCollection::from_features(vec![feature_from_geojson(feature)?])),
        GeoJson::Geometry(geometry) => Ok(FeatureCollection::from_features(vec![Feature::new(
            geometry_from_value(&geometry.value)?,
        )])),
    }
}

/// Serialize a feature collection, properties included, as GeoJSON bytes
pub fn encode_feature_collection(collection: &FeatureCollection, pretty: bool) -> Result<Vec<u8>> {
    let document = GeoJson::FeatureCollection(geojson::FeatureCollection {
        bbox: None,
        features: collection.features.iter().map(feature_to_geojson).collect(),
        foreign_members: None,
    });
    let bytes = if pretty {
        serde_json::to_vec_pretty(&document)?
    } else {
        serde_json::to_vec(&document)?
    };
    Ok(bytes)
}

/// Serialize one feature as a standalone GeoJSON Feature document
pub fn encode_feature(feature: &Feature) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&GeoJson::Feature(feature_to_geojson(feature)))?)
}

/// Convert a parsed GeoJSON feature
pub fn feature_from_geojson(feature: geojson::Feature) -> Result<Feature> {
    let geometry = feature
        .geometry
        .as_ref()
        .map(|g| geometry_from_value(&g.value))
        .transpose()?;
    let id = feature.id.map(|id| match id {
        Id::String(s) => JsonValue::String(s),
        Id::Number(n) => JsonValue::Number(n),
    });
    Ok(Feature {
        id,
        geometry,
        properties: feature.properties.unwrap_or_default(),
    })
}

/// Convert a feature back to GeoJSON
pub fn feature_to_geojson(feature: &Feature) -> geojson::Feature {
    let id = feature.id.as_ref().and_then(|id| match id {
        JsonValue::String(s) => Some(Id::String(s.clone())),
        JsonValue::Number(n) => Some(Id::Number(n.clone())),
        _ => None,
    });
    geojson::Feature {
        bbox: None,
        geometry: feature
            .geometry
            .as_ref()
            .map(|g| geojson::Geometry::new(geometry_to_value(g))),
        id,
        properties: Some(feature.properties.clone()),
        foreign_members: None,
    }
}

/// Convert a GeoJSON geometry value
pub fn geometry_from_value(value: &Value) -> Result<Geometry> {
    Ok(match value {
        Value::Point(position) => Geometry::Point(coord(position)?),
        Value::MultiPoint(positions) => Geometry::MultiPoint(line(positions)?),
        Value::LineString(positions) => Geometry::LineString(line(positions)?),
        Value::MultiLineString(lines) => {
            Geometry::MultiLineString(lines.iter().map(|l| line(l)).collect::<Result<_>>()?)
        }
        Value::Polygon(rings) => Geometry::Polygon(polygon(rings)?),
        Value::MultiPolygon(polygons) => {
            Geometry::MultiPolygon(polygons.iter().map(|p| polygon(p)).collect::<Result<_>>()?)
        }
        Value::GeometryCollection(members) => Geometry::GeometryCollection(
            members
                .iter()
                .map(|g| geometry_from_value(&g.value))
                .collect::<Result<_>>()?,
        ),
    })
}

/// Convert a geometry to a GeoJSON geometry value
pub fn geometry_to_value(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Point(c) => Value::Point(position(c)),
        Geometry::MultiPoint(points) => Value::MultiPoint(positions(points)),
        Geometry::LineString(l) => Value::LineString(positions(l)),
        Geometry::MultiLineString(lines) => {
            Value::MultiLineString(lines.iter().map(|l| positions(l)).collect())
        }
        Geometry::Polygon(rings) => Value::Polygon(rings.iter().map(|r| positions(r)).collect()),
        Geometry::MultiPolygon(polygons) => Value::MultiPolygon(
            polygons
                .iter()
                .map(|rings| rings.iter().map(|r| positions(r)).collect())
                .collect(),
        ),
        Geometry::GeometryCollection(members) => Value::GeometryCollection(
            members
                .iter()
                .map(|m| geojson::Geometry::new(geometry_to_value(m)))
                .collect(),
        ),
    }
}

// Extra ordinates (altitude) are dropped
fn coord(position: &[f64]) -> Result<Coord> {
    match position {
        [x, y, ..] => Ok(Coord::new(*x, *y)),
        _ => Err(IoError::ParseError {
            message: format!("Position needs at least 2 ordinates, got {}", position.len()),
        }),
    }
}

fn line<P: AsRef<[f64]>>(positions: &[P]) -> Result<LineString> {
    positions.iter().map(|p| coord(p.as_ref())).collect()
}

fn polygon<P: AsRef<[f64]>>(rings: &[Vec<P>]) -> Result<Polygon> {
    rings.iter().map(|r| line(r)).collect()
}

fn position(c: &Coord) -> Vec<f64> {
    vec![c.x, c.y]
}

fn positions(coords: &[Coord]) -> Vec<Vec<f64>> {
    coords.iter().map(position).collect()
}
