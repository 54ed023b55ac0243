//! Geometry types and related functionality

use nalgebra::Point2;
use std::fmt;

/// A 2D coordinate with double precision components
pub type Coord = Point2<f64>;

/// An ordered coordinate sequence: one line, or one ring of a polygon
pub type LineString = Vec<Coord>;

/// A polygon as its rings; the first ring is the exterior, the rest are holes
pub type Polygon = Vec<LineString>;

/// An already-parsed 2D geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coord),
    MultiPoint(Vec<Coord>),
    LineString(LineString),
    MultiLineString(Vec<LineString>),
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

/// The declared kind of a [`Geometry`], without its coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl Geometry {
    /// Get the kind of this geometry
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Total number of coordinates, recursing into collections
    pub fn coord_count(&self) -> usize {
        match self {
            Geometry::Point(_) => 1,
            Geometry::MultiPoint(points) => points.len(),
            Geometry::LineString(line) => line.len(),
            Geometry::MultiLineString(lines) => lines.iter().map(Vec::len).sum(),
            Geometry::Polygon(rings) => rings.iter().map(Vec::len).sum(),
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .flat_map(|rings| rings.iter())
                .map(Vec::len)
                .sum(),
            Geometry::GeometryCollection(members) => {
                members.iter().map(Geometry::coord_count).sum()
            }
        }
    }

    /// Build a line string from `(x, y)` pairs
    pub fn line_string(coords: &[(f64, f64)]) -> Self {
        Geometry::LineString(coords_from_pairs(coords))
    }

    /// Build a polygon from rings of `(x, y)` pairs
    pub fn polygon(rings: &[&[(f64, f64)]]) -> Self {
        Geometry::Polygon(rings.iter().map(|ring| coords_from_pairs(ring)).collect())
    }
}

impl GeometryKind {
    /// The GeoJSON type name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert `(x, y)` pairs into coordinates
pub fn coords_from_pairs(pairs: &[(f64, f64)]) -> LineString {
    pairs.iter().map(|&(x, y)| Coord::new(x, y)).collect()
}
