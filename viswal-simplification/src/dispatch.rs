//! Geometry dispatch: one simplification run per ring or line

use crate::simplifier::{simplify_ring, SimplifyOptions};
use viswal_core::{Coord, Geometry, GeometryOrder, GeometryReducer, Polygon, Result, RingOrder};

/// Visvalingam-Whyatt reducer over every geometry kind.
///
/// Each ring or line is simplified on its own chain; nothing is shared
/// between rings, polygons or collection members.
#[derive(Debug, Clone, Default)]
pub struct VisvalingamReducer {
    pub options: SimplifyOptions,
}

impl VisvalingamReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SimplifyOptions) -> Self {
        Self { options }
    }

    fn ring(&self, ring: usize, coords: &[Coord]) -> Result<RingOrder> {
        simplify_ring(ring, coords, &self.options).map(|s| s.order)
    }

    fn rings(&self, rings: &[Vec<Coord>]) -> Result<Vec<RingOrder>> {
        rings
            .iter()
            .enumerate()
            .map(|(i, coords)| self.ring(i, coords))
            .collect()
    }

    fn polygon(&self, polygon: &Polygon) -> Result<Vec<RingOrder>> {
        self.rings(polygon)
    }
}

impl GeometryReducer for VisvalingamReducer {
    fn reduce(&self, geometry: &Geometry) -> Result<GeometryOrder> {
        match geometry {
            Geometry::Polygon(rings) => Ok(GeometryOrder::Rings(self.polygon(rings)?)),
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .map(|polygon| self.polygon(polygon))
                .collect::<Result<Vec<_>>>()
                .map(GeometryOrder::Polygons),
            Geometry::LineString(line) => Ok(GeometryOrder::Rings(vec![self.ring(0, line)?])),
            Geometry::MultiLineString(lines) => Ok(GeometryOrder::Rings(self.rings(lines)?)),
            Geometry::GeometryCollection(members) => members
                .iter()
                .map(|member| self.reduce(member))
                .collect::<Result<Vec<_>>>()
                .map(GeometryOrder::Collection),
            Geometry::Point(_) | Geometry::MultiPoint(_) => {
                tracing::trace!(kind = %geometry.kind(), "geometry kind not reduced");
                Ok(GeometryOrder::Empty)
            }
        }
    }
}

/// Reduce a geometry with the default [`VisvalingamReducer`]
pub fn reduce_geometry(geometry: &Geometry) -> Result<GeometryOrder> {
    VisvalingamReducer::new().reduce(geometry)
}
