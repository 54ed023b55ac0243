//! Core traits for viswal

use crate::{error::Result, geometry::Geometry, order::GeometryOrder};

/// Trait for algorithms that compute per-vertex importance orders
pub trait GeometryReducer {
    /// Compute the importance order of every ring or line in `geometry`.
    ///
    /// Unsupported kinds yield [`GeometryOrder::Empty`] rather than an error.
    fn reduce(&self, geometry: &Geometry) -> Result<GeometryOrder>;
}

impl<R: GeometryReducer + ?Sized> GeometryReducer for &R {
    fn reduce(&self, geometry: &Geometry) -> Result<GeometryOrder> {
        (**self).reduce(geometry)
    }
}
