//! Core data structures and traits for viswal
//!
//! This crate provides the fundamental types shared by the simplification
//! engine and its adapters: coordinates, geometries, features, importance
//! orders, and the reducer trait.

pub mod error;
pub mod feature;
pub mod geometry;
pub mod order;
pub mod traits;

pub use error::*;
pub use feature::*;
pub use geometry::*;
pub use order::*;
pub use traits::*;

/// Re-export the nalgebra point type backing [`Coord`]
pub use nalgebra::Point2;
