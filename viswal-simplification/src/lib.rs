//! Visvalingam-Whyatt importance ordering
//!
//! This crate ranks every vertex of a geometry by the order in which it
//! would be dropped by Visvalingam-Whyatt simplification:
//! - Vertex chains and the effective-area metric
//! - A re-prioritizable elimination queue
//! - Per-kind geometry dispatch
//! - Concurrent batch reduction of feature collections

pub mod batch;
pub mod chain;
pub mod dispatch;
pub mod parallel;
pub mod queue;
pub mod simplifier;
pub mod vertex;

pub use batch::*;
pub use chain::*;
pub use dispatch::*;
pub use parallel::*;
pub use queue::*;
pub use simplifier::*;
pub use vertex::*;

pub use viswal_core::{GeometryReducer, Result};
