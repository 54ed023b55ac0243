//! Visvalingam-Whyatt elimination loop
//!
//! Repeatedly removes the live vertex whose triangle with its two live
//! neighbors has the smallest area, recomputing the neighbors' areas after
//! each removal, and records for every removed vertex the fraction of the
//! chain still present just before it went.

use crate::chain::Chain;
use crate::queue::EliminationQueue;
use viswal_core::{Coord, Error, Result, RingOrder};

/// Options for a single ring simplification
#[derive(Debug, Clone, Default)]
pub struct SimplifyOptions {
    /// Raise a recomputed neighbor priority to the priority of the vertex
    /// just removed, so recorded removal priorities never decrease
    pub monotonic: bool,
}

/// One step of the elimination loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Removal {
    /// Position of the removed vertex in the input sequence
    pub id: usize,
    /// Priority of the vertex when it was popped
    pub priority: f64,
    /// Live vertex count immediately before the removal
    pub remaining: usize,
}

/// Result of simplifying one ring or line
#[derive(Debug, Clone, PartialEq)]
pub struct Simplification {
    /// Importance score per input vertex; endpoints stay at zero
    pub order: RingOrder,
    /// Removals in the order they happened
    pub removals: Vec<Removal>,
}

impl SimplifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_monotonic(mut self, monotonic: bool) -> Self {
        self.monotonic = monotonic;
        self
    }
}

/// Simplify one ring or line down to its two endpoints.
///
/// `ring` is the position of the ring within its geometry and is only used
/// to label a [`Error::MalformedRing`]. Sequences of fewer than two
/// coordinates are malformed; two-coordinate sequences have nothing to
/// remove and get an all-zero order.
pub fn simplify_ring(ring: usize, coords: &[Coord], options: &SimplifyOptions) -> Result<Simplification> {
    let total = coords.len();
    if total < 2 {
        return Err(Error::MalformedRing { ring, len: total });
    }

    let mut order = vec![0.0; total];
    if total < 3 {
        return Ok(Simplification {
            order,
            removals: Vec::new(),
        });
    }

    let mut chain = Chain::from_coords(coords);
    chain.compute_priorities();
    let mut queue = EliminationQueue::from_priorities(
        chain.vertices().iter().enumerate().map(|(i, v)| (i, v.priority)),
    );

    let mut removals = Vec::with_capacity(total - 2);
    while chain.live_count() > 2 {
        let (index, priority) = match queue.pop_min() {
            Some(item) => item,
            None => break,
        };
        // Non-finite coordinates can rank an interior vertex behind the
        // endpoints; never remove an endpoint.
        if chain.vertex(index).is_endpoint() {
            tracing::warn!(
                ring,
                unscored = chain.live_count() - 2,
                "non-finite priority reached the chain endpoints, stopping early"
            );
            break;
        }

        let remaining = chain.live_count();
        order[index] = remaining as f64 / total as f64;
        removals.push(Removal {
            id: index,
            priority,
            remaining,
        });

        let (left, right) = chain.remove(index);
        for neighbor in [left, right].into_iter().flatten() {
            let mut updated = chain.compute_priority(neighbor);
            if options.monotonic && updated < priority {
                updated = priority;
                chain.set_priority(neighbor, updated);
            }
            queue.fix(neighbor, updated);
        }
    }

    Ok(Simplification { order, removals })
}

/// Importance order of one ring or line with default options
pub fn importance_order(coords: &[Coord]) -> Result<RingOrder> {
    simplify_ring(0, coords, &SimplifyOptions::default()).map(|s| s.order)
}

/// Indices of the vertices still present when `target` vertices remain.
///
/// Endpoints are always kept. `target` is clamped to at least two.
pub fn level_of_detail(order: &[f64], target: usize) -> Vec<usize> {
    let total = order.len() as f64;
    let target = target.max(2);
    order
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score == 0.0 || (score * total).round() as usize <= target)
        .map(|(i, _)| i)
        .collect()
}
