//! Elimination queue: a min-heap of vertex ids keyed by priority

use priority_queue::PriorityQueue;
use std::cmp::Ordering;

/// Heap key for a vertex: smaller area compares greater so that the
/// max-heap yields the least significant vertex first.
#[derive(Debug, Clone, Copy)]
struct Area(f64);

impl PartialEq for Area {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}
impl Eq for Area {}

impl PartialOrd for Area {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Area {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smallest area first
        other.0.total_cmp(&self.0)
    }
}

/// Binary min-heap over the vertices of one chain.
///
/// Items are arena indices; the underlying queue tracks each item's heap
/// position, so [`EliminationQueue::fix`] is O(log n) without a scan.
pub struct EliminationQueue {
    heap: PriorityQueue<usize, Area>,
}

impl EliminationQueue {
    /// Build from `(index, priority)` pairs in O(n)
    pub fn from_priorities<I>(priorities: I) -> Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        Self {
            heap: priorities
                .into_iter()
                .map(|(index, priority)| (index, Area(priority)))
                .collect(),
        }
    }

    /// Remove and return the index with the smallest priority
    pub fn pop_min(&mut self) -> Option<(usize, f64)> {
        self.heap.pop().map(|(index, area)| (index, area.0))
    }

    /// Restore heap order after `index`'s priority changed.
    ///
    /// Returns `false`, leaving the queue untouched, when `index` is no
    /// longer queued.
    pub fn fix(&mut self, index: usize, priority: f64) -> bool {
        self.heap.change_priority(&index, Area(priority)).is_some()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
