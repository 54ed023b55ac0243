//! Ring builder: an open chain of vertices over one coordinate sequence

use crate::vertex::Vertex;
use viswal_core::Coord;

/// Open doubly linked chain of vertices stored in an arena.
///
/// The first vertex has no left neighbor and the last has no right
/// neighbor. A closed ring's repeated closing coordinate is simply the
/// last vertex, so both copies of the closing point stay as endpoints.
#[derive(Debug, Clone)]
pub struct Chain {
    vertices: Vec<Vertex>,
    live: usize,
}

impl Chain {
    /// Build a chain with one vertex per coordinate, in input order
    pub fn from_coords(coords: &[Coord]) -> Self {
        let n = coords.len();
        let vertices = coords
            .iter()
            .enumerate()
            .map(|(i, &coord)| {
                let mut vertex = Vertex::new(i, coord);
                if i > 0 {
                    vertex.left = Some(i - 1);
                }
                if i + 1 < n {
                    vertex.right = Some(i + 1);
                }
                vertex
            })
            .collect();

        Self { vertices, live: n }
    }

    /// Total number of vertices, dead or alive
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn vertex(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Recompute the priority of `index` from its current neighbors.
    ///
    /// Endpoints keep their infinite priority.
    pub fn compute_priority(&mut self, index: usize) -> f64 {
        let (left, right) = (self.vertices[index].left, self.vertices[index].right);
        if let (Some(l), Some(r)) = (left, right) {
            let (lc, rc) = (self.vertices[l].coord, self.vertices[r].coord);
            self.vertices[index].compute_priority(&lc, &rc);
        }
        self.vertices[index].priority
    }

    /// Compute the initial priority of every vertex
    pub fn compute_priorities(&mut self) {
        for i in 0..self.vertices.len() {
            self.compute_priority(i);
        }
    }

    pub fn set_priority(&mut self, index: usize, priority: f64) {
        self.vertices[index].priority = priority;
    }

    /// Remove `index` from the chain and link its live neighbors to each
    /// other. Returns the new (left, right) pair.
    pub fn remove(&mut self, index: usize) -> (Option<usize>, Option<usize>) {
        self.vertices[index].alive = false;
        self.live -= 1;

        let left = self.live_towards(self.vertices[index].left, |v| v.left);
        let right = self.live_towards(self.vertices[index].right, |v| v.right);

        if let Some(l) = left {
            self.vertices[l].right = right;
        }
        if let Some(r) = right {
            self.vertices[r].left = left;
        }
        (left, right)
    }

    fn live_towards<F>(&self, mut cursor: Option<usize>, step: F) -> Option<usize>
    where
        F: Fn(&Vertex) -> Option<usize>,
    {
        while let Some(i) = cursor {
            if self.vertices[i].alive {
                return Some(i);
            }
            cursor = step(&self.vertices[i]);
        }
        None
    }
}
