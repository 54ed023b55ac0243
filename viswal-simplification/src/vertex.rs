//! Vertices of a simplification chain and the triangle-area metric

use viswal_core::Coord;

/// One coordinate of a chain plus its links to the live neighbors.
///
/// Links are indices into the owning chain's vertex arena.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Position in the original coordinate sequence
    pub id: usize,
    pub coord: Coord,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub alive: bool,
    /// Effective area of the triangle (left, self, right); infinite until
    /// both neighbors exist
    pub priority: f64,
}

impl Vertex {
    pub fn new(id: usize, coord: Coord) -> Self {
        Self {
            id,
            coord,
            left: None,
            right: None,
            alive: true,
            priority: f64::INFINITY,
        }
    }

    /// A vertex missing either neighbor is a chain endpoint
    pub fn is_endpoint(&self) -> bool {
        self.left.is_none() || self.right.is_none()
    }

    /// Set the priority from the given neighbor coordinates
    pub fn compute_priority(&mut self, left: &Coord, right: &Coord) {
        self.priority = triangle_area(left, &self.coord, right);
    }
}

/// Area of the triangle (a, b, c) by the shoelace formula.
///
/// Collinear points give zero.
pub fn triangle_area(a: &Coord, b: &Coord, c: &Coord) -> f64 {
    ((a.x * b.y) + (b.x * c.y) + (c.x * a.y) - (a.x * c.y) - (b.x * a.y) - (c.x * b.y)).abs()
        / 2.0
}
