//! Importance orders produced by simplification runs

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Normalized importance score per vertex of one ring or line, indexed by
/// the vertex's position in the input sequence
pub type RingOrder = Vec<f64>;

/// Importance orders for one geometry, shaped like the geometry itself
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryOrder {
    /// Kinds the simplifier does not reduce (points, multipoints, no geometry)
    Empty,
    /// One order per ring of a polygon, or per line of a (multi)line string
    Rings(Vec<RingOrder>),
    /// One set of ring orders per polygon of a multipolygon
    Polygons(Vec<Vec<RingOrder>>),
    /// One entry per member of a geometry collection, in member order
    Collection(Vec<GeometryOrder>),
}

impl GeometryOrder {
    /// Check if the order holds no rings at all
    pub fn is_empty(&self) -> bool {
        self.ring_count() == 0
    }

    /// Number of ring orders, recursing into polygons and collections
    pub fn ring_count(&self) -> usize {
        match self {
            GeometryOrder::Empty => 0,
            GeometryOrder::Rings(rings) => rings.len(),
            GeometryOrder::Polygons(polygons) => polygons.iter().map(Vec::len).sum(),
            GeometryOrder::Collection(members) => {
                members.iter().map(GeometryOrder::ring_count).sum()
            }
        }
    }

    /// Flatten to one order per ring or line, in traversal order
    pub fn rings(&self) -> Vec<RingOrder> {
        let mut out = Vec::with_capacity(self.ring_count());
        self.collect_rings(&mut out);
        out
    }

    fn collect_rings(&self, out: &mut Vec<RingOrder>) {
        match self {
            GeometryOrder::Empty => {}
            GeometryOrder::Rings(rings) => out.extend(rings.iter().cloned()),
            GeometryOrder::Polygons(polygons) => {
                out.extend(polygons.iter().flat_map(|rings| rings.iter().cloned()))
            }
            GeometryOrder::Collection(members) => {
                for member in members {
                    member.collect_rings(out);
                }
            }
        }
    }
}

// Serialized as nested arrays: `Empty` is `[]`, so unsupported kinds and
// geometry-less features carry an empty `Order`.
impl Serialize for GeometryOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GeometryOrder::Empty => serializer.serialize_seq(Some(0))?.end(),
            GeometryOrder::Rings(rings) => rings.serialize(serializer),
            GeometryOrder::Polygons(polygons) => polygons.serialize(serializer),
            GeometryOrder::Collection(members) => {
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for member in members {
                    seq.serialize_element(member)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ring_count_and_flatten() {
        let order = GeometryOrder::Collection(vec![
            GeometryOrder::Rings(vec![vec![0.0, 1.0, 0.0]]),
            GeometryOrder::Empty,
            GeometryOrder::Polygons(vec![
                vec![vec![0.0, 0.5, 0.0], vec![0.0, 0.25, 0.0]],
                vec![vec![0.0, 0.75, 0.0]],
            ]),
        ]);
        assert_eq!(order.ring_count(), 4);
        let rings = order.rings();
        assert_eq!(rings.len(), 4);
        assert_eq!(rings[1], vec![0.0, 0.5, 0.0]);
        assert_eq!(rings[3], vec![0.0, 0.75, 0.0]);
    }

    #[test]
    fn test_empty_order() {
        assert!(GeometryOrder::Empty.is_empty());
        assert!(GeometryOrder::Collection(vec![GeometryOrder::Empty]).is_empty());
        assert!(!GeometryOrder::Rings(vec![vec![0.0, 0.0]]).is_empty());
    }

    #[test]
    fn test_serialize_nested_arrays() {
        let order = GeometryOrder::Collection(vec![
            GeometryOrder::Empty,
            GeometryOrder::Rings(vec![vec![0.0, 1.0, 0.0]]),
        ]);
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value, json!([[], [[0.0, 1.0, 0.0]]]));
        assert_eq!(serde_json::to_value(GeometryOrder::Empty).unwrap(), json!([]));
    }
}
