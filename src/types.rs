//! Shared types for the capacity-mesh router.

use std::cmp::Ordering;

/// A 2D board position in millimeters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A 3D route position: board coordinates plus a layer index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoutePoint {
    pub x: f64,
    pub y: f64,
    pub layer: u8,
}

impl RoutePoint {
    #[inline]
    pub fn new(x: f64, y: f64, layer: u8) -> Self {
        Self { x, y, layer }
    }
}

/// A via position. The via spans all layers at this location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Via {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned board bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Obstacle shape kinds supported by the board description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Rect,
    Oval,
}

/// A fixed obstacle on the board (pad, keepout, pre-existing copper).
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub kind: ObstacleKind,
    /// Layer indices this obstacle occupies.
    pub layers: Vec<u8>,
    /// Connection names electrically connected to this obstacle.
    /// Connected nets do not require clearance from it.
    pub connected_to: Vec<String>,
}

impl Obstacle {
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.center.x - self.width / 2.0
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.center.x + self.width / 2.0
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.center.y - self.height / 2.0
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.center.y + self.height / 2.0
    }

    /// Does this obstacle occupy any of the given layers?
    pub fn occupies_any_layer(&self, layers: &[u8]) -> bool {
        self.layers.iter().any(|l| layers.contains(l))
    }
}

/// A terminal point of a connection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerminalPoint {
    pub x: f64,
    pub y: f64,
    pub layer: u8,
}

/// A named point-to-point connection to be routed.
#[derive(Clone, Debug)]
pub struct Connection {
    pub name: String,
    pub points: Vec<TerminalPoint>,
}

/// A rectangular region of the board treated as one routing unit.
///
/// Frozen once finished; only unfinished nodes are subdivided further.
#[derive(Clone, Debug)]
pub struct CapacityMeshNode {
    pub id: u32,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    /// Layer indices available for routing inside this node.
    pub layers: Vec<u8>,
}

impl CapacityMeshNode {
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.center.x - self.width / 2.0
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.center.x + self.width / 2.0
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.center.y - self.height / 2.0
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.center.y + self.height / 2.0
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x() && x <= self.max_x() && y >= self.min_y() && y <= self.max_y()
    }
}

/// An adjacency between two mesh nodes: a routing corridor of bounded capacity.
///
/// `node_ids` is ordered (smaller id first). `segment` is the shared boundary
/// between the two node rectangles.
#[derive(Clone, Debug)]
pub struct CapacityMeshEdge {
    pub node_ids: (u32, u32),
    pub segment: (Point, Point),
}

/// A connection terminal localized to a specific mesh node.
#[derive(Clone, Debug)]
pub struct PortPoint {
    pub connection_name: String,
    pub x: f64,
    pub y: f64,
}

/// A mesh node plus its resolved port points: the unit of work handed to the
/// intra-node router.
#[derive(Clone, Debug)]
pub struct NodeWithPortPoints {
    pub node: CapacityMeshNode,
    pub port_points: Vec<PortPoint>,
}

/// A fully resolved trace path (possibly with vias) connecting port points of
/// one connection within a single mesh node.
///
/// Immutable once produced; becomes an obstacle for routes solved later in
/// the same node.
#[derive(Clone, Debug)]
pub struct HighDensityRoute {
    pub connection_name: String,
    pub trace_thickness: f64,
    pub via_diameter: f64,
    pub route: Vec<RoutePoint>,
    pub vias: Vec<Via>,
}

impl HighDensityRoute {
    /// Consecutive route point pairs that lie on the same layer, i.e. the
    /// physical trace segments (layer changes are vias, not traces).
    pub fn same_layer_segments(&self) -> impl Iterator<Item = (RoutePoint, RoutePoint)> + '_ {
        self.route
            .windows(2)
            .filter(|w| w[0].layer == w[1].layer)
            .map(|w| (w[0], w[1]))
    }
}

/// Pack quantized cell coordinates into a u64 for fast hashing:
/// 20 bits x, 20 bits y, 8 bits layer. Coordinates are cell indices relative
/// to the search origin, so the 20-bit range is never a concern in practice.
#[inline]
pub fn pack_cell(cx: i32, cy: i32, layer: u8) -> u64 {
    let x = (cx as u64) & 0xFFFFF;
    let y = (cy as u64) & 0xFFFFF;
    let l = layer as u64;
    (x << 28) | (y << 8) | l
}

/// A* frontier entry with reverse ordering for min-heap.
///
/// `f_scaled` is the f-score scaled to integer micro-units so the heap ordering
/// is total and platform-stable; `counter` breaks ties deterministically by
/// insertion order; `index` addresses the node arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OpenEntry {
    pub f_scaled: i64,
    pub counter: u32,
    pub index: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lowest f first)
        other
            .f_scaled
            .cmp(&self.f_scaled)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scale a floating-point cost into the integer units used by `OpenEntry`.
#[inline]
pub fn scale_cost(cost: f64) -> i64 {
    (cost * 1_000_000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn open_entry_orders_lowest_f_first() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { f_scaled: 3_000, counter: 0, index: 0 });
        heap.push(OpenEntry { f_scaled: 1_000, counter: 1, index: 1 });
        heap.push(OpenEntry { f_scaled: 2_000, counter: 2, index: 2 });

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|e| e.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn open_entry_ties_break_by_insertion_order() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { f_scaled: 1_000, counter: 5, index: 5 });
        heap.push(OpenEntry { f_scaled: 1_000, counter: 2, index: 2 });

        let first = heap.pop();
        assert!(first.is_some());
        if let Some(entry) = first {
            assert_eq!(entry.index, 2);
        }
    }

    #[test]
    fn pack_cell_distinguishes_layers_and_negatives() {
        let a = pack_cell(3, 4, 0);
        let b = pack_cell(3, 4, 1);
        let c = pack_cell(-3, 4, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, pack_cell(3, 4, 0));
    }

    #[test]
    fn same_layer_segments_skip_via_transitions() {
        let route = HighDensityRoute {
            connection_name: "n1".to_string(),
            trace_thickness: 0.15,
            via_diameter: 0.6,
            route: vec![
                RoutePoint::new(0.0, 0.0, 0),
                RoutePoint::new(1.0, 0.0, 0),
                RoutePoint::new(1.0, 0.0, 1),
                RoutePoint::new(2.0, 0.0, 1),
            ],
            vias: vec![Via { x: 1.0, y: 0.0 }],
        };
        let segments: Vec<_> = route.same_layer_segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].1.x, 1.0);
        assert_eq!(segments[1].0.layer, 1);
    }
}
