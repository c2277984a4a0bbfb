//! Capacity mesh edge solver: adjacency graph over the mesh nodes.
//!
//! Two nodes are connected when their rectangles share a boundary of positive
//! length (corner contact does not count) and their layer sets overlap. The
//! shared boundary segment is stored on the edge; the segment-to-point stage
//! projects connection terminals onto these segments.

use crate::solver::{GraphicsObject, Solver, SolverState, DEFAULT_MAX_ITERATIONS};
use crate::types::{CapacityMeshEdge, CapacityMeshNode, Point};

/// Boundary gap below which two node rectangles count as touching.
const PROXIMITY_THRESHOLD: f64 = 0.01;

pub struct CapacityMeshEdgeSolver {
    state: SolverState,
    nodes: Vec<CapacityMeshNode>,
    pub edges: Vec<CapacityMeshEdge>,
}

impl CapacityMeshEdgeSolver {
    pub fn new(nodes: Vec<CapacityMeshNode>) -> Self {
        Self {
            state: SolverState::new(DEFAULT_MAX_ITERATIONS),
            nodes,
            edges: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[CapacityMeshNode] {
        &self.nodes
    }

    /// The shared boundary between two adjacent node rectangles, or None if
    /// they are not adjacent.
    fn shared_boundary(a: &CapacityMeshNode, b: &CapacityMeshNode) -> Option<(Point, Point)> {
        let x_lo = a.min_x().max(b.min_x());
        let x_hi = a.max_x().min(b.max_x());
        let y_lo = a.min_y().max(b.min_y());
        let y_hi = a.max_y().min(b.max_y());
        let x_overlap = x_hi - x_lo;
        let y_overlap = y_hi - y_lo;

        // Touching along a vertical boundary
        if x_overlap.abs() <= PROXIMITY_THRESHOLD && y_overlap > PROXIMITY_THRESHOLD {
            let x = (x_lo + x_hi) / 2.0;
            return Some((Point::new(x, y_lo), Point::new(x, y_hi)));
        }
        // Touching along a horizontal boundary
        if y_overlap.abs() <= PROXIMITY_THRESHOLD && x_overlap > PROXIMITY_THRESHOLD {
            let y = (y_lo + y_hi) / 2.0;
            return Some((Point::new(x_lo, y), Point::new(x_hi, y)));
        }
        None
    }
}

impl Solver for CapacityMeshEdgeSolver {
    fn state(&self) -> &SolverState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SolverState {
        &mut self.state
    }

    /// Single pass: the full adjacency graph is built in one step.
    fn step_impl(&mut self) {
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let a = &self.nodes[i];
                let b = &self.nodes[j];
                if !a.layers.iter().any(|l| b.layers.contains(l)) {
                    continue;
                }
                if let Some(segment) = Self::shared_boundary(a, b) {
                    let node_ids = if a.id < b.id { (a.id, b.id) } else { (b.id, a.id) };
                    self.edges.push(CapacityMeshEdge { node_ids, segment });
                }
            }
        }
        self.state.mark_solved();
    }

    fn visualize(&self) -> GraphicsObject {
        let mut graphics = GraphicsObject::default();
        for edge in &self.edges {
            graphics.lines.push((
                vec![
                    (edge.segment.0.x, edge.segment.0.y),
                    (edge.segment.1.x, edge.segment.1.y),
                ],
                "gray".to_string(),
            ));
        }
        graphics
    }
}
