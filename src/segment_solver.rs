//! Segment-to-point solver: pins connection terminals to mesh nodes.
//!
//! Each connection terminal either lies inside a leaf node (it becomes that
//! node's port point directly) or gets projected onto the nearest mesh edge
//! segment, in which case both nodes adjoining the edge receive the projected
//! port. The result is the per-node work list for intra-node routing.

use rustc_hash::FxHashMap;

use crate::geometry::{closest_point_on_segment, point_to_segment_distance};
use crate::solver::{GraphicsObject, Solver, SolverState, DEFAULT_MAX_ITERATIONS};
use crate::types::{
    CapacityMeshEdge, CapacityMeshNode, Connection, NodeWithPortPoints, PortPoint,
};

pub struct CapacitySegmentToPointSolver {
    state: SolverState,
    nodes: Vec<CapacityMeshNode>,
    edges: Vec<CapacityMeshEdge>,
    /// (connection name, x, y) terminals still to be assigned.
    pending: Vec<(String, f64, f64)>,
    tolerance: f64,
    assignments: FxHashMap<u32, Vec<PortPoint>>,
}

impl CapacitySegmentToPointSolver {
    pub fn new(
        nodes: Vec<CapacityMeshNode>,
        edges: Vec<CapacityMeshEdge>,
        connections: &[Connection],
    ) -> Self {
        let largest_dimension = nodes
            .iter()
            .map(|n| n.width.max(n.height))
            .fold(0.0_f64, f64::max);
        let mut pending: Vec<(String, f64, f64)> = Vec::new();
        for connection in connections {
            for point in &connection.points {
                pending.push((connection.name.clone(), point.x, point.y));
            }
        }
        // Assign in connection order; the work list is consumed front-first.
        pending.reverse();
        Self {
            state: SolverState::new(DEFAULT_MAX_ITERATIONS),
            nodes,
            edges,
            pending,
            tolerance: largest_dimension * 2.0,
            assignments: FxHashMap::default(),
        }
    }

    /// Nodes that received at least one port point, ordered by node id.
    pub fn nodes_with_port_points(&self) -> Vec<NodeWithPortPoints> {
        let mut ids: Vec<u32> = self.assignments.keys().copied().collect();
        ids.sort_unstable();
        ids.iter()
            .filter_map(|id| {
                let node = self.nodes.iter().find(|n| n.id == *id)?;
                Some(NodeWithPortPoints {
                    node: node.clone(),
                    port_points: self.assignments[id].clone(),
                })
            })
            .collect()
    }

    fn add_port(&mut self, node_id: u32, connection_name: &str, x: f64, y: f64) {
        self.assignments.entry(node_id).or_default().push(PortPoint {
            connection_name: connection_name.to_string(),
            x,
            y,
        });
    }

    fn assign_terminal(&mut self, connection_name: &str, x: f64, y: f64) {
        if let Some(node_id) = self
            .nodes
            .iter()
            .find(|n| n.contains_point(x, y))
            .map(|n| n.id)
        {
            self.add_port(node_id, connection_name, x, y);
            return;
        }

        // Outside every leaf: project onto the nearest edge segment and hand
        // the port to both adjoining nodes. Ties go to the edge whose first
        // node id is smaller, keeping assignment deterministic.
        let mut best: Option<(f64, usize)> = None;
        for (i, edge) in self.edges.iter().enumerate() {
            let d = point_to_segment_distance(
                x,
                y,
                edge.segment.0.x,
                edge.segment.0.y,
                edge.segment.1.x,
                edge.segment.1.y,
            );
            let better = match best {
                None => true,
                Some((bd, bi)) => {
                    d < bd
                        || (d == bd && self.edges[i].node_ids.0 < self.edges[bi].node_ids.0)
                }
            };
            if better {
                best = Some((d, i));
            }
        }

        match best {
            Some((d, i)) if d <= self.tolerance => {
                let edge = self.edges[i].clone();
                let (px, py) = closest_point_on_segment(
                    x,
                    y,
                    edge.segment.0.x,
                    edge.segment.0.y,
                    edge.segment.1.x,
                    edge.segment.1.y,
                );
                self.add_port(edge.node_ids.0, connection_name, px, py);
                self.add_port(edge.node_ids.1, connection_name, px, py);
            }
            _ => {
                self.state.mark_failed(format!(
                    "no mesh segment within tolerance of terminal ({x}, {y}) of connection {connection_name:?}"
                ));
            }
        }
    }
}

impl Solver for CapacitySegmentToPointSolver {
    fn state(&self) -> &SolverState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SolverState {
        &mut self.state
    }

    /// One terminal point per step.
    fn step_impl(&mut self) {
        let (name, x, y) = match self.pending.pop() {
            Some(terminal) => terminal,
            None => {
                self.state.mark_solved();
                return;
            }
        };
        self.assign_terminal(&name, x, y);
        if self.pending.is_empty() && !self.failed() {
            self.state.mark_solved();
        }
    }

    fn visualize(&self) -> GraphicsObject {
        let mut graphics = GraphicsObject::default();
        for ports in self.assignments.values() {
            for port in ports {
                graphics
                    .points
                    .push((port.x, port.y, port.connection_name.clone()));
            }
        }
        graphics
    }
}
