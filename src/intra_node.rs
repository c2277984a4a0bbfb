//! Intra-node route solver: routes every connection inside one mesh node.
//!
//! Port points are grouped by connection name and expanded into point pairs;
//! each pair is handed to a fine A* pathfinder. Pairs are routed sequentially
//! and every solved route becomes an obstacle for the routes that follow, so
//! later traces keep clearance from earlier ones.

use std::collections::VecDeque;

use crate::geometry::distance;
use crate::high_density::{HighDensityOverrides, SingleHighDensityRouteSolver};
use crate::solver::{GraphicsObject, Solver, SolverState, DEFAULT_MAX_ITERATIONS};
use crate::types::{CapacityMeshNode, HighDensityRoute, NodeWithPortPoints, PortPoint, RoutePoint};

pub struct SingleIntraNodeRouteSolver {
    state: SolverState,
    node: CapacityMeshNode,
    port_points: Vec<PortPoint>,
    pending: VecDeque<(String, RoutePoint, RoutePoint)>,
    active: Option<SingleHighDensityRouteSolver>,
    pub solved_routes: Vec<HighDensityRoute>,
}

impl SingleIntraNodeRouteSolver {
    pub fn new(node_with_port_points: NodeWithPortPoints) -> Self {
        let NodeWithPortPoints { node, port_points } = node_with_port_points;

        // Group ports by connection name in first-seen order so pair
        // generation (and therefore routing order) is deterministic.
        let mut groups: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
        for port in &port_points {
            match groups.iter_mut().find(|(name, _)| *name == port.connection_name) {
                Some((_, points)) => points.push((port.x, port.y)),
                None => groups.push((port.connection_name.clone(), vec![(port.x, port.y)])),
            }
        }

        // The first port anchors its connection; every further port pairs
        // with the nearest port of the same connection placed before it.
        let mut pending = VecDeque::new();
        for (name, points) in &groups {
            if points.len() < 2 {
                continue;
            }
            let mut placed = vec![points[0]];
            for &(x, y) in &points[1..] {
                let mut nearest = placed[0];
                let mut nearest_distance = distance(x, y, nearest.0, nearest.1);
                for &candidate in &placed[1..] {
                    let d = distance(x, y, candidate.0, candidate.1);
                    if d < nearest_distance {
                        nearest = candidate;
                        nearest_distance = d;
                    }
                }
                pending.push_back((
                    name.clone(),
                    RoutePoint::new(nearest.0, nearest.1, 0),
                    RoutePoint::new(x, y, 0),
                ));
                placed.push((x, y));
            }
        }

        Self {
            state: SolverState::new(DEFAULT_MAX_ITERATIONS),
            node,
            port_points,
            pending,
            active: None,
            solved_routes: Vec::new(),
        }
    }

    pub fn node(&self) -> &CapacityMeshNode {
        &self.node
    }

    /// The fine pathfinder currently being stepped, if any. A failed child is
    /// retained here for inspection.
    pub fn active_solver(&self) -> Option<&SingleHighDensityRouteSolver> {
        self.active.as_ref()
    }
}

impl Solver for SingleIntraNodeRouteSolver {
    fn state(&self) -> &SolverState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SolverState {
        &mut self.state
    }

    fn step_impl(&mut self) {
        if self.active.is_none() {
            let (name, a, b) = match self.pending.pop_front() {
                Some(pair) => pair,
                None => {
                    self.state.mark_solved();
                    return;
                }
            };
            self.active = Some(SingleHighDensityRouteSolver::new(
                name,
                a,
                b,
                self.solved_routes.clone(),
                HighDensityOverrides {
                    layer_count: Some(self.node.layers.len().max(1)),
                    ..HighDensityOverrides::default()
                },
            ));
        }

        let child = match self.active.as_mut() {
            Some(child) => child,
            None => return,
        };
        child.step();

        if child.failed() {
            let message = format!(
                "routing failed for connection {:?} in node {}: {}",
                child.connection_name(),
                self.node.id,
                child.error().unwrap_or("unknown failure")
            );
            self.state.mark_failed(message);
            return;
        }
        if child.solved() {
            if let Some(route) = self
                .active
                .take()
                .and_then(SingleHighDensityRouteSolver::into_solved_route)
            {
                self.solved_routes.push(route);
            }
            if self.pending.is_empty() {
                self.state.mark_solved();
            }
        }
    }

    fn visualize(&self) -> GraphicsObject {
        let mut graphics = GraphicsObject::default();
        graphics.rects.push((
            self.node.center.x,
            self.node.center.y,
            self.node.width,
            self.node.height,
            "gray".to_string(),
        ));
        for port in &self.port_points {
            graphics
                .points
                .push((port.x, port.y, port.connection_name.clone()));
        }
        for route in &self.solved_routes {
            graphics.lines.push((
                route.route.iter().map(|p| (p.x, p.y)).collect(),
                "green".to_string(),
            ));
            for via in &route.vias {
                graphics
                    .circles
                    .push((via.x, via.y, route.via_diameter / 2.0, "green".to_string()));
            }
        }
        graphics
    }
}
