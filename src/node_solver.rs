//! Capacity mesh node solver: recursive spatial subdivision of the board.
//!
//! Splits the routing region into quadtree nodes sized to obstacle density:
//! obstacle-free regions become large finished leaves, congested regions are
//! subdivided until the depth limit, at which point they remain as unfinished
//! leaves for the later stages to route around or through.

use std::collections::VecDeque;

use crate::geometry::rects_overlap;
use crate::solver::{GraphicsObject, Solver, SolverState, DEFAULT_MAX_ITERATIONS};
use crate::types::{Bounds, CapacityMeshNode, Obstacle, Point};

/// Maximum quadtree depth; obstacle-overlapping nodes at this depth stay
/// unfinished instead of subdividing further.
const MAX_DEPTH: u32 = 6;

pub struct CapacityMeshNodeSolver {
    state: SolverState,
    obstacles: Vec<Obstacle>,
    min_trace_width: f64,
    queue: VecDeque<(CapacityMeshNode, u32)>,
    next_node_id: u32,
    pub finished_nodes: Vec<CapacityMeshNode>,
    pub unfinished_nodes: Vec<CapacityMeshNode>,
}

impl CapacityMeshNodeSolver {
    pub fn new(
        bounds: Bounds,
        obstacles: Vec<Obstacle>,
        layer_count: usize,
        min_trace_width: f64,
    ) -> Self {
        let mut solver = Self {
            state: SolverState::new(DEFAULT_MAX_ITERATIONS),
            obstacles,
            min_trace_width,
            queue: VecDeque::new(),
            next_node_id: 0,
            finished_nodes: Vec::new(),
            unfinished_nodes: Vec::new(),
        };
        // Layer indices are u8; counts beyond 255 are capped.
        let root = solver.make_node(
            bounds.center(),
            bounds.width(),
            bounds.height(),
            (0..layer_count.min(255) as u8).collect(),
        );
        solver.queue.push_back((root, 0));
        solver
    }

    /// Finished and unfinished leaves combined, in creation order. This is
    /// the node set consumed by the edge solver.
    pub fn all_nodes(&self) -> Vec<CapacityMeshNode> {
        let mut nodes: Vec<CapacityMeshNode> = self
            .finished_nodes
            .iter()
            .chain(self.unfinished_nodes.iter())
            .cloned()
            .collect();
        nodes.sort_by_key(|n| n.id);
        nodes
    }

    fn make_node(&mut self, center: Point, width: f64, height: f64, layers: Vec<u8>) -> CapacityMeshNode {
        let id = self.next_node_id;
        self.next_node_id += 1;
        CapacityMeshNode {
            id,
            center,
            width,
            height,
            layers,
        }
    }

    fn overlaps_obstacle(&self, node: &CapacityMeshNode) -> bool {
        self.obstacles.iter().any(|obstacle| {
            obstacle.occupies_any_layer(&node.layers)
                && rects_overlap(
                    node.min_x(),
                    node.min_y(),
                    node.max_x(),
                    node.max_y(),
                    obstacle.min_x(),
                    obstacle.min_y(),
                    obstacle.max_x(),
                    obstacle.max_y(),
                    0.0,
                )
        })
    }

    /// A node may be split only while its children stay usefully larger than
    /// the minimum trace width.
    fn can_subdivide(&self, node: &CapacityMeshNode, depth: u32) -> bool {
        depth < MAX_DEPTH
            && node.width / 2.0 >= self.min_trace_width * 2.0
            && node.height / 2.0 >= self.min_trace_width * 2.0
    }

    fn subdivide(&mut self, node: &CapacityMeshNode, depth: u32) {
        let half_w = node.width / 2.0;
        let half_h = node.height / 2.0;
        let offsets = [(-0.25, -0.25), (0.25, -0.25), (-0.25, 0.25), (0.25, 0.25)];
        for (ox, oy) in offsets {
            let child = self.make_node(
                Point::new(
                    node.center.x + ox * node.width,
                    node.center.y + oy * node.height,
                ),
                half_w,
                half_h,
                node.layers.clone(),
            );
            self.queue.push_back((child, depth + 1));
        }
    }
}

impl Solver for CapacityMeshNodeSolver {
    fn state(&self) -> &SolverState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SolverState {
        &mut self.state
    }

    fn step_impl(&mut self) {
        let (node, depth) = match self.queue.pop_front() {
            Some(pending) => pending,
            None => {
                self.state.mark_solved();
                return;
            }
        };

        if !self.overlaps_obstacle(&node) {
            self.finished_nodes.push(node);
        } else if self.can_subdivide(&node, depth) {
            self.subdivide(&node, depth);
        } else {
            self.unfinished_nodes.push(node);
        }

        if self.queue.is_empty() {
            self.state.mark_solved();
        }
    }

    fn visualize(&self) -> GraphicsObject {
        let mut graphics = GraphicsObject::default();
        for node in &self.finished_nodes {
            graphics.rects.push((
                node.center.x,
                node.center.y,
                node.width,
                node.height,
                "green".to_string(),
            ));
        }
        for node in &self.unfinished_nodes {
            graphics.rects.push((
                node.center.x,
                node.center.y,
                node.width,
                node.height,
                "red".to_string(),
            ));
        }
        graphics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObstacleKind;

    fn bounds_100() -> Bounds {
        Bounds {
            min_x: 0.0,
            max_x: 100.0,
            min_y: 0.0,
            max_y: 100.0,
        }
    }

    fn rect_obstacle(cx: f64, cy: f64, w: f64, h: f64) -> Obstacle {
        Obstacle {
            center: Point::new(cx, cy),
            width: w,
            height: h,
            kind: ObstacleKind::Rect,
            layers: vec![0, 1],
            connected_to: Vec::new(),
        }
    }

    #[test]
    fn empty_board_yields_single_finished_node() {
        let mut solver = CapacityMeshNodeSolver::new(bounds_100(), Vec::new(), 2, 0.15);
        solver.solve();
        assert!(solver.solved());
        assert_eq!(solver.finished_nodes.len(), 1);
        assert!(solver.unfinished_nodes.is_empty());
        let root = &solver.finished_nodes[0];
        assert_eq!(root.width, 100.0);
        assert_eq!(root.layers, vec![0, 1]);
    }

    #[test]
    fn obstacle_drives_subdivision() {
        let obstacle = rect_obstacle(50.0, 50.0, 20.0, 10.0);
        let mut solver = CapacityMeshNodeSolver::new(bounds_100(), vec![obstacle], 2, 0.15);
        solver.solve();
        assert!(solver.solved());
        assert!(solver.finished_nodes.len() > 1);

        // No finished node overlaps the obstacle interior.
        for node in &solver.finished_nodes {
            assert!(
                !rects_overlap(
                    node.min_x(), node.min_y(), node.max_x(), node.max_y(),
                    40.0, 45.0, 60.0, 55.0,
                    0.0,
                ),
                "finished node {} overlaps the obstacle",
                node.id
            );
        }
        // Every unfinished node does overlap it.
        assert!(!solver.unfinished_nodes.is_empty());
        for node in &solver.unfinished_nodes {
            assert!(rects_overlap(
                node.min_x(), node.min_y(), node.max_x(), node.max_y(),
                40.0, 45.0, 60.0, 55.0,
                0.0,
            ));
        }
    }

    #[test]
    fn leaves_tile_the_board() {
        let obstacle = rect_obstacle(25.0, 25.0, 10.0, 10.0);
        let mut solver = CapacityMeshNodeSolver::new(bounds_100(), vec![obstacle], 2, 0.15);
        solver.solve();
        let total_area: f64 = solver
            .all_nodes()
            .iter()
            .map(|n| n.width * n.height)
            .sum();
        assert!((total_area - 100.0 * 100.0).abs() < 1e-6);
    }

    #[test]
    fn layer_count_is_capped_at_255() {
        let mut solver = CapacityMeshNodeSolver::new(bounds_100(), Vec::new(), 300, 0.15);
        solver.solve();
        assert_eq!(solver.finished_nodes[0].layers.len(), 255);
    }

    #[test]
    fn obstacle_on_unshared_layer_is_ignored() {
        let mut obstacle = rect_obstacle(50.0, 50.0, 20.0, 10.0);
        obstacle.layers = vec![7];
        let mut solver = CapacityMeshNodeSolver::new(bounds_100(), vec![obstacle], 2, 0.15);
        solver.solve();
        assert_eq!(solver.finished_nodes.len(), 1);
    }

    #[test]
    fn node_ids_are_stable_across_runs() {
        let run = || {
            let obstacle = rect_obstacle(50.0, 50.0, 20.0, 10.0);
            let mut solver = CapacityMeshNodeSolver::new(bounds_100(), vec![obstacle], 2, 0.15);
            solver.solve();
            solver
                .all_nodes()
                .iter()
                .map(|n| (n.id, n.center.x, n.center.y))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
