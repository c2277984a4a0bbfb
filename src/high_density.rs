//! Fine-grained intra-node pathfinder: A* over an adaptive (x, y, layer) grid.
//!
//! Produces one route between two terminal points, keeping clearance from the
//! routes already placed in the node and paying a penalty for layer changes.

use pyo3::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::BinaryHeap;

use crate::geometry::{distance, point_to_segment_distance};
use crate::solver::{GraphicsObject, Solver, SolverState};
use crate::types::{pack_cell, scale_cost, HighDensityRoute, OpenEntry, RoutePoint, Via};

pub const DEFAULT_VIA_DIAMETER: f64 = 0.6;
pub const DEFAULT_TRACE_THICKNESS: f64 = 0.15;
pub const DEFAULT_OBSTACLE_MARGIN: f64 = 0.1;
pub const DEFAULT_LAYER_COUNT: usize = 2;

/// Starting cell size; doubled until the search space is tractable.
const INITIAL_GRID_SIZE: f64 = 0.05;

const MAX_ITERATIONS: u32 = 1000;

/// Optional per-route overrides for the pathfinder defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct HighDensityOverrides {
    pub via_diameter: Option<f64>,
    pub trace_thickness: Option<f64>,
    pub obstacle_margin: Option<f64>,
    pub layer_count: Option<usize>,
}

/// Search node in the parent-index arena. Parents form a tree rooted at the
/// start point, so path reconstruction is a parent walk plus a reverse.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    x: f64,
    y: f64,
    layer: u8,
    g: f64,
    parent: Option<usize>,
}

/// A* route solver for a single connection between two terminal points.
#[pyclass]
pub struct SingleHighDensityRouteSolver {
    state: SolverState,
    connection_name: String,
    obstacle_routes: Vec<HighDensityRoute>,
    a: RoutePoint,
    b: RoutePoint,
    via_diameter: f64,
    trace_thickness: f64,
    obstacle_margin: f64,
    layer_count: usize,
    grid_size: f64,
    straight_line_distance: f64,
    via_penalty_distance: f64,
    nodes: Vec<SearchNode>,
    frontier: BinaryHeap<OpenEntry>,
    explored: FxHashSet<u64>,
    counter: u32,
    solved_route: Option<HighDensityRoute>,
}

impl SingleHighDensityRouteSolver {
    pub fn new(
        connection_name: impl Into<String>,
        a: RoutePoint,
        b: RoutePoint,
        obstacle_routes: Vec<HighDensityRoute>,
        overrides: HighDensityOverrides,
    ) -> Self {
        let via_diameter = overrides.via_diameter.unwrap_or(DEFAULT_VIA_DIAMETER);
        let trace_thickness = overrides.trace_thickness.unwrap_or(DEFAULT_TRACE_THICKNESS);
        let obstacle_margin = overrides.obstacle_margin.unwrap_or(DEFAULT_OBSTACLE_MARGIN);
        // Layer indices are u8; cap the count so layer arithmetic stays in range.
        let layer_count = overrides
            .layer_count
            .unwrap_or(DEFAULT_LAYER_COUNT)
            .clamp(1, 255);

        let straight_line_distance = distance(a.x, a.y, b.x, b.y);
        let grid_size = Self::fit_grid_size(a, b, &obstacle_routes, via_diameter);
        let via_penalty_distance = grid_size + straight_line_distance / 2.0;

        let mut solver = Self {
            state: SolverState::new(MAX_ITERATIONS),
            connection_name: connection_name.into(),
            obstacle_routes,
            a,
            b,
            via_diameter,
            trace_thickness,
            obstacle_margin,
            layer_count,
            grid_size,
            straight_line_distance,
            via_penalty_distance,
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            explored: FxHashSet::default(),
            counter: 0,
            solved_route: None,
        };

        let start = SearchNode {
            x: a.x,
            y: a.y,
            layer: a.layer,
            g: 0.0,
            parent: None,
        };
        let h = solver.heuristic(start.x, start.y, start.layer);
        solver.push_node(start, h);
        solver
    }

    /// Pick the cell size: start small, double until the cell count over the
    /// bounding box of A, B, and all obstacle points drops below a bound
    /// proportional to the number of obstacle routes. Many obstacle routes
    /// warrant a coarser grid; few warrant full resolution.
    fn fit_grid_size(
        a: RoutePoint,
        b: RoutePoint,
        obstacle_routes: &[HighDensityRoute],
        via_diameter: f64,
    ) -> f64 {
        let mut min_x = a.x.min(b.x);
        let mut max_x = a.x.max(b.x);
        let mut min_y = a.y.min(b.y);
        let mut max_y = a.y.max(b.y);
        for route in obstacle_routes {
            for point in &route.route {
                min_x = min_x.min(point.x);
                max_x = max_x.max(point.x);
                min_y = min_y.min(point.y);
                max_y = max_y.max(point.y);
            }
        }
        let width = max_x - min_x;
        let height = max_y - min_y;

        let mut grid_size = INITIAL_GRID_SIZE;
        let best_row_or_column_count = ((via_diameter / grid_size)
            * obstacle_routes.len() as f64)
            .ceil()
            .max(1.0);
        let max_cells = best_row_or_column_count * best_row_or_column_count;
        while (width / grid_size) * (height / grid_size) > max_cells {
            grid_size *= 2.0;
        }
        grid_size
    }

    pub fn connection_name(&self) -> &str {
        &self.connection_name
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn straight_line_distance(&self) -> f64 {
        self.straight_line_distance
    }

    /// Cost charged per layer change; also the heuristic's per-layer term.
    pub fn via_penalty_distance(&self) -> f64 {
        self.via_penalty_distance
    }

    pub fn solved_route(&self) -> Option<&HighDensityRoute> {
        self.solved_route.as_ref()
    }

    pub fn into_solved_route(self) -> Option<HighDensityRoute> {
        self.solved_route
    }

    /// Quantized visited-set key: cell indices relative to the start point,
    /// packed into a u64. Integer cell indices keep the key stable across
    /// platforms, unlike formatted floating-point coordinates.
    #[inline]
    fn cell_key(&self, x: f64, y: f64, layer: u8) -> u64 {
        let cx = ((x - self.a.x) / self.grid_size).round() as i32;
        let cy = ((y - self.a.y) / self.grid_size).round() as i32;
        pack_cell(cx, cy, layer)
    }

    /// Heuristic: remaining straight-line distance plus one via penalty per
    /// layer still separating us from B. Admissible because layer changes in
    /// `g` are charged exactly `via_penalty_distance` each.
    fn heuristic(&self, x: f64, y: f64, layer: u8) -> f64 {
        distance(x, y, self.b.x, self.b.y)
            + (layer as i32 - self.b.layer as i32).abs() as f64 * self.via_penalty_distance
    }

    /// Is (x, y) on `layer` too close to a previously placed route or via?
    fn too_close_to_obstacle(&self, x: f64, y: f64, layer: u8, margin: f64) -> bool {
        for route in &self.obstacle_routes {
            for (p, q) in route.same_layer_segments() {
                if p.layer == layer
                    && point_to_segment_distance(x, y, p.x, p.y, q.x, q.y)
                        < self.trace_thickness + margin
                {
                    return true;
                }
            }
            for via in &route.vias {
                if distance(x, y, via.x, via.y) < self.via_diameter + margin {
                    return true;
                }
            }
        }
        false
    }

    fn push_node(&mut self, node: SearchNode, h: f64) {
        let f = node.g + h;
        let index = self.nodes.len();
        self.nodes.push(node);
        self.frontier.push(OpenEntry {
            f_scaled: scale_cost(f),
            counter: self.counter,
            index,
        });
        self.counter += 1;
    }

    fn expand(&mut self, index: usize) {
        let current = self.nodes[index];

        // 8 grid-adjacent cells on the same layer
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = current.x + dx as f64 * self.grid_size;
                let ny = current.y + dy as f64 * self.grid_size;

                if self.explored.contains(&self.cell_key(nx, ny, current.layer)) {
                    continue;
                }
                if self.too_close_to_obstacle(nx, ny, current.layer, self.obstacle_margin) {
                    continue;
                }

                let g = current.g + distance(current.x, current.y, nx, ny);
                let h = self.heuristic(nx, ny, current.layer);
                self.push_node(
                    SearchNode {
                        x: nx,
                        y: ny,
                        layer: current.layer,
                        g,
                        parent: Some(index),
                    },
                    h,
                );
            }
        }

        // One via neighbor at the same (x, y) on the next layer in sequence.
        // Clearance uses the expanded via margin.
        if self.layer_count > 1 {
            let via_layer = (current.layer + 1) % self.layer_count as u8;
            let key = self.cell_key(current.x, current.y, via_layer);
            if !self.explored.contains(&key)
                && !self.too_close_to_obstacle(
                    current.x,
                    current.y,
                    via_layer,
                    self.via_diameter + self.obstacle_margin,
                )
            {
                let g = current.g + self.via_penalty_distance;
                let h = self.heuristic(current.x, current.y, via_layer);
                self.push_node(
                    SearchNode {
                        x: current.x,
                        y: current.y,
                        layer: via_layer,
                        g,
                        parent: Some(index),
                    },
                    h,
                );
            }
        }
    }

    fn set_solved_route(&mut self, goal_index: usize) {
        let mut path = Vec::new();
        let mut cursor = Some(goal_index);
        while let Some(index) = cursor {
            let node = self.nodes[index];
            path.push(RoutePoint::new(node.x, node.y, node.layer));
            cursor = node.parent;
        }
        path.reverse();

        let mut vias = Vec::new();
        for pair in path.windows(2) {
            if pair[0].layer != pair[1].layer {
                vias.push(Via {
                    x: pair[0].x,
                    y: pair[0].y,
                });
            }
        }

        self.solved_route = Some(HighDensityRoute {
            connection_name: self.connection_name.clone(),
            trace_thickness: self.trace_thickness,
            via_diameter: self.via_diameter,
            route: path,
            vias,
        });
    }
}

impl Solver for SingleHighDensityRouteSolver {
    fn state(&self) -> &SolverState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SolverState {
        &mut self.state
    }

    fn step_impl(&mut self) {
        let entry = match self.frontier.pop() {
            Some(entry) => entry,
            None => {
                self.state.mark_failed("no candidates remaining");
                return;
            }
        };

        let current = self.nodes[entry.index];
        let key = self.cell_key(current.x, current.y, current.layer);
        if !self.explored.insert(key) {
            // Stale frontier entry for an already explored cell.
            return;
        }

        if distance(current.x, current.y, self.b.x, self.b.y) <= self.grid_size {
            self.set_solved_route(entry.index);
            self.state.mark_solved();
            return;
        }

        self.expand(entry.index);
    }

    fn visualize(&self) -> GraphicsObject {
        let mut graphics = GraphicsObject::default();
        graphics.lines.push((
            vec![(self.a.x, self.a.y), (self.b.x, self.b.y)],
            "red".to_string(),
        ));
        for route in &self.obstacle_routes {
            graphics.lines.push((
                route.route.iter().map(|p| (p.x, p.y)).collect(),
                "blue".to_string(),
            ));
        }
        if let Some(route) = &self.solved_route {
            graphics.lines.push((
                route.route.iter().map(|p| (p.x, p.y)).collect(),
                "green".to_string(),
            ));
            for via in &route.vias {
                graphics
                    .circles
                    .push((via.x, via.y, self.via_diameter / 2.0, "green".to_string()));
            }
        }
        graphics
    }
}

#[pymethods]
impl SingleHighDensityRouteSolver {
    #[new]
    #[pyo3(signature = (connection_name, a, b, obstacle_routes=None, via_diameter=None, trace_thickness=None, obstacle_margin=None, layer_count=None))]
    #[allow(clippy::too_many_arguments)]
    fn py_new(
        connection_name: String,
        a: (f64, f64, u8),
        b: (f64, f64, u8),
        obstacle_routes: Option<Vec<(String, Vec<(f64, f64, u8)>, Vec<(f64, f64)>)>>,
        via_diameter: Option<f64>,
        trace_thickness: Option<f64>,
        obstacle_margin: Option<f64>,
        layer_count: Option<usize>,
    ) -> Self {
        let routes = obstacle_routes
            .unwrap_or_default()
            .into_iter()
            .map(|(name, route, vias)| HighDensityRoute {
                connection_name: name,
                trace_thickness: trace_thickness.unwrap_or(DEFAULT_TRACE_THICKNESS),
                via_diameter: via_diameter.unwrap_or(DEFAULT_VIA_DIAMETER),
                route: route
                    .into_iter()
                    .map(|(x, y, layer)| RoutePoint::new(x, y, layer))
                    .collect(),
                vias: vias.into_iter().map(|(x, y)| Via { x, y }).collect(),
            })
            .collect();
        Self::new(
            connection_name,
            RoutePoint::new(a.0, a.1, a.2),
            RoutePoint::new(b.0, b.1, b.2),
            routes,
            HighDensityOverrides {
                via_diameter,
                trace_thickness,
                obstacle_margin,
                layer_count,
            },
        )
    }

    #[pyo3(name = "step")]
    fn py_step(&mut self) {
        Solver::step(self);
    }

    #[pyo3(name = "solve")]
    fn py_solve(&mut self) {
        Solver::solve(self);
    }

    #[getter(solved)]
    fn py_solved(&self) -> bool {
        Solver::solved(self)
    }

    #[getter(failed)]
    fn py_failed(&self) -> bool {
        Solver::failed(self)
    }

    #[getter(error)]
    fn py_error(&self) -> Option<String> {
        Solver::error(self).map(str::to_string)
    }

    #[getter(iterations)]
    fn py_iterations(&self) -> u32 {
        Solver::iterations(self)
    }

    #[getter(grid_size)]
    fn py_grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Solved route as (points, vias), or None if not solved.
    fn get_route(&self) -> Option<(Vec<(f64, f64, u8)>, Vec<(f64, f64)>)> {
        self.solved_route.as_ref().map(|route| {
            (
                route.route.iter().map(|p| (p.x, p.y, p.layer)).collect(),
                route.vias.iter().map(|v| (v.x, v.y)).collect(),
            )
        })
    }

    #[pyo3(name = "visualize")]
    fn py_visualize(&self) -> GraphicsObject {
        Solver::visualize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve_between(
        a: RoutePoint,
        b: RoutePoint,
        obstacles: Vec<HighDensityRoute>,
    ) -> SingleHighDensityRouteSolver {
        let mut solver = SingleHighDensityRouteSolver::new(
            "conn",
            a,
            b,
            obstacles,
            HighDensityOverrides::default(),
        );
        solver.solve();
        solver
    }

    fn path_length(route: &HighDensityRoute) -> f64 {
        route
            .route
            .windows(2)
            .map(|w| distance(w[0].x, w[0].y, w[1].x, w[1].y))
            .sum()
    }

    #[test]
    fn straight_shot_routes_without_vias() {
        // Scenario: A=(0,0,layer0), B=(10,0,layer0), no obstacles.
        let solver = solve_between(
            RoutePoint::new(0.0, 0.0, 0),
            RoutePoint::new(10.0, 0.0, 0),
            Vec::new(),
        );
        assert!(solver.solved());
        let route = solver.solved_route().unwrap();
        assert!(route.vias.is_empty());
        let length = path_length(route);
        assert!(
            (length - 10.0).abs() <= solver.grid_size() + 1e-9,
            "path length {length} not within one grid cell of 10"
        );
    }

    /// Wall on layer 0 crossing the A-B line, long enough that going around
    /// costs more than a via.
    fn layer0_wall() -> HighDensityRoute {
        HighDensityRoute {
            connection_name: "wall".to_string(),
            trace_thickness: DEFAULT_TRACE_THICKNESS,
            via_diameter: DEFAULT_VIA_DIAMETER,
            route: vec![
                RoutePoint::new(1.0, -3.0, 0),
                RoutePoint::new(1.0, 3.0, 0),
            ],
            vias: Vec::new(),
        }
    }

    #[test]
    fn blocked_layer_forces_via() {
        let solver = solve_between(
            RoutePoint::new(0.0, 0.0, 0),
            RoutePoint::new(2.0, 0.0, 0),
            vec![layer0_wall()],
        );
        assert!(solver.solved());
        let route = solver.solved_route().unwrap();
        assert_eq!(route.vias.len(), 1);
        assert!(route.route.iter().any(|p| p.layer == 1));
    }

    #[test]
    fn vias_match_layer_changes_exactly() {
        let solver = solve_between(
            RoutePoint::new(0.0, 0.0, 0),
            RoutePoint::new(2.0, 0.0, 0),
            vec![layer0_wall()],
        );
        assert!(solver.solved());
        let route = solver.solved_route().unwrap();
        let layer_changes = route
            .route
            .windows(2)
            .filter(|w| w[0].layer != w[1].layer)
            .count();
        assert_eq!(route.vias.len(), layer_changes);
        for (via, pair) in route
            .vias
            .iter()
            .zip(route.route.windows(2).filter(|w| w[0].layer != w[1].layer))
        {
            assert_eq!((via.x, via.y), (pair[0].x, pair[0].y));
        }
    }

    #[test]
    fn enclosed_endpoints_exhaust_the_frontier() {
        // Scenario: A boxed in by routes on both layers with no via headroom.
        let mut obstacles = Vec::new();
        for layer in 0..2u8 {
            obstacles.push(HighDensityRoute {
                connection_name: format!("box{layer}"),
                trace_thickness: DEFAULT_TRACE_THICKNESS,
                via_diameter: DEFAULT_VIA_DIAMETER,
                route: vec![
                    RoutePoint::new(-0.3, -0.3, layer),
                    RoutePoint::new(0.3, -0.3, layer),
                    RoutePoint::new(0.3, 0.3, layer),
                    RoutePoint::new(-0.3, 0.3, layer),
                    RoutePoint::new(-0.3, -0.3, layer),
                ],
                vias: Vec::new(),
            });
        }
        let mut solver = SingleHighDensityRouteSolver::new(
            "conn",
            RoutePoint::new(0.0, 0.0, 0),
            RoutePoint::new(10.0, 0.0, 0),
            obstacles,
            HighDensityOverrides::default(),
        );
        solver.solve();
        assert!(solver.failed());
        assert!(solver.error().is_some_and(|e| !e.is_empty()));
        assert!(solver.solved_route().is_none());
    }

    #[test]
    fn budget_stops_unreachable_goal_when_stepped() {
        // B sealed inside a square of routes on both layers. The exterior
        // grid is unbounded, so the frontier never empties and only the
        // iteration budget can stop the search. Driven via step() the way a
        // parent solver drives it.
        let mut obstacles = Vec::new();
        for layer in 0..2u8 {
            obstacles.push(HighDensityRoute {
                connection_name: format!("seal{layer}"),
                trace_thickness: DEFAULT_TRACE_THICKNESS,
                via_diameter: DEFAULT_VIA_DIAMETER,
                route: vec![
                    RoutePoint::new(49.0, -1.0, layer),
                    RoutePoint::new(51.0, -1.0, layer),
                    RoutePoint::new(51.0, 1.0, layer),
                    RoutePoint::new(49.0, 1.0, layer),
                    RoutePoint::new(49.0, -1.0, layer),
                ],
                vias: Vec::new(),
            });
        }
        let mut solver = SingleHighDensityRouteSolver::new(
            "conn",
            RoutePoint::new(0.0, 0.0, 0),
            RoutePoint::new(50.0, 0.0, 0),
            obstacles,
            HighDensityOverrides::default(),
        );
        for _ in 0..5 * MAX_ITERATIONS {
            solver.step();
        }
        assert!(solver.failed());
        assert_eq!(solver.error(), Some("max iterations exceeded"));
        assert_eq!(solver.iterations(), MAX_ITERATIONS);
        assert!(solver.solved_route().is_none());
    }

    #[test]
    fn oversized_layer_count_is_clamped() {
        let mut solver = SingleHighDensityRouteSolver::new(
            "conn",
            RoutePoint::new(0.0, 0.0, 0),
            RoutePoint::new(10.0, 0.0, 0),
            Vec::new(),
            HighDensityOverrides {
                layer_count: Some(256),
                ..HighDensityOverrides::default()
            },
        );
        solver.solve();
        assert!(solver.solved());
    }

    #[test]
    fn grid_size_bound_holds_for_many_obstacle_routes() {
        // Scenario: 100x100 bounding box, 50 obstacle routes.
        let mut obstacles = Vec::new();
        for i in 0..50 {
            let y = i as f64 * 2.0;
            obstacles.push(HighDensityRoute {
                connection_name: format!("r{i}"),
                trace_thickness: DEFAULT_TRACE_THICKNESS,
                via_diameter: DEFAULT_VIA_DIAMETER,
                route: vec![
                    RoutePoint::new(0.0, y, 0),
                    RoutePoint::new(100.0, 100.0, 0),
                ],
                vias: Vec::new(),
            });
        }
        let solver = SingleHighDensityRouteSolver::new(
            "conn",
            RoutePoint::new(0.0, 0.0, 0),
            RoutePoint::new(100.0, 100.0, 0),
            obstacles,
            HighDensityOverrides::default(),
        );
        let grid_size = solver.grid_size();
        let cells = (100.0 / grid_size) * (100.0 / grid_size);
        let bound = (DEFAULT_VIA_DIAMETER / INITIAL_GRID_SIZE * 50.0).powi(2);
        assert!(
            cells <= bound,
            "cell count {cells} exceeds bound {bound} at grid size {grid_size}"
        );
    }

    #[test]
    fn zero_obstacle_grid_sizing_terminates() {
        // 2D bounding box with no obstacle routes: the cell-count bound
        // floors at one row/column instead of looping forever.
        let solver = SingleHighDensityRouteSolver::new(
            "conn",
            RoutePoint::new(0.0, 0.0, 0),
            RoutePoint::new(10.0, 10.0, 0),
            Vec::new(),
            HighDensityOverrides::default(),
        );
        assert!(solver.grid_size().is_finite());
        assert!(solver.grid_size() >= INITIAL_GRID_SIZE);
    }

    #[test]
    fn heuristic_is_admissible_along_solved_paths() {
        // h at every point of the solved path must not exceed the cost the
        // search actually pays from that point on. The search accepts any
        // cell within one grid step of B on any layer, so the tail is slack
        // by one grid step plus the vias the relaxed goal forgives.
        for obstacles in [Vec::new(), vec![layer0_wall()]] {
            let a = RoutePoint::new(0.0, 0.0, 0);
            let b = RoutePoint::new(2.0, 0.0, 0);
            let solver = solve_between(a, b, obstacles);
            assert!(solver.solved());
            let points = &solver.solved_route().unwrap().route;
            let last = points[points.len() - 1];
            let goal_slack = solver.grid_size()
                + (last.layer as i32 - b.layer as i32).abs() as f64
                    * solver.via_penalty_distance;

            for i in 0..points.len() {
                let mut remaining = 0.0;
                for w in points[i..].windows(2) {
                    remaining += if w[0].layer == w[1].layer {
                        distance(w[0].x, w[0].y, w[1].x, w[1].y)
                    } else {
                        solver.via_penalty_distance
                    };
                }
                let p = points[i];
                let h = solver.heuristic(p.x, p.y, p.layer);
                assert!(
                    h <= remaining + goal_slack + 1e-9,
                    "h {h} at point {i} overestimates remaining cost {remaining}"
                );
            }
        }
    }

    #[test]
    fn determinism_across_runs() {
        let run = || {
            let solver = solve_between(
                RoutePoint::new(0.0, 0.0, 0),
                RoutePoint::new(2.0, 0.0, 0),
                vec![layer0_wall()],
            );
            solver.solved_route().cloned()
        };
        let first = run();
        let second = run();
        let first = first.unwrap();
        let second = second.unwrap();
        assert_eq!(first.route, second.route);
        assert_eq!(first.vias, second.vias);
    }

    #[test]
    fn solve_is_idempotent_once_terminal() {
        let mut solver = SingleHighDensityRouteSolver::new(
            "conn",
            RoutePoint::new(0.0, 0.0, 0),
            RoutePoint::new(10.0, 0.0, 0),
            Vec::new(),
            HighDensityOverrides::default(),
        );
        solver.solve();
        assert!(solver.solved());
        let iterations = solver.iterations();
        let route = solver.solved_route().cloned().unwrap();
        solver.solve();
        solver.step();
        assert_eq!(solver.iterations(), iterations);
        assert_eq!(solver.solved_route().unwrap().route, route.route);
    }
}
