//! Pipeline orchestrator: subdivision, adjacency, terminal assignment, then
//! per-node routing, driven through one step/solve surface.
//!
//! A stage advances only when its solver reports Solved. A failing stage
//! fails the whole pipeline immediately; a failing intra-node solver is
//! recorded and its siblings keep routing, so one congested node cannot
//! discard the routes of every other node.

use pyo3::prelude::*;

use crate::board::Board;
use crate::edge_solver::CapacityMeshEdgeSolver;
use crate::intra_node::SingleIntraNodeRouteSolver;
use crate::node_solver::CapacityMeshNodeSolver;
use crate::segment_solver::CapacitySegmentToPointSolver;
use crate::solver::{GraphicsObject, Solver, SolverState, DEFAULT_MAX_ITERATIONS};
use crate::types::HighDensityRoute;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Nodes,
    Edges,
    Segments,
    Routing,
}

#[pyclass]
pub struct CapacityMeshSolver {
    state: SolverState,
    board: Board,
    stage: Stage,
    node_solver: CapacityMeshNodeSolver,
    edge_solver: Option<CapacityMeshEdgeSolver>,
    segment_solver: Option<CapacitySegmentToPointSolver>,
    route_solvers: Vec<SingleIntraNodeRouteSolver>,
    current_route_solver: usize,
    pub failed_solver_indices: Vec<usize>,
    /// Solved routes accumulated across all successfully routed nodes.
    pub routes: Vec<HighDensityRoute>,
}

impl CapacityMeshSolver {
    pub fn new(board: Board) -> Self {
        let node_solver = CapacityMeshNodeSolver::new(
            board.bounds,
            board.obstacles.clone(),
            board.layer_count,
            board.min_trace_width,
        );
        Self {
            state: SolverState::new(DEFAULT_MAX_ITERATIONS),
            board,
            stage: Stage::Nodes,
            node_solver,
            edge_solver: None,
            segment_solver: None,
            route_solvers: Vec::new(),
            current_route_solver: 0,
            failed_solver_indices: Vec::new(),
            routes: Vec::new(),
        }
    }

    pub fn stage_name(&self) -> &'static str {
        match self.stage {
            Stage::Nodes => "nodes",
            Stage::Edges => "edges",
            Stage::Segments => "segments",
            Stage::Routing => "routing",
        }
    }

    pub fn node_solver(&self) -> &CapacityMeshNodeSolver {
        &self.node_solver
    }

    pub fn edge_solver(&self) -> Option<&CapacityMeshEdgeSolver> {
        self.edge_solver.as_ref()
    }

    pub fn segment_solver(&self) -> Option<&CapacitySegmentToPointSolver> {
        self.segment_solver.as_ref()
    }

    /// The solver driving the current stage. A failing stage's solver stays
    /// reachable here after the pipeline fails.
    pub fn active_solver(&self) -> Option<&dyn Solver> {
        match self.stage {
            Stage::Nodes => Some(&self.node_solver),
            Stage::Edges => self.edge_solver.as_ref().map(|s| s as &dyn Solver),
            Stage::Segments => self.segment_solver.as_ref().map(|s| s as &dyn Solver),
            Stage::Routing => self
                .route_solvers
                .get(self.current_route_solver)
                .map(|s| s as &dyn Solver),
        }
    }

    /// Per-node route solvers, available once the routing stage starts.
    /// Failed solvers stay here alongside the solved ones.
    pub fn route_solvers(&self) -> &[SingleIntraNodeRouteSolver] {
        &self.route_solvers
    }

    fn step_nodes(&mut self) {
        self.node_solver.step();
        if self.node_solver.failed() {
            let cause = self.node_solver.error().unwrap_or("unknown failure");
            self.state
                .mark_failed(format!("node subdivision failed: {cause}"));
        } else if self.node_solver.solved() {
            self.edge_solver = Some(CapacityMeshEdgeSolver::new(self.node_solver.all_nodes()));
            self.stage = Stage::Edges;
        }
    }

    fn step_edges(&mut self) {
        let edge_solver = match self.edge_solver.as_mut() {
            Some(solver) => solver,
            None => return,
        };
        edge_solver.step();
        if edge_solver.failed() {
            let cause = edge_solver.error().unwrap_or("unknown failure").to_string();
            self.state
                .mark_failed(format!("mesh edge discovery failed: {cause}"));
        } else if edge_solver.solved() {
            let nodes = edge_solver.nodes().to_vec();
            let edges = edge_solver.edges.clone();
            self.segment_solver = Some(CapacitySegmentToPointSolver::new(
                nodes,
                edges,
                &self.board.connections,
            ));
            self.stage = Stage::Segments;
        }
    }

    fn step_segments(&mut self) {
        let segment_solver = match self.segment_solver.as_mut() {
            Some(solver) => solver,
            None => return,
        };
        segment_solver.step();
        if segment_solver.failed() {
            let cause = segment_solver
                .error()
                .unwrap_or("unknown failure")
                .to_string();
            self.state
                .mark_failed(format!("terminal assignment failed: {cause}"));
        } else if segment_solver.solved() {
            self.route_solvers = segment_solver
                .nodes_with_port_points()
                .into_iter()
                .map(SingleIntraNodeRouteSolver::new)
                .collect();
            self.current_route_solver = 0;
            self.stage = Stage::Routing;
        }
    }

    fn step_routing(&mut self) {
        if self.current_route_solver >= self.route_solvers.len() {
            self.finish_routing();
            return;
        }
        let index = self.current_route_solver;
        let solver = &mut self.route_solvers[index];
        solver.step();
        if solver.solved() {
            self.routes.append(&mut solver.solved_routes);
            self.current_route_solver += 1;
        } else if solver.failed() {
            // Keep the failed solver (and its partial routes) for inspection
            // and move on to the remaining nodes.
            self.failed_solver_indices.push(index);
            self.current_route_solver += 1;
        }
        if self.current_route_solver >= self.route_solvers.len() {
            self.finish_routing();
        }
    }

    fn finish_routing(&mut self) {
        if self.failed_solver_indices.is_empty() {
            self.state.mark_solved();
        } else {
            self.state.mark_failed(format!(
                "{} of {} intra-node solvers failed",
                self.failed_solver_indices.len(),
                self.route_solvers.len()
            ));
        }
    }
}

impl Solver for CapacityMeshSolver {
    fn state(&self) -> &SolverState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SolverState {
        &mut self.state
    }

    fn step_impl(&mut self) {
        match self.stage {
            Stage::Nodes => self.step_nodes(),
            Stage::Edges => self.step_edges(),
            Stage::Segments => self.step_segments(),
            Stage::Routing => self.step_routing(),
        }
    }

    /// Snapshot of the active stage, plus the routes solved so far.
    fn visualize(&self) -> GraphicsObject {
        let mut graphics = self
            .active_solver()
            .map(|solver| solver.visualize())
            .unwrap_or_default();
        for route in &self.routes {
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

#[pymethods]
impl CapacityMeshSolver {
    #[new]
    fn py_new(board: Board) -> Self {
        Self::new(board)
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

    #[getter(stage)]
    fn py_stage(&self) -> &'static str {
        self.stage_name()
    }

    #[getter(failed_node_count)]
    fn py_failed_node_count(&self) -> usize {
        self.failed_solver_indices.len()
    }

    /// Solved routes as (connection_name, points, vias) triples.
    fn get_routes(&self) -> Vec<(String, Vec<(f64, f64, u8)>, Vec<(f64, f64)>)> {
        self.routes
            .iter()
            .map(|route| {
                (
                    route.connection_name.clone(),
                    route.route.iter().map(|p| (p.x, p.y, p.layer)).collect(),
                    route.vias.iter().map(|v| (v.x, v.y)).collect(),
                )
            })
            .collect()
    }

    #[pyo3(name = "visualize")]
    fn py_visualize(&self) -> GraphicsObject {
        Solver::visualize(self)
    }

    fn __repr__(&self) -> String {
        format!(
            "CapacityMeshSolver(stage={}, solved={}, failed={}, routes={})",
            self.stage_name(),
            self.solved(),
            self.failed(),
            self.routes.len()
        )
    }
}
