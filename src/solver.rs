//! Shared step/solve contract for all pipeline solvers.

use pyo3::prelude::*;

/// Default iteration budget for mesh-level solvers.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100_000;

/// Terminal-state bookkeeping shared by every solver.
///
/// `solved` and `failed` are one-way latches: once either is set the solver
/// never returns to a running state and further stepping is a no-op.
#[derive(Clone, Debug)]
pub struct SolverState {
    pub solved: bool,
    pub failed: bool,
    pub error: Option<String>,
    pub iterations: u32,
    pub max_iterations: u32,
}

impl SolverState {
    pub fn new(max_iterations: u32) -> Self {
        Self {
            solved: false,
            failed: false,
            error: None,
            iterations: 0,
            max_iterations,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.solved || self.failed
    }

    pub fn mark_solved(&mut self) {
        if !self.is_terminal() {
            self.solved = true;
        }
    }

    pub fn mark_failed(&mut self, message: impl Into<String>) {
        if !self.is_terminal() {
            self.failed = true;
            self.error = Some(message.into());
        }
    }
}

/// Debug-renderable snapshot of a solver's current state.
///
/// Consumed by external visualization harnesses only; producing one must
/// never fail, so a solver with nothing to show returns the default (empty)
/// snapshot.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct GraphicsObject {
    /// Polylines: point sequence plus stroke identifier.
    #[pyo3(get)]
    pub lines: Vec<(Vec<(f64, f64)>, String)>,
    /// Point markers: (x, y, stroke).
    #[pyo3(get)]
    pub points: Vec<(f64, f64, String)>,
    /// Rectangles: (center_x, center_y, width, height, stroke).
    #[pyo3(get)]
    pub rects: Vec<(f64, f64, f64, f64, String)>,
    /// Circles: (center_x, center_y, radius, stroke).
    #[pyo3(get)]
    pub circles: Vec<(f64, f64, f64, String)>,
}

#[pymethods]
impl GraphicsObject {
    fn __repr__(&self) -> String {
        format!(
            "GraphicsObject(lines={}, points={}, rects={}, circles={})",
            self.lines.len(),
            self.points.len(),
            self.rects.len(),
            self.circles.len()
        )
    }
}

/// Common contract for all pipeline solvers.
///
/// Concrete solvers implement `step_impl` (one bounded unit of work) and hold
/// a `SolverState`; stepping, budget enforcement, and terminal latching live
/// here so the behavior is identical across the hierarchy.
pub trait Solver {
    fn state(&self) -> &SolverState;
    fn state_mut(&mut self) -> &mut SolverState;

    /// One unit of incremental work. Never called once terminal.
    fn step_impl(&mut self);

    /// Perform one unit of work; no-op if already terminal. The iteration
    /// budget latches Failed here rather than in `solve()`, so a solver
    /// driven one `step()` at a time by a parent gets the same fail-safe.
    fn step(&mut self) {
        if self.state().is_terminal() {
            return;
        }
        if self.state().iterations >= self.state().max_iterations {
            self.state_mut().mark_failed("max iterations exceeded");
            return;
        }
        self.state_mut().iterations += 1;
        self.step_impl();
    }

    /// Step until terminal.
    fn solve(&mut self) {
        while !self.state().is_terminal() {
            self.step();
        }
    }

    fn solved(&self) -> bool {
        self.state().solved
    }

    fn failed(&self) -> bool {
        self.state().failed
    }

    fn error(&self) -> Option<&str> {
        self.state().error.as_deref()
    }

    fn iterations(&self) -> u32 {
        self.state().iterations
    }

    fn visualize(&self) -> GraphicsObject {
        GraphicsObject::default()
    }
}
