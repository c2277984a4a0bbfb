//! Capacity-mesh PCB router - Rust implementation for speed.
//!
//! Routes point-to-point connections across a multi-layer board in four
//! cooperative stages: quadtree subdivision of the board into capacity mesh
//! nodes, adjacency discovery between nodes, assignment of connection
//! terminals to nodes, and fine-grained A* routing inside each node.
//! It's designed to be called from Python via PyO3 bindings.

use pyo3::prelude::*;

mod board;
mod edge_solver;
pub mod geometry;
mod high_density;
mod intra_node;
mod mesh_solver;
mod node_solver;
mod segment_solver;
mod solver;
mod types;

pub use board::Board;
pub use edge_solver::CapacityMeshEdgeSolver;
pub use high_density::{HighDensityOverrides, SingleHighDensityRouteSolver};
pub use intra_node::SingleIntraNodeRouteSolver;
pub use mesh_solver::CapacityMeshSolver;
pub use node_solver::CapacityMeshNodeSolver;
pub use segment_solver::CapacitySegmentToPointSolver;
pub use solver::{GraphicsObject, Solver, SolverState};
pub use types::{
    Bounds, CapacityMeshEdge, CapacityMeshNode, Connection, HighDensityRoute, NodeWithPortPoints,
    Obstacle, ObstacleKind, Point, PortPoint, RoutePoint, TerminalPoint, Via,
};

/// Python module
#[pymodule]
fn mesh_router(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<Board>()?;
    m.add_class::<CapacityMeshSolver>()?;
    m.add_class::<SingleHighDensityRouteSolver>()?;
    m.add_class::<GraphicsObject>()?;
    Ok(())
}
