//! Board description builder: bounds, obstacles, and connections.
//!
//! This is the Python-facing input surface. Layer labels from board exports
//! ("top", "bottom", "innerN") are resolved to indices here so the solver
//! pipeline only ever sees layer indices.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::types::{Bounds, Connection, Obstacle, ObstacleKind, Point, TerminalPoint};

/// Resolve a layer label to an index. "top" is layer 0, "bottom" is the last
/// layer, "innerN" counts from 1, and bare digits are taken verbatim.
pub fn parse_layer_label(label: &str, layer_count: usize) -> Option<u8> {
    match label {
        "top" => Some(0),
        "bottom" => Some((layer_count - 1) as u8),
        _ => {
            if let Some(rest) = label.strip_prefix("inner") {
                let n: usize = rest.parse().ok()?;
                if n < layer_count {
                    return Some(n as u8);
                }
                return None;
            }
            let n: usize = label.parse().ok()?;
            if n < layer_count {
                Some(n as u8)
            } else {
                None
            }
        }
    }
}

/// Routing problem description consumed by the mesh solver pipeline.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Board {
    pub bounds: Bounds,
    pub layer_count: usize,
    pub min_trace_width: f64,
    pub obstacles: Vec<Obstacle>,
    pub connections: Vec<Connection>,
}

#[pymethods]
impl Board {
    #[new]
    pub fn new(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        layer_count: usize,
        min_trace_width: f64,
    ) -> PyResult<Self> {
        if layer_count == 0 {
            return Err(PyValueError::new_err("layer_count must be at least 1"));
        }
        if layer_count > 255 {
            return Err(PyValueError::new_err("layer_count must be at most 255"));
        }
        if max_x <= min_x || max_y <= min_y {
            return Err(PyValueError::new_err("bounds must have positive extent"));
        }
        Ok(Self {
            bounds: Bounds { min_x, max_x, min_y, max_y },
            layer_count,
            min_trace_width,
            obstacles: Vec::new(),
            connections: Vec::new(),
        })
    }

    /// Add an obstacle. `kind` is "rect" or "oval"; `layers` are labels or
    /// indices; `connected_to` lists connection names that need no clearance
    /// from this obstacle.
    #[pyo3(signature = (center_x, center_y, width, height, kind="rect", layers=None, connected_to=None))]
    pub fn add_obstacle(
        &mut self,
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
        kind: &str,
        layers: Option<Vec<String>>,
        connected_to: Option<Vec<String>>,
    ) -> PyResult<()> {
        let kind = match kind {
            "rect" => ObstacleKind::Rect,
            "oval" => ObstacleKind::Oval,
            other => {
                return Err(PyValueError::new_err(format!(
                    "unknown obstacle kind: {other:?}"
                )))
            }
        };
        let layers = match layers {
            // No layers given: the obstacle blocks every layer.
            None => (0..self.layer_count as u8).collect(),
            Some(labels) => self.resolve_layers(&labels)?,
        };
        self.obstacles.push(Obstacle {
            center: Point::new(center_x, center_y),
            width,
            height,
            kind,
            layers,
            connected_to: connected_to.unwrap_or_default(),
        });
        Ok(())
    }

    /// Add a named connection. Points are (x, y, layer-label) tuples in the
    /// order they should be connected.
    pub fn add_connection(&mut self, name: String, points: Vec<(f64, f64, String)>) -> PyResult<()> {
        let mut terminal_points = Vec::with_capacity(points.len());
        for (x, y, label) in points {
            let layer = parse_layer_label(&label, self.layer_count).ok_or_else(|| {
                PyValueError::new_err(format!(
                    "connection {name:?}: unknown layer label {label:?}"
                ))
            })?;
            terminal_points.push(TerminalPoint { x, y, layer });
        }
        self.connections.push(Connection {
            name,
            points: terminal_points,
        });
        Ok(())
    }

    fn __repr__(&self) -> String {
        format!(
            "Board(bounds=({}, {}, {}, {}), layers={}, obstacles={}, connections={})",
            self.bounds.min_x,
            self.bounds.max_x,
            self.bounds.min_y,
            self.bounds.max_y,
            self.layer_count,
            self.obstacles.len(),
            self.connections.len()
        )
    }
}

impl Board {
    fn resolve_layers(&self, labels: &[String]) -> PyResult<Vec<u8>> {
        let mut layers = Vec::with_capacity(labels.len());
        for label in labels {
            let layer = parse_layer_label(label, self.layer_count).ok_or_else(|| {
                PyValueError::new_err(format!("unknown layer label: {label:?}"))
            })?;
            if !layers.contains(&layer) {
                layers.push(layer);
            }
        }
        Ok(layers)
    }
}
