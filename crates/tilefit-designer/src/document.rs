//! Host document abstraction.
//!
//! The tiling engine never owns drawables. It drives whatever document
//! the shapes live in through [`HostDocument`]; [`crate::Canvas`] is the
//! in-memory implementation used by the CLI and the tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::{BoundingBox, PathGeometry};

/// Opaque handle to a drawable owned by the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Failure reported by a host document call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The handle does not refer to a live shape.
    #[error("Unknown shape {0}")]
    UnknownShape(ShapeId),

    /// The shape is a group and has no outline of its own.
    #[error("Shape {0} is not a path")]
    NotAPath(ShapeId),

    /// The host refused the operation.
    #[error("{0}")]
    Rejected(String),
}

/// Operations the engine needs from the document that owns the shapes.
///
/// Positions refer to the top-left corner of a shape's bounding box, in
/// document points.
pub trait HostDocument {
    /// Creates a copy of `shape` and returns its handle.
    fn duplicate(&mut self, shape: ShapeId) -> Result<ShapeId, HostError>;

    /// Moves `shape` so its bounding box starts at `(x, y)`.
    fn set_position(&mut self, shape: ShapeId, x: f64, y: f64) -> Result<(), HostError>;

    /// Scales `shape` uniformly by `pct` percent of its current size.
    fn set_uniform_scale(&mut self, shape: ShapeId, pct: f64) -> Result<(), HostError>;

    fn bounding_box(&self, shape: ShapeId) -> Result<BoundingBox, HostError>;

    /// Deletes `shape`; deleting a group deletes its members.
    fn remove(&mut self, shape: ShapeId) -> Result<(), HostError>;

    /// Wraps `shapes` in a new group and returns the group handle.
    fn group(&mut self, shapes: &[ShapeId]) -> Result<ShapeId, HostError>;

    /// Outline of a path shape.
    fn geometry(&self, shape: ShapeId) -> Result<PathGeometry, HostError>;
}
