//! Canvas type definitions: DrawingObject, ObjectKind.

use crate::document::ShapeId;
use crate::model::PathGeometry;

/// What a drawing object holds.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// A (possibly compound) vector path
    Path(PathGeometry),
    /// A composite of other objects, in insertion order
    Group(Vec<ShapeId>),
}

/// Drawing object on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingObject {
    pub id: ShapeId,
    pub group_id: Option<ShapeId>,
    pub name: String,
    pub kind: ObjectKind,
}

impl DrawingObject {
    /// Creates a new path object.
    pub fn new_path(id: ShapeId, name: impl Into<String>, path: PathGeometry) -> Self {
        Self {
            id,
            group_id: None,
            name: name.into(),
            kind: ObjectKind::Path(path),
        }
    }

    /// Creates a new group object.
    pub fn new_group(id: ShapeId, members: Vec<ShapeId>) -> Self {
        Self {
            id,
            group_id: None,
            name: "Group".to_string(),
            kind: ObjectKind::Group(members),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ObjectKind::Group(_))
    }

    pub fn members(&self) -> &[ShapeId] {
        match &self.kind {
            ObjectKind::Group(members) => members,
            ObjectKind::Path(_) => &[],
        }
    }

    pub fn path(&self) -> Option<&PathGeometry> {
        match &self.kind {
            ObjectKind::Path(path) => Some(path),
            ObjectKind::Group(_) => None,
        }
    }
}
