//! In-memory drawing canvas.
//!
//! Holds paths and groups keyed by [`ShapeId`] and implements
//! [`HostDocument`], so the tiling engine can run without an external
//! drawing application.

mod types;

pub use types::{DrawingObject, ObjectKind};

use std::collections::BTreeMap;

use crate::document::{HostDocument, HostError, ShapeId};
use crate::model::{BoundingBox, PathGeometry, Point};

/// Canvas state managing shapes.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    objects: BTreeMap<ShapeId, DrawingObject>,
    next_id: u64,
}

impl Canvas {
    /// Creates a new canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of objects on the canvas, groups included.
    pub fn shape_count(&self) -> usize {
        self.objects.len()
    }

    /// Generates a new unique ID.
    pub fn generate_id(&mut self) -> ShapeId {
        self.next_id += 1;
        ShapeId(self.next_id)
    }

    /// Gets a reference to a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&DrawingObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Gets all objects on the canvas in ID order.
    pub fn shapes(&self) -> impl Iterator<Item = &DrawingObject> {
        self.objects.values()
    }

    /// Objects that are not members of a group.
    pub fn top_level_shapes(&self) -> impl Iterator<Item = &DrawingObject> {
        self.objects.values().filter(|o| o.group_id.is_none())
    }

    /// Adds a named path to the canvas.
    pub fn add_path(&mut self, name: impl Into<String>, path: PathGeometry) -> ShapeId {
        let id = self.generate_id();
        self.objects
            .insert(id, DrawingObject::new_path(id, name, path));
        id
    }

    /// Adds a rectangle to the canvas.
    pub fn add_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) -> ShapeId {
        let bounds = BoundingBox::from_origin_size(x, y, width, height);
        self.add_path("Rectangle", PathGeometry::rectangle(&bounds))
    }

    /// Adds an ellipse to the canvas.
    pub fn add_ellipse(&mut self, center: Point, rx: f64, ry: f64) -> ShapeId {
        self.add_path("Ellipse", PathGeometry::ellipse(center, rx, ry))
    }

    /// Adds a circle to the canvas.
    pub fn add_circle(&mut self, center: Point, radius: f64) -> ShapeId {
        self.add_path("Circle", PathGeometry::circle(center, radius))
    }

    /// Adds a closed polygon to the canvas.
    pub fn add_polygon(&mut self, points: &[Point]) -> ShapeId {
        self.add_path("Polygon", PathGeometry::polygon(points))
    }

    /// Removes a shape by ID.
    pub fn remove_shape(&mut self, id: ShapeId) -> bool {
        self.remove_shape_return(id).is_some()
    }

    /// Removes a shape and returns it. Removing a group also removes its
    /// members; removing a member detaches it from its group.
    pub fn remove_shape_return(&mut self, id: ShapeId) -> Option<DrawingObject> {
        let obj = self.objects.remove(&id)?;

        if let Some(parent) = obj.group_id {
            if let Some(DrawingObject {
                kind: ObjectKind::Group(members),
                ..
            }) = self.objects.get_mut(&parent)
            {
                members.retain(|m| *m != id);
            }
        }

        for member in obj.members().to_vec() {
            if let Some(child) = self.objects.get_mut(&member) {
                child.group_id = None;
            }
            self.remove_shape_return(member);
        }

        Some(obj)
    }

    /// Bounding box of a path, or the union over a group's members.
    pub fn bounds_of(&self, id: ShapeId) -> Option<BoundingBox> {
        match &self.objects.get(&id)?.kind {
            ObjectKind::Path(path) => path.bounds(),
            ObjectKind::Group(members) => members
                .iter()
                .filter_map(|m| self.bounds_of(*m))
                .reduce(|acc, bb| acc.union(&bb)),
        }
    }

    fn for_each_path_mut(
        &mut self,
        id: ShapeId,
        f: &mut dyn FnMut(&mut PathGeometry),
    ) -> Result<(), HostError> {
        let members = match self.objects.get_mut(&id) {
            None => return Err(HostError::UnknownShape(id)),
            Some(obj) => match &mut obj.kind {
                ObjectKind::Path(path) => {
                    f(path);
                    return Ok(());
                }
                ObjectKind::Group(members) => members.clone(),
            },
        };
        for member in members {
            self.for_each_path_mut(member, f)?;
        }
        Ok(())
    }

    fn measured_bounds(&self, id: ShapeId) -> Result<BoundingBox, HostError> {
        if !self.contains(id) {
            return Err(HostError::UnknownShape(id));
        }
        self.bounds_of(id)
            .ok_or_else(|| HostError::Rejected(format!("shape {} has no extent", id)))
    }
}

impl HostDocument for Canvas {
    fn duplicate(&mut self, shape: ShapeId) -> Result<ShapeId, HostError> {
        let obj = self
            .objects
            .get(&shape)
            .cloned()
            .ok_or(HostError::UnknownShape(shape))?;

        match obj.kind {
            ObjectKind::Path(path) => Ok(self.add_path(format!("{} copy", obj.name), path)),
            ObjectKind::Group(members) => {
                let copies = members
                    .iter()
                    .map(|m| self.duplicate(*m))
                    .collect::<Result<Vec<_>, _>>()?;
                self.group(&copies)
            }
        }
    }

    fn set_position(&mut self, shape: ShapeId, x: f64, y: f64) -> Result<(), HostError> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(HostError::Rejected(format!(
                "position must be finite, got ({}, {})",
                x, y
            )));
        }
        let bounds = self.measured_bounds(shape)?;
        let (dx, dy) = (x - bounds.left, y - bounds.top);
        self.for_each_path_mut(shape, &mut |path| path.translate(dx, dy))
    }

    fn set_uniform_scale(&mut self, shape: ShapeId, pct: f64) -> Result<(), HostError> {
        if !pct.is_finite() || pct <= 0.0 {
            return Err(HostError::Rejected(format!(
                "scale must be a positive percentage, got {}",
                pct
            )));
        }
        let origin = self.measured_bounds(shape)?.origin();
        let factor = pct / 100.0;
        self.for_each_path_mut(shape, &mut |path| path.scale_about(origin, factor))
    }

    fn bounding_box(&self, shape: ShapeId) -> Result<BoundingBox, HostError> {
        self.measured_bounds(shape)
    }

    fn remove(&mut self, shape: ShapeId) -> Result<(), HostError> {
        self.remove_shape_return(shape)
            .map(|_| ())
            .ok_or(HostError::UnknownShape(shape))
    }

    fn group(&mut self, shapes: &[ShapeId]) -> Result<ShapeId, HostError> {
        if shapes.is_empty() {
            return Err(HostError::Rejected("cannot group zero shapes".to_string()));
        }
        if let Some(missing) = shapes.iter().find(|id| !self.contains(**id)) {
            return Err(HostError::UnknownShape(*missing));
        }

        let group_id = self.generate_id();
        for id in shapes {
            let previous = self.objects.get(id).and_then(|o| o.group_id);
            if let Some(DrawingObject {
                kind: ObjectKind::Group(members),
                ..
            }) = previous.and_then(|p| self.objects.get_mut(&p))
            {
                members.retain(|m| m != id);
            }
            if let Some(obj) = self.objects.get_mut(id) {
                obj.group_id = Some(group_id);
            }
        }

        self.objects
            .insert(group_id, DrawingObject::new_group(group_id, shapes.to_vec()));
        Ok(group_id)
    }

    fn geometry(&self, shape: ShapeId) -> Result<PathGeometry, HostError> {
        let obj = self
            .objects
            .get(&shape)
            .ok_or(HostError::UnknownShape(shape))?;
        obj.path().cloned().ok_or(HostError::NotAPath(shape))
    }
}
