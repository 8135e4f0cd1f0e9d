//! # Tile Instantiator
//!
//! Turns a placement plan into real shapes in the host document.
//!
//! One generation runs the whole pipeline: classify the container, plan
//! the grid, then for every cell duplicate the tile, scale it, move it to
//! the cell origin and keep it only if the container's predicate accepts
//! its bounding box. Survivors are grouped into a single composite and
//! returned as a [`PreviewSession`] that can later be discarded or
//! committed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classifier::{ContainerClassifier, ContainerKind, ContainerShape};
use crate::document::{HostDocument, ShapeId};
use crate::error::TileError;
use crate::geometry::DEFAULT_FLATTEN_STEPS;
use crate::model::BoundingBox;
use crate::planner::{GridParams, GridPlanner, GridSpec, PlacementCell};

pub use tilefit_core::limits::DEFAULT_MAX_CELLS;

const SCALE_EPSILON: f64 = 1e-9;

/// A tile copy that passed containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileInstance {
    pub shape: ShapeId,
    pub cell: PlacementCell,
    /// Bounding box after scaling and positioning
    pub bounds: BoundingBox,
}

/// Counters describing one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub container_kind: ContainerKind,
    /// Cells produced by the planner
    pub candidates: usize,
    /// Instances kept inside the container
    pub retained: usize,
    /// Instances removed by the containment test
    pub rejected: usize,
    /// Cells abandoned because a host call failed
    pub skipped: usize,
    pub columns: u32,
    pub rows: u32,
}

/// The live result of a generation.
///
/// The session owns every instance it lists until it is either discarded
/// (everything removed) or committed (ownership handed to the document).
#[must_use = "a preview session must be discarded or committed"]
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSession {
    group: Option<ShapeId>,
    instances: Vec<TileInstance>,
    /// Copies of skipped cells the host refused to remove
    stranded: Vec<ShapeId>,
    report: GenerationReport,
}

impl PreviewSession {
    /// Composite holding the retained instances; `None` when nothing fit.
    pub fn group(&self) -> Option<ShapeId> {
        self.group
    }

    pub fn instances(&self) -> &[TileInstance] {
        &self.instances
    }

    /// Shapes left behind by skipped cells. Discarding retries them.
    pub fn stranded(&self) -> &[ShapeId] {
        &self.stranded
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Removes every instance and the composite from `doc`. Returns the
    /// number of shapes actually removed.
    pub fn discard<D: HostDocument + ?Sized>(self, doc: &mut D) -> usize {
        let mut removed = 0;
        for instance in &self.instances {
            match doc.remove(instance.shape) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove tile {}: {}", instance.shape, e),
            }
        }
        for &shape in &self.stranded {
            match doc.remove(shape) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Stranded tile {} still in document: {}", shape, e),
            }
        }
        if let Some(group) = self.group {
            // Removing the members first can leave the host with an empty
            // group, or one that already vanished with its last member.
            if let Err(e) = doc.remove(group) {
                debug!("Group {} not removed: {}", group, e);
            } else {
                removed += 1;
            }
        }
        debug!("Discarded preview session ({} shapes removed)", removed);
        removed
    }

    /// Releases ownership of the instances without touching the document.
    pub fn commit(self) -> Option<ShapeId> {
        if !self.stranded.is_empty() {
            warn!(
                "Committing with {} stranded tile(s) outside the group: {:?}",
                self.stranded.len(),
                self.stranded
            );
        }
        self.group
    }
}

/// Drives a host document through one tiling pass.
#[derive(Debug, Clone, Copy)]
pub struct TileInstantiator {
    classifier: ContainerClassifier,
    max_cells: usize,
}

impl Default for TileInstantiator {
    fn default() -> Self {
        Self {
            classifier: ContainerClassifier::new(DEFAULT_FLATTEN_STEPS),
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl TileInstantiator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flatten_steps(mut self, steps: usize) -> Self {
        self.classifier = ContainerClassifier::new(steps);
        self
    }

    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    pub fn classifier(&self) -> &ContainerClassifier {
        &self.classifier
    }

    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Fill `container` with copies of `tile`.
    ///
    /// Neither source shape is modified. A host failure on a single cell
    /// skips that cell; failing to group the survivors removes every
    /// instance created so far and returns the error.
    pub fn generate<D: HostDocument + ?Sized>(
        &self,
        doc: &mut D,
        container: ShapeId,
        tile: ShapeId,
        params: &GridParams,
    ) -> Result<PreviewSession, TileError> {
        params.validate()?;

        let outline = doc.geometry(container).map_err(|e| {
            TileError::UnsupportedShape(format!("container {} has no outline: {}", container, e))
        })?;
        let shape = self.classifier.classify(&outline)?;

        let container_bounds = measure(doc, container, "container")?;
        let tile_bounds = measure(doc, tile, "tile")?;

        let spec = GridSpec::new(&tile_bounds, params)?.clamp_margin();
        let layout = GridPlanner::layout(&container_bounds, &spec).ok_or_else(|| {
            TileError::InvalidInput("container and tile cannot form a grid".to_string())
        })?;
        if layout.total_cells() > self.max_cells as u64 {
            return Err(TileError::InvalidInput(format!(
                "grid of {}x{} cells exceeds the limit of {}",
                layout.columns, layout.rows, self.max_cells
            )));
        }
        debug!(
            "Grid {}x{} with step ({:.3}, {:.3})",
            layout.columns, layout.rows, layout.step_x, layout.step_y
        );

        let cells = GridPlanner::plan_spec(&container_bounds, &spec)?;
        let mut report = GenerationReport {
            container_kind: shape.kind(),
            candidates: cells.len(),
            retained: 0,
            rejected: 0,
            skipped: 0,
            columns: layout.columns,
            rows: layout.rows,
        };

        let mut instances = Vec::new();
        let mut stranded = Vec::new();
        for cell in cells {
            match place(doc, tile, &cell, &spec, &shape) {
                Ok(Placement::Kept(instance)) => instances.push(instance),
                Ok(Placement::Rejected) => report.rejected += 1,
                Ok(Placement::Stranded(copy, e)) => {
                    warn!(
                        "Skipping cell ({}, {}), tile {} left in document: {}",
                        cell.row, cell.col, copy, e
                    );
                    stranded.push(copy);
                    report.skipped += 1;
                }
                Err(e) => {
                    warn!("Skipping cell ({}, {}): {}", cell.row, cell.col, e);
                    report.skipped += 1;
                }
            }
        }
        report.retained = instances.len();

        let group = if instances.is_empty() {
            None
        } else {
            let members: Vec<ShapeId> = instances.iter().map(|i| i.shape).collect();
            match doc.group(&members) {
                Ok(group) => Some(group),
                Err(e) => {
                    let shapes = instances.iter().map(|i| i.shape).chain(stranded);
                    for shape in shapes {
                        if let Err(err) = doc.remove(shape) {
                            warn!("Failed to remove tile {}: {}", shape, err);
                        }
                    }
                    return Err(TileError::host("group")(e));
                }
            }
        };

        info!(
            "Generated {} of {} tiles in {} container ({} rejected, {} skipped)",
            report.retained,
            report.candidates,
            report.container_kind,
            report.rejected,
            report.skipped
        );

        Ok(PreviewSession {
            group,
            instances,
            stranded,
            report,
        })
    }
}

fn measure<D: HostDocument + ?Sized>(
    doc: &D,
    shape: ShapeId,
    role: &str,
) -> Result<BoundingBox, TileError> {
    let bounds = doc.bounding_box(shape).map_err(|e| {
        TileError::UnsupportedShape(format!("{} {} cannot be measured: {}", role, shape, e))
    })?;
    if !bounds.is_finite() || bounds.is_degenerate() {
        return Err(TileError::UnsupportedShape(format!(
            "{} {} has no measurable area",
            role, shape
        )));
    }
    Ok(bounds)
}

/// Outcome of placing one copy.
enum Placement {
    Kept(TileInstance),
    /// Outside the container; the copy is already removed.
    Rejected,
    /// The cell failed and its copy could not be removed.
    Stranded(ShapeId, TileError),
}

/// Places one copy. `Err` means the cell failed and left nothing behind.
fn place<D: HostDocument + ?Sized>(
    doc: &mut D,
    tile: ShapeId,
    cell: &PlacementCell,
    spec: &GridSpec,
    container: &ContainerShape,
) -> Result<Placement, TileError> {
    let copy = doc.duplicate(tile).map_err(TileError::host("duplicate"))?;

    let bounds = match position(doc, copy, cell, spec) {
        Ok(bounds) => bounds,
        Err(e) => {
            return match doc.remove(copy) {
                Ok(()) => Err(e),
                Err(err) => {
                    warn!("Failed to remove partial tile {}: {}", copy, err);
                    Ok(Placement::Stranded(copy, e))
                }
            };
        }
    };

    if container.contains_rect(&bounds, spec.margin) {
        debug!("Cell ({}, {}) kept as {}", cell.row, cell.col, copy);
        return Ok(Placement::Kept(TileInstance {
            shape: copy,
            cell: *cell,
            bounds,
        }));
    }

    debug!("Cell ({}, {}) outside container", cell.row, cell.col);
    match doc.remove(copy) {
        Ok(()) => Ok(Placement::Rejected),
        Err(e) => Ok(Placement::Stranded(copy, TileError::host("remove")(e))),
    }
}

fn position<D: HostDocument + ?Sized>(
    doc: &mut D,
    copy: ShapeId,
    cell: &PlacementCell,
    spec: &GridSpec,
) -> Result<BoundingBox, TileError> {
    if (spec.scale_pct - 100.0).abs() > SCALE_EPSILON {
        doc.set_uniform_scale(copy, spec.scale_pct)
            .map_err(TileError::host("set_uniform_scale"))?;
    }
    doc.set_position(copy, cell.origin_x, cell.origin_y)
        .map_err(TileError::host("set_position"))?;
    doc.bounding_box(copy)
        .map_err(TileError::host("bounding_box"))
}
