//! # TileFit Designer
//!
//! Fills a container shape with a grid of tile copies, keeping only the
//! copies that lie fully inside the container's exact outline.
//!
//! ## Core Components
//!
//! - **Model**: points, bounding boxes, anchors, cubic contours and path
//!   geometry
//! - **Geometry**: flattening, point-in-polygon (even-odd), segment
//!   intersection and rectangle containment with margin
//! - **Classifier**: picks an analytic or polygon containment test per
//!   container
//! - **Planner**: deterministic row-major grid cells, with brick layout
//! - **Instantiator**: duplicates, scales, positions and filters tiles
//!   through a [`HostDocument`]
//! - **Preview**: one revocable session per container/tile pair
//! - **Canvas**: in-memory host document
//!
//! ## Architecture
//!
//! ```text
//! PreviewController
//!   └── TileInstantiator
//!         ├── ContainerClassifier ── geometry
//!         ├── GridPlanner
//!         └── HostDocument (Canvas or an external application)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use tilefit_designer::{Canvas, GridParams, PreviewController};
//!
//! let mut canvas = Canvas::new();
//! let container = canvas.add_rectangle(0.0, 0.0, 400.0, 300.0);
//! let tile = canvas.add_rectangle(0.0, 0.0, 50.0, 50.0);
//!
//! let mut preview = PreviewController::new(container, tile);
//! let session = preview.update(&mut canvas, GridParams::default()).unwrap();
//! assert_eq!(session.len(), 48);
//!
//! preview.commit().unwrap();
//! ```

pub mod canvas;
pub mod classifier;
pub mod document;
pub mod error;
pub mod geometry;
pub mod instantiator;
pub mod model;
pub mod planner;
pub mod preview;
pub mod serialization;

pub use canvas::{Canvas, DrawingObject, ObjectKind};
pub use classifier::{ContainerClassifier, ContainerKind, ContainerShape};
pub use document::{HostDocument, HostError, ShapeId};
pub use error::TileError;
pub use geometry::{Polygon, DEFAULT_FLATTEN_STEPS};
pub use instantiator::{
    GenerationReport, PreviewSession, TileInstance, TileInstantiator, DEFAULT_MAX_CELLS,
};
pub use model::{Anchor, BoundingBox, Contour, PathGeometry, Point};
pub use planner::{
    GridLayout, GridParams, GridPlanner, GridSpec, PlacementCell, MAX_PLAN_CELLS,
};
pub use preview::{PreviewController, PreviewState};
pub use serialization::{LayoutFile, PlacementRecord, SceneFile, SceneShape};
