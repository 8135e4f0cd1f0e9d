//! Revocable preview of a tile grid.
//!
//! The controller keeps at most one [`PreviewSession`] alive. Every
//! parameter change discards the live session before generating a new
//! one, so the document never holds two previews at once.
//!
//! ```text
//! Idle --update--> Previewing --update--> Previewing
//!                       |
//!                       +--commit--> Committed
//!                       +--cancel--> Cancelled
//! ```
//!
//! `commit` and `cancel` are also accepted from `Idle`.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::document::{HostDocument, ShapeId};
use crate::error::TileError;
use crate::instantiator::{PreviewSession, TileInstantiator};
use crate::planner::GridParams;

/// Lifecycle of a [`PreviewController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewState {
    Idle,
    Previewing,
    Committed,
    Cancelled,
}

impl fmt::Display for PreviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Previewing => write!(f, "previewing"),
            Self::Committed => write!(f, "committed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Owns the preview session for one container/tile pair.
#[derive(Debug)]
pub struct PreviewController {
    container: ShapeId,
    tile: ShapeId,
    instantiator: TileInstantiator,
    state: PreviewState,
    session: Option<PreviewSession>,
    params: Option<GridParams>,
}

impl PreviewController {
    pub fn new(container: ShapeId, tile: ShapeId) -> Self {
        Self::with_instantiator(container, tile, TileInstantiator::default())
    }

    pub fn with_instantiator(
        container: ShapeId,
        tile: ShapeId,
        instantiator: TileInstantiator,
    ) -> Self {
        Self {
            container,
            tile,
            instantiator,
            state: PreviewState::Idle,
            session: None,
            params: None,
        }
    }

    pub fn container(&self) -> ShapeId {
        self.container
    }

    pub fn tile(&self) -> ShapeId {
        self.tile
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    /// The live session, if a preview is showing.
    pub fn session(&self) -> Option<&PreviewSession> {
        self.session.as_ref()
    }

    /// Parameters of the last successful generation.
    pub fn params(&self) -> Option<&GridParams> {
        self.params.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, PreviewState::Committed | PreviewState::Cancelled)
    }

    fn ensure_active(&self) -> Result<(), TileError> {
        if self.is_finished() {
            return Err(TileError::SessionFinished { state: self.state });
        }
        Ok(())
    }

    /// Regenerate the preview with new parameters.
    ///
    /// The previous session is discarded first, even when the new
    /// generation fails. On failure the controller returns to `Idle`.
    pub fn update<D: HostDocument + ?Sized>(
        &mut self,
        doc: &mut D,
        params: GridParams,
    ) -> Result<&PreviewSession, TileError> {
        self.ensure_active()?;

        if let Some(previous) = self.session.take() {
            previous.discard(doc);
        }
        self.state = PreviewState::Idle;

        let session = self
            .instantiator
            .generate(doc, self.container, self.tile, &params)?;
        self.params = Some(params);
        self.state = PreviewState::Previewing;
        Ok(self.session.insert(session))
    }

    /// Regenerate with the last parameters, e.g. after the sources moved.
    pub fn refresh<D: HostDocument + ?Sized>(
        &mut self,
        doc: &mut D,
    ) -> Result<&PreviewSession, TileError> {
        self.ensure_active()?;
        let params = self.params.clone().unwrap_or_default();
        self.update(doc, params)
    }

    /// Keep the live preview in the document and return its group.
    pub fn commit(&mut self) -> Result<Option<ShapeId>, TileError> {
        self.ensure_active()?;
        let group = self.session.take().and_then(PreviewSession::commit);
        self.state = PreviewState::Committed;
        match group {
            Some(group) => info!("Committed tile group {}", group),
            None => info!("Committed empty preview"),
        }
        Ok(group)
    }

    /// Remove the live preview, leaving the sources as they were.
    pub fn cancel<D: HostDocument + ?Sized>(&mut self, doc: &mut D) -> Result<(), TileError> {
        self.ensure_active()?;
        let removed = self.session.take().map_or(0, |s| s.discard(doc));
        self.state = PreviewState::Cancelled;
        info!("Cancelled preview ({} shapes removed)", removed);
        Ok(())
    }
}

impl Drop for PreviewController {
    fn drop(&mut self) {
        if let Some(session) = &self.session {
            warn!(
                "Preview controller dropped with {} live tiles; they stay in the document",
                session.len()
            );
        }
    }
}
