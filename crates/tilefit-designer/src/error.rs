//! Error types for tile generation.
//!
//! `InvalidInput` and `UnsupportedShape` abort a generation and are meant
//! to be shown to the user. `HostOperation` wraps a failed host call; the
//! instantiator recovers from it per cell and only surfaces it when the
//! whole result cannot be assembled. A generation that legitimately keeps
//! zero tiles is not an error.

use thiserror::Error;

use crate::document::HostError;
use crate::preview::PreviewState;

/// Errors raised while planning or generating a tile grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TileError {
    /// Parameters or tile dimensions cannot produce a grid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The container or tile cannot be measured or flattened.
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// A host document call failed.
    #[error("Host operation '{op}' failed: {source}")]
    HostOperation {
        /// The host call that failed.
        op: &'static str,
        /// The error reported by the host.
        #[source]
        source: HostError,
    },

    /// The preview was already committed or cancelled.
    #[error("Preview session already {state}")]
    SessionFinished {
        /// The terminal state the controller is in.
        state: PreviewState,
    },
}

impl TileError {
    pub(crate) fn host(op: &'static str) -> impl FnOnce(HostError) -> TileError {
        move |source| TileError::HostOperation { op, source }
    }

    /// Errors caused by what the user entered or selected, as opposed to
    /// host failures or misuse of the controller.
    pub fn is_user_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::UnsupportedShape(_))
    }

    /// Errors that end a generation without producing a session.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::SessionFinished { .. })
    }
}

impl From<TileError> for tilefit_core::Error {
    fn from(err: TileError) -> Self {
        tilefit_core::Error::other(err.to_string())
    }
}
