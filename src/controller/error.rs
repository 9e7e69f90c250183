//! Error types for controller operations.

use thiserror::Error;

use crate::handle::ViewId;
use crate::host::HostError;

/// Errors returned by [`crate::Controller`].
///
/// `NoFactory` and `NoContainer` are configuration mistakes and are never
/// retried internally. Resolution failures are not errors; they come back
/// as [`crate::ShowOutcome::Unresolved`].
#[derive(Debug, Error)]
pub enum ControllerError {
    /// An id-based show was requested with no factory bound.
    #[error("No view factory bound, cannot show view {id}")]
    NoFactory { id: ViewId },

    /// Neither the options nor the controller name a container slot.
    #[error("No container slot for '{tag}': set one in the options or a controller default")]
    NoContainer { tag: String },

    /// Raised by the host transaction manager.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl ControllerError {
    /// Whether this is a programmer configuration mistake.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ControllerError::NoFactory { .. } | ControllerError::NoContainer { .. }
        )
    }
}
