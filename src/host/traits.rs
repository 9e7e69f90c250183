//! Boundary to the host's transaction manager.

use std::sync::mpsc::Receiver;

use thiserror::Error;

use crate::handle::{SlotId, ViewHandle};
use crate::transaction::Transaction;

/// Error raised by a host integration.
///
/// The controller never wraps or interprets these; they reach the caller
/// as [`crate::ControllerError::Host`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Snapshot of one back-stack record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackStackEntry {
    /// 0-based, bottom of the stack first.
    pub position: usize,
    pub name: Option<String>,
}

/// Delivered by the host each time its back stack may have changed.
///
/// Hosts may deliver spurious signals; the observer compares counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackStackSignal;

/// The host's transaction manager.
///
/// All methods are called from the thread that owns the host's UI loop.
pub trait TransactionHost {
    /// Start a transaction. Hosts rarely need to override this.
    fn begin_transaction(&mut self) -> Transaction {
        Transaction::new()
    }

    /// Queue `tx` for application.
    fn commit(&mut self, tx: Transaction) -> Result<(), HostError>;

    /// Apply every queued transaction now. Returns whether anything ran.
    fn execute_pending_transactions(&mut self) -> Result<bool, HostError>;

    fn back_stack_entry_count(&self) -> usize;

    fn back_stack_entry_at(&self, index: usize) -> Option<BackStackEntry>;

    /// Queue a pop of the top back-stack entry.
    fn pop_back_stack(&mut self) -> Result<(), HostError>;

    /// Pop the top back-stack entry now. Returns false if the stack was empty.
    fn pop_back_stack_immediate(&mut self) -> Result<bool, HostError>;

    /// Find an attached unit by tag.
    fn find_by_tag(&self, tag: &str) -> Option<ViewHandle>;

    /// Topmost unit attached to `slot`.
    fn find_in_slot(&self, slot: SlotId) -> Option<ViewHandle>;

    /// Toggle the options menu of an attached unit. Hosts without menus
    /// can keep the default.
    fn set_has_options_menu(&mut self, _handle: &ViewHandle, _enabled: bool) {}

    /// Subscribe to back-stack change signals.
    fn subscribe_back_stack(&mut self) -> Receiver<BackStackSignal>;
}
