//! Core trait for producing view controllers from ids.

use crate::bundle::Bundle;
use crate::handle::{ViewHandle, ViewId};
use crate::transaction::TransactionOptions;

/// Resolves view ids into handles, tags, and transaction options.
///
/// Every lookup on an id the factory does not provide returns `None`;
/// implementations must never panic on unknown ids. Callers decide what a
/// `None` means.
pub trait ViewFactory {
    /// Name for logging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once at the start of every id-based show. Factories that
    /// cache answers drop them here; cached answers are only valid within
    /// one resolution pass.
    fn begin_resolution(&self) {}

    /// Whether this factory can resolve `id`. Must be safe to call repeatedly.
    fn is_provided(&self, id: ViewId) -> bool;

    /// Create a new unit for `id`.
    fn create_instance(&self, id: ViewId, params: Option<&Bundle>) -> Option<ViewHandle>;

    /// Tag the unit for `id` is committed under.
    fn tag(&self, id: ViewId) -> Option<String>;

    /// Options for showing `id`. `None` means "use the controller default".
    ///
    /// Default implementation returns `None`.
    fn transaction_options(
        &self,
        _id: ViewId,
        _params: Option<&Bundle>,
    ) -> Option<TransactionOptions> {
        None
    }
}
