use crate::bundle::Bundle;

/// State carried alongside a controller that survives save/restore.
///
/// Both methods default to doing nothing, so `()` and any type without
/// persistent fields can be attached as-is.
pub trait SavedState {
    fn save_state(&self, _store: &mut Bundle) {}

    fn restore_state(&mut self, _store: &Bundle) {}
}

impl SavedState for () {}
