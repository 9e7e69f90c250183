//! Listener traits for change and back-stack notifications.

use crate::handle::ViewId;

/// Notified after a view change the controller knows about.
pub trait ViewChangeListener {
    /// `id` is the factory id when known. `from_factory` is true when the
    /// unit was produced by the bound factory.
    fn on_view_changed(&mut self, id: Option<ViewId>, tag: &str, from_factory: bool);
}

impl<F> ViewChangeListener for F
where
    F: FnMut(Option<ViewId>, &str, bool),
{
    fn on_view_changed(&mut self, id: Option<ViewId>, tag: &str, from_factory: bool) {
        self(id, tag, from_factory)
    }
}

/// Notified for every classified back-stack delta.
pub trait BackStackListener {
    fn on_back_stack_changed(&mut self, added: bool, position: usize, tag: Option<&str>);
}

impl<F> BackStackListener for F
where
    F: FnMut(bool, usize, Option<&str>),
{
    fn on_back_stack_changed(&mut self, added: bool, position: usize, tag: Option<&str>) {
        self(added, position, tag)
    }
}
