//! Identifiers and the opaque view handle.
//!
//! A [`ViewHandle`] is the only thing the controller knows about a view
//! controller: an identity, the kind it was created as, its creation
//! parameters, and the tag it was committed under. Everything else
//! (attachment, visibility, content) belongs to the host.

use std::fmt;

use uuid::Uuid;

use crate::bundle::Bundle;

/// Numeric identifier a factory resolves into a view controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub i32);

impl From<i32> for ViewId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Container region in the host that hosts view controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub i32);

impl From<i32> for SlotId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a displayable unit.
///
/// Cloning a handle clones the reference, not the unit: two clones share
/// the same [`ViewHandle::id`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewHandle {
    id: Uuid,
    kind: String,
    view_id: Option<ViewId>,
    tag: Option<String>,
    params: Bundle,
}

impl ViewHandle {
    /// Create a handle for a unit of the given kind (typically a screen type name).
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            view_id: None,
            tag: None,
            params: Bundle::new(),
        }
    }

    /// Attach the factory id this handle was created for.
    pub fn with_view_id(mut self, view_id: ViewId) -> Self {
        self.view_id = Some(view_id);
        self
    }

    /// Attach creation parameters.
    pub fn with_params(mut self, params: Bundle) -> Self {
        self.params = params;
        self
    }

    /// Pre-assign a tag. The controller may override it when committing.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn view_id(&self) -> Option<ViewId> {
        self.view_id
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn params(&self) -> &Bundle {
        &self.params
    }

    pub(crate) fn set_tag(&mut self, tag: &str) {
        self.tag = Some(tag.to_string());
    }

    /// Whether both handles reference the same unit.
    pub fn same_unit(&self, other: &ViewHandle) -> bool {
        self.id == other.id
    }
}
