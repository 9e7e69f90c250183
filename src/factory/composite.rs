//! Chain of factories resolved in join order.
//!
//! For a given id the first delegate that claims it answers all three
//! lookups (instance, tag, options). Locally registered mappings are only
//! consulted when no delegate claims the id. Within one resolution pass the
//! last resolution is memoized so a show, which asks up to four questions
//! about one id, walks the chain once. [`ViewFactory::begin_resolution`]
//! starts a new pass.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::bundle::Bundle;
use crate::factory::traits::ViewFactory;
use crate::handle::{ViewHandle, ViewId};
use crate::transaction::TransactionOptions;

type Constructor = Box<dyn Fn(ViewId, Option<&Bundle>) -> ViewHandle>;

struct LocalEntry {
    tag: String,
    options: Option<TransactionOptions>,
    create: Constructor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Delegate(usize),
    Local,
    Unprovided,
}

#[derive(Default)]
pub struct CompositeFactory {
    delegates: Vec<Rc<dyn ViewFactory>>,
    local: BTreeMap<ViewId, LocalEntry>,
    last_resolved: Cell<Option<(ViewId, Resolution)>>,
}

impl fmt::Debug for CompositeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeFactory")
            .field(
                "delegates",
                &self.delegates.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .field("local", &self.local.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn same_factory(a: &Rc<dyn ViewFactory>, b: &Rc<dyn ViewFactory>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

impl CompositeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `factory` to the chain. Returns false if that exact factory
    /// is already joined.
    pub fn join_factory(&mut self, factory: Rc<dyn ViewFactory>) -> bool {
        if self.delegates.iter().any(|d| same_factory(d, &factory)) {
            return false;
        }
        tracing::debug!(factory = factory.name(), "Joined view factory");
        self.delegates.push(factory);
        self.forget_resolution();
        true
    }

    /// Remove `factory` from the chain. Returns false if it was not joined.
    pub fn leave_factory(&mut self, factory: &Rc<dyn ViewFactory>) -> bool {
        let before = self.delegates.len();
        self.delegates.retain(|d| !same_factory(d, factory));
        let removed = self.delegates.len() != before;
        if removed {
            self.forget_resolution();
        }
        removed
    }

    pub fn delegate_count(&self) -> usize {
        self.delegates.len()
    }

    /// Register a local id → constructor mapping.
    pub fn register<F>(&mut self, id: ViewId, tag: impl Into<String>, create: F)
    where
        F: Fn(ViewId, Option<&Bundle>) -> ViewHandle + 'static,
    {
        self.insert_local(id, tag.into(), None, Box::new(create));
    }

    /// Register a local mapping that carries its own transaction options.
    pub fn register_with_options<F>(
        &mut self,
        id: ViewId,
        tag: impl Into<String>,
        options: TransactionOptions,
        create: F,
    ) where
        F: Fn(ViewId, Option<&Bundle>) -> ViewHandle + 'static,
    {
        self.insert_local(id, tag.into(), Some(options), Box::new(create));
    }

    fn insert_local(
        &mut self,
        id: ViewId,
        tag: String,
        options: Option<TransactionOptions>,
        create: Constructor,
    ) {
        self.local.insert(
            id,
            LocalEntry {
                tag,
                options,
                create,
            },
        );
        self.forget_resolution();
    }

    /// Drop the memoized resolution.
    pub fn forget_resolution(&self) {
        self.last_resolved.set(None);
    }

    fn resolve(&self, id: ViewId) -> Resolution {
        if let Some((last_id, resolution)) = self.last_resolved.get() {
            if last_id == id {
                return resolution;
            }
        }

        let resolution = self
            .delegates
            .iter()
            .position(|d| d.is_provided(id))
            .map(Resolution::Delegate)
            .unwrap_or_else(|| {
                if self.local.contains_key(&id) {
                    Resolution::Local
                } else {
                    Resolution::Unprovided
                }
            });

        tracing::trace!(id = %id, ?resolution, "Resolved view id");
        self.last_resolved.set(Some((id, resolution)));
        resolution
    }
}

impl ViewFactory for CompositeFactory {
    fn name(&self) -> &str {
        "composite"
    }

    fn begin_resolution(&self) {
        self.forget_resolution();
        for delegate in &self.delegates {
            delegate.begin_resolution();
        }
    }

    fn is_provided(&self, id: ViewId) -> bool {
        self.resolve(id) != Resolution::Unprovided
    }

    fn create_instance(&self, id: ViewId, params: Option<&Bundle>) -> Option<ViewHandle> {
        match self.resolve(id) {
            Resolution::Delegate(index) => self.delegates[index].create_instance(id, params),
            Resolution::Local => self.local.get(&id).map(|entry| {
                let handle = (entry.create)(id, params);
                match handle.view_id() {
                    Some(_) => handle,
                    None => handle.with_view_id(id),
                }
            }),
            Resolution::Unprovided => None,
        }
    }

    fn tag(&self, id: ViewId) -> Option<String> {
        match self.resolve(id) {
            Resolution::Delegate(index) => self.delegates[index].tag(id),
            Resolution::Local => self.local.get(&id).map(|entry| entry.tag.clone()),
            Resolution::Unprovided => None,
        }
    }

    fn transaction_options(
        &self,
        id: ViewId,
        params: Option<&Bundle>,
    ) -> Option<TransactionOptions> {
        match self.resolve(id) {
            Resolution::Delegate(index) => self.delegates[index].transaction_options(id, params),
            Resolution::Local => self.local.get(&id).and_then(|entry| entry.options.clone()),
            Resolution::Unprovided => None,
        }
    }
}
