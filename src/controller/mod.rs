//! The transaction and back-stack controller.
//!
//! # Show algorithm
//!
//! ```text
//! show_by_id ──→ factory resolves handle/tag/options ──┐
//!                                                      ├──→ transition ──→ commit
//! show(handle, options) ───────────────────────────────┘
//! ```
//!
//! `transition` keeps an existing unit when `replace_same` is off, resolves
//! the container slot, records animations and the add/replace op, pushes a
//! back-stack entry if asked, commits, and notifies change listeners.
//!
//! Back-stack changes arrive later through the host's signal and are
//! classified by [`BackStackObserver`].
//!
//! The controller is meant to live on the host's UI thread. It performs no
//! locking.

mod error;
mod listener;
mod observer;
mod saved_state;

pub use error::ControllerError;
pub use listener::{BackStackListener, ViewChangeListener};
pub use observer::{BackStackChange, BackStackChangeKind, BackStackObserver};
pub use saved_state::SavedState;

use std::collections::HashMap;
use std::sync::mpsc::Receiver;

use crate::bundle::Bundle;
use crate::config::ControllerConfig;
use crate::factory::ViewFactory;
use crate::handle::{SlotId, ViewHandle, ViewId};
use crate::host::{BackStackEntry, BackStackSignal, TransactionHost};
use crate::transaction::{Transition, TransactionOptions};

/// Result of a show that did not hit a configuration or host error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowOutcome {
    /// A transaction was committed.
    Shown { tag: String },
    /// `replace_same` was off and a unit with this tag already exists.
    AlreadyShown { tag: String },
    /// The factory did not provide the id or returned no instance.
    Unresolved,
}

impl ShowOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ShowOutcome::Unresolved)
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            ShowOutcome::Shown { tag } | ShowOutcome::AlreadyShown { tag } => Some(tag.as_str()),
            ShowOutcome::Unresolved => None,
        }
    }
}

pub struct Controller<H: TransactionHost, S: SavedState = ()> {
    host: H,
    config: ControllerConfig,
    default_slot: Option<SlotId>,
    default_options: TransactionOptions,
    factory: Option<Box<dyn ViewFactory>>,
    /// Best effort: accurate only if all navigation goes through this controller.
    current_tag: Option<String>,
    /// Slot each committed tag was shown into, for re-deriving the current
    /// tag after a pop.
    slots_by_tag: HashMap<String, SlotId>,
    observer: BackStackObserver,
    signals: Receiver<BackStackSignal>,
    change_listeners: Vec<Box<dyn ViewChangeListener>>,
    back_stack_listeners: Vec<Box<dyn BackStackListener>>,
    state: S,
}

impl<H: TransactionHost> Controller<H> {
    /// Create a controller with no attached saved state.
    pub fn new(host: H, config: ControllerConfig) -> Self {
        Self::with_state(host, config, ())
    }
}

impl<H: TransactionHost, S: SavedState> Controller<H, S> {
    /// Create a controller carrying `state` through save/restore.
    ///
    /// Subscribes to the host's back-stack signal; entries already on the
    /// stack become the observer's baseline.
    pub fn with_state(mut host: H, config: ControllerConfig, state: S) -> Self {
        let mut observer = BackStackObserver::new();
        observer.attach(&host);
        let signals = host.subscribe_back_stack();

        Self {
            default_slot: config.default_slot(),
            host,
            config,
            default_options: TransactionOptions::default(),
            factory: None,
            current_tag: None,
            slots_by_tag: HashMap::new(),
            observer,
            signals,
            change_listeners: Vec::new(),
            back_stack_listeners: Vec::new(),
            state,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Bind the factory used by [`Controller::show_by_id`].
    pub fn set_factory(&mut self, factory: impl ViewFactory + 'static) {
        let factory: Box<dyn ViewFactory> = Box::new(factory);
        tracing::debug!(factory = factory.name(), "View factory bound");
        self.factory = Some(factory);
    }

    pub fn clear_factory(&mut self) -> Option<Box<dyn ViewFactory>> {
        self.factory.take()
    }

    pub fn factory(&self) -> Option<&dyn ViewFactory> {
        self.factory.as_deref()
    }

    pub fn default_slot(&self) -> Option<SlotId> {
        self.default_slot
    }

    pub fn set_default_slot(&mut self, slot: Option<SlotId>) {
        self.default_slot = slot;
    }

    /// Options used when a show passes none and the factory returns none.
    pub fn default_options(&self) -> &TransactionOptions {
        &self.default_options
    }

    pub fn set_default_options(&mut self, options: TransactionOptions) {
        self.default_options = options;
    }

    /// Transition preset from the configuration.
    pub fn transition_preset(&self, name: &str) -> Option<Transition> {
        self.config.transition(name).cloned()
    }

    pub fn current_tag(&self) -> Option<&str> {
        self.current_tag.as_deref()
    }

    pub fn add_change_listener(&mut self, listener: impl ViewChangeListener + 'static) {
        self.change_listeners.push(Box::new(listener));
    }

    pub fn add_back_stack_listener(&mut self, listener: impl BackStackListener + 'static) {
        self.back_stack_listeners.push(Box::new(listener));
    }

    /// Show the unit the bound factory resolves for `id`.
    ///
    /// # Errors
    /// `NoFactory` if no factory is bound, `NoContainer` if no slot
    /// resolves, and any host error unchanged. An id the factory does not
    /// provide is `Ok(ShowOutcome::Unresolved)`.
    pub fn show_by_id(
        &mut self,
        id: ViewId,
        params: Option<&Bundle>,
    ) -> Result<ShowOutcome, ControllerError> {
        let factory = self
            .factory
            .as_deref()
            .ok_or(ControllerError::NoFactory { id })?;

        factory.begin_resolution();
        if !factory.is_provided(id) {
            tracing::warn!(id = %id, factory = factory.name(), "View id not provided by factory");
            return Ok(ShowOutcome::Unresolved);
        }

        let Some(handle) = factory.create_instance(id, params) else {
            tracing::warn!(id = %id, factory = factory.name(), "Factory returned no instance");
            return Ok(ShowOutcome::Unresolved);
        };

        let tag = factory.tag(id);
        let mut options = factory
            .transaction_options(id, params)
            .unwrap_or_else(|| self.default_options.clone());
        if let Some(tag) = tag {
            options = options.to_builder().tag(tag).build();
        }

        let handle = match handle.view_id() {
            Some(_) => handle,
            None => handle.with_view_id(id),
        };

        self.transition(handle, options, true)
    }

    /// Show `handle` with `options`, or the controller defaults.
    pub fn show(
        &mut self,
        handle: ViewHandle,
        options: Option<TransactionOptions>,
    ) -> Result<ShowOutcome, ControllerError> {
        let options = options.unwrap_or_else(|| self.default_options.clone());
        self.transition(handle, options, false)
    }

    /// [`Controller::show`] with add mode forced on.
    pub fn add(
        &mut self,
        handle: ViewHandle,
        options: Option<TransactionOptions>,
    ) -> Result<ShowOutcome, ControllerError> {
        let options = options.unwrap_or_else(|| self.default_options.clone());
        self.transition(handle, options.to_builder().add_mode(true).build(), false)
    }

    /// [`Controller::show`] with add mode forced off.
    pub fn replace(
        &mut self,
        handle: ViewHandle,
        options: Option<TransactionOptions>,
    ) -> Result<ShowOutcome, ControllerError> {
        let options = options.unwrap_or_else(|| self.default_options.clone());
        self.transition(handle, options.to_builder().add_mode(false).build(), false)
    }

    /// Tag precedence: explicit options tag, then the handle's own tag,
    /// then the configured default.
    fn resolve_tag(&self, handle: &ViewHandle, options: &TransactionOptions) -> String {
        options
            .tag()
            .or_else(|| handle.tag())
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_tag.clone())
    }

    fn transition(
        &mut self,
        mut handle: ViewHandle,
        options: TransactionOptions,
        from_factory: bool,
    ) -> Result<ShowOutcome, ControllerError> {
        let tag = self.resolve_tag(&handle, &options);

        if !options.replace_same() {
            if let Some(existing) = self.host.find_by_tag(&tag) {
                if self.config.enable_menu_on_existing {
                    self.host.set_has_options_menu(&existing, true);
                }
                tracing::debug!(tag = %tag, "Unit with tag already shown, keeping it");
                return Ok(ShowOutcome::AlreadyShown { tag });
            }
        }

        let slot = options
            .container()
            .or(self.default_slot)
            .ok_or_else(|| ControllerError::NoContainer { tag: tag.clone() })?;

        let mut tx = self.host.begin_transaction();
        if !options.transition().is_trivial() {
            tx.set_animations(options.transition());
        }

        handle.set_tag(&tag);
        let view_id = handle.view_id();
        if options.add_mode() {
            tx.add(slot, handle, &tag);
        } else {
            tx.replace(slot, handle, &tag);
        }
        if options.add_to_back_stack() {
            tx.add_to_back_stack(&tag);
        }

        if self.config.log_transactions {
            for op in tx.ops() {
                tracing::debug!(tag = %tag, ?op, "Transaction op");
            }
        }

        self.host.commit(tx)?;
        if options.show_immediate() {
            self.host.execute_pending_transactions()?;
        }

        tracing::debug!(
            tag = %tag,
            slot = %slot,
            add_mode = options.add_mode(),
            back_stack = options.add_to_back_stack(),
            immediate = options.show_immediate(),
            from_factory,
            "Committed view transaction"
        );

        self.slots_by_tag.insert(tag.clone(), slot);
        self.current_tag = Some(tag.clone());
        self.notify_view_changed(view_id, &tag, from_factory);
        Ok(ShowOutcome::Shown { tag })
    }

    fn notify_view_changed(&mut self, id: Option<ViewId>, tag: &str, from_factory: bool) {
        for listener in &mut self.change_listeners {
            listener.on_view_changed(id, tag, from_factory);
        }
    }

    /// Flush queued host transactions.
    pub fn execute_pending_transactions(&mut self) -> Result<bool, ControllerError> {
        Ok(self.host.execute_pending_transactions()?)
    }

    /// Handle every back-stack signal the host delivered since the last
    /// call. Returns the number of classified changes.
    pub fn process_back_stack_signals(&mut self) -> usize {
        let pending = self.signals.try_iter().count();
        (0..pending)
            .filter(|_| self.on_back_stack_changed().is_some())
            .count()
    }

    /// Handle one back-stack signal from the host.
    ///
    /// Notifies back-stack listeners, then re-derives the current tag and
    /// notifies change listeners if it moved. While entries remain, the
    /// top entry's name is current. Once the stack is empty, the unit left
    /// in the popped entry's slot is, falling back to the default slot.
    pub fn on_back_stack_changed(&mut self) -> Option<BackStackChange> {
        let popped = self.observer.top().and_then(|entry| entry.name.clone());
        let change = self.observer.on_signal(&self.host)?;

        for listener in &mut self.back_stack_listeners {
            listener.on_back_stack_changed(
                change.is_added(),
                change.position,
                change.tag.as_deref(),
            );
        }

        let tag = match self.observer.top() {
            Some(top) => top.name.clone(),
            None => self.occupant_after_pop(popped.as_deref()),
        };

        if tag != self.current_tag {
            self.current_tag = tag.clone();
            if let Some(tag) = tag {
                let view_id = self.host.find_by_tag(&tag).and_then(|h| h.view_id());
                self.notify_view_changed(view_id, &tag, false);
            }
        }

        Some(change)
    }

    fn occupant_after_pop(&self, popped: Option<&str>) -> Option<String> {
        let popped_slot = popped.and_then(|tag| self.slots_by_tag.get(tag).copied());
        popped_slot
            .and_then(|slot| self.host.find_in_slot(slot))
            .or_else(|| self.default_slot.and_then(|slot| self.host.find_in_slot(slot)))
            .and_then(|handle| handle.tag().map(str::to_string))
    }

    pub fn back_stack_count(&self) -> usize {
        self.host.back_stack_entry_count()
    }

    /// Top entry as of the last classified back-stack change.
    pub fn top_back_stack_entry(&self) -> Option<&BackStackEntry> {
        self.observer.top()
    }

    pub fn pop_back_stack(&mut self) -> Result<(), ControllerError> {
        Ok(self.host.pop_back_stack()?)
    }

    pub fn pop_back_stack_immediate(&mut self) -> Result<bool, ControllerError> {
        Ok(self.host.pop_back_stack_immediate()?)
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<ViewHandle> {
        self.host.find_by_tag(tag)
    }

    /// Write attached state into `store`.
    pub fn dispatch_save_state(&self, store: &mut Bundle) {
        self.state.save_state(store);
    }

    /// Read attached state back from `store`.
    pub fn dispatch_restore_state(&mut self, store: &Bundle) {
        self.state.restore_state(store);
    }
}
