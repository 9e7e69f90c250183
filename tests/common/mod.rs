//! Shared test utilities: recording listeners and stub factories.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use viewstack::{
    Bundle, Controller, ControllerConfig, MemoryHost, SlotId, TransactionOptions, ViewFactory,
    ViewHandle, ViewId,
};

pub const MAIN_SLOT: SlotId = SlotId(100);

/// `(id, tag, from_factory)` for every change notification.
pub type ChangeLog = Arc<Mutex<Vec<(Option<ViewId>, String, bool)>>>;
/// `(added, position, tag)` for every back-stack notification.
pub type BackStackLog = Arc<Mutex<Vec<(bool, usize, Option<String>)>>>;
/// `(factory label, method, id)` for every factory call.
pub type CallLog = Arc<Mutex<Vec<(String, &'static str, i32)>>>;

// -- Controller helpers -------------------------------------------------------

pub fn make_controller() -> Controller<MemoryHost> {
    Controller::new(
        MemoryHost::new(),
        ControllerConfig::default().with_default_slot(MAIN_SLOT),
    )
}

pub fn make_controller_without_slot() -> Controller<MemoryHost> {
    Controller::new(MemoryHost::new(), ControllerConfig::default())
}

/// Attach a change listener that records into the returned log.
pub fn record_changes<S: viewstack::SavedState>(
    controller: &mut Controller<MemoryHost, S>,
) -> ChangeLog {
    let log: ChangeLog = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    controller.add_change_listener(move |id: Option<ViewId>, tag: &str, from_factory: bool| {
        sink.lock().push((id, tag.to_string(), from_factory));
    });
    log
}

/// Attach a back-stack listener that records into the returned log.
pub fn record_back_stack<S: viewstack::SavedState>(
    controller: &mut Controller<MemoryHost, S>,
) -> BackStackLog {
    let log: BackStackLog = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    controller.add_back_stack_listener(move |added: bool, position: usize, tag: Option<&str>| {
        sink.lock().push((added, position, tag.map(str::to_string)));
    });
    log
}

pub fn tagged(tag: &str) -> TransactionOptions {
    TransactionOptions::builder().tag(tag).build()
}

// -- Factory stubs ------------------------------------------------------------

#[derive(Clone)]
struct StubEntry {
    tag: String,
    creates: bool,
    options: Option<TransactionOptions>,
}

/// Factory answering from a fixed table and logging every call.
pub struct StubFactory {
    label: String,
    entries: BTreeMap<i32, StubEntry>,
    calls: CallLog,
}

impl StubFactory {
    pub fn new(label: &str, calls: CallLog) -> Self {
        Self {
            label: label.to_string(),
            entries: BTreeMap::new(),
            calls,
        }
    }

    /// Provide `id` under `tag`.
    pub fn provides(mut self, id: i32, tag: &str) -> Self {
        self.entries.insert(
            id,
            StubEntry {
                tag: tag.to_string(),
                creates: true,
                options: None,
            },
        );
        self
    }

    /// Provide `id` with its own options.
    pub fn provides_with(mut self, id: i32, tag: &str, options: TransactionOptions) -> Self {
        self.entries.insert(
            id,
            StubEntry {
                tag: tag.to_string(),
                creates: true,
                options: Some(options),
            },
        );
        self
    }

    /// Claim `id` but return no instance for it.
    pub fn claims_without_instance(mut self, id: i32) -> Self {
        self.entries.insert(
            id,
            StubEntry {
                tag: format!("broken-{}", id),
                creates: false,
                options: None,
            },
        );
        self
    }

    fn log(&self, method: &'static str, id: ViewId) {
        self.calls.lock().push((self.label.clone(), method, id.0));
    }
}

impl ViewFactory for StubFactory {
    fn name(&self) -> &str {
        &self.label
    }

    fn is_provided(&self, id: ViewId) -> bool {
        self.log("is_provided", id);
        self.entries.contains_key(&id.0)
    }

    fn create_instance(&self, id: ViewId, params: Option<&Bundle>) -> Option<ViewHandle> {
        self.log("create_instance", id);
        let entry = self.entries.get(&id.0)?;
        if !entry.creates {
            return None;
        }
        let handle = ViewHandle::new(format!("{}Screen", self.label)).with_view_id(id);
        Some(match params {
            Some(params) => handle.with_params(params.clone()),
            None => handle,
        })
    }

    fn tag(&self, id: ViewId) -> Option<String> {
        self.log("tag", id);
        self.entries.get(&id.0).map(|e| e.tag.clone())
    }

    fn transaction_options(
        &self,
        id: ViewId,
        _params: Option<&Bundle>,
    ) -> Option<TransactionOptions> {
        self.log("transaction_options", id);
        self.entries.get(&id.0).and_then(|e| e.options.clone())
    }
}

pub fn new_call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Labels of factories that received a lookup other than `is_provided` for `id`.
pub fn answering_factories(calls: &CallLog, id: i32) -> Vec<String> {
    let mut labels: Vec<String> = calls
        .lock()
        .iter()
        .filter(|(_, method, call_id)| *call_id == id && *method != "is_provided")
        .map(|(label, _, _)| label.clone())
        .collect();
    labels.dedup();
    labels
}
