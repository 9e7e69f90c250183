//! In-process host that keeps slots and the back stack in memory.
//!
//! Behaves like a UI toolkit's transaction manager without any rendering:
//! commits are queued until [`TransactionHost::execute_pending_transactions`]
//! runs (or immediately with [`MemoryHost::auto_execute`]), back-stack
//! records remember what they changed so pops can undo it, and every
//! back-stack change is signalled to subscribers.

use std::collections::{BTreeMap, VecDeque};
use std::sync::mpsc::{self, Receiver, Sender};

use uuid::Uuid;

use crate::handle::{SlotId, ViewHandle};
use crate::host::traits::{BackStackEntry, BackStackSignal, HostError, TransactionHost};
use crate::transaction::{Transaction, TransactionOp};

#[derive(Debug)]
enum Pending {
    Commit(Transaction),
    Pop,
}

#[derive(Debug, Clone)]
struct Attached {
    handle: ViewHandle,
    options_menu: bool,
}

/// What one back-stacked transaction did, so a pop can reverse it.
#[derive(Debug)]
struct BackStackRecord {
    name: Option<String>,
    added: Vec<(SlotId, Uuid)>,
    removed: Vec<(SlotId, Vec<Attached>)>,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    slots: BTreeMap<SlotId, Vec<Attached>>,
    back_stack: Vec<BackStackRecord>,
    pending: VecDeque<Pending>,
    subscribers: Vec<Sender<BackStackSignal>>,
    auto_execute: bool,
    commit_count: usize,
    animations: Vec<[u32; 4]>,
    fail_next_commit: Option<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply each transaction as soon as it is committed.
    pub fn auto_execute(mut self) -> Self {
        self.auto_execute = true;
        self
    }

    /// Number of transactions committed so far (applied or not).
    pub fn commit_count(&self) -> usize {
        self.commit_count
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Units attached to `slot`, bottom first.
    pub fn attached(&self, slot: SlotId) -> Vec<&ViewHandle> {
        self.slots
            .get(&slot)
            .map(|units| units.iter().map(|a| &a.handle).collect())
            .unwrap_or_default()
    }

    pub fn has_options_menu(&self, handle: &ViewHandle) -> bool {
        self.find_attached(handle.id())
            .map(|a| a.options_menu)
            .unwrap_or(false)
    }

    /// Animation sets applied so far, in application order.
    pub fn applied_animations(&self) -> &[[u32; 4]] {
        &self.animations
    }

    /// Make the next commit fail with `message`.
    pub fn fail_next_commit(&mut self, message: impl Into<String>) {
        self.fail_next_commit = Some(message.into());
    }

    fn find_attached(&self, id: Uuid) -> Option<&Attached> {
        self.slots
            .values()
            .flat_map(|units| units.iter())
            .find(|a| a.handle.id() == id)
    }

    fn signal(&mut self) {
        self.subscribers.retain(|tx| tx.send(BackStackSignal).is_ok());
    }

    fn apply(&mut self, tx: Transaction) {
        let back_stack_name = tx.back_stack_name().map(str::to_string);
        let back_stacked = back_stack_name.is_some();
        let mut record = BackStackRecord {
            name: back_stack_name,
            added: Vec::new(),
            removed: Vec::new(),
        };

        for op in tx.into_ops() {
            match op {
                TransactionOp::SetAnimations {
                    enter,
                    exit,
                    pop_enter,
                    pop_exit,
                } => self.animations.push([enter, exit, pop_enter, pop_exit]),
                TransactionOp::Add { slot, handle, .. } => {
                    record.added.push((slot, handle.id()));
                    self.slots.entry(slot).or_default().push(Attached {
                        handle,
                        options_menu: false,
                    });
                }
                TransactionOp::Replace { slot, handle, .. } => {
                    let units = self.slots.entry(slot).or_default();
                    let previous = std::mem::take(units);
                    record.added.push((slot, handle.id()));
                    units.push(Attached {
                        handle,
                        options_menu: false,
                    });
                    if !previous.is_empty() {
                        record.removed.push((slot, previous));
                    }
                }
            }
        }

        if back_stacked {
            self.back_stack.push(record);
            self.signal();
        }
    }

    fn pop(&mut self) -> bool {
        let Some(record) = self.back_stack.pop() else {
            return false;
        };

        for (slot, id) in record.added.iter().rev() {
            if let Some(units) = self.slots.get_mut(slot) {
                units.retain(|a| a.handle.id() != *id);
            }
        }
        for (slot, units) in record.removed {
            self.slots.entry(slot).or_default().extend(units);
        }

        self.signal();
        true
    }

    fn drain(&mut self) -> bool {
        let mut ran = false;
        while let Some(next) = self.pending.pop_front() {
            ran = true;
            match next {
                Pending::Commit(tx) => self.apply(tx),
                Pending::Pop => {
                    self.pop();
                }
            }
        }
        ran
    }
}

impl TransactionHost for MemoryHost {
    fn commit(&mut self, tx: Transaction) -> Result<(), HostError> {
        if let Some(message) = self.fail_next_commit.take() {
            return Err(HostError::new(message));
        }
        self.commit_count += 1;
        self.pending.push_back(Pending::Commit(tx));
        if self.auto_execute {
            self.drain();
        }
        Ok(())
    }

    fn execute_pending_transactions(&mut self) -> Result<bool, HostError> {
        Ok(self.drain())
    }

    fn back_stack_entry_count(&self) -> usize {
        self.back_stack.len()
    }

    fn back_stack_entry_at(&self, index: usize) -> Option<BackStackEntry> {
        self.back_stack.get(index).map(|record| BackStackEntry {
            position: index,
            name: record.name.clone(),
        })
    }

    fn pop_back_stack(&mut self) -> Result<(), HostError> {
        self.pending.push_back(Pending::Pop);
        if self.auto_execute {
            self.drain();
        }
        Ok(())
    }

    fn pop_back_stack_immediate(&mut self) -> Result<bool, HostError> {
        self.drain();
        Ok(self.pop())
    }

    fn find_by_tag(&self, tag: &str) -> Option<ViewHandle> {
        self.slots
            .values()
            .flat_map(|units| units.iter().rev())
            .find(|a| a.handle.tag() == Some(tag))
            .map(|a| a.handle.clone())
    }

    fn find_in_slot(&self, slot: SlotId) -> Option<ViewHandle> {
        self.slots
            .get(&slot)
            .and_then(|units| units.last())
            .map(|a| a.handle.clone())
    }

    fn set_has_options_menu(&mut self, handle: &ViewHandle, enabled: bool) {
        let id = handle.id();
        if let Some(attached) = self
            .slots
            .values_mut()
            .flat_map(|units| units.iter_mut())
            .find(|a| a.handle.id() == id)
        {
            attached.options_menu = enabled;
        }
    }

    fn subscribe_back_stack(&mut self) -> Receiver<BackStackSignal> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }
}
