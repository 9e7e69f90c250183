//! Back-stack delta classification.
//!
//! The host only says "the back stack changed". The observer compares the
//! entry count with the last one it saw and turns the signal into an
//! add or a removal, surfacing the entry that is now on top. Signals that
//! leave the count unchanged produce nothing.

use crate::host::{BackStackEntry, TransactionHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackStackChangeKind {
    Added,
    Removed,
}

/// One classified delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackStackChange {
    pub kind: BackStackChangeKind,
    pub position: usize,
    pub tag: Option<String>,
}

impl BackStackChange {
    pub fn is_added(&self) -> bool {
        self.kind == BackStackChangeKind::Added
    }

    fn from_entry(kind: BackStackChangeKind, entry: &BackStackEntry) -> Self {
        Self {
            kind,
            position: entry.position,
            tag: entry.name.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BackStackObserver {
    attached: bool,
    last_count: usize,
    top: Option<BackStackEntry>,
}

impl BackStackObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Start observing. Entries already on the stack are taken as the
    /// baseline, not reported. Returns false if already attached.
    pub fn attach<H: TransactionHost + ?Sized>(&mut self, host: &H) -> bool {
        if self.attached {
            return false;
        }
        self.attached = true;
        self.last_count = host.back_stack_entry_count();
        self.top = self
            .last_count
            .checked_sub(1)
            .and_then(|index| host.back_stack_entry_at(index));
        true
    }

    /// Cached top entry.
    pub fn top(&self) -> Option<&BackStackEntry> {
        self.top.as_ref()
    }

    pub fn last_count(&self) -> usize {
        self.last_count
    }

    /// Handle one back-stack signal.
    pub fn on_signal<H: TransactionHost + ?Sized>(&mut self, host: &H) -> Option<BackStackChange> {
        let count = host.back_stack_entry_count();
        let previous = self.last_count;
        if count == previous {
            return None;
        }
        self.last_count = count;

        let new_top = count.checked_sub(1).and_then(|index| host.back_stack_entry_at(index));

        let change = if count > previous {
            let entry = new_top.clone().unwrap_or(BackStackEntry {
                position: count - 1,
                name: None,
            });
            BackStackChange::from_entry(BackStackChangeKind::Added, &entry)
        } else if let Some(entry) = &new_top {
            BackStackChange::from_entry(BackStackChangeKind::Removed, entry)
        } else {
            // Emptied: report the entry that was on top one last time.
            match &self.top {
                Some(entry) => BackStackChange::from_entry(BackStackChangeKind::Removed, entry),
                None => BackStackChange {
                    kind: BackStackChangeKind::Removed,
                    position: 0,
                    tag: None,
                },
            }
        };

        tracing::debug!(
            previous,
            count,
            added = change.is_added(),
            position = change.position,
            tag = change.tag.as_deref().unwrap_or(""),
            "Back stack changed"
        );

        self.top = new_top;
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{SlotId, ViewHandle};
    use crate::host::MemoryHost;
    use crate::transaction::Transaction;

    fn push(host: &mut MemoryHost, tag: &str) {
        let mut tx = Transaction::new();
        tx.replace(SlotId(1), ViewHandle::new(tag).with_tag(tag), tag)
            .add_to_back_stack(tag);
        host.commit(tx).unwrap();
    }

    #[test]
    fn attach_only_once_and_takes_baseline() {
        let mut host = MemoryHost::new().auto_execute();
        push(&mut host, "a");

        let mut observer = BackStackObserver::new();
        assert!(observer.attach(&host));
        assert!(!observer.attach(&host));
        assert_eq!(observer.last_count(), 1);
        assert_eq!(observer.top().and_then(|e| e.name.as_deref()), Some("a"));
        assert!(observer.on_signal(&host).is_none());
    }

    #[test]
    fn count_sequence_classifies_adds_and_removals() {
        let mut host = MemoryHost::new().auto_execute();
        let mut observer = BackStackObserver::new();
        observer.attach(&host);

        push(&mut host, "a");
        let first = observer.on_signal(&host).unwrap();
        push(&mut host, "b");
        let second = observer.on_signal(&host).unwrap();
        host.pop_back_stack_immediate().unwrap();
        let third = observer.on_signal(&host).unwrap();
        host.pop_back_stack_immediate().unwrap();
        let fourth = observer.on_signal(&host).unwrap();

        assert_eq!(
            (first.kind, first.position, first.tag.as_deref()),
            (BackStackChangeKind::Added, 0, Some("a"))
        );
        assert_eq!(
            (second.kind, second.position, second.tag.as_deref()),
            (BackStackChangeKind::Added, 1, Some("b"))
        );
        assert_eq!(
            (third.kind, third.position, third.tag.as_deref()),
            (BackStackChangeKind::Removed, 0, Some("a"))
        );
        assert_eq!(
            (fourth.kind, fourth.position, fourth.tag.as_deref()),
            (BackStackChangeKind::Removed, 0, Some("a"))
        );
        assert!(observer.top().is_none());
    }

    #[test]
    fn spurious_signal_is_ignored() {
        let mut host = MemoryHost::new().auto_execute();
        let mut observer = BackStackObserver::new();
        observer.attach(&host);
        push(&mut host, "a");

        assert!(observer.on_signal(&host).is_some());
        assert!(observer.on_signal(&host).is_none());
        assert!(observer.on_signal(&host).is_none());
    }
}
