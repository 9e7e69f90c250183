//! Transactions handed to the host, and the options that shape them.
//!
//! A [`Transaction`] is a plain list of operations in the order the
//! controller recorded them. The host decides when to apply it.

mod options;
mod transition;

pub use options::{TransactionOptions, TransactionOptionsBuilder, DEFAULT_TAG};
pub use transition::{Transition, NO_ANIMATION};

use crate::handle::{SlotId, ViewHandle};

/// One recorded operation.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionOp {
    /// Animations for the operations that follow.
    SetAnimations {
        enter: u32,
        exit: u32,
        pop_enter: u32,
        pop_exit: u32,
    },
    /// Add without removing the slot's current units.
    Add {
        slot: SlotId,
        handle: ViewHandle,
        tag: String,
    },
    /// Remove the slot's current units, then add.
    Replace {
        slot: SlotId,
        handle: ViewHandle,
        tag: String,
    },
}

/// Pending host transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    ops: Vec<TransactionOp>,
    back_stack_name: Option<String>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the four animation references, in enter/exit/pop-enter/pop-exit order.
    pub fn set_animations(&mut self, transition: &Transition) -> &mut Self {
        let [enter, exit, pop_enter, pop_exit] = transition.animations();
        self.ops.push(TransactionOp::SetAnimations {
            enter,
            exit,
            pop_enter,
            pop_exit,
        });
        self
    }

    pub fn add(&mut self, slot: SlotId, handle: ViewHandle, tag: &str) -> &mut Self {
        self.ops.push(TransactionOp::Add {
            slot,
            handle,
            tag: tag.to_string(),
        });
        self
    }

    pub fn replace(&mut self, slot: SlotId, handle: ViewHandle, tag: &str) -> &mut Self {
        self.ops.push(TransactionOp::Replace {
            slot,
            handle,
            tag: tag.to_string(),
        });
        self
    }

    /// Mark the transaction to be pushed onto the back stack under `name`.
    pub fn add_to_back_stack(&mut self, name: &str) -> &mut Self {
        self.back_stack_name = Some(name.to_string());
        self
    }

    pub fn ops(&self) -> &[TransactionOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<TransactionOp> {
        self.ops
    }

    pub fn back_stack_name(&self) -> Option<&str> {
        self.back_stack_name.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_keep_recording_order() {
        let mut tx = Transaction::new();
        tx.set_animations(&Transition::new("slide", 1, 2, 3, 4))
            .replace(SlotId(1), ViewHandle::new("Home"), "home")
            .add_to_back_stack("home");

        assert_eq!(tx.ops().len(), 2);
        assert!(matches!(
            tx.ops()[0],
            TransactionOp::SetAnimations {
                enter: 1,
                exit: 2,
                pop_enter: 3,
                pop_exit: 4
            }
        ));
        assert!(matches!(&tx.ops()[1], TransactionOp::Replace { tag, .. } if tag == "home"));
        assert_eq!(tx.back_stack_name(), Some("home"));
    }

    #[test]
    fn new_transaction_is_empty() {
        let tx = Transaction::new();
        assert!(tx.is_empty());
        assert_eq!(tx.back_stack_name(), None);
    }
}
