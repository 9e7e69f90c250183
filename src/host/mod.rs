//! Host transaction manager abstraction.
//!
//! The controller drives any type implementing [`TransactionHost`].
//! [`MemoryHost`] keeps everything in memory and is what the tests run on.

mod memory;
mod traits;

pub use memory::MemoryHost;
pub use traits::{BackStackEntry, BackStackSignal, HostError, TransactionHost};
