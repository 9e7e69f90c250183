//! viewstack - swap view controllers inside a host, tracked against its back stack.
//!
//! # Architecture
//!
//! ```text
//! caller ──→ Controller ──→ ViewFactory (optional, id-based shows)
//!               │
//!               ├──→ TransactionHost::commit ──→ host applies later
//!               │
//!               └──← back-stack signal ──← host
//! ```
//!
//! - [`controller`] - show/replace algorithm, back-stack observation, listeners
//! - [`factory`] - factory trait and the composite chain
//! - [`host`] - host transaction manager boundary and an in-memory host
//! - [`transaction`] - transactions, options, transitions
//! - [`config`] - controller configuration and its TOML loader
//! - [`logging`] - optional tracing subscriber setup
//!
//! A view controller is an opaque [`ViewHandle`] identified by a tag; the
//! controller never looks inside it.

pub mod bundle;
pub mod config;
pub mod controller;
pub mod factory;
pub mod handle;
pub mod host;
pub mod logging;
pub mod transaction;

pub use bundle::Bundle;
pub use config::{ConfigError, ControllerConfig};
pub use controller::{
    BackStackChange, BackStackChangeKind, BackStackListener, Controller, ControllerError,
    SavedState, ShowOutcome, ViewChangeListener,
};
pub use factory::{CompositeFactory, ViewFactory};
pub use handle::{SlotId, ViewHandle, ViewId};
pub use host::{BackStackEntry, HostError, MemoryHost, TransactionHost};
pub use transaction::{Transaction, TransactionOptions, Transition, DEFAULT_TAG};
