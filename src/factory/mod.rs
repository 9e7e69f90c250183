//! View factories: turning ids into handles.

mod composite;
mod traits;

pub use composite::CompositeFactory;
pub use traits::ViewFactory;
