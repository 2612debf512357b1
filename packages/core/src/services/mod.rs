//! Services
//!
//! This module contains the stateful layer built on the pure operations:
//!
//! - `HierarchyStore` - Owner of the field collection; add/move and read views
//! - `DropController` - Applies one drop gesture to the store
//! - `StoreEvent` - Change notifications delivered to subscribed observers
//! - `DesignerError` - Configuration and encoding errors

pub mod drop_controller;
pub mod error;
pub mod events;
pub mod hierarchy_store;

pub use drop_controller::{DropController, DropOutcome, DropRejection, DropTarget};
pub use error::DesignerError;
pub use events::{StoreEvent, SubscriptionId};
pub use hierarchy_store::HierarchyStore;
