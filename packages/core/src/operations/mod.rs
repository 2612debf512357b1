//! Hierarchy Operations
//!
//! Pure functions over the field collection that the store composes:
//!
//! - `sibling_order` - Dense zero-based ordering inside each sibling group
//! - `descendant_guard` - Cycle prevention for reparenting moves

pub mod descendant_guard;
pub mod sibling_order;

pub use descendant_guard::{can_reparent, is_descendant};
pub use sibling_order::{reorder_siblings, sibling_order_violations, OrderViolation};
