//! Form Designer Core
//!
//! This crate keeps the field hierarchy of a form-building surface consistent
//! and turns drag gestures into structural edits on it.
//!
//! # Architecture
//!
//! - **Flat collection**: fields reference their parent by id; containment is
//!   derived by filtering, never stored
//! - **Dense sibling order**: every sibling group is re-ranked to `0..count`
//!   after each edit
//! - **Fail-soft gestures**: malformed payloads, unknown ids and cyclic drops
//!   leave state unchanged instead of raising
//!
//! # Modules
//!
//! - [`models`] - Field data structures and the container type set
//! - [`operations`] - Sibling ordering and the descendant guard
//! - [`drag`] - Drag payload codec and drop position resolution
//! - [`services`] - The hierarchy store and drop orchestration
//! - [`config`] - Designer configuration

pub mod config;
pub mod drag;
pub mod models;
pub mod operations;
pub mod services;

// Re-export commonly used types
pub use config::DesignerConfig;
pub use drag::{DragPayload, DragSource, DropPosition};
pub use models::*;
pub use services::*;
