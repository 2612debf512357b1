//! Store Change Events
//!
//! The hierarchy store notifies observers after every successful mutation,
//! once sibling order has been reconciled. Observers are plain callbacks
//! registered on the store; a UI binding layer subscribes one to schedule
//! a re-render.
//!
//! # Event Flow
//!
//! 1. A gesture calls `add_field` or `move_field`
//! 2. The store mutates the collection and reconciles affected sibling groups
//! 3. Each subscribed callback receives the `StoreEvent`

use crate::models::FieldDefinition;
use serde::{Deserialize, Serialize};

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Change notifications emitted by the hierarchy store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StoreEvent {
    /// A new field was placed (state after reconciliation)
    #[serde(rename = "fieldAdded")]
    FieldAdded { field: FieldDefinition },

    /// An existing field changed parent or position
    #[serde(rename = "fieldMoved", rename_all = "camelCase")]
    FieldMoved {
        field_id: String,
        from_parent: Option<String>,
        to_parent: Option<String>,
        order: usize,
    },
}

impl StoreEvent {
    /// Get a string representation of the event type
    pub fn event_type(&self) -> &str {
        match self {
            StoreEvent::FieldAdded { .. } => "field:added",
            StoreEvent::FieldMoved { .. } => "field:moved",
        }
    }

    /// ID of the field the event concerns
    pub fn field_id(&self) -> &str {
        match self {
            StoreEvent::FieldAdded { field } => &field.id,
            StoreEvent::FieldMoved { field_id, .. } => field_id,
        }
    }
}
