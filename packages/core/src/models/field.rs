//! Field Data Structures
//!
//! This module defines the `FieldDefinition` struct placed on the form canvas
//! and the palette-side `FieldToolConfig` that seeds new fields.
//!
//! # Hierarchy
//!
//! - **Parent reference**: `parent_id` is a lookup key, not ownership. Children
//!   of a field are found by filtering the whole collection on `parent_id`.
//! - **Sibling order**: `order` is a dense, zero-based rank inside one sibling
//!   group (all fields sharing a `parent_id`, the root group included).
//! - **Containers**: only a closed set of field types may hold children.
//!
//! # Examples
//!
//! ```rust
//! use formdesigner_core::models::FieldDefinition;
//!
//! let group = FieldDefinition::template("container", "Billing");
//! assert!(group.is_container());
//!
//! let input = FieldDefinition::template("text", "First name");
//! assert!(!input.is_container());
//! ```

use serde::{Deserialize, Serialize};

/// Field types allowed to hold children.
pub const CONTAINER_TYPES: [&str; 4] = ["group-header", "container", "payment", "receipt"];

/// Returns true when `field_type` belongs to the container set.
pub fn is_container_type(field_type: &str) -> bool {
    CONTAINER_TYPES.contains(&field_type)
}

/// One placed form element.
///
/// # Fields
///
/// - `id`: Unique identifier, assigned by the store and never changed
/// - `field_type`: Type tag (e.g., "text", "checkbox", "container")
/// - `label`: Display text, opaque to the hierarchy logic
/// - `order`: Zero-based rank among siblings
/// - `parent_id`: Parent field ID (`None` means root level)
/// - `children`: Nested copy carried for renderers; never populated by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique identifier (absent on palette configs)
    #[serde(default)]
    pub id: String,

    /// Field type tag
    #[serde(rename = "type")]
    pub field_type: String,

    /// Display text
    pub label: String,

    /// Rank among siblings sharing `parent_id`
    #[serde(default)]
    pub order: usize,

    /// Parent field ID (lookup key, not ownership)
    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldDefinition>,
}

impl FieldDefinition {
    /// Create an unplaced field usable as an `add_field` config.
    ///
    /// The id is empty and the order is zero; the store overwrites both
    /// when the field is placed.
    pub fn template(field_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            field_type: field_type.into(),
            label: label.into(),
            order: 0,
            parent_id: None,
            children: Vec::new(),
        }
    }

    /// Whether this field may hold children
    pub fn is_container(&self) -> bool {
        is_container_type(&self.field_type)
    }

    /// Whether this field sits in the sibling group of `parent_id`
    pub fn is_child_of(&self, parent_id: Option<&str>) -> bool {
        self.parent_id.as_deref() == parent_id
    }
}

/// Defaults a palette tool applies to a new field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTemplate {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
}

/// Palette entry describing a tool the user can drag onto the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldToolConfig {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub default_config: FieldTemplate,
}

impl FieldToolConfig {
    /// Build the unplaced field this tool produces
    pub fn to_field(&self) -> FieldDefinition {
        FieldDefinition::template(
            self.default_config.field_type.clone(),
            self.default_config.label.clone(),
        )
    }
}
