//! Data Models
//!
//! This module contains the data structures shared by every layer:
//!
//! - `FieldDefinition` - A placed form element in the field hierarchy
//! - `FieldToolConfig` - Palette entry that seeds new fields
//! - Container type set and predicate

mod field;

pub use field::{
    is_container_type, FieldDefinition, FieldTemplate, FieldToolConfig, CONTAINER_TYPES,
};
