//! Hierarchy Store - Field Collection Owner
//!
//! This module owns the authoritative field collection and exposes the
//! structural edits a form designer performs:
//!
//! - `add_field` - Place a new field at a sibling position
//! - `move_field` - Reparent and/or reposition an existing field
//! - Read views (`fields`, `sorted_fields`, `children_of`)
//! - Cycle checks delegated to the descendant guard
//!
//! # Sibling Order
//!
//! An edit gives the field a provisional `order` equal to the requested
//! index, then reconciles each sibling group whose membership changed, so
//! `order` stays exactly `0..count` per group. Reconciliation is a stable
//! sort: when the provisional order ties with a sibling, the field that
//! comes first in the collection wins the lower rank.
//!
//! # Failure Behavior
//!
//! Gestures never raise. Moving an unknown field is a silent no-op, and the
//! store does not consult the descendant guard on its own: callers that
//! reparent containers check `can_reparent` first (see `DropController`).
//!
//! # Threading
//!
//! The store has a single writer (the UI event loop). Observers run
//! synchronously inside the mutating call and only see `&StoreEvent`, so
//! they cannot re-enter the store.

use crate::config::DesignerConfig;
use crate::models::FieldDefinition;
use crate::operations::{can_reparent, is_descendant, reorder_siblings, sibling_order_violations};
use crate::services::error::DesignerError;
use crate::services::events::{StoreEvent, SubscriptionId};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use uuid::Uuid;

/// Number of UUID hex characters kept in generated IDs
const ID_SUFFIX_LEN: usize = 8;

type Observer = Box<dyn FnMut(&StoreEvent)>;

/// Owner of the field hierarchy
pub struct HierarchyStore {
    fields: Vec<FieldDefinition>,
    config: DesignerConfig,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for HierarchyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchyStore")
            .field("fields", &self.fields)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for HierarchyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyStore {
    /// Create an empty store with the default configuration
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            config: DesignerConfig::default(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create an empty store with a validated configuration
    pub fn with_config(config: DesignerConfig) -> Result<Self, DesignerError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Create a store from a previously saved collection
    ///
    /// Every sibling group is reconciled on load, so gaps or duplicate
    /// orders in the input are repaired. Duplicate ids and parent cycles
    /// cannot be repaired and are rejected.
    pub fn from_fields(
        fields: Vec<FieldDefinition>,
        config: DesignerConfig,
    ) -> Result<Self, DesignerError> {
        let mut store = Self::with_config(config)?;
        check_structure(&fields)?;
        store.fields = fields;

        let parents: BTreeSet<Option<String>> =
            store.fields.iter().map(|f| f.parent_id.clone()).collect();
        for parent_id in &parents {
            reorder_siblings(&mut store.fields, parent_id.as_deref());
        }

        tracing::debug!(
            "Loaded {} fields across {} sibling groups",
            store.fields.len(),
            parents.len()
        );
        Ok(store)
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    /// All fields in collection (insertion) order
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get_field(&self, field_id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// All fields sorted by `order` ascending
    ///
    /// Siblings from different groups interleave by their order value;
    /// grouping into a nested tree is left to the renderer.
    pub fn sorted_fields(&self) -> Vec<&FieldDefinition> {
        let mut sorted: Vec<&FieldDefinition> = self.fields.iter().collect();
        sorted.sort_by_key(|f| f.order);
        sorted
    }

    /// Direct children of `parent_id` (root when `None`), sorted by order
    pub fn children_of(&self, parent_id: Option<&str>) -> Vec<&FieldDefinition> {
        let mut children: Vec<&FieldDefinition> = self
            .fields
            .iter()
            .filter(|f| f.is_child_of(parent_id))
            .collect();
        children.sort_by_key(|f| f.order);
        children
    }

    /// Place a new field built from `config` at `insert_index` under `parent_id`
    ///
    /// The id, parent and order of `config` are replaced. `insert_index` is
    /// not bounds-checked: anything past the end appends. Returns the new
    /// field's id.
    pub fn add_field(
        &mut self,
        config: &FieldDefinition,
        insert_index: usize,
        parent_id: Option<&str>,
    ) -> String {
        let id = self.create_id();
        let field = FieldDefinition {
            id: id.clone(),
            parent_id: parent_id.map(str::to_string),
            order: insert_index,
            children: Vec::new(),
            ..config.clone()
        };

        self.fields.push(field);
        reorder_siblings(&mut self.fields, parent_id);
        self.debug_check_order();

        let added = self.fields[self.fields.len() - 1].clone();
        tracing::debug!(
            field_id = %added.id,
            field_type = %added.field_type,
            parent_id = ?parent_id,
            order = added.order,
            "Added field"
        );
        self.notify(&StoreEvent::FieldAdded { field: added });

        id
    }

    /// Move `field_id` to `insert_index` under `target_parent_id`
    ///
    /// Returns `false` (and changes nothing) when the field does not exist.
    /// The target group is always reconciled; `previous_parent_id`'s group
    /// is reconciled too when it differs from the target. Cycle checks are
    /// the caller's job.
    pub fn move_field(
        &mut self,
        field_id: &str,
        insert_index: usize,
        target_parent_id: Option<&str>,
        previous_parent_id: Option<&str>,
    ) -> bool {
        let Some(position) = self.fields.iter().position(|f| f.id == field_id) else {
            tracing::debug!("Ignoring move of unknown field {}", field_id);
            return false;
        };

        let former_parent_id = self.fields[position].parent_id.clone();

        let field = &mut self.fields[position];
        field.parent_id = target_parent_id.map(str::to_string);
        field.order = insert_index;

        reorder_siblings(&mut self.fields, target_parent_id);
        if target_parent_id != previous_parent_id {
            reorder_siblings(&mut self.fields, previous_parent_id);
        }
        // A stale previous_parent_id must not leave the real source group with a gap
        let former = former_parent_id.as_deref();
        if former != target_parent_id && former != previous_parent_id {
            reorder_siblings(&mut self.fields, former);
        }
        self.debug_check_order();

        let order = self.fields[position].order;
        tracing::debug!(
            field_id,
            from_parent = ?former_parent_id,
            to_parent = ?target_parent_id,
            order,
            "Moved field"
        );
        self.notify(&StoreEvent::FieldMoved {
            field_id: field_id.to_string(),
            from_parent: former_parent_id,
            to_parent: target_parent_id.map(str::to_string),
            order,
        });

        true
    }

    /// Whether `node_id` lies anywhere beneath `ancestor_id`
    pub fn is_descendant(&self, ancestor_id: &str, node_id: &str) -> bool {
        is_descendant(&self.fields, ancestor_id, node_id)
    }

    /// Whether `field_id` may be placed under `new_parent_id` without a cycle
    pub fn can_reparent(&self, field_id: &str, new_parent_id: Option<&str>) -> bool {
        can_reparent(&self.fields, field_id, new_parent_id)
    }

    /// Register a callback invoked after every successful mutation
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a callback; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn notify(&mut self, event: &StoreEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }

    fn create_id(&self) -> String {
        loop {
            let suffix = Uuid::new_v4().simple().to_string();
            let id = format!("{}{}", self.config.id_prefix, &suffix[..ID_SUFFIX_LEN]);
            if self.get_field(&id).is_none() {
                return id;
            }
        }
    }

    fn debug_check_order(&self) {
        debug_assert!(
            sibling_order_violations(&self.fields).is_empty(),
            "sibling order not dense: {:?}",
            sibling_order_violations(&self.fields)
        );
    }
}

/// Reject collections with repeated ids or a parent cycle
fn check_structure(fields: &[FieldDefinition]) -> Result<(), DesignerError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());
    if let Some(duplicate) = fields.iter().find(|f| !seen.insert(f.id.as_str())) {
        return Err(DesignerError::invalid_config(format!(
            "duplicate field id '{}'",
            duplicate.id
        )));
    }

    if let Some(cyclic) = fields.iter().find(|f| is_descendant(fields, &f.id, &f.id)) {
        return Err(DesignerError::invalid_config(format!(
            "field '{}' is its own ancestor",
            cyclic.id
        )));
    }

    Ok(())
}

// Comprehensive tests in separate module
#[cfg(test)]
#[path = "hierarchy_store_test.rs"]
mod hierarchy_store_test;
