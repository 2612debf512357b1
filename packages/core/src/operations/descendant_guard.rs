//! Cycle prevention for reparenting moves
//!
//! A field may never become its own ancestor. Before a container is dropped
//! inside another field, the caller checks that the proposed parent is not
//! the dragged field or anything beneath it.

use crate::models::FieldDefinition;
use std::collections::HashSet;

/// Check whether `node_id` lives anywhere under `ancestor_id`
///
/// The walk starts from the direct children of `ancestor_id`, so a field is
/// never its own descendant. A visited set bounds the walk even if the
/// collection already contains a cycle.
pub fn is_descendant(fields: &[FieldDefinition], ancestor_id: &str, node_id: &str) -> bool {
    let mut stack = vec![ancestor_id];
    let mut visited: HashSet<&str> = HashSet::new();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }

        for child in fields.iter().filter(|f| f.is_child_of(Some(current))) {
            if child.id == node_id {
                return true;
            }
            stack.push(child.id.as_str());
        }
    }

    false
}

/// Check whether `node_id` may be placed under `new_parent_id`
///
/// Moving to the root is always allowed. Otherwise the new parent must be
/// neither the node itself nor one of its descendants.
pub fn can_reparent(fields: &[FieldDefinition], node_id: &str, new_parent_id: Option<&str>) -> bool {
    match new_parent_id {
        None => true,
        Some(parent_id) => parent_id != node_id && !is_descendant(fields, node_id, parent_id),
    }
}
