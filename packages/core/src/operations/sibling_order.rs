//! Dense sibling ordering
//!
//! Every sibling group keeps its `order` values as exactly `0..count`.
//! Structural edits assign a provisional order to the moved field and then
//! call [`reorder_siblings`] on each group whose membership changed.
//!
//! # Example
//!
//! ```rust
//! use formdesigner_core::models::FieldDefinition;
//! use formdesigner_core::operations::reorder_siblings;
//!
//! let mut fields = vec![
//!     FieldDefinition { id: "a".into(), order: 7, ..FieldDefinition::template("text", "A") },
//!     FieldDefinition { id: "b".into(), order: 3, ..FieldDefinition::template("text", "B") },
//! ];
//! reorder_siblings(&mut fields, None);
//! assert_eq!((fields[0].order, fields[1].order), (1, 0));
//! ```

use crate::models::FieldDefinition;
use std::collections::BTreeMap;

/// A sibling group whose orders are not `0..count`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderViolation {
    pub parent_id: Option<String>,
    /// Orders of the group in collection order
    pub orders: Vec<usize>,
}

/// Re-rank the sibling group of `parent_id` to `0, 1, 2, …`
///
/// Siblings are sorted by their current `order`; equal orders keep their
/// collection order (the sort is stable). Running it twice is a no-op.
pub fn reorder_siblings(fields: &mut [FieldDefinition], parent_id: Option<&str>) {
    let mut siblings: Vec<&mut FieldDefinition> = fields
        .iter_mut()
        .filter(|field| field.is_child_of(parent_id))
        .collect();

    siblings.sort_by_key(|field| field.order);

    for (index, field) in siblings.into_iter().enumerate() {
        field.order = index;
    }

    tracing::trace!(parent_id = ?parent_id, "reconciled sibling order");
}

/// Audit every sibling group for dense ordering
///
/// Returns one entry per group whose orders are not exactly `0..count`.
pub fn sibling_order_violations(fields: &[FieldDefinition]) -> Vec<OrderViolation> {
    let mut groups: BTreeMap<Option<&str>, Vec<usize>> = BTreeMap::new();
    for field in fields {
        groups
            .entry(field.parent_id.as_deref())
            .or_default()
            .push(field.order);
    }

    groups
        .into_iter()
        .filter_map(|(parent_id, orders)| {
            let mut sorted = orders.clone();
            sorted.sort_unstable();
            let dense = sorted.iter().enumerate().all(|(index, order)| index == *order);
            (!dense).then(|| OrderViolation {
                parent_id: parent_id.map(str::to_string),
                orders,
            })
        })
        .collect()
}
