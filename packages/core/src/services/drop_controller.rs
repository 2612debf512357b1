//! Drop Controller - One Drag Gesture, End to End
//!
//! Turns a drop event into at most one store mutation:
//!
//! 1. Read the drag payload from the transfer channel
//! 2. Resolve the pointer position over the target field
//! 3. Translate the position into a parent and sibling index
//! 4. For moves, reject drops that would create a cycle
//! 5. Call `add_field` or `move_field`
//!
//! Every failure path returns a `DropOutcome::Rejected` and leaves the
//! store untouched.

use crate::config::DesignerConfig;
use crate::drag::{
    read_payload, DataTransfer, DragSource, DropPosition, DropZoneConfig, TargetBounds,
};
use crate::models::FieldDefinition;
use crate::services::HierarchyStore;
use serde::{Deserialize, Serialize};

/// Field under the pointer when the drop happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    pub field_id: String,
    pub bounds: TargetBounds,
    pub pointer_y: f64,
}

/// Why a drop did not change anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropRejection {
    /// No readable payload on the transfer channel
    NoPayload,
    /// Nothing under the pointer
    NoTarget,
    /// The target field is not in the store
    UnknownTarget,
    /// The dragged field is not in the store
    UnknownField,
    /// A field was dropped onto itself
    SelfDrop,
    /// The new parent is the dragged field or one of its descendants
    WouldCreateCycle,
}

/// Result of handling one drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DropOutcome {
    #[serde(rename_all = "camelCase")]
    Added {
        field_id: String,
        parent_id: Option<String>,
        position: DropPosition,
    },
    #[serde(rename_all = "camelCase")]
    Moved {
        field_id: String,
        parent_id: Option<String>,
        position: DropPosition,
    },
    Rejected { reason: DropRejection },
}

impl DropOutcome {
    fn rejected(reason: DropRejection) -> Self {
        Self::Rejected { reason }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Applies drop gestures to a [`HierarchyStore`]
#[derive(Debug, Clone, Default)]
pub struct DropController {
    zones: DropZoneConfig,
}

impl DropController {
    pub fn new(zones: DropZoneConfig) -> Self {
        Self { zones }
    }

    pub fn from_config(config: &DesignerConfig) -> Self {
        Self::new(config.drop_zones)
    }

    /// Drop position to highlight while dragging over `target`
    ///
    /// `DropPosition::None` when there is no target or it is unknown.
    pub fn preview(&self, store: &HierarchyStore, target: Option<&DropTarget>) -> DropPosition {
        let Some(target) = target else {
            return DropPosition::None;
        };
        match store.get_field(&target.field_id) {
            Some(field) => self
                .zones
                .resolve(target.pointer_y, target.bounds, &field.field_type),
            None => DropPosition::None,
        }
    }

    /// Handle a drop event
    pub fn handle_drop<T: DataTransfer + ?Sized>(
        &self,
        store: &mut HierarchyStore,
        transfer: &T,
        target: Option<&DropTarget>,
    ) -> DropOutcome {
        let Some(payload) = read_payload(transfer) else {
            return DropOutcome::rejected(DropRejection::NoPayload);
        };
        let Some(target) = target else {
            return DropOutcome::rejected(DropRejection::NoTarget);
        };
        let Some(target_field) = store.get_field(&target.field_id) else {
            tracing::debug!("Drop target {} is not in the store", target.field_id);
            return DropOutcome::rejected(DropRejection::UnknownTarget);
        };

        let position = self
            .zones
            .resolve(target.pointer_y, target.bounds, &target_field.field_type);
        let moving_id = match payload.source {
            DragSource::Toolbox => None,
            DragSource::MoveField => Some(payload.config.id.as_str()),
        };
        let (parent_id, insert_index) = placement(store, target_field, position, moving_id);

        match payload.source {
            DragSource::Toolbox => {
                let field_id =
                    store.add_field(&payload.config, insert_index, parent_id.as_deref());
                DropOutcome::Added {
                    field_id,
                    parent_id,
                    position,
                }
            }
            DragSource::MoveField => {
                let field_id = payload.config.id;
                if field_id == target.field_id {
                    return DropOutcome::rejected(DropRejection::SelfDrop);
                }
                let Some(dragged) = store.get_field(&field_id) else {
                    tracing::debug!("Dragged field {} is not in the store", field_id);
                    return DropOutcome::rejected(DropRejection::UnknownField);
                };
                if !store.can_reparent(&field_id, parent_id.as_deref()) {
                    tracing::warn!(
                        "Rejected drop of {} under {:?}: target is inside the dragged field",
                        field_id,
                        parent_id
                    );
                    return DropOutcome::rejected(DropRejection::WouldCreateCycle);
                }

                let previous_parent_id = dragged.parent_id.clone();
                store.move_field(
                    &field_id,
                    insert_index,
                    parent_id.as_deref(),
                    previous_parent_id.as_deref(),
                );
                DropOutcome::Moved {
                    field_id,
                    parent_id,
                    position,
                }
            }
        }
    }
}

/// Parent and sibling index a drop at `position` over `target` lands in
///
/// `moving_id` is the dragged field for moves, `None` for a new field.
fn placement(
    store: &HierarchyStore,
    target: &FieldDefinition,
    position: DropPosition,
    moving_id: Option<&str>,
) -> (Option<String>, usize) {
    let parent_id = match position {
        DropPosition::Inside => Some(target.id.clone()),
        _ => target.parent_id.clone(),
    };
    let siblings = sibling_slots(store, parent_id.as_deref(), moving_id);
    let target_rank = siblings
        .iter()
        .position(|slot| slot.id == target.id)
        .unwrap_or(siblings.len());
    let rank = match position {
        DropPosition::Inside => siblings.len(),
        DropPosition::After => target_rank + 1,
        DropPosition::Before | DropPosition::None => target_rank,
    };

    let index = insert_index_for_rank(&siblings, arrival(store, moving_id), rank);
    (parent_id, index)
}

/// A sibling's order and its position in the collection
struct SiblingSlot<'a> {
    id: &'a str,
    order: usize,
    arrival: usize,
}

/// Siblings under `parent_id` other than the dragged field, in rank order
fn sibling_slots<'a>(
    store: &'a HierarchyStore,
    parent_id: Option<&str>,
    moving_id: Option<&str>,
) -> Vec<SiblingSlot<'a>> {
    let mut slots: Vec<SiblingSlot<'a>> = store
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_child_of(parent_id) && Some(f.id.as_str()) != moving_id)
        .map(|(arrival, f)| SiblingSlot {
            id: &f.id,
            order: f.order,
            arrival,
        })
        .collect();
    slots.sort_by_key(|slot| (slot.order, slot.arrival));
    slots
}

/// Collection position of the dragged field; a new field is appended
fn arrival(store: &HierarchyStore, moving_id: Option<&str>) -> usize {
    moving_id
        .and_then(|id| store.fields().iter().position(|f| f.id == id))
        .unwrap_or(store.len())
}

/// Smallest provisional order whose reconciled rank is closest to `rank`
///
/// Reconciliation breaks order ties by collection position, so some ranks
/// are out of reach: a new field can never rank ahead of an existing
/// sibling holding order 0.
fn insert_index_for_rank(siblings: &[SiblingSlot<'_>], arrival: usize, rank: usize) -> usize {
    let rank_for = |index: usize| {
        siblings
            .iter()
            .filter(|slot| slot.order < index || (slot.order == index && slot.arrival < arrival))
            .count()
    };
    (0..=siblings.len() + 1)
        .min_by_key(|&index| rank_for(index).abs_diff(rank))
        .unwrap_or(rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::{write_payload, DragPayload, InMemoryTransfer};

    fn toolbox_transfer(field_type: &str, label: &str) -> InMemoryTransfer {
        let mut transfer = InMemoryTransfer::new();
        let payload = DragPayload::from_toolbox(FieldDefinition::template(field_type, label));
        write_payload(&mut transfer, &payload).unwrap();
        transfer
    }

    fn move_transfer(store: &HierarchyStore, field_id: &str) -> InMemoryTransfer {
        let mut transfer = InMemoryTransfer::new();
        let payload = DragPayload::from_field(store.get_field(field_id).unwrap());
        write_payload(&mut transfer, &payload).unwrap();
        transfer
    }

    fn over(field_id: &str, pointer_y: f64) -> DropTarget {
        DropTarget {
            field_id: field_id.to_string(),
            bounds: TargetBounds::new(0.0, 100.0),
            pointer_y,
        }
    }

    #[test]
    fn test_preview_positions() {
        let mut store = HierarchyStore::new();
        let group = store.add_field(&FieldDefinition::template("container", "G"), 0, None);
        let controller = DropController::default();

        assert_eq!(controller.preview(&store, None), DropPosition::None);
        assert_eq!(
            controller.preview(&store, Some(&over("missing", 50.0))),
            DropPosition::None
        );
        assert_eq!(
            controller.preview(&store, Some(&over(&group, 50.0))),
            DropPosition::Inside
        );
        assert_eq!(
            controller.preview(&store, Some(&over(&group, 95.0))),
            DropPosition::After
        );
    }

    #[test]
    fn test_toolbox_drop_inside_container_appends_child() {
        let mut store = HierarchyStore::new();
        let group = store.add_field(&FieldDefinition::template("container", "G"), 0, None);
        store.add_field(&FieldDefinition::template("text", "Existing"), 0, Some(&group));
        let controller = DropController::default();

        let transfer = toolbox_transfer("text", "New");
        let outcome = controller.handle_drop(&mut store, &transfer, Some(&over(&group, 50.0)));

        let DropOutcome::Added {
            field_id,
            parent_id,
            position,
        } = outcome
        else {
            panic!("toolbox drop inside a container should add a field");
        };
        assert_eq!(position, DropPosition::Inside);
        assert_eq!(parent_id.as_deref(), Some(group.as_str()));
        assert_eq!(store.get_field(&field_id).unwrap().order, 1);
    }

    fn root_labels(store: &HierarchyStore) -> Vec<&str> {
        store
            .children_of(None)
            .iter()
            .map(|f| f.label.as_str())
            .collect()
    }

    #[test]
    fn test_toolbox_drop_before_and_after_leaf() {
        let mut store = HierarchyStore::new();
        let a = store.add_field(&FieldDefinition::template("text", "A"), 0, None);
        let b = store.add_field(&FieldDefinition::template("text", "B"), 1, None);
        let controller = DropController::default();

        let before = toolbox_transfer("text", "Before B");
        controller.handle_drop(&mut store, &before, Some(&over(&b, 10.0)));
        assert_eq!(root_labels(&store), vec!["A", "Before B", "B"]);

        let after = toolbox_transfer("text", "After A");
        controller.handle_drop(&mut store, &after, Some(&over(&a, 90.0)));
        assert_eq!(root_labels(&store), vec!["A", "After A", "Before B", "B"]);
    }

    #[test]
    fn test_toolbox_drop_before_first_field_lands_second() {
        let mut store = HierarchyStore::new();
        let a = store.add_field(&FieldDefinition::template("text", "A"), 0, None);
        store.add_field(&FieldDefinition::template("text", "B"), 1, None);

        // Order ties go to the earlier field, so nothing new can outrank A
        let transfer = toolbox_transfer("text", "New");
        let outcome =
            DropController::default().handle_drop(&mut store, &transfer, Some(&over(&a, 10.0)));

        assert!(matches!(
            outcome,
            DropOutcome::Added {
                position: DropPosition::Before,
                ..
            }
        ));
        assert_eq!(root_labels(&store), vec!["A", "New", "B"]);
    }

    #[test]
    fn test_move_drop_before_first_field() {
        let mut store = HierarchyStore::new();
        let a = store.add_field(&FieldDefinition::template("text", "A"), 0, None);
        let b = store.add_field(&FieldDefinition::template("text", "B"), 1, None);
        let controller = DropController::default();

        let transfer = move_transfer(&store, &a);
        controller.handle_drop(&mut store, &transfer, Some(&over(&b, 90.0)));
        assert_eq!(root_labels(&store), vec!["B", "A"]);

        // A is earlier in the collection than B, so it can take the front again
        let transfer = move_transfer(&store, &a);
        controller.handle_drop(&mut store, &transfer, Some(&over(&b, 10.0)));
        assert_eq!(root_labels(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_move_drop_after_later_sibling_within_group() {
        let mut store = HierarchyStore::new();
        let a = store.add_field(&FieldDefinition::template("text", "A"), 0, None);
        store.add_field(&FieldDefinition::template("text", "B"), 1, None);
        let c = store.add_field(&FieldDefinition::template("text", "C"), 2, None);
        let controller = DropController::default();

        let transfer = move_transfer(&store, &a);
        controller.handle_drop(&mut store, &transfer, Some(&over(&c, 10.0)));
        assert_eq!(root_labels(&store), vec!["B", "A", "C"]);

        let transfer = move_transfer(&store, &a);
        controller.handle_drop(&mut store, &transfer, Some(&over(&c, 90.0)));
        assert_eq!(root_labels(&store), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_missing_payload_or_target_is_rejected() {
        let mut store = HierarchyStore::new();
        let a = store.add_field(&FieldDefinition::template("text", "A"), 0, None);
        let controller = DropController::default();
        let transfer = toolbox_transfer("text", "B");

        let empty = InMemoryTransfer::new();
        assert_eq!(
            controller.handle_drop(&mut store, &empty, Some(&over(&a, 10.0))),
            DropOutcome::Rejected {
                reason: DropRejection::NoPayload
            }
        );
        assert_eq!(
            controller.handle_drop(&mut store, &transfer, None),
            DropOutcome::Rejected {
                reason: DropRejection::NoTarget
            }
        );
        assert_eq!(
            controller.handle_drop(&mut store, &transfer, Some(&over("nope", 10.0))),
            DropOutcome::Rejected {
                reason: DropRejection::UnknownTarget
            }
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_move_drop_onto_self_is_rejected() {
        let mut store = HierarchyStore::new();
        let group = store.add_field(&FieldDefinition::template("container", "G"), 0, None);
        let controller = DropController::default();

        let transfer = move_transfer(&store, &group);
        let outcome = controller.handle_drop(&mut store, &transfer, Some(&over(&group, 50.0)));
        assert_eq!(
            outcome,
            DropOutcome::Rejected {
                reason: DropRejection::SelfDrop
            }
        );
    }

    #[test]
    fn test_move_container_into_own_descendant_is_rejected() {
        let mut store = HierarchyStore::new();
        let outer = store.add_field(&FieldDefinition::template("container", "Outer"), 0, None);
        let inner =
            store.add_field(&FieldDefinition::template("payment", "Inner"), 0, Some(&outer));
        let leaf = store.add_field(&FieldDefinition::template("text", "Leaf"), 0, Some(&inner));
        let before = store.fields().to_vec();
        let controller = DropController::default();
        let transfer = move_transfer(&store, &outer);

        // Inside a nested container
        let outcome = controller.handle_drop(&mut store, &transfer, Some(&over(&inner, 50.0)));
        assert_eq!(
            outcome,
            DropOutcome::Rejected {
                reason: DropRejection::WouldCreateCycle
            }
        );

        // Beside a grandchild, which would make `inner` the new parent
        let outcome = controller.handle_drop(&mut store, &transfer, Some(&over(&leaf, 10.0)));
        assert_eq!(
            outcome,
            DropOutcome::Rejected {
                reason: DropRejection::WouldCreateCycle
            }
        );

        assert_eq!(store.fields(), before.as_slice());
    }

    #[test]
    fn test_move_drop_of_unknown_field_is_rejected() {
        let mut store = HierarchyStore::new();
        let a = store.add_field(&FieldDefinition::template("text", "A"), 0, None);
        let mut ghost = FieldDefinition::template("text", "Ghost");
        ghost.id = "field_ghost".to_string();

        let mut transfer = InMemoryTransfer::new();
        write_payload(&mut transfer, &DragPayload::from_field(&ghost)).unwrap();

        let outcome =
            DropController::default().handle_drop(&mut store, &transfer, Some(&over(&a, 10.0)));
        assert_eq!(
            outcome,
            DropOutcome::Rejected {
                reason: DropRejection::UnknownField
            }
        );
    }

    #[test]
    fn test_move_drop_reorders_and_reparents() {
        let mut store = HierarchyStore::new();
        let group = store.add_field(&FieldDefinition::template("container", "G"), 0, None);
        let a = store.add_field(&FieldDefinition::template("text", "A"), 1, None);
        let b = store.add_field(&FieldDefinition::template("text", "B"), 2, None);
        let controller = DropController::default();

        // B above A at the root
        let transfer = move_transfer(&store, &b);
        let outcome = controller.handle_drop(&mut store, &transfer, Some(&over(&a, 20.0)));
        assert!(matches!(
            outcome,
            DropOutcome::Moved {
                position: DropPosition::Before,
                ..
            }
        ));
        assert_eq!(root_labels(&store), vec!["G", "B", "A"]);

        // A into the group
        let transfer = move_transfer(&store, &a);
        controller.handle_drop(&mut store, &transfer, Some(&over(&group, 50.0)));
        assert_eq!(
            store.get_field(&a).unwrap().parent_id.as_deref(),
            Some(group.as_str())
        );
        assert_eq!(store.get_field(&b).unwrap().order, 1);
    }

    #[test]
    fn test_outcome_serialization() {
        let value = serde_json::to_value(DropOutcome::Rejected {
            reason: DropRejection::WouldCreateCycle,
        })
        .unwrap();
        assert_eq!(value["outcome"], "rejected");
        assert_eq!(value["reason"], "wouldCreateCycle");
    }
}
