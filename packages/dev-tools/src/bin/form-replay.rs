//! Form Replay - Apply a Scripted Gesture Sequence
//!
//! Reads a JSON script of designer steps, applies them to a fresh
//! `HierarchyStore`, and prints the renderer's sorted view.
//!
//! # Usage
//!
//! ```bash
//! form-replay script.json [designer-config.json]
//! ```
//!
//! # Script Format
//!
//! Steps refer to earlier fields by `ref`, the name given when they were
//! added. Example:
//!
//! ```json
//! [
//!   {"op": "add", "ref": "billing", "type": "container", "label": "Billing", "index": 0},
//!   {"op": "add", "ref": "card", "type": "text", "label": "Card number", "index": 1},
//!   {"op": "move", "ref": "card", "index": 0, "parent": "billing"},
//!   {"op": "drop", "ref": "email", "type": "text", "label": "Email",
//!    "target": "billing", "pointerY": 90, "top": 0, "height": 100}
//! ]
//! ```

use anyhow::{bail, Context, Result};
use formdesigner_core::drag::{write_payload, DragPayload, InMemoryTransfer, TargetBounds};
use formdesigner_core::{
    DesignerConfig, DropController, DropOutcome, DropTarget, FieldDefinition, HierarchyStore,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// One scripted step
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
enum Step {
    /// Place a new field directly
    Add {
        #[serde(rename = "ref")]
        name: String,
        #[serde(rename = "type")]
        field_type: String,
        label: String,
        index: usize,
        parent: Option<String>,
    },
    /// Move a previously added field directly
    Move {
        #[serde(rename = "ref")]
        name: String,
        index: usize,
        parent: Option<String>,
    },
    /// Drag a palette tool (when `type` is set) or an existing field onto a target
    #[serde(rename_all = "camelCase")]
    Drop {
        #[serde(rename = "ref")]
        name: String,
        #[serde(rename = "type")]
        field_type: Option<String>,
        label: Option<String>,
        target: String,
        pointer_y: f64,
        top: f64,
        height: f64,
    },
}

/// Maps script names to generated field ids
#[derive(Default)]
struct Refs(HashMap<String, String>);

impl Refs {
    fn id(&self, name: &str) -> Result<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .with_context(|| format!("unknown ref '{}'", name))
    }

    fn parent(&self, name: Option<&String>) -> Result<Option<String>> {
        name.map(|n| self.id(n).map(str::to_string)).transpose()
    }
}

fn apply_step(
    store: &mut HierarchyStore,
    controller: &DropController,
    refs: &mut Refs,
    step: Step,
) -> Result<()> {
    match step {
        Step::Add {
            name,
            field_type,
            label,
            index,
            parent,
        } => {
            let parent_id = refs.parent(parent.as_ref())?;
            let id = store.add_field(
                &FieldDefinition::template(field_type, label),
                index,
                parent_id.as_deref(),
            );
            refs.0.insert(name, id);
        }
        Step::Move {
            name,
            index,
            parent,
        } => {
            let field_id = refs.id(&name)?.to_string();
            let target_parent = refs.parent(parent.as_ref())?;
            let previous_parent = store
                .get_field(&field_id)
                .and_then(|f| f.parent_id.clone());
            if !store.can_reparent(&field_id, target_parent.as_deref()) {
                tracing::warn!("Skipping move of '{}': would create a cycle", name);
                return Ok(());
            }
            store.move_field(
                &field_id,
                index,
                target_parent.as_deref(),
                previous_parent.as_deref(),
            );
        }
        Step::Drop {
            name,
            field_type,
            label,
            target,
            pointer_y,
            top,
            height,
        } => {
            let payload = match field_type {
                Some(field_type) => {
                    let label = label.unwrap_or_else(|| field_type.clone());
                    DragPayload::from_toolbox(FieldDefinition::template(field_type, label))
                }
                None => {
                    let field_id = refs.id(&name)?;
                    let field = store
                        .get_field(field_id)
                        .with_context(|| format!("ref '{}' is not in the store", name))?;
                    DragPayload::from_field(field)
                }
            };

            let mut transfer = InMemoryTransfer::new();
            write_payload(&mut transfer, &payload)?;
            let drop_target = DropTarget {
                field_id: refs.id(&target)?.to_string(),
                bounds: TargetBounds::new(top, height),
                pointer_y,
            };

            match controller.handle_drop(store, &transfer, Some(&drop_target)) {
                DropOutcome::Added { field_id, .. } => {
                    refs.0.insert(name, field_id);
                }
                DropOutcome::Moved { .. } => {}
                DropOutcome::Rejected { reason } => {
                    tracing::warn!("Drop of '{}' rejected: {:?}", name, reason);
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let Some(script_path) = args.next().map(PathBuf::from) else {
        bail!("usage: form-replay <script.json> [designer-config.json]");
    };

    let config = match args.next() {
        Some(path) => DesignerConfig::load(&PathBuf::from(path))?,
        None => DesignerConfig::default(),
    };

    let script = std::fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read {:?}", script_path))?;
    let steps: Vec<Step> = serde_json::from_str(&script).context("failed to parse script")?;

    tracing::info!("Replaying {} steps from {:?}", steps.len(), script_path);

    let controller = DropController::from_config(&config);
    let mut store = HierarchyStore::with_config(config)?;
    let mut refs = Refs::default();

    for step in steps {
        apply_step(&mut store, &controller, &mut refs, step)?;
    }

    tracing::info!("Replay finished with {} fields", store.len());
    println!("{}", serde_json::to_string_pretty(&store.sorted_fields())?);

    Ok(())
}
