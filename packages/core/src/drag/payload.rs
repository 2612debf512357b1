//! Drag payload codec
//!
//! A drag carries one JSON document under the `application/json` media type
//! of the host's drag transfer channel:
//!
//! ```json
//! {"source":"toolbox","fieldType":"text","config":{"id":"","type":"text","label":"Name","order":0,"parentId":null}}
//! ```
//!
//! Decoding fails soft. Missing or malformed data means "no drag in
//! progress" and the drop is abandoned without touching state.

use crate::models::FieldDefinition;
use crate::services::DesignerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Media type the payload is stored under
pub const DRAG_MEDIA_TYPE: &str = "application/json";

/// Where a drag started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragSource {
    /// A new field dragged out of the palette
    #[serde(rename = "toolbox")]
    Toolbox,
    /// An existing field being rearranged
    #[serde(rename = "moveField")]
    MoveField,
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub source: DragSource,
    pub field_type: String,
    /// Template for toolbox drags, the dragged field itself for moves
    pub config: FieldDefinition,
}

impl DragPayload {
    /// Payload for dragging a new field out of the palette
    pub fn from_toolbox(config: FieldDefinition) -> Self {
        Self {
            source: DragSource::Toolbox,
            field_type: config.field_type.clone(),
            config,
        }
    }

    /// Payload for dragging an already placed field
    pub fn from_field(field: &FieldDefinition) -> Self {
        Self {
            source: DragSource::MoveField,
            field_type: field.field_type.clone(),
            config: field.clone(),
        }
    }
}

/// Serialize a payload for the drag transfer channel
pub fn encode(payload: &DragPayload) -> Result<String, DesignerError> {
    Ok(serde_json::to_string(payload)?)
}

/// Parse a payload read from the drag transfer channel
///
/// Returns `None` for empty or malformed input.
pub fn decode(raw: &str) -> Option<DragPayload> {
    if raw.is_empty() {
        return None;
    }

    match serde_json::from_str(raw) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::debug!("Ignoring malformed drag payload: {}", e);
            None
        }
    }
}

/// String-keyed drag transfer channel supplied by the host UI
pub trait DataTransfer {
    fn set_data(&mut self, media_type: &str, data: String);

    fn get_data(&self, media_type: &str) -> Option<String>;
}

/// Drag transfer backed by a map, for tooling and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransfer {
    entries: HashMap<String, String>,
}

impl InMemoryTransfer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataTransfer for InMemoryTransfer {
    fn set_data(&mut self, media_type: &str, data: String) {
        self.entries.insert(media_type.to_string(), data);
    }

    fn get_data(&self, media_type: &str) -> Option<String> {
        self.entries.get(media_type).cloned()
    }
}

/// Encode `payload` into the transfer under [`DRAG_MEDIA_TYPE`]
pub fn write_payload<T: DataTransfer + ?Sized>(
    transfer: &mut T,
    payload: &DragPayload,
) -> Result<(), DesignerError> {
    transfer.set_data(DRAG_MEDIA_TYPE, encode(payload)?);
    Ok(())
}

/// Decode the payload stored under [`DRAG_MEDIA_TYPE`], if any
pub fn read_payload<T: DataTransfer + ?Sized>(transfer: &T) -> Option<DragPayload> {
    transfer
        .get_data(DRAG_MEDIA_TYPE)
        .and_then(|raw| decode(&raw))
}
