//! Drag and Drop
//!
//! The two pieces a drag gesture feeds into the hierarchy:
//!
//! - `payload` - What is being dragged, carried across the host's drag transfer channel
//! - `position` - Where over the target it is being dropped

pub mod payload;
pub mod position;

pub use payload::{
    decode, encode, read_payload, write_payload, DataTransfer, DragPayload, DragSource,
    InMemoryTransfer, DRAG_MEDIA_TYPE,
};
pub use position::{resolve_drop_position, DropPosition, DropZoneConfig, TargetBounds};
