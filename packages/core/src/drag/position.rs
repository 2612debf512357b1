//! Drop position resolution
//!
//! Classifies the pointer's vertical position over a target field into a
//! structural intent:
//!
//! ```text
//!   container target            leaf target
//!   +----------------+ top      +----------------+ top
//!   |     before     | 25%      |     before     |
//!   |----------------|          |                | 50%
//!   |     inside     |          |----------------|
//!   |----------------| 75%      |     after      |
//!   |     after      |          |                |
//!   +----------------+          +----------------+
//! ```
//!
//! Leaves never offer `inside`. `None` is produced by callers when no target
//! is under the pointer; the resolver itself always picks a zone.

use crate::models::is_container_type;
use crate::services::DesignerError;
use serde::{Deserialize, Serialize};

/// Structural intent of a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
    Inside,
    None,
}

/// Vertical extent of a target element as laid out by the host UI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBounds {
    pub top: f64,
    pub height: f64,
}

impl TargetBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Zone sizes used to classify a drop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DropZoneConfig {
    /// Share of a container's height at each edge that means before/after
    pub container_edge_ratio: f64,

    /// Split point of a leaf's height between before and after
    pub leaf_split_ratio: f64,
}

impl Default for DropZoneConfig {
    fn default() -> Self {
        Self {
            container_edge_ratio: 0.25,
            leaf_split_ratio: 0.5,
        }
    }
}

impl DropZoneConfig {
    /// Validate zone ratios
    pub fn validate(&self) -> Result<(), DesignerError> {
        if !(self.container_edge_ratio > 0.0 && self.container_edge_ratio < 0.5) {
            return Err(DesignerError::invalid_config(format!(
                "container_edge_ratio must be in (0, 0.5), got {}",
                self.container_edge_ratio
            )));
        }

        if !(self.leaf_split_ratio > 0.0 && self.leaf_split_ratio < 1.0) {
            return Err(DesignerError::invalid_config(format!(
                "leaf_split_ratio must be in (0, 1), got {}",
                self.leaf_split_ratio
            )));
        }

        Ok(())
    }

    /// Classify `pointer_y` against a target of type `target_type`
    pub fn resolve(&self, pointer_y: f64, bounds: TargetBounds, target_type: &str) -> DropPosition {
        let offset = pointer_y - bounds.top;
        let height = bounds.height;

        if is_container_type(target_type) {
            if offset <= height * self.container_edge_ratio {
                return DropPosition::Before;
            }
            if offset >= height * (1.0 - self.container_edge_ratio) {
                return DropPosition::After;
            }
            return DropPosition::Inside;
        }

        if offset <= height * self.leaf_split_ratio {
            DropPosition::Before
        } else {
            DropPosition::After
        }
    }
}

/// Classify a drop using the default zone sizes
pub fn resolve_drop_position(
    pointer_y: f64,
    target_top: f64,
    target_height: f64,
    target_type: &str,
) -> DropPosition {
    DropZoneConfig::default().resolve(
        pointer_y,
        TargetBounds::new(target_top, target_height),
        target_type,
    )
}
