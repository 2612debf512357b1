//! Designer configuration
//!
//! All fields use `#[serde(default)]` so partial JSON files (or none at all)
//! deserialize to the stock behavior.

use crate::drag::DropZoneConfig;
use crate::services::DesignerError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`HierarchyStore`](crate::services::HierarchyStore) and its drop handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignerConfig {
    /// Prefix for generated field IDs
    pub id_prefix: String,

    /// Zone sizes for drop position resolution
    pub drop_zones: DropZoneConfig,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            id_prefix: "field_".to_string(),
            drop_zones: DropZoneConfig::default(),
        }
    }
}

impl DesignerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), DesignerError> {
        if self.id_prefix.is_empty() {
            return Err(DesignerError::invalid_config("id_prefix cannot be empty"));
        }

        if self.id_prefix.chars().any(char::is_whitespace) {
            return Err(DesignerError::invalid_config(
                "id_prefix cannot contain whitespace",
            ));
        }

        self.drop_zones.validate()
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self, DesignerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, DesignerError> {
        if !path.exists() {
            tracing::debug!("No designer config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
