//! Error Types
//!
//! Gesture paths (add, move, drop) never fail loudly; a rejected gesture
//! leaves state unchanged. The errors here cover the few places that talk to
//! the outside world: configuration loading and payload encoding.

use thiserror::Error;

/// Form designer errors
#[derive(Error, Debug)]
pub enum DesignerError {
    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DesignerError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
