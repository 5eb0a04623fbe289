//! Store configuration
//!
//! Defaults match the backend conventions; a TOML table can override any
//! field:
//!
//! ```toml
//! event_capacity = 512
//! path_delimiter = ","
//! cancel_superseded_walks = true
//! ```

use cms_tree_core::DEFAULT_PATH_DELIMITER;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The TOML source could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A field holds an unusable value
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Configuration for a [`TreeStore`](crate::TreeStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeStoreConfig {
    /// Buffer size of the structural event channel
    pub event_capacity: usize,
    /// Buffer size of each per-parent children channel
    pub children_capacity: usize,
    /// Delimiter between ancestor ids in a parent path
    pub path_delimiter: char,
    /// Abandon an ancestor walk once a different node gets selected
    pub cancel_superseded_walks: bool,
}

impl Default for TreeStoreConfig {
    fn default() -> Self {
        Self {
            event_capacity: 256,
            children_capacity: 64,
            path_delimiter: DEFAULT_PATH_DELIMITER,
            cancel_superseded_walks: false,
        }
    }
}

impl TreeStoreConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "event_capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.children_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "children_capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.path_delimiter.is_whitespace() {
            return Err(ConfigError::Invalid {
                field: "path_delimiter",
                reason: "must not be whitespace".to_string(),
            });
        }
        Ok(())
    }
}
