//! Dependency graph configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration:
//!
//! ```rust
//! use strata_core::config::GraphConfig;
//!
//! let config = GraphConfig::from_json(r#"{ "pending_removal_capacity": 64 }"#).unwrap();
//! assert_eq!(config.pending_removal_capacity, 64);
//! assert!(config.snapshot_in_reports);
//! ```

use serde::Deserialize;

use crate::error::GraphError;

/// Tunables of a [`DependencyGraph`](crate::graph::DependencyGraph).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Upper bound on removed reactions remembered within one step. When
    /// exceeded the oldest record is forgotten.
    pub pending_removal_capacity: usize,

    /// Attach a full graph snapshot to bug reports. Disable for very large
    /// graphs where the snapshot itself would be a burden.
    pub snapshot_in_reports: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            pending_removal_capacity: 1024,
            snapshot_in_reports: true,
        }
    }
}

impl GraphConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(text)?)
    }
}
