//! Error types for the `strata-core` crate.

use crate::graph::BugReport;

/// Errors produced by the dependency graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The graph and its caller have diverged. The simulation can no longer
    /// be trusted; this must never be retried or swallowed.
    #[error("dependency graph invariant violated: {0}")]
    Bug(Box<BugReport>),

    /// Configuration text could not be parsed.
    #[error("invalid dependency graph configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl GraphError {
    /// The diagnostic payload, if this is an invariant violation.
    pub fn bug_report(&self) -> Option<&BugReport> {
        match self {
            Self::Bug(report) => Some(report),
            Self::Config(_) => None,
        }
    }
}
