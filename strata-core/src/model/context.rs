//! Read/write scopes of a reaction.

use std::fmt;

use serde::Serialize;

/// The scope of state a reaction reads (input) or modifies (output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Context {
    /// Only the node owning the reaction.
    Local,

    /// The owning node and its direct neighbors.
    Neighborhood,

    /// The whole system. Global reactions are tracked in side pools rather
    /// than through topology.
    Global,
}

impl Context {
    /// Whether this is the [`Context::Global`] scope.
    pub fn is_global(self) -> bool {
        self == Self::Global
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "LOCAL",
            Self::Neighborhood => "NEIGHBORHOOD",
            Self::Global => "GLOBAL",
        })
    }
}
