//! Resolution settings.

use serde::{Deserialize, Serialize};

/// What to do with a cycle made only of optional constraints.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalCycles {
    /// Drop the optional edge that would close the cycle. Optional edges are
    /// admitted in ascending `(after, before)` natural order, so the dropped
    /// edge is the one whose pair sorts last.
    #[default]
    Break,
    /// Treat the cycle like a required one and fail resolution.
    Reject,
}

/// Settings applied by a container when it resolves its order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Handling of cycles made only of optional constraints.
    pub optional_cycles: OptionalCycles,
    /// At most this many items are named in a cycle report.
    pub max_reported_items: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            optional_cycles: OptionalCycles::Break,
            max_reported_items: 8,
        }
    }
}

impl ResolveConfig {
    /// Strict settings: optional cycles fail like required ones.
    pub fn strict() -> Self {
        Self {
            optional_cycles: OptionalCycles::Reject,
            ..Self::default()
        }
    }
}
