//! FILENAME: core/matrix-engine/src/config.rs
//! Engine settings. Every field has a default so a partial JSON document
//! (or none at all) yields a usable configuration.

use serde::{Deserialize, Serialize};

/// Cell count above which a matrix build logs a warning.
pub const DEFAULT_WARN_CELLS: usize = 100_000;

/// What happens to a group's validity decisions when the group is redefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ReseedPolicy {
    /// Every redefinition discards the group's decisions and reseeds.
    #[default]
    Always,
    /// Decisions survive edits that leave the columns and axis unchanged.
    WhenColumnsChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatrixConfig {
    /// Hard limit on axis values x combinations per group. `None` = unlimited.
    pub max_cells: Option<usize>,
    pub warn_cells: usize,
    pub reseed_policy: ReseedPolicy,
    /// Prefix for positional names given to unnamed groups ("Group 3").
    pub default_group_prefix: String,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        MatrixConfig {
            max_cells: None,
            warn_cells: DEFAULT_WARN_CELLS,
            reseed_policy: ReseedPolicy::Always,
            default_group_prefix: "Group".to_string(),
        }
    }
}

impl MatrixConfig {
    pub fn with_max_cells(mut self, limit: usize) -> Self {
        self.max_cells = Some(limit);
        self
    }

    pub fn with_reseed_policy(mut self, policy: ReseedPolicy) -> Self {
        self.reseed_policy = policy;
        self
    }
}
