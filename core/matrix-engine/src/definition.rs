//! FILENAME: core/matrix-engine/src/definition.rs
//! Group Definition - The serializable configuration.
//!
//! A group picks two or more component columns, one of which is the axis
//! (rows of the grid); the rest are the combination columns (grid columns).
//! A `GroupDefinition` can only exist in a valid state: construction and
//! deserialization both go through the same checks.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Stable identifier of a group within a session. Survives renames.
pub type GroupId = u32;

/// Positional name for a group the user left unnamed ("Group 2").
/// `position` is 1-based.
pub fn default_group_name(prefix: &str, position: usize) -> String {
    format!("{} {}", prefix, position)
}

/// Checks the group schema: at least two columns, no repeats, and the axis
/// among them.
pub fn validate_group(columns: &[String], axis_column: &str) -> Result<(), ValidationError> {
    if columns.len() < 2 {
        return Err(ValidationError::InsufficientColumns {
            found: columns.len(),
        });
    }

    if !columns.iter().any(|c| c == axis_column) {
        return Err(ValidationError::AxisNotInColumns {
            axis: axis_column.to_string(),
        });
    }

    let mut seen = FxHashSet::default();
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(ValidationError::DuplicateColumn {
                column: column.clone(),
            });
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGroupDefinition", rename_all = "camelCase")]
pub struct GroupDefinition {
    id: GroupId,
    name: String,
    columns: Vec<String>,
    axis_column: String,
}

impl GroupDefinition {
    /// Creates a group. An empty `name` is kept as-is; substituting a
    /// positional default is up to the caller (see [`default_group_name`]).
    pub fn new(
        id: GroupId,
        columns: Vec<String>,
        axis_column: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let axis_column = axis_column.into();
        validate_group(&columns, &axis_column)?;
        Ok(GroupDefinition {
            id,
            name: name.into(),
            columns,
            axis_column,
        })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn axis_column(&self) -> &str {
        &self.axis_column
    }

    /// `columns` minus the axis, original order preserved.
    pub fn combination_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| **c != self.axis_column)
            .map(String::as_str)
            .collect()
    }

    pub fn combination_arity(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// True when both groups lay out the same grid (columns and axis).
    pub fn same_layout(&self, other: &GroupDefinition) -> bool {
        self.columns == other.columns && self.axis_column == other.axis_column
    }

    /// Combination columns joined for a grid heading: "GPU+RAM", or just the
    /// column when there is one.
    pub fn combination_axis_label(&self) -> String {
        self.combination_columns().join("+")
    }

    /// "Name: Axis <-> GPU+RAM"
    pub fn caption(&self) -> String {
        format!(
            "{}: {} <-> {}",
            self.name,
            self.axis_column,
            self.combination_axis_label()
        )
    }

    pub fn to_config(&self) -> GroupConfig {
        GroupConfig {
            columns: self.columns.clone(),
            axis_column: self.axis_column.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGroupDefinition {
    id: GroupId,
    #[serde(default)]
    name: String,
    columns: Vec<String>,
    axis_column: String,
}

impl TryFrom<RawGroupDefinition> for GroupDefinition {
    type Error = ValidationError;

    fn try_from(raw: RawGroupDefinition) -> Result<Self, Self::Error> {
        GroupDefinition::new(raw.id, raw.columns, raw.axis_column, raw.name)
    }
}

// ============================================================================
// PERSISTED SHAPE
// ============================================================================

/// Group as stored in a group-config file: `{ columns, eje_y, nombre }`.
/// Carries no id; ids are assigned when the config is loaded into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub columns: Vec<String>,
    #[serde(rename = "eje_y")]
    pub axis_column: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
}

impl GroupConfig {
    pub fn new(columns: Vec<String>, axis_column: impl Into<String>, name: impl Into<String>) -> Self {
        GroupConfig {
            columns,
            axis_column: axis_column.into(),
            name: name.into(),
        }
    }

    pub fn into_definition(self, id: GroupId) -> Result<GroupDefinition, ValidationError> {
        GroupDefinition::new(id, self.columns, self.axis_column, self.name)
    }
}

impl From<&GroupDefinition> for GroupConfig {
    fn from(group: &GroupDefinition) -> Self {
        group.to_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_column_is_rejected() {
        let err = GroupDefinition::new(1, cols(&["GPU"]), "GPU", "").unwrap_err();
        assert_eq!(err, ValidationError::InsufficientColumns { found: 1 });
    }

    #[test]
    fn test_axis_must_be_a_member() {
        let err = GroupDefinition::new(1, cols(&["GPU", "Case"]), "PSU", "").unwrap_err();
        assert_eq!(err, ValidationError::AxisNotInColumns { axis: "PSU".to_string() });
    }

    #[test]
    fn test_duplicate_column_is_rejected() {
        let err = GroupDefinition::new(1, cols(&["GPU", "Case", "GPU"]), "Case", "").unwrap_err();
        assert_eq!(err, ValidationError::DuplicateColumn { column: "GPU".to_string() });
    }

    #[test]
    fn test_combination_columns_keep_order() {
        let group =
            GroupDefinition::new(4, cols(&["RAM", "Case", "GPU"]), "Case", "Chassis").unwrap();
        assert_eq!(group.combination_columns(), vec!["RAM", "GPU"]);
        assert_eq!(group.combination_arity(), 2);
        assert_eq!(group.caption(), "Chassis: Case <-> RAM+GPU");
    }

    #[test]
    fn test_rename_keeps_id() {
        let mut group = GroupDefinition::new(7, cols(&["Case", "GPU"]), "Case", "").unwrap();
        group.rename("Cooling");
        assert_eq!(group.id(), 7);
        assert_eq!(group.name(), "Cooling");
    }

    #[test]
    fn test_config_shape_round_trip() {
        let group = GroupDefinition::new(3, cols(&["Case", "GPU"]), "Case", "Fit").unwrap();
        let json = serde_json::to_string(&group.to_config()).unwrap();
        assert_eq!(json, r#"{"columns":["Case","GPU"],"eje_y":"Case","nombre":"Fit"}"#);

        let config: GroupConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.into_definition(3).unwrap(), group);
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"{"id":1,"name":"x","columns":["A","B"],"axisColumn":"C"}"#;
        assert!(serde_json::from_str::<GroupDefinition>(bad).is_err());

        let good = r#"{"id":1,"name":"x","columns":["A","B"],"axisColumn":"B"}"#;
        let group: GroupDefinition = serde_json::from_str(good).unwrap();
        assert_eq!(group.combination_columns(), vec!["A"]);
    }

    #[test]
    fn test_default_group_name() {
        assert_eq!(default_group_name("Group", 2), "Group 2");
    }
}
