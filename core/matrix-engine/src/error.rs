//! FILENAME: core/matrix-engine/src/error.rs

use thiserror::Error;

use crate::definition::GroupId;

/// Group schema violations, raised when a group is created or edited.
/// No partial group is ever produced alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a group needs at least 2 columns, got {found}")]
    InsufficientColumns { found: usize },

    #[error("axis column '{axis}' is not one of the group's columns")]
    AxisNotInColumns { axis: String },

    #[error("column '{column}' appears more than once in the group")]
    DuplicateColumn { column: String },
}

/// Internal consistency failures while building a group's grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("group {group_id} has no combination columns")]
    EmptyCombinationSet { group_id: GroupId },

    #[error("group {group_id} would produce {cells} cells (limit {limit})")]
    CombinationLimitExceeded {
        group_id: GroupId,
        cells: usize,
        limit: usize,
    },
}

/// Shape problems in a table handed to [`crate::Dataset::new`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("dataset has no columns")]
    NoColumns,

    #[error("duplicate column header '{column}'")]
    DuplicateHeader { column: String },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Umbrella error for session operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("unknown group id {0}")]
    UnknownGroup(GroupId),

    #[error("column '{0}' does not exist in the dataset")]
    UnknownColumn(String),

    #[error("value '{value}' is not part of the grid of group {group_id}")]
    ValueNotInGrid { group_id: GroupId, value: String },

    #[error("cell ({row}, {col}) is outside the grid of group {group_id}")]
    CellOutOfRange {
        group_id: GroupId,
        row: usize,
        col: usize,
    },
}
