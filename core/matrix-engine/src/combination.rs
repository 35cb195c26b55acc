//! FILENAME: core/matrix-engine/src/combination.rs
//! Combination enumeration - the column axis of a group's grid.
//!
//! A combination is one value per combination column. The full set is the
//! Cartesian product of each column's distinct values, ordered like nested
//! loops: the leftmost column varies slowest, the last column fastest.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::dataset::Dataset;
use crate::definition::{GroupDefinition, GroupId};
use crate::error::ConsistencyError;
use crate::indexer::ValueIndex;

/// Inline capacity for combination tuples; groups rarely span more columns.
const INLINE_COMBO: usize = 4;

/// Ordered tuple of trimmed values, one per combination column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboKey(SmallVec<[String; INLINE_COMBO]>);

impl ComboKey {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ComboKey(values.into_iter().map(Into::into).collect())
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Header text for a grid column: "GPU: RTX4070 / RAM: 32GB".
    pub fn label(&self, columns: &[&str]) -> String {
        columns
            .iter()
            .zip(self.0.iter())
            .map(|(column, value)| format!("{}: {}", column, value))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl FromIterator<String> for ComboKey {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        ComboKey(iter.into_iter().collect())
    }
}

impl fmt::Display for ComboKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

// ============================================================================
// COMBINATION SPACE
// ============================================================================

/// Distinct values of every combination column of one group.
#[derive(Debug, Clone)]
pub struct CombinationSpace {
    indexes: Vec<ValueIndex>,
}

impl CombinationSpace {
    pub fn for_group(dataset: &Dataset, group: &GroupDefinition) -> Result<Self, ConsistencyError> {
        Self::from_columns(dataset, group.id(), &group.combination_columns())
    }

    /// Fails with `EmptyCombinationSet` when `columns` is empty; a valid group
    /// always has at least one combination column.
    pub fn from_columns(
        dataset: &Dataset,
        group_id: GroupId,
        columns: &[&str],
    ) -> Result<Self, ConsistencyError> {
        if columns.is_empty() {
            return Err(ConsistencyError::EmptyCombinationSet { group_id });
        }

        let indexes = columns
            .iter()
            .map(|column| ValueIndex::build(dataset, column))
            .collect();
        Ok(CombinationSpace { indexes })
    }

    pub fn columns(&self) -> Vec<&str> {
        self.indexes.iter().map(ValueIndex::column).collect()
    }

    /// Distinct-value count per combination column.
    pub fn cardinalities(&self) -> Vec<usize> {
        self.indexes.iter().map(ValueIndex::len).collect()
    }

    /// Number of combinations. Saturates instead of overflowing so size
    /// guards stay meaningful for absurd inputs.
    pub fn len(&self) -> usize {
        self.indexes
            .iter()
            .fold(1usize, |acc, index| acc.saturating_mul(index.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.iter().any(ValueIndex::is_empty)
    }

    pub fn iter(&self) -> Combinations<'_> {
        let cursor = if self.is_empty() {
            None
        } else {
            Some(vec![0; self.indexes.len()])
        };
        Combinations { space: self, cursor }
    }

    pub fn keys(&self) -> Vec<ComboKey> {
        self.iter().collect()
    }
}

/// Odometer over a [`CombinationSpace`]; the last position turns fastest.
pub struct Combinations<'a> {
    space: &'a CombinationSpace,
    cursor: Option<Vec<usize>>,
}

impl Iterator for Combinations<'_> {
    type Item = ComboKey;

    fn next(&mut self) -> Option<ComboKey> {
        let cursor = self.cursor.as_mut()?;

        let key = cursor
            .iter()
            .zip(&self.space.indexes)
            .map(|(&pos, index)| index.values()[pos].clone())
            .collect();

        let mut exhausted = true;
        for (pos, index) in cursor.iter_mut().zip(&self.space.indexes).rev() {
            *pos += 1;
            if *pos < index.len() {
                exhausted = false;
                break;
            }
            *pos = 0;
        }
        if exhausted {
            self.cursor = None;
        }

        Some(key)
    }
}

/// Every combination of the group's combination columns, in nested-loop order.
pub fn enumerate_combinations(
    dataset: &Dataset,
    group: &GroupDefinition,
) -> Result<Vec<ComboKey>, ConsistencyError> {
    Ok(CombinationSpace::for_group(dataset, group)?.keys())
}
