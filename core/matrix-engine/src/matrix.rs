//! FILENAME: core/matrix-engine/src/matrix.rs
//! Matrix Builder - lays one group out as an axis x combination grid.
//!
//! Algorithm:
//! 1. Index the axis column (grid rows)
//! 2. Enumerate combinations of the remaining columns (grid columns)
//! 3. Check the cell count against the configured guard
//! 4. Seed the store with `Valid` for every cell not decided yet
//!
//! The grid itself holds no validity state; `MatrixView` is a snapshot of a
//! grid read through the store for display.

use std::fmt;

use serde::Serialize;

use crate::combination::{CombinationSpace, ComboKey};
use crate::config::MatrixConfig;
use crate::dataset::Dataset;
use crate::definition::{GroupDefinition, GroupId};
use crate::error::ConsistencyError;
use crate::indexer::ValueIndex;
use crate::logging::CAT_MATRIX;
use crate::store::{Validity, ValidityKey, ValidityStore};

// ============================================================================
// VALIDITY MATRIX
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityMatrix {
    pub group_id: GroupId,
    pub axis_column: String,
    pub combination_columns: Vec<String>,
    /// Sorted distinct axis values (grid rows).
    pub axis_values: Vec<String>,
    /// Combinations in nested-loop order (grid columns).
    pub combinations: Vec<ComboKey>,
}

impl ValidityMatrix {
    pub fn row_count(&self) -> usize {
        self.axis_values.len()
    }

    pub fn column_count(&self) -> usize {
        self.combinations.len()
    }

    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Store key of the cell at (row, col), if inside the grid.
    pub fn key(&self, row: usize, col: usize) -> Option<ValidityKey> {
        let axis_value = self.axis_values.get(row)?;
        let combo = self.combinations.get(col)?;
        Some(ValidityKey::new(self.group_id, axis_value.as_str(), combo.clone()))
    }

    pub fn axis_position(&self, axis_value: &str) -> Option<usize> {
        self.axis_values
            .binary_search_by(|probe| probe.as_str().cmp(axis_value))
            .ok()
    }

    /// Combinations are generated from sorted columns in nested-loop order,
    /// which is exactly `ComboKey`'s lexicographic order.
    pub fn combination_position(&self, combo: &ComboKey) -> Option<usize> {
        self.combinations.binary_search(combo).ok()
    }

    /// One "Col: value / Col: value" label per grid column.
    pub fn column_labels(&self) -> Vec<String> {
        let columns: Vec<&str> = self.combination_columns.iter().map(String::as_str).collect();
        self.combinations
            .iter()
            .map(|combo| combo.label(&columns))
            .collect()
    }

    /// Seeds every cell of this grid into `store`. See [`ValidityStore::seed`].
    pub fn seed_into(&self, store: &mut ValidityStore, reset: bool) -> usize {
        store.seed(self.group_id, &self.axis_values, &self.combinations, reset)
    }

    pub fn toggle_row(&self, store: &mut ValidityStore, row: usize) -> Option<Validity> {
        let axis_value = self.axis_values.get(row)?;
        store.toggle_row(self.group_id, axis_value, &self.combinations)
    }

    pub fn toggle_column(&self, store: &mut ValidityStore, col: usize) -> Option<Validity> {
        let combo = self.combinations.get(col)?;
        store.toggle_column(self.group_id, combo, &self.axis_values)
    }

    pub fn stats(&self, store: &ValidityStore) -> MatrixStats {
        let mut valid = 0;
        for axis_value in &self.axis_values {
            for combo in &self.combinations {
                let key = ValidityKey::new(self.group_id, axis_value.as_str(), combo.clone());
                if store.get(&key).is_valid() {
                    valid += 1;
                }
            }
        }
        MatrixStats {
            valid,
            total: self.cell_count(),
        }
    }
}

/// Builds the grid for `group`. Fails if the group has no combination columns
/// or if the grid would exceed `config.max_cells`.
pub fn build_matrix(
    dataset: &Dataset,
    group: &GroupDefinition,
    config: &MatrixConfig,
) -> Result<ValidityMatrix, ConsistencyError> {
    let space = CombinationSpace::for_group(dataset, group)?;
    let axis = ValueIndex::build(dataset, group.axis_column());

    let cells = axis.len().saturating_mul(space.len());
    if let Some(limit) = config.max_cells {
        if cells > limit {
            return Err(ConsistencyError::CombinationLimitExceeded {
                group_id: group.id(),
                cells,
                limit,
            });
        }
    }
    if cells > config.warn_cells {
        log_warn!(
            CAT_MATRIX,
            "group={} grid has {} cells (cardinalities {:?})",
            group.id(),
            cells,
            space.cardinalities()
        );
    }

    let matrix = ValidityMatrix {
        group_id: group.id(),
        axis_column: group.axis_column().to_string(),
        combination_columns: space.columns().into_iter().map(str::to_string).collect(),
        axis_values: axis.into_values(),
        combinations: space.keys(),
    };

    log_info!(
        CAT_MATRIX,
        "built group={} axis={} combinations={} cells={}",
        matrix.group_id,
        matrix.row_count(),
        matrix.column_count(),
        matrix.cell_count()
    );
    Ok(matrix)
}

// ============================================================================
// VIEW & STATS
// ============================================================================

/// Valid cells out of all cells of one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatrixStats {
    pub valid: usize,
    pub total: usize,
}

impl fmt::Display for MatrixStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} valid", self.valid, self.total)
    }
}

/// Renderable snapshot of one group's grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixView {
    pub group_id: GroupId,
    pub caption: String,
    pub axis_values: Vec<String>,
    pub column_labels: Vec<String>,
    /// `cells[row][col]`, read with the store's fail-closed lookup.
    pub cells: Vec<Vec<Validity>>,
    pub stats: MatrixStats,
}

impl MatrixView {
    pub fn new(group: &GroupDefinition, matrix: &ValidityMatrix, store: &ValidityStore) -> Self {
        let cells: Vec<Vec<Validity>> = matrix
            .axis_values
            .iter()
            .map(|axis_value| {
                matrix
                    .combinations
                    .iter()
                    .map(|combo| {
                        store.get(&ValidityKey::new(
                            matrix.group_id,
                            axis_value.as_str(),
                            combo.clone(),
                        ))
                    })
                    .collect()
            })
            .collect();

        let valid = cells.iter().flatten().filter(|v| v.is_valid()).count();

        MatrixView {
            group_id: matrix.group_id,
            caption: group.caption(),
            axis_values: matrix.axis_values.clone(),
            column_labels: matrix.column_labels(),
            cells,
            stats: MatrixStats {
                valid,
                total: matrix.cell_count(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let rows = [
            ["C1", "RTX4070", "MidTower"],
            ["C2", "RTX4060", "FullTower"],
        ];
        Dataset::new(
            ["Config", "GPU", "Case"].iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn case_group() -> GroupDefinition {
        GroupDefinition::new(1, vec!["Case".to_string(), "GPU".to_string()], "Case", "Fit").unwrap()
    }

    #[test]
    fn test_build_matrix_shape() {
        let matrix = build_matrix(&dataset(), &case_group(), &MatrixConfig::default()).unwrap();
        assert_eq!(matrix.axis_values, vec!["FullTower", "MidTower"]);
        assert_eq!(
            matrix.combinations,
            vec![ComboKey::new(["RTX4060"]), ComboKey::new(["RTX4070"])]
        );
        assert_eq!(matrix.cell_count(), 4);
        assert_eq!(matrix.column_labels(), vec!["GPU: RTX4060", "GPU: RTX4070"]);
    }

    #[test]
    fn test_limit_guard() {
        let config = MatrixConfig::default().with_max_cells(3);
        let err = build_matrix(&dataset(), &case_group(), &config).unwrap_err();
        assert_eq!(
            err,
            ConsistencyError::CombinationLimitExceeded { group_id: 1, cells: 4, limit: 3 }
        );

        let config = MatrixConfig::default().with_max_cells(4);
        assert!(build_matrix(&dataset(), &case_group(), &config).is_ok());
    }

    #[test]
    fn test_positions() {
        let matrix = build_matrix(&dataset(), &case_group(), &MatrixConfig::default()).unwrap();
        assert_eq!(matrix.axis_position("MidTower"), Some(1));
        assert_eq!(matrix.axis_position("MiniITX"), None);
        assert_eq!(matrix.combination_position(&ComboKey::new(["RTX4070"])), Some(1));
        assert!(matrix.key(2, 0).is_none());
    }

    #[test]
    fn test_seed_and_stats() {
        let group = case_group();
        let matrix = build_matrix(&dataset(), &group, &MatrixConfig::default()).unwrap();
        let mut store = ValidityStore::new();
        assert_eq!(matrix.seed_into(&mut store, false), 4);
        assert_eq!(matrix.stats(&store), MatrixStats { valid: 4, total: 4 });

        matrix.toggle_row(&mut store, 0);
        let view = MatrixView::new(&group, &matrix, &store);
        assert_eq!(view.stats.to_string(), "2/4 valid");
        assert_eq!(view.cells[0], vec![Validity::Invalid, Validity::Invalid]);
        assert_eq!(view.cells[1], vec![Validity::Valid, Validity::Valid]);
        assert_eq!(view.caption, "Fit: Case <-> GPU");
    }
}
