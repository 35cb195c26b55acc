//! FILENAME: core/matrix-engine/src/dataset.rs
//! PURPOSE: The tabular input the engine works on.
//! CONTEXT: A loader (delimited text, XLSX, pasted clipboard) decodes the
//! source into header + rows of text. The engine never mutates a Dataset;
//! filtering produces a new one with the same columns.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::error::DatasetError;

/// Suffixes pandas-style cross joins give to colliding headers.
const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

/// Trim contract shared by every component: cells are compared by their
/// whitespace-trimmed text, nothing else.
pub fn normalize_cell(value: &str) -> &str {
    value.trim()
}

/// An ordered sequence of rows sharing one set of named columns.
/// The first column identifies the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Builds a dataset, checking that headers are unique and every row has
    /// exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, DatasetError> {
        if columns.is_empty() {
            return Err(DatasetError::NoColumns);
        }

        let mut seen = FxHashSet::default();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(DatasetError::DuplicateHeader {
                    column: column.clone(),
                });
            }
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DatasetError::RowWidthMismatch {
                    row: index,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }

        Ok(Dataset { columns, rows })
    }

    /// Header-less table (e.g. pasted from a spreadsheet): columns are named
    /// `Col1..ColN` after the width of the first row.
    pub fn with_positional_headers(rows: Vec<Vec<String>>) -> Result<Self, DatasetError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let columns = (1..=width).map(|i| format!("Col{}", i)).collect();
        Dataset::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    /// Raw (untrimmed) text of one cell.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_position(column)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Name of the configuration identifier column.
    pub fn config_column(&self) -> &str {
        &self.columns[0]
    }

    /// Every column except the configuration identifier; these are the
    /// columns a group may be built from.
    pub fn component_columns(&self) -> &[String] {
        &self.columns[1..]
    }

    /// Rows at `indices`, in the order given. Out-of-range indices are skipped.
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        Dataset {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Cartesian product of two tables: every left row is paired with every
    /// right row (left outer, right inner). Headers present on both sides get
    /// `_x` / `_y` suffixes, repeated until the name is free.
    pub fn cross_join(left: &Dataset, right: &Dataset) -> Result<Dataset, DatasetError> {
        let right_names: FxHashSet<&str> = right.columns.iter().map(String::as_str).collect();
        let left_names: FxHashSet<&str> = left.columns.iter().map(String::as_str).collect();
        let mut taken: FxHashSet<String> =
            left.columns.iter().chain(&right.columns).cloned().collect();

        let mut columns = Vec::with_capacity(left.columns.len() + right.columns.len());
        for name in &left.columns {
            if right_names.contains(name.as_str()) {
                columns.push(suffixed(name, LEFT_SUFFIX, &mut taken));
            } else {
                columns.push(name.clone());
            }
        }
        for name in &right.columns {
            if left_names.contains(name.as_str()) {
                columns.push(suffixed(name, RIGHT_SUFFIX, &mut taken));
            } else {
                columns.push(name.clone());
            }
        }

        let mut rows = Vec::with_capacity(left.rows.len().saturating_mul(right.rows.len()));
        for l in &left.rows {
            for r in &right.rows {
                let mut row = Vec::with_capacity(columns.len());
                row.extend(l.iter().cloned());
                row.extend(r.iter().cloned());
                rows.push(row);
            }
        }

        Dataset::new(columns, rows)
    }
}

/// `name` + `suffix`, with the suffix repeated while the result is taken.
fn suffixed(name: &str, suffix: &str, taken: &mut FxHashSet<String>) -> String {
    let mut candidate = format!("{}{}", name, suffix);
    while taken.contains(&candidate) {
        candidate.push_str(suffix);
    }
    taken.insert(candidate.clone());
    candidate
}
