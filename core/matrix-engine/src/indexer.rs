//! FILENAME: core/matrix-engine/src/indexer.rs
//! PURPOSE: Distinct-value index of one dataset column.
//! CONTEXT: Values are trimmed, empty strings dropped, deduplicated and sorted
//! by ordinal (byte-wise, case-sensitive) order, so the same column always
//! yields the same sequence. Grid rows and combination headers both come
//! from here.

use rustc_hash::FxHashSet;

use crate::dataset::{normalize_cell, Dataset};

/// Sorted distinct values of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueIndex {
    column: String,
    values: Vec<String>,
}

impl ValueIndex {
    /// Scans `column` once. A column the dataset does not have indexes as empty.
    pub fn build(dataset: &Dataset, column: &str) -> Self {
        let values = match dataset.column_position(column) {
            Some(col) => {
                let mut seen: FxHashSet<&str> = FxHashSet::default();
                for row in dataset.rows() {
                    let value = normalize_cell(&row[col]);
                    if !value.is_empty() {
                        seen.insert(value);
                    }
                }
                let mut values: Vec<String> = seen.into_iter().map(str::to_string).collect();
                values.sort_unstable();
                values
            }
            None => Vec::new(),
        };

        ValueIndex {
            column: column.to_string(),
            values,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of a (trimmed) value in sorted order.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.values
            .binary_search_by(|probe| probe.as_str().cmp(value))
            .ok()
    }

    /// At most `limit` values, for a quick look at what a column holds.
    pub fn preview(&self, limit: usize) -> &[String] {
        &self.values[..self.values.len().min(limit)]
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

/// Sorted, distinct, trimmed, non-empty values of `column`.
pub fn distinct_values(dataset: &Dataset, column: &str) -> Vec<String> {
    ValueIndex::build(dataset, column).into_values()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let rows = [
            ["C1", " RTX4070 ", "b"],
            ["C2", "RTX4060", "B"],
            ["C3", "RTX4070", ""],
            ["C4", "rtx4060", "  "],
            ["C5", "RTX4060", "a"],
        ];
        Dataset::new(
            vec!["Config".to_string(), "GPU".to_string(), "Tag".to_string()],
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_distinct_values_are_trimmed_deduped_sorted() {
        let ds = dataset();
        assert_eq!(distinct_values(&ds, "GPU"), vec!["RTX4060", "RTX4070", "rtx4060"]);
    }

    #[test]
    fn test_empty_values_are_dropped_and_sort_is_ordinal() {
        let ds = dataset();
        // Uppercase sorts before lowercase in ordinal order.
        assert_eq!(distinct_values(&ds, "Tag"), vec!["B", "a", "b"]);
    }

    #[test]
    fn test_unknown_column_is_empty() {
        let ds = dataset();
        let index = ValueIndex::build(&ds, "PSU");
        assert!(index.is_empty());
        assert_eq!(index.column(), "PSU");
    }

    #[test]
    fn test_position_and_preview() {
        let ds = dataset();
        let index = ValueIndex::build(&ds, "GPU");
        assert_eq!(index.position("RTX4070"), Some(1));
        assert_eq!(index.position(" RTX4070 "), None);
        assert_eq!(index.preview(2), &index.values()[..2]);
        assert_eq!(index.preview(100).len(), 3);
    }

    #[test]
    fn test_build_is_deterministic() {
        let ds = dataset();
        assert_eq!(ValueIndex::build(&ds, "GPU"), ValueIndex::build(&ds, "GPU"));
    }
}
