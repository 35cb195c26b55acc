//! FILENAME: core/matrix-engine/src/filter.rs
//! PURPOSE: Keep the rows that every group's grid marks valid.
//! CONTEXT: A row passes a group when the store holds `Valid` for
//! (group, trimmed axis cell, trimmed combination cells). Missing keys are
//! `Invalid`, so values the grid was never built from reject the row.
//! Pure function of (dataset, groups, store); original row order is kept.

use crate::combination::ComboKey;
use crate::dataset::{normalize_cell, Dataset};
use crate::definition::{GroupDefinition, GroupId};
use crate::logging::CAT_FILTER;
use crate::store::{ValidityKey, ValidityStore};

/// Column positions of one group, resolved once per filter pass.
/// `None` marks a column the dataset lacks; its cell reads as empty.
struct GroupProbe {
    group_id: GroupId,
    axis: Option<usize>,
    combo: Vec<Option<usize>>,
}

impl GroupProbe {
    fn key_for(&self, row: &[String]) -> ValidityKey {
        let cell = |pos: Option<usize>| -> String {
            pos.and_then(|p| row.get(p))
                .map(|v| normalize_cell(v).to_string())
                .unwrap_or_default()
        };
        let combo: ComboKey = self.combo.iter().map(|&pos| cell(pos)).collect();
        ValidityKey::new(self.group_id, cell(self.axis), combo)
    }
}

fn probes(dataset: &Dataset, groups: &[GroupDefinition]) -> Vec<GroupProbe> {
    groups
        .iter()
        .filter(|group| {
            let usable = group.columns().len() >= 2;
            if !usable {
                log_warn!(CAT_FILTER, "skipping group={} with fewer than 2 columns", group.id());
            }
            usable
        })
        .map(|group| GroupProbe {
            group_id: group.id(),
            axis: dataset.column_position(group.axis_column()),
            combo: group
                .combination_columns()
                .into_iter()
                .map(|c| dataset.column_position(c))
                .collect(),
        })
        .collect()
}

fn rejecting(probes: &[GroupProbe], row: &[String], store: &ValidityStore) -> Option<GroupId> {
    probes
        .iter()
        .find(|probe| !store.get(&probe.key_for(row)).is_valid())
        .map(|probe| probe.group_id)
}

/// Indices of the rows valid under every group, ascending.
/// With no groups every row passes.
pub fn filtered_row_indices(
    dataset: &Dataset,
    groups: &[GroupDefinition],
    store: &ValidityStore,
) -> Vec<usize> {
    let probes = probes(dataset, groups);
    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| rejecting(&probes, row, store).is_none())
        .map(|(index, _)| index)
        .collect()
}

/// The rows valid under every group, same columns, original order.
/// An empty result is a normal outcome, not an error.
pub fn filter_rows(dataset: &Dataset, groups: &[GroupDefinition], store: &ValidityStore) -> Dataset {
    let indices = filtered_row_indices(dataset, groups, store);
    log_info!(
        CAT_FILTER,
        "kept {}/{} rows across {} groups",
        indices.len(),
        dataset.row_count(),
        groups.len()
    );
    dataset.select_rows(&indices)
}

/// First group (in `groups` order) that rejects row `row_index`, or `None`
/// if the row passes or does not exist.
pub fn first_rejecting_group(
    dataset: &Dataset,
    row_index: usize,
    groups: &[GroupDefinition],
    store: &ValidityStore,
) -> Option<GroupId> {
    let row = dataset.row(row_index)?;
    rejecting(&probes(dataset, groups), row, store)
}
