//! FILENAME: core/matrix-engine/src/session.rs
//! PURPOSE: One editing session: dataset, groups, grids and decisions.
//! CONTEXT: Replaces process-wide state with an owned value, so independent
//! sessions (or tests) never share decisions. Every public operation
//! validates first and mutates after, so callers never see a half-applied
//! edit.

use crate::combination::ComboKey;
use crate::config::{MatrixConfig, ReseedPolicy};
use crate::dataset::{normalize_cell, Dataset};
use crate::definition::{default_group_name, GroupConfig, GroupDefinition, GroupId};
use crate::error::MatrixError;
use crate::filter::{filter_rows, filtered_row_indices, first_rejecting_group};
use crate::logging::CAT_SESSION;
use crate::matrix::{build_matrix, MatrixStats, MatrixView, ValidityMatrix};
use crate::store::{Validity, ValidityKey, ValidityStore};

/// A group together with the grid built for it.
#[derive(Debug, Clone)]
struct GroupEntry {
    definition: GroupDefinition,
    matrix: ValidityMatrix,
}

#[derive(Debug, Clone)]
pub struct ValidationSession {
    dataset: Dataset,
    config: MatrixConfig,
    groups: Vec<GroupEntry>,
    store: ValidityStore,
    next_group_id: GroupId,
}

impl ValidationSession {
    pub fn new(dataset: Dataset, config: MatrixConfig) -> Self {
        ValidationSession {
            dataset,
            config,
            groups: Vec::new(),
            store: ValidityStore::new(),
            next_group_id: 1,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn store(&self) -> &ValidityStore {
        &self.store
    }

    /// Group definitions in display order.
    pub fn groups(&self) -> Vec<GroupDefinition> {
        self.groups.iter().map(|e| e.definition.clone()).collect()
    }

    pub fn group(&self, id: GroupId) -> Option<&GroupDefinition> {
        self.entry(id).ok().map(|e| &e.definition)
    }

    pub fn matrix(&self, id: GroupId) -> Option<&ValidityMatrix> {
        self.entry(id).ok().map(|e| &e.matrix)
    }

    fn entry(&self, id: GroupId) -> Result<&GroupEntry, MatrixError> {
        self.groups
            .iter()
            .find(|e| e.definition.id() == id)
            .ok_or(MatrixError::UnknownGroup(id))
    }

    fn entry_index(&self, id: GroupId) -> Result<usize, MatrixError> {
        self.groups
            .iter()
            .position(|e| e.definition.id() == id)
            .ok_or(MatrixError::UnknownGroup(id))
    }

    fn check_columns(&self, columns: &[String]) -> Result<(), MatrixError> {
        match columns.iter().find(|c| !self.dataset.has_column(c)) {
            Some(missing) => Err(MatrixError::UnknownColumn(missing.clone())),
            None => Ok(()),
        }
    }

    /// `name` or, when blank, "<prefix> <position>".
    fn resolve_name(&self, name: &str, position: usize) -> String {
        let name = name.trim();
        if name.is_empty() {
            default_group_name(&self.config.default_group_prefix, position)
        } else {
            name.to_string()
        }
    }

    fn prepare(
        &self,
        id: GroupId,
        columns: Vec<String>,
        axis_column: &str,
        name: String,
    ) -> Result<GroupEntry, MatrixError> {
        let definition = GroupDefinition::new(id, columns, axis_column, name)?;
        self.check_columns(definition.columns())?;
        let matrix = build_matrix(&self.dataset, &definition, &self.config)?;
        Ok(GroupEntry { definition, matrix })
    }

    // ========================================================================
    // GROUP EDITING
    // ========================================================================

    /// Adds a group at the end, builds its grid and seeds it `Valid`.
    pub fn add_group(
        &mut self,
        columns: Vec<String>,
        axis_column: &str,
        name: &str,
    ) -> Result<GroupId, MatrixError> {
        let id = self.next_group_id;
        let name = self.resolve_name(name, self.groups.len() + 1);
        let entry = self.prepare(id, columns, axis_column, name)?;

        self.next_group_id += 1;
        let inserted = entry.matrix.seed_into(&mut self.store, false);
        log_info!(
            CAT_SESSION,
            "added group={} '{}' cells={} seeded={}",
            id,
            entry.definition.name(),
            entry.matrix.cell_count(),
            inserted
        );
        self.groups.push(entry);
        Ok(id)
    }

    /// Changes a group's columns and axis, keeping its id and name. The
    /// group's grid is rebuilt; its decisions are reset unless the policy is
    /// `WhenColumnsChange` and the layout is unchanged.
    pub fn redefine_group(
        &mut self,
        id: GroupId,
        columns: Vec<String>,
        axis_column: &str,
    ) -> Result<(), MatrixError> {
        let index = self.entry_index(id)?;
        let name = self.groups[index].definition.name().to_string();
        let entry = self.prepare(id, columns, axis_column, name)?;

        let reset = match self.config.reseed_policy {
            ReseedPolicy::Always => true,
            ReseedPolicy::WhenColumnsChange => {
                !entry.definition.same_layout(&self.groups[index].definition)
            }
        };
        let inserted = entry.matrix.seed_into(&mut self.store, reset);
        log_info!(
            CAT_SESSION,
            "redefined group={} reset={} seeded={}",
            id,
            reset,
            inserted
        );
        self.groups[index] = entry;
        Ok(())
    }

    /// Renames a group. Id and decisions are kept; a blank name falls back to
    /// the positional default.
    pub fn rename_group(&mut self, id: GroupId, name: &str) -> Result<(), MatrixError> {
        let index = self.entry_index(id)?;
        let name = self.resolve_name(name, index + 1);
        self.groups[index].definition.rename(name);
        Ok(())
    }

    /// Removes a group and forgets its decisions.
    pub fn remove_group(&mut self, id: GroupId) -> Result<GroupDefinition, MatrixError> {
        let index = self.entry_index(id)?;
        let entry = self.groups.remove(index);
        let removed = self.store.clear_group(id);
        log_info!(CAT_SESSION, "removed group={} entries={}", id, removed);
        Ok(entry.definition)
    }

    /// Replaces every group with `configs` (the bulk "manage groups" edit).
    /// All groups get fresh ids and freshly seeded grids; decisions of the
    /// previous groups are dropped. Nothing changes if any config is invalid.
    pub fn replace_groups(&mut self, configs: Vec<GroupConfig>) -> Result<Vec<GroupId>, MatrixError> {
        let mut entries = Vec::with_capacity(configs.len());
        for (offset, config) in configs.into_iter().enumerate() {
            let id = self.next_group_id + offset as GroupId;
            let name = self.resolve_name(&config.name, offset + 1);
            entries.push(self.prepare(id, config.columns, &config.axis_column, name)?);
        }

        for old in &self.groups {
            self.store.clear_group(old.definition.id());
        }
        self.next_group_id += entries.len() as GroupId;
        for entry in &entries {
            entry.matrix.seed_into(&mut self.store, true);
        }

        let ids: Vec<GroupId> = entries.iter().map(|e| e.definition.id()).collect();
        log_info!(CAT_SESSION, "replaced groups: {:?}", ids);
        self.groups = entries;
        Ok(ids)
    }

    /// Persisted shape of every group, in display order.
    pub fn group_configs(&self) -> Vec<GroupConfig> {
        self.groups.iter().map(|e| e.definition.to_config()).collect()
    }

    // ========================================================================
    // CELL EDITING
    // ========================================================================

    fn grid_key(&self, id: GroupId, row: usize, col: usize) -> Result<ValidityKey, MatrixError> {
        self.entry(id)?
            .matrix
            .key(row, col)
            .ok_or(MatrixError::CellOutOfRange { group_id: id, row, col })
    }

    /// Current state of the cell at grid position (row, col).
    pub fn cell(&self, id: GroupId, row: usize, col: usize) -> Result<Validity, MatrixError> {
        Ok(self.store.get(&self.grid_key(id, row, col)?))
    }

    pub fn set_cell(
        &mut self,
        id: GroupId,
        row: usize,
        col: usize,
        state: Validity,
    ) -> Result<(), MatrixError> {
        let key = self.grid_key(id, row, col)?;
        self.store.set(key, state);
        Ok(())
    }

    /// Sets a decision by value. The key does not have to be part of the
    /// current grid.
    pub fn set_validity(&mut self, id: GroupId, axis_value: &str, combo: ComboKey, state: Validity) {
        self.store.set(ValidityKey::new(id, axis_value, combo), state);
    }

    pub fn validity(&self, id: GroupId, axis_value: &str, combo: ComboKey) -> Validity {
        self.store.get(&ValidityKey::new(id, axis_value, combo))
    }

    /// Toggles grid row `row`. `None` when the grid has no columns.
    pub fn toggle_row(&mut self, id: GroupId, row: usize) -> Result<Option<Validity>, MatrixError> {
        let index = self.entry_index(id)?;
        let matrix = &self.groups[index].matrix;
        if row >= matrix.row_count() {
            return Err(MatrixError::CellOutOfRange { group_id: id, row, col: 0 });
        }
        Ok(matrix.toggle_row(&mut self.store, row))
    }

    /// Toggles grid column `col`. `None` when the grid has no rows.
    pub fn toggle_column(&mut self, id: GroupId, col: usize) -> Result<Option<Validity>, MatrixError> {
        let index = self.entry_index(id)?;
        let matrix = &self.groups[index].matrix;
        if col >= matrix.column_count() {
            return Err(MatrixError::CellOutOfRange { group_id: id, row: 0, col });
        }
        Ok(matrix.toggle_column(&mut self.store, col))
    }

    /// Toggles the grid row of `axis_value` (trimmed before lookup).
    pub fn toggle_row_value(
        &mut self,
        id: GroupId,
        axis_value: &str,
    ) -> Result<Option<Validity>, MatrixError> {
        let row = self
            .entry(id)?
            .matrix
            .axis_position(normalize_cell(axis_value))
            .ok_or_else(|| MatrixError::ValueNotInGrid {
                group_id: id,
                value: axis_value.to_string(),
            })?;
        self.toggle_row(id, row)
    }

    /// Toggles the grid column of `combo`.
    pub fn toggle_column_value(
        &mut self,
        id: GroupId,
        combo: &ComboKey,
    ) -> Result<Option<Validity>, MatrixError> {
        let col = self
            .entry(id)?
            .matrix
            .combination_position(combo)
            .ok_or_else(|| MatrixError::ValueNotInGrid {
                group_id: id,
                value: combo.to_string(),
            })?;
        self.toggle_column(id, col)
    }

    // ========================================================================
    // READ SIDE
    // ========================================================================

    pub fn view(&self, id: GroupId) -> Result<MatrixView, MatrixError> {
        let entry = self.entry(id)?;
        Ok(MatrixView::new(&entry.definition, &entry.matrix, &self.store))
    }

    pub fn stats(&self, id: GroupId) -> Result<MatrixStats, MatrixError> {
        Ok(self.entry(id)?.matrix.stats(&self.store))
    }

    /// Rows valid under every group.
    pub fn filter(&self) -> Dataset {
        filter_rows(&self.dataset, &self.groups(), &self.store)
    }

    pub fn filtered_indices(&self) -> Vec<usize> {
        filtered_row_indices(&self.dataset, &self.groups(), &self.store)
    }

    /// Which group rejects dataset row `row_index`, if any.
    pub fn rejected_by(&self, row_index: usize) -> Option<GroupId> {
        first_rejecting_group(&self.dataset, row_index, &self.groups(), &self.store)
    }
}
