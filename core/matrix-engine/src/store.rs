//! FILENAME: core/matrix-engine/src/store.rs
//! PURPOSE: Validity decisions for every grid cell of every group.
//! CONTEXT: Physically a partial map. Two defaults apply and they differ on
//! purpose: seeding a grid inserts `Valid` for cells not yet present, while
//! a lookup of a key that was never inserted answers `Invalid` (fail-closed),
//! so rows with values the grid never saw cannot slip through a filter.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::combination::ComboKey;
use crate::definition::GroupId;
use crate::logging::CAT_STORE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Validity {
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }

    pub fn flipped(self) -> Self {
        match self {
            Validity::Valid => Validity::Invalid,
            Validity::Invalid => Validity::Valid,
        }
    }
}

/// Identity of one grid cell. Equality is by value on all three parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityKey {
    pub group_id: GroupId,
    pub axis_value: String,
    pub combo: ComboKey,
}

impl ValidityKey {
    pub fn new(group_id: GroupId, axis_value: impl Into<String>, combo: ComboKey) -> Self {
        ValidityKey {
            group_id,
            axis_value: axis_value.into(),
            combo,
        }
    }
}

/// Validity map owned by one editing session.
#[derive(Debug, Clone, Default)]
pub struct ValidityStore {
    entries: FxHashMap<ValidityKey, Validity>,
}

impl ValidityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `Valid` for every (axis value, combination) pair of `group_id`
    /// that is not stored yet. With `reset`, the group's existing entries are
    /// dropped first. Other groups are never touched.
    /// Returns the number of entries inserted.
    pub fn seed(
        &mut self,
        group_id: GroupId,
        axis_values: &[String],
        combos: &[ComboKey],
        reset: bool,
    ) -> usize {
        if reset {
            self.clear_group(group_id);
        }

        let mut inserted = 0;
        for axis_value in axis_values {
            for combo in combos {
                let key = ValidityKey::new(group_id, axis_value.as_str(), combo.clone());
                self.entries.entry(key).or_insert_with(|| {
                    inserted += 1;
                    Validity::Valid
                });
            }
        }

        log_debug!(
            CAT_STORE,
            "seed group={} reset={} inserted={} total={}",
            group_id,
            reset,
            inserted,
            self.entries.len()
        );
        inserted
    }

    /// Stored state, or `Invalid` when the key was never inserted.
    pub fn get(&self, key: &ValidityKey) -> Validity {
        self.entries.get(key).copied().unwrap_or(Validity::Invalid)
    }

    pub fn contains(&self, key: &ValidityKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(&mut self, key: ValidityKey, state: Validity) {
        self.entries.insert(key, state);
    }

    /// Flips a grid row. Every cell is set to the opposite of the first
    /// cell's current state, so a uniform row flips and a mixed row becomes
    /// uniform. Returns the new state, or `None` for a row without cells.
    pub fn toggle_row(
        &mut self,
        group_id: GroupId,
        axis_value: &str,
        combos: &[ComboKey],
    ) -> Option<Validity> {
        let keys = combos
            .iter()
            .map(|combo| ValidityKey::new(group_id, axis_value, combo.clone()))
            .collect();
        self.toggle_cells(keys)
    }

    /// Column counterpart of [`ValidityStore::toggle_row`].
    pub fn toggle_column(
        &mut self,
        group_id: GroupId,
        combo: &ComboKey,
        axis_values: &[String],
    ) -> Option<Validity> {
        let keys = axis_values
            .iter()
            .map(|axis_value| ValidityKey::new(group_id, axis_value.as_str(), combo.clone()))
            .collect();
        self.toggle_cells(keys)
    }

    fn toggle_cells(&mut self, keys: Vec<ValidityKey>) -> Option<Validity> {
        let target = self.get(keys.first()?).flipped();
        let count = keys.len();
        for key in keys {
            self.entries.insert(key, target);
        }
        log_debug!(CAT_STORE, "toggle cells={} -> {:?}", count, target);
        Some(target)
    }

    /// Drops every entry of `group_id`. Returns how many were removed.
    pub fn clear_group(&mut self, group_id: GroupId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.group_id != group_id);
        before - self.entries.len()
    }

    /// Number of entries stored for `group_id`.
    pub fn group_len(&self, group_id: GroupId) -> usize {
        self.entries.keys().filter(|k| k.group_id == group_id).count()
    }
}
