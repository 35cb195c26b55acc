//! FILENAME: core/persistence/src/groups.rs
//! PURPOSE: JSON files for group definitions and engine settings.
//! CONTEXT: Group files hold an array of `{ columns, eje_y, nombre }`;
//! ids are not stored and get assigned when a session loads the groups.

use std::fs;
use std::path::Path;

use matrix_engine::definition::validate_group;
use matrix_engine::{log_info, GroupConfig, MatrixConfig};

use crate::{PersistenceError, CAT_PERSIST};

pub fn save_groups(path: &Path, groups: &[GroupConfig]) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(groups)?;
    fs::write(path, json)?;
    log_info!(CAT_PERSIST, "saved {} groups to {:?}", groups.len(), path);
    Ok(())
}

/// Reads a group file, checking every entry against the group schema.
pub fn load_groups(path: &Path) -> Result<Vec<GroupConfig>, PersistenceError> {
    let json = fs::read_to_string(path)?;
    let groups: Vec<GroupConfig> = serde_json::from_str(&json)?;

    for (index, group) in groups.iter().enumerate() {
        validate_group(&group.columns, &group.axis_column)
            .map_err(|source| PersistenceError::Group { index, source })?;
    }

    log_info!(CAT_PERSIST, "loaded {} groups from {:?}", groups.len(), path);
    Ok(groups)
}

pub fn save_config(path: &Path, config: &MatrixConfig) -> Result<(), PersistenceError> {
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

/// Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<MatrixConfig, PersistenceError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
