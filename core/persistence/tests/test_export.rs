//! FILENAME: tests/test_export.rs
//! Integration tests: load, filter, export.

use matrix_engine::{ComboKey, MatrixConfig, ValidationSession, Validity};
use persistence::{
    load_dataset_xlsx, load_groups, read_delimited, read_delimited_file, save_dataset_xlsx,
    save_groups, write_delimited_file,
};
use tempfile::tempdir;

const CATALOGUE: &str = "\
Config;GPU;Case;PSU
C1;RTX4070;MidTower;750W
C2;RTX4060;FullTower;650W
C3;RTX4090;MidTower;850W
C4;RTX4090;FullTower;1000W
";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn filtered_session() -> ValidationSession {
    let dataset = read_delimited(CATALOGUE, ';').unwrap();
    let mut session = ValidationSession::new(dataset, MatrixConfig::default());
    let fit = session
        .add_group(strings(&["Case", "GPU"]), "Case", "Fit")
        .unwrap();
    session.set_validity(fit, "MidTower", ComboKey::new(["RTX4090"]), Validity::Invalid);
    session
}

#[test]
fn test_filtered_csv_export() {
    let session = filtered_session();
    let filtered = session.filter();
    assert_eq!(filtered.row_count(), 3);

    let dir = tempdir().unwrap();
    let path = dir.path().join("valid.csv");
    write_delimited_file(&filtered, &path, ',').unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "Config,GPU,Case,PSU\nC1,RTX4070,MidTower,750W\nC2,RTX4060,FullTower,650W\nC4,RTX4090,FullTower,1000W\n"
    );
    assert_eq!(read_delimited_file(&path, ',').unwrap(), filtered);
}

#[test]
fn test_xlsx_round_trip() {
    let session = filtered_session();
    let filtered = session.filter();

    let dir = tempdir().unwrap();
    let path = dir.path().join("valid.xlsx");
    save_dataset_xlsx(&filtered, &path).unwrap();

    let loaded = load_dataset_xlsx(&path, None).unwrap();
    assert_eq!(loaded, filtered);
    assert!(load_dataset_xlsx(&path, Some("Nope")).is_err());
}

#[test]
fn test_groups_file_restores_session_layout() {
    let session = filtered_session();
    let dir = tempdir().unwrap();
    let path = dir.path().join("groups.json");
    save_groups(&path, &session.group_configs()).unwrap();

    let mut restored = ValidationSession::new(session.dataset().clone(), MatrixConfig::default());
    restored.replace_groups(load_groups(&path).unwrap()).unwrap();

    assert_eq!(restored.group_configs(), session.group_configs());
    // Decisions are not part of the group file.
    assert_eq!(restored.filter().row_count(), 4);
}
