//! FILENAME: tests/test_session.rs
//! Integration tests for a full validation session.

mod common;

use common::{config_ids, strings, BuildsFixture};
use matrix_engine::{ComboKey, GroupConfig, MatrixConfig, ValidationSession, Validity};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Session with a CPU/Motherboard socket group and a GPU/Case/PSU fit group.
fn create_session() -> (ValidationSession, u32, u32) {
    let mut session = ValidationSession::new(BuildsFixture::dataset(), MatrixConfig::default());
    let socket = session
        .add_group(strings(&["CPU", "Motherboard"]), "CPU", "Socket")
        .unwrap();
    let fit = session
        .add_group(strings(&["Case", "GPU", "PSU"]), "Case", "")
        .unwrap();
    (session, socket, fit)
}

// ============================================================================
// GRID TESTS
// ============================================================================

#[test]
fn test_grids_cover_every_combination() {
    let (session, socket, fit) = create_session();

    let socket_view = session.view(socket).unwrap();
    assert_eq!(socket_view.axis_values, strings(&["Core i5", "Core i7", "Ryzen 5", "Ryzen 7"]));
    assert_eq!(socket_view.column_labels.len(), 4);
    assert_eq!(socket_view.stats.total, 16);
    assert_eq!(socket_view.stats.valid, 16);

    let fit_view = session.view(fit).unwrap();
    assert_eq!(fit_view.caption, "Group 2: Case <-> GPU+PSU");
    // 3 cases x (4 GPUs x 5 PSUs); the blank GPU cell is not a value.
    assert_eq!(fit_view.stats.total, 3 * 4 * 5);
    assert_eq!(fit_view.column_labels[0], "GPU: RTX4060 / PSU: 1000W");
}

// ============================================================================
// FILTER TESTS
// ============================================================================

#[test]
fn test_all_valid_keeps_rows_with_known_values() {
    let (session, _, _) = create_session();
    // PC-007 has a blank GPU, which no grid column covers.
    assert_eq!(
        config_ids(&session.filter()),
        strings(&["PC-001", "PC-002", "PC-003", "PC-004", "PC-005", "PC-006"])
    );
    assert_eq!(session.rejected_by(6), Some(2));
}

#[test]
fn test_marking_sockets_invalid() {
    let (mut session, socket, _) = create_session();

    for (cpu, board) in [("Ryzen 5", "B760"), ("Ryzen 5", "Z790"), ("Ryzen 7", "B760"), ("Ryzen 7", "Z790")] {
        session.set_validity(socket, cpu, ComboKey::new([board]), Validity::Invalid);
    }
    // Intel boards stay valid for Intel CPUs; Ryzen 5 on X670 is fine.
    assert_eq!(session.filter().row_count(), 6);

    session.set_validity(socket, "Core i7", ComboKey::new(["B760"]), Validity::Invalid);
    let kept = config_ids(&session.filter());
    assert!(!kept.contains(&"PC-006".to_string()));
    assert_eq!(session.rejected_by(5), Some(socket));
}

#[test]
fn test_toggle_column_then_filter_is_idempotent() {
    let (mut session, _, fit) = create_session();
    let matrix = session.matrix(fit).unwrap().clone();
    let col = matrix
        .combination_position(&ComboKey::new(["RTX4090", "1000W"]))
        .unwrap();

    assert_eq!(session.toggle_column(fit, col).unwrap(), Some(Validity::Invalid));
    let once = session.filter();
    assert!(!config_ids(&once).contains(&"PC-006".to_string()));

    let again = matrix_engine::filter_rows(&once, &session.groups(), session.store());
    assert_eq!(once, again);
}

#[test]
fn test_group_configs_round_trip_through_replace() {
    let (mut session, socket, _) = create_session();
    let configs = session.group_configs();
    assert_eq!(configs[0], GroupConfig::new(strings(&["CPU", "Motherboard"]), "CPU", "Socket"));

    session.set_validity(socket, "Core i5", ComboKey::new(["B760"]), Validity::Invalid);
    let ids = session.replace_groups(configs.clone()).unwrap();

    assert_eq!(session.group_configs(), configs);
    // Bulk replacement starts every grid fresh.
    assert_eq!(
        session.validity(ids[0], "Core i5", ComboKey::new(["B760"])),
        Validity::Valid
    );
}
