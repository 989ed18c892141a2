//! Snapshot JSON export for external presentation consumers.

use tetrion::core::PlayfieldEngine;

#[test]
fn snapshot_serializes_with_the_expected_shape() {
    let engine = PlayfieldEngine::new(4);
    let snapshot = engine.snapshot();
    let json = serde_json::to_value(snapshot).expect("snapshot serializes");

    assert_eq!(json["score"], 0);
    assert_eq!(json["level"], 1);
    assert_eq!(json["lines"], 0);
    assert_eq!(json["game_over"], false);
    assert!(json["next"].is_string());
    assert!(json["held"].is_null());

    let grid = json["grid"].as_array().expect("grid rows");
    assert_eq!(grid.len(), 20);
    assert!(grid.iter().all(|row| row.as_array().unwrap().len() == 10));
}

#[test]
fn ghost_cells_export_as_negated_ids() {
    let engine = PlayfieldEngine::new(4);
    let id = i64::from(engine.active().kind.cell_id());
    let json = serde_json::to_value(engine.snapshot()).unwrap();

    let ghost_cells = json["grid"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .filter(|cell| cell.as_i64() == Some(-id))
        .count();
    assert_eq!(ghost_cells, 4);
}
