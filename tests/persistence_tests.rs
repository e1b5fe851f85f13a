//! Integrationstests für Speichern und Laden über den Controller.

mod common;

use common::Harness;
use outcrop_polyline_mapper::io::SUMMARY_FILE_NAME;
use outcrop_polyline_mapper::{AppIntent, EditorMode, ModeKey, SceneRequest};
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "outcrop_persistence_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_save_and_load_roundtrip_through_controller() {
    let base = temp_dir("roundtrip");
    let mut h = Harness::new();
    h.digitize(&[(100.0, 100.0), (200.0, 100.0), (300.0, 150.0)]);
    h.digitize(&[(100.0, 500.0), (400.0, 500.0)]);
    let saved = h.state.store.sequences();

    h.send(AppIntent::SaveToDirectoryRequested { dir: base.clone() });

    let output_dir = base.join("polylines_output");
    assert_eq!(h.state.ui.last_saved_dir.as_ref(), Some(&output_dir));
    assert!(output_dir.join("polyline_001.txt").is_file());
    assert!(output_dir.join("polyline_002.dat").is_file());

    let mut fresh = Harness::new();
    fresh.send(AppIntent::LoadRequested {
        path: output_dir.join(SUMMARY_FILE_NAME),
    });

    assert_eq!(fresh.state.store.sequences(), saved);
    assert_eq!(fresh.state.store.selected(), None);
    assert!(fresh
        .take_requests()
        .iter()
        .filter(|r| matches!(r, SceneRequest::ShowPolyline { .. }))
        .count()
        == 2);

    let _ = std::fs::remove_dir_all(&base);
}

#[test]
fn test_second_save_reuses_remembered_directory() {
    let base = temp_dir("remembered");
    let mut h = Harness::new();
    h.digitize(&[(100.0, 100.0), (200.0, 100.0)]);
    h.send(AppIntent::SaveToDirectoryRequested { dir: base.clone() });

    h.digitize(&[(100.0, 300.0), (200.0, 300.0)]);
    h.send(AppIntent::SaveRequested);

    assert!(!h.state.ui.show_save_dialog);
    assert!(base.join("polylines_output").join("polyline_002.txt").is_file());

    let _ = std::fs::remove_dir_all(&base);
}

#[test]
fn test_saving_empty_store_writes_nothing() {
    let base = temp_dir("empty");
    let mut h = Harness::new();

    h.send(AppIntent::SaveToDirectoryRequested { dir: base.clone() });

    assert!(!base.join("polylines_output").exists());
    assert!(h.state.ui.last_saved_dir.is_none());
}

#[test]
fn test_loading_replaces_store_and_is_undoable() {
    let base = temp_dir("replace");
    let mut source = Harness::new();
    source.digitize(&[(100.0, 100.0), (200.0, 100.0)]);
    source.send(AppIntent::SaveToDirectoryRequested { dir: base.clone() });

    let mut h = Harness::new();
    h.digitize(&[(500.0, 500.0), (600.0, 500.0)]);
    h.digitize(&[(500.0, 700.0), (600.0, 700.0)]);
    let before = h.state.store.sequences();

    h.send(AppIntent::LoadRequested {
        path: base.join("polylines_output").join(SUMMARY_FILE_NAME),
    });
    assert_eq!(h.state.polyline_count(), 1);

    h.send(AppIntent::UndoRequested);
    assert_eq!(h.state.store.sequences(), before);

    let _ = std::fs::remove_dir_all(&base);
}

#[test]
fn test_loading_in_edit_mode_falls_back_to_select() {
    let base = temp_dir("edit_fallback");
    let mut h = Harness::new();
    h.digitize(&[(100.0, 100.0), (200.0, 100.0)]);
    h.send(AppIntent::SaveToDirectoryRequested { dir: base.clone() });
    h.click(150.0, 100.0);
    h.key(ModeKey::ToggleEdit);
    assert_eq!(h.state.mode(), EditorMode::Edit);

    h.send(AppIntent::LoadRequested {
        path: base.join("polylines_output").join(SUMMARY_FILE_NAME),
    });

    assert_eq!(h.state.mode(), EditorMode::Select);
    assert_eq!(h.state.polyline_count(), 1);

    let _ = std::fs::remove_dir_all(&base);
}

#[test]
fn test_loading_invalid_file_fails_and_keeps_store() {
    let base = temp_dir("invalid");
    std::fs::create_dir_all(&base).expect("Temp-Verzeichnis sollte anlegbar sein");
    let path = base.join("broken.json");
    std::fs::write(&path, "{ kein json").expect("Datei sollte schreibbar sein");

    let mut h = Harness::new();
    h.digitize(&[(100.0, 100.0), (200.0, 100.0)]);

    let result = h
        .controller
        .handle_intent(&mut h.state, &mut h.scene, AppIntent::LoadRequested { path });

    assert!(result.is_err());
    assert_eq!(h.state.polyline_count(), 1);

    let _ = std::fs::remove_dir_all(&base);
}

#[test]
fn test_loading_missing_file_fails() {
    let mut h = Harness::new();

    let result = h.controller.handle_intent(
        &mut h.state,
        &mut h.scene,
        AppIntent::LoadRequested {
            path: temp_dir("missing").join(SUMMARY_FILE_NAME),
        },
    );

    assert!(result.is_err());
    assert!(h.state.store.is_empty());
}

#[test]
fn test_loading_many_polylines_with_shared_start_point() {
    let base = temp_dir("shared_start");
    std::fs::create_dir_all(&base).expect("Temp-Verzeichnis sollte anlegbar sein");
    let polylines: Vec<String> = (0..40)
        .map(|i| format!(r#"{{"points": [[10.0, 10.0, 0.0], [{}.0, 30.0, 0.0]]}}"#, 10 + i))
        .collect();
    let json = format!(
        r#"{{"num_polylines": 40, "polylines": [{}]}}"#,
        polylines.join(", ")
    );
    let path = base.join(SUMMARY_FILE_NAME);
    std::fs::write(&path, json).expect("Datei sollte schreibbar sein");

    let mut h = Harness::new();
    h.send(AppIntent::LoadRequested { path });

    assert_eq!(h.state.polyline_count(), 40);

    // Klick auf den gemeinsamen Startpunkt selektiert die älteste Polylinie
    h.click(100.0, 100.0);
    assert_eq!(h.state.store.selected(), h.state.store.ids().next());

    let _ = std::fs::remove_dir_all(&base);
}
