//! Integrationstests für die Endpunkt-Topologie:
//! - automatische Klassifikation über den Controller (inkl. Undo)
//! - manuelles Setzen einer Abschlussart
//! - Erhalt des `topology`-Blocks beim Laden und Speichern

mod common;

use common::Harness;
use glam::DVec3;
use outcrop_polyline_mapper::io::SUMMARY_FILE_NAME;
use outcrop_polyline_mapper::{AppIntent, PolylineEnd, PolylineId, SceneRequest, Termination};
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "outcrop_topology_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn terminations(h: &Harness, id: PolylineId) -> Option<[Termination; 2]> {
    h.state
        .store
        .get(id)
        .and_then(|line| line.topology.as_ref())
        .map(|t| t.terminations)
}

/// Horizontale Spur A und senkrechte Spur B, die auf A endet.
fn harness_with_t_junction() -> (Harness, PolylineId, PolylineId) {
    let mut h = Harness::new();
    let a = h.digitize(&[
        (100.0, 500.0),
        (200.0, 500.0),
        (300.0, 500.0),
        (400.0, 500.0),
        (500.0, 500.0),
        (600.0, 500.0),
        (700.0, 500.0),
        (800.0, 500.0),
        (900.0, 500.0),
    ]);
    let b = h.digitize(&[
        (500.0, 100.0),
        (500.0, 200.0),
        (500.0, 300.0),
        (500.0, 400.0),
        (500.0, 498.0),
    ]);
    (h, a, b)
}

#[test]
fn test_classification_marks_abutting_and_blind_ends() {
    let (mut h, a, b) = harness_with_t_junction();
    let undo_len = h.state.history.undo_len();
    h.take_requests();

    h.send(AppIntent::ClassifyTopologyRequested);

    // tau = 2 × mittlerer Stützpunktabstand (knapp 10), also knapp 20
    assert_eq!(terminations(&h, a), Some([Termination::Blind, Termination::Blind]));
    assert_eq!(
        terminations(&h, b),
        Some([Termination::Blind, Termination::Abutting])
    );
    let contacts = h
        .state
        .store
        .get(b)
        .and_then(|line| line.topology.clone())
        .map(|t| t.intersecting);
    assert_eq!(contacts, Some(vec![a]));
    assert_eq!(h.state.history.undo_len(), undo_len + 1);

    let requests = h.take_requests();
    assert!(requests.iter().any(|r| matches!(
        r,
        SceneRequest::ShowPolyline { id, terminations: Some(t), .. }
            if *id == b && t[1] == Termination::Abutting
    )));
    assert!(h
        .state
        .ui
        .status_message
        .as_deref()
        .is_some_and(|s| s.contains("1 A")));
}

#[test]
fn test_end_near_mesh_boundary_is_censored() {
    let (mut h, _a, b) = harness_with_t_junction();
    h.scene.boundary = vec![DVec3::new(50.0, 5.0, 0.0)];

    h.send(AppIntent::ClassifyTopologyRequested);

    assert_eq!(
        terminations(&h, b),
        Some([Termination::Censored, Termination::Abutting])
    );
}

#[test]
fn test_classification_is_undoable() {
    let (mut h, a, _b) = harness_with_t_junction();
    h.send(AppIntent::ClassifyTopologyRequested);
    assert!(terminations(&h, a).is_some());

    h.send(AppIntent::UndoRequested);

    assert!(terminations(&h, a).is_none());
    assert_eq!(h.state.polyline_count(), 2);
}

#[test]
fn test_classification_without_polylines_only_reports() {
    let mut h = Harness::new();
    let undo_len = h.state.history.undo_len();

    h.send(AppIntent::ClassifyTopologyRequested);

    assert_eq!(h.state.history.undo_len(), undo_len);
    assert!(h.state.ui.status_message.is_some());
}

#[test]
fn test_manual_termination_overrides_classification() {
    let (mut h, a, _b) = harness_with_t_junction();
    h.send(AppIntent::ClassifyTopologyRequested);

    h.send(AppIntent::TerminationChosen {
        id: a,
        end: PolylineEnd::End,
        termination: Termination::Crossing,
    });

    assert_eq!(
        terminations(&h, a),
        Some([Termination::Blind, Termination::Crossing])
    );

    h.send(AppIntent::UndoRequested);
    assert_eq!(terminations(&h, a), Some([Termination::Blind; 2]));
}

#[test]
fn test_manual_termination_on_unknown_polyline_is_reported() {
    let (mut h, _a, _b) = harness_with_t_junction();
    let undo_len = h.state.history.undo_len();

    h.send(AppIntent::TerminationChosen {
        id: PolylineId(999),
        end: PolylineEnd::Start,
        termination: Termination::Blind,
    });

    assert_eq!(h.state.history.undo_len(), undo_len);
    assert!(h.state.ui.status_message.is_some());
}

#[test]
fn test_topology_block_survives_load_and_save() {
    let base = temp_dir("roundtrip");
    std::fs::create_dir_all(&base).expect("Temp-Verzeichnis sollte anlegbar sein");
    let source = base.join(SUMMARY_FILE_NAME);
    std::fs::write(
        &source,
        r#"{
  "num_polylines": 2,
  "polylines": [
    {"points": [[10.0, 50.0, 0.0], [40.0, 50.0, 0.0]], "id": 0},
    {"points": [[25.0, 20.0, 0.0], [25.0, 49.8, 0.0]], "id": 1}
  ],
  "topology": {
    "0": {"terminations": ["C", "B"], "intersecting_polylines": [1]},
    "1": {"terminations": ["B", "A"], "intersecting_polylines": [0]}
  }
}"#,
    )
    .expect("Datei sollte schreibbar sein");

    let mut h = Harness::new();
    h.send(AppIntent::LoadRequested { path: source });
    let ids: Vec<PolylineId> = h.state.store.ids().collect();
    assert_eq!(
        terminations(&h, ids[0]),
        Some([Termination::Censored, Termination::Blind])
    );

    let out = base.join("saved");
    h.send(AppIntent::SaveToDirectoryRequested { dir: out.clone() });

    let written = std::fs::read_to_string(out.join("polylines_output").join(SUMMARY_FILE_NAME))
        .expect("Zusammenfassung sollte geschrieben sein");
    let value: serde_json::Value = serde_json::from_str(&written).expect("gültiges JSON");
    assert_eq!(value["topology"]["0"]["terminations"][0], "C");
    assert_eq!(value["topology"]["1"]["terminations"][1], "A");
    assert_eq!(value["topology"]["1"]["intersecting_polylines"][0], 0);

    let _ = std::fs::remove_dir_all(&base);
}

#[test]
fn test_joining_drops_topology_of_merged_polyline() {
    let mut h = Harness::new();
    let a = h.digitize(&[(100.0, 100.0), (200.0, 100.0), (300.0, 100.0)]);
    let b = h.digitize(&[(340.0, 100.0), (500.0, 100.0)]);
    h.send(AppIntent::ClassifyTopologyRequested);
    assert!(terminations(&h, a).is_some());
    assert!(terminations(&h, b).is_some());

    h.enter_edit(150.0, 100.0);
    h.click(345.0, 100.0);

    let merged = h.state.store.selected().expect("Ergebnis sollte selektiert sein");
    assert!(terminations(&h, merged).is_none());
}
