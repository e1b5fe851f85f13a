use super::*;
use glam::DVec3;

fn pts(coords: &[[f64; 3]]) -> Vec<Point3> {
    coords.iter().map(|c| DVec3::from_array(*c)).collect()
}

fn store_with_line(coords: &[[f64; 3]]) -> (PolylineStore, PolylineId) {
    let mut store = PolylineStore::new();
    let id = store.add(pts(coords)).expect("Polylinie sollte angelegt werden");
    (store, id)
}

#[test]
fn add_assigns_fresh_unique_ids() {
    let mut store = PolylineStore::new();
    let a = store.add(pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]])).unwrap();
    let b = store.add(pts(&[[0.0, 1.0, 0.0], [1.0, 1.0, 0.0]])).unwrap();
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
    assert_eq!(store.ids().collect::<Vec<_>>(), vec![a, b]);
}

#[test]
fn add_rejects_degenerate_polylines() {
    let mut store = PolylineStore::new();
    assert_eq!(
        store.add(pts(&[[0.0, 0.0, 0.0]])),
        Err(EditError::DegeneratePolyline { points: 1 })
    );
    assert_eq!(
        store.add(Vec::new()),
        Err(EditError::DegeneratePolyline { points: 0 })
    );
    assert!(store.is_empty());
}

#[test]
fn ids_are_never_reused_after_remove() {
    let (mut store, first) = store_with_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    store.remove(first).expect("entfernt");
    let second = store.add(pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]])).unwrap();
    assert_ne!(first, second);
}

#[test]
fn select_replaces_previous_selection_and_mirrors_flag() {
    let mut store = PolylineStore::new();
    let a = store.add(pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]])).unwrap();
    let b = store.add(pts(&[[0.0, 1.0, 0.0], [1.0, 1.0, 0.0]])).unwrap();

    store.select(a).unwrap();
    store.select(b).unwrap();

    assert_eq!(store.selected(), Some(b));
    assert!(!store.get(a).unwrap().selected);
    assert!(store.get(b).unwrap().selected);
    assert_eq!(store.iter().filter(|l| l.selected).count(), 1);
}

#[test]
fn select_unknown_id_fails_without_change() {
    let (mut store, id) = store_with_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    store.select(id).unwrap();
    assert_eq!(
        store.select(PolylineId(999)),
        Err(EditError::UnknownPolyline(PolylineId(999)))
    );
    assert_eq!(store.selected(), Some(id));
}

#[test]
fn remove_clears_selection_pointing_to_it() {
    let (mut store, id) = store_with_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    store.select(id).unwrap();
    let removed = store.remove(id).expect("Polylinie sollte entfernt werden");
    assert_eq!(removed.id, id);
    assert_eq!(store.selected(), None);
    assert!(store.remove(id).is_none());
}

#[test]
fn extend_inserts_at_requested_end() {
    let (mut store, id) = store_with_line(&[[1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
    store
        .extend(id, DVec3::new(0.0, 0.0, 0.0), PolylineEnd::Start)
        .unwrap();
    store
        .extend(id, DVec3::new(3.0, 0.0, 0.0), PolylineEnd::End)
        .unwrap();

    let line = store.get(id).unwrap();
    assert_eq!(line.points.first(), Some(&DVec3::ZERO));
    assert_eq!(line.points.last(), Some(&DVec3::new(3.0, 0.0, 0.0)));
    assert_eq!(line.len(), 4);

    // Endpunkt-Index folgt der Verlängerung
    assert_eq!(
        store
            .endpoints_within(DVec3::new(3.0, 0.0, 0.0), 0.1)
            .first()
            .map(|m| m.end),
        Some(PolylineEnd::End)
    );
}

#[test]
fn delete_point_on_two_point_polyline_removes_it() {
    let (mut store, id) = store_with_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    store.select(id).unwrap();

    let outcome = store.delete_point(id, 0).unwrap();

    assert!(matches!(outcome, PointDeletion::PolylineRemoved(ref l) if l.id == id));
    assert!(!store.contains(id));
    assert_eq!(store.selected(), None);
}

#[test]
fn delete_point_keeps_longer_polylines() {
    let (mut store, id) =
        store_with_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
    assert_eq!(store.delete_point(id, 1), Ok(PointDeletion::PointRemoved));
    assert_eq!(
        store.get(id).unwrap().points,
        pts(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]])
    );
    assert_eq!(
        store.delete_point(id, 7),
        Err(EditError::PointOutOfRange { id, index: 7 })
    );
}

#[test]
fn join_end_to_start_preserves_orientation_and_collapses_joint() {
    let mut store = PolylineStore::new();
    let a = store
        .add(pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]))
        .unwrap();
    let b = store
        .add(pts(&[[1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]))
        .unwrap();
    store.select(a).unwrap();

    let merged = store.join(a, b, 0.5).unwrap();

    assert!(!store.contains(a));
    assert!(!store.contains(b));
    assert_eq!(store.len(), 1);
    assert_eq!(store.selected(), Some(merged));
    assert_eq!(
        store.get(merged).unwrap().points,
        pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]])
    );
}

#[test]
fn join_start_to_start_reverses_foreign_polyline() {
    let mut store = PolylineStore::new();
    let a = store
        .add(pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]))
        .unwrap();
    let b = store
        .add(pts(&[[-0.1, 0.0, 0.0], [-1.0, 0.0, 0.0]]))
        .unwrap();

    let merged = store
        .join_at(a, PolylineEnd::Start, b, PolylineEnd::Start, 0.5)
        .unwrap();

    assert_eq!(
        store.get(merged).unwrap().points,
        pts(&[
            [-1.0, 0.0, 0.0],
            [-0.1, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0]
        ])
    );
    // Keine Selektion vorher, keine danach
    assert_eq!(store.selected(), None);
}

#[test]
fn join_out_of_tolerance_leaves_store_unchanged() {
    let mut store = PolylineStore::new();
    let a = store
        .add(pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]))
        .unwrap();
    let b = store
        .add(pts(&[[5.0, 0.0, 0.0], [6.0, 0.0, 0.0]]))
        .unwrap();
    let before: Vec<_> = store.iter().cloned().collect();

    let err = store.join(a, b, 1.0).unwrap_err();

    assert!(matches!(err, EditError::JoinOutOfTolerance { gap, .. } if (gap - 4.0).abs() < 1e-12));
    assert_eq!(store.iter().cloned().collect::<Vec<_>>(), before);
    assert_eq!(store.join(a, a, 10.0), Err(EditError::SelfJoin(a)));
}

#[test]
fn join_then_remove_leaves_no_orphaned_ids() {
    let mut store = PolylineStore::new();
    let a = store
        .add(pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]))
        .unwrap();
    let b = store
        .add(pts(&[[1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]))
        .unwrap();

    let merged = store.join(a, b, 0.1).unwrap();
    store.remove(merged);

    assert!(store.is_empty());
    for id in [a, b, merged] {
        assert!(store.get(id).is_none());
    }
    assert!(store.endpoints_within(DVec3::ZERO, 100.0).is_empty());
}

#[test]
fn replace_all_is_all_or_nothing() {
    let (mut store, id) = store_with_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let result = store.replace_all(vec![
        pts(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]),
        pts(&[[2.0, 2.0, 2.0]]),
    ]);
    assert_eq!(result, Err(EditError::DegeneratePolyline { points: 1 }));
    assert!(store.contains(id));

    let ids = store
        .replace_all(vec![
            pts(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]),
            pts(&[[2.0, 2.0, 2.0], [3.0, 3.0, 3.0]]),
        ])
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert!(!store.contains(id));
}

#[test]
fn store_never_holds_degenerate_polylines_over_random_edits() {
    let mut store = PolylineStore::new();
    let mut ids = Vec::new();
    for i in 0..20 {
        let n = i % 4;
        let line: Vec<Point3> = (0..n).map(|k| DVec3::new(k as f64, i as f64, 0.0)).collect();
        if let Ok(id) = store.add(line) {
            ids.push(id);
        }
        if i % 3 == 0 {
            if let Some(id) = ids.first().copied() {
                let _ = store.delete_point(id, 0);
            }
        }
        if i % 5 == 0 {
            if let Some(id) = ids.pop() {
                store.remove(id);
            }
        }
        assert!(store.iter().all(|l| l.len() >= 2));
    }
}

#[test]
fn clear_keeps_id_counter() {
    let (mut store, id) = store_with_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    store.select(id).unwrap();
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.selected(), None);
    let next = store.add(pts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]])).unwrap();
    assert!(next > id);
}

#[test]
fn many_polylines_starting_at_same_point_stay_queryable() {
    let mut store = PolylineStore::new();
    let ids: Vec<PolylineId> = (0..40)
        .map(|i| {
            store
                .add(pts(&[[5.0, 5.0, 0.0], [6.0 + i as f64, 5.0, 0.0]]))
                .expect("Polylinie sollte angelegt werden")
        })
        .collect();

    assert_eq!(store.len(), 40);
    assert_eq!(store.endpoints_within(DVec3::new(5.0, 5.0, 0.0), 0.01).len(), 40);

    let hit = store
        .nearest_foreign_endpoint(DVec3::new(5.0, 5.0, 0.0), ids[0], 0.01)
        .expect("fremder Endpunkt erwartet");
    assert_eq!(hit.polyline_id, ids[1]);

    // Verbinden über den gemeinsamen Punkt baut den Index erneut auf
    store
        .join(ids[0], ids[1], 0.01)
        .expect("Verbinden sollte gelingen");
    assert_eq!(store.len(), 39);
}

fn record(
    coords: &[[f64; 3]],
    terminations: Option<[Termination; 2]>,
    intersecting: &[usize],
) -> PolylineRecord {
    PolylineRecord {
        points: pts(coords),
        terminations,
        intersecting: intersecting.to_vec(),
    }
}

#[test]
fn records_keep_topology_and_map_contacts_to_positions() {
    let mut store = PolylineStore::new();
    let ids = store
        .replace_all_records(vec![
            record(
                &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
                Some([Termination::Abutting, Termination::Blind]),
                &[1, 0, 7],
            ),
            record(&[[1.0, 0.0, 0.0], [1.0, 1.0, 0.0]], None, &[0]),
        ])
        .expect("Records sind gültig");

    let first = store.get(ids[0]).and_then(|l| l.topology.clone()).expect("Topologie erwartet");
    assert_eq!(first.intersecting, vec![ids[1]]);
    assert_eq!(first.termination(PolylineEnd::Start), Termination::Abutting);
    assert!(store.get(ids[1]).is_some_and(|l| l.topology.is_none()));

    let records = store.records();
    assert_eq!(records[0].terminations, Some([Termination::Abutting, Termination::Blind]));
    assert_eq!(records[0].intersecting, vec![1]);
    assert_eq!(records[1], PolylineRecord::from(pts(&[[1.0, 0.0, 0.0], [1.0, 1.0, 0.0]])));
}

#[test]
fn set_termination_starts_from_blind_ends() {
    let (mut store, id) = store_with_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);

    store
        .set_termination(id, PolylineEnd::End, Termination::Censored)
        .expect("Polylinie existiert");

    let topology = store.get(id).and_then(|l| l.topology.clone()).expect("Topologie erwartet");
    assert_eq!(topology.terminations, [Termination::Blind, Termination::Censored]);
    assert_eq!(
        store.set_termination(PolylineId(99), PolylineEnd::Start, Termination::Blind),
        Err(EditError::UnknownPolyline(PolylineId(99)))
    );
}

#[test]
fn apply_topology_with_unknown_id_changes_nothing() {
    let (mut store, id) = store_with_line(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    let classified: IndexMap<PolylineId, PolylineTopology> = [
        (id, PolylineTopology::default()),
        (PolylineId(42), PolylineTopology::default()),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        store.apply_topology(classified),
        Err(EditError::UnknownPolyline(PolylineId(42)))
    );
    assert!(store.get(id).is_some_and(|l| l.topology.is_none()));
}

#[test]
fn removing_or_joining_drops_stale_contacts() {
    let mut store = PolylineStore::new();
    let ids = store
        .replace_all_records(vec![
            record(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], Some([Termination::Blind; 2]), &[1, 2]),
            record(&[[1.0, 0.0, 0.0], [2.0, 0.0, 0.0]], Some([Termination::Abutting; 2]), &[0]),
            record(&[[0.5, 1.0, 0.0], [0.5, 2.0, 0.0]], Some([Termination::Blind; 2]), &[0]),
        ])
        .expect("Records sind gültig");

    store.remove(ids[2]);
    let contacts = |store: &PolylineStore, id| {
        store
            .get(id)
            .and_then(|l| l.topology.as_ref())
            .map(|t| t.intersecting.clone())
    };
    assert_eq!(contacts(&store, ids[0]), Some(vec![ids[1]]));

    // Verlängern behält die Topologie
    store
        .extend(ids[0], DVec3::new(-1.0, 0.0, 0.0), PolylineEnd::Start)
        .expect("Verlängern sollte gelingen");
    assert_eq!(contacts(&store, ids[0]), Some(vec![ids[1]]));

    let merged = store
        .join_at(ids[0], PolylineEnd::End, ids[1], PolylineEnd::Start, 0.1)
        .expect("Verbinden sollte gelingen");
    assert!(store.get(merged).is_some_and(|l| l.topology.is_none()));
}
