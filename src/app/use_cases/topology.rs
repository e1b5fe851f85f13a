//! Use-Cases für die Endpunkt-Topologie (undo-fähig).

use crate::app::AppState;
use crate::core::{Point3, PolylineEnd, PolylineId, Termination, TopologyClassifier};

/// Bestimmt die Abschlussart aller Enden automatisch.
///
/// Von Hand gesetzte Werte werden überschrieben.
pub fn classify_topology(state: &mut AppState, boundary: &[Point3]) {
    let Some(classifier) = TopologyClassifier::for_polylines(
        state.store.iter(),
        state.options.topology_tau_factor,
        boundary,
    ) else {
        log::info!("Keine Polylinien für die Topologie-Analyse");
        state.ui.set_status("Keine Polylinien für die Topologie-Analyse");
        return;
    };

    let classified = classifier.classify(state.store.iter());
    let mut counts = [0usize; 4];
    for topology in classified.values() {
        for termination in topology.terminations {
            if let Some(slot) = Termination::ALL.iter().position(|t| *t == termination) {
                counts[slot] += 1;
            }
        }
    }

    match state.edit_store(|store| store.apply_topology(classified)) {
        Ok(()) => {
            let summary = Termination::ALL
                .iter()
                .zip(counts)
                .map(|(t, n)| format!("{} {}", n, t.code()))
                .collect::<Vec<_>>()
                .join(", ");
            log::info!(
                "Topologie klassifiziert (tau = {:.6}): {}",
                classifier.tau(),
                summary
            );
            state
                .ui
                .set_status(format!("Topologie: {}", summary));
        }
        Err(e) => log::warn!("Topologie konnte nicht übernommen werden: {}", e),
    }
}

/// Setzt die Abschlussart eines Endes von Hand.
pub fn set_termination(
    state: &mut AppState,
    id: PolylineId,
    end: PolylineEnd,
    termination: Termination,
) {
    match state.edit_store(|store| store.set_termination(id, end, termination)) {
        Ok(()) => {
            log::info!(
                "Polylinie {} {:?}: {} ({})",
                id,
                end,
                termination,
                termination.label()
            );
            state.ui.set_status(format!(
                "Polylinie {}: Ende als {} markiert",
                id,
                termination.label()
            ));
        }
        Err(e) => {
            log::warn!("Abschlussart nicht gesetzt: {}", e);
            state.ui.set_status(e.to_string());
        }
    }
}
