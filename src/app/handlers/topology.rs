//! Handler für die Endpunkt-Topologie.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{PolylineEnd, PolylineId, Termination};
use crate::shared::SceneBackend;

/// Klassifiziert alle Enden gegen Nachbarn und Mesh-Rand der Szene.
pub fn classify(state: &mut AppState, scene: &dyn SceneBackend) {
    let boundary = scene.mesh_boundary();
    use_cases::topology::classify_topology(state, &boundary);
}

/// Setzt die Abschlussart eines Endes von Hand.
pub fn set_termination(
    state: &mut AppState,
    id: PolylineId,
    end: PolylineEnd,
    termination: Termination,
) {
    use_cases::topology::set_termination(state, id, end, termination);
}
