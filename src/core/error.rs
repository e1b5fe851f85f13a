//! Fehlerarten der Editier- und Moduslogik.
//!
//! Alle Varianten sind lokal behebbar: die auslösende Operation ändert
//! keinen Zustand und der Fehler wird nur als Diagnose gemeldet.

use super::{EditorMode, PolylineId};
use thiserror::Error;

/// Behebbarer Fehler einer Store-Mutation oder eines Moduswechsels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// Kein Oberflächenpunkt, keine Polylinie oder kein Stützpunkt unter dem Cursor
    #[error("kein Treffer unter dem Cursor")]
    PickMiss,
    /// Modus-Wechsel nicht erlaubt
    #[error("Moduswechsel {from} -> {to} nicht möglich: {reason}")]
    InvalidTransition {
        from: EditorMode,
        to: EditorMode,
        reason: &'static str,
    },
    /// Polylinie hätte weniger als zwei Punkte
    #[error("Polylinie mit {points} Punkt(en) ist degeneriert (mindestens 2 nötig)")]
    DegeneratePolyline { points: usize },
    /// Endpunkte zu weit auseinander zum Verbinden
    #[error("Endpunkte {gap:.4} auseinander, erlaubt sind {max_gap:.4}")]
    JoinOutOfTolerance { gap: f64, max_gap: f64 },
    /// Polylinie mit der ID existiert nicht (mehr)
    #[error("Polylinie {0} existiert nicht")]
    UnknownPolyline(PolylineId),
    /// Eine Polylinie kann nicht mit sich selbst verbunden werden
    #[error("Polylinie {0} kann nicht mit sich selbst verbunden werden")]
    SelfJoin(PolylineId),
    /// Stützpunkt-Index außerhalb der Polylinie
    #[error("Stützpunkt {index} existiert nicht in Polylinie {id}")]
    PointOutOfRange { id: PolylineId, index: usize },
}

impl EditError {
    /// Pick-Fehlschläge sind erwartbar und werden nur auf Debug-Level geloggt.
    pub fn is_pick_miss(&self) -> bool {
        matches!(self, Self::PickMiss)
    }
}
