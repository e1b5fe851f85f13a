//! Modus-Zustandsmaschine: Select ⇄ Digitize, Select ⇄ Edit.
//!
//! Übergänge laufen ausschließlich über [`ModeState::transition`], das
//! Erfolg oder [`EditError::InvalidTransition`] zurückgibt.

use crate::core::{EditError, EditorMode, Point3, PolylineStore};
use std::sync::Arc;

/// Punkte der gerade entstehenden Polylinie im Digitize-Modus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DigitizeBuffer {
    points: Vec<Point3>,
}

impl DigitizeBuffer {
    /// Erstellt einen leeren Puffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen Oberflächenpunkt an.
    pub fn push(&mut self, point: Point3) {
        self.points.push(point);
    }

    /// Bisher erfasste Punkte.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Anzahl erfasster Punkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Gibt `true` zurück, wenn noch kein Punkt erfasst wurde.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Entnimmt alle Punkte und leert den Puffer.
    pub fn take(&mut self) -> Vec<Point3> {
        std::mem::take(&mut self.points)
    }

    /// Verwirft alle Punkte.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Aktiver Modus samt modusspezifischer Daten.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModeState {
    /// Auswählen (Startzustand)
    #[default]
    Select,
    /// Digitalisieren mit laufendem Puffer
    Digitize(DigitizeBuffer),
    /// Bearbeiten der selektierten Polylinie
    Edit,
}

impl ModeState {
    /// Modus-Tag ohne Nutzdaten.
    pub fn mode(&self) -> EditorMode {
        match self {
            Self::Select => EditorMode::Select,
            Self::Digitize(_) => EditorMode::Digitize,
            Self::Edit => EditorMode::Edit,
        }
    }

    /// Digitalisier-Puffer, falls der Digitize-Modus aktiv ist.
    pub fn digitize_buffer(&self) -> Option<&DigitizeBuffer> {
        match self {
            Self::Digitize(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Mutabler Digitalisier-Puffer, falls der Digitize-Modus aktiv ist.
    pub fn digitize_buffer_mut(&mut self) -> Option<&mut DigitizeBuffer> {
        match self {
            Self::Digitize(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Führt einen Moduswechsel aus.
    ///
    /// - Betreten von Digitize hebt die Selektion auf und startet einen leeren Puffer.
    /// - Verlassen von Digitize verwirft einen unvollständigen Puffer.
    /// - Edit ist nur mit Selektion betretbar, Verlassen erhält die Selektion.
    /// - Digitize und Edit sind nur über Select erreichbar.
    ///
    /// Bei Fehler bleibt der Zustand unverändert.
    pub fn transition(
        &mut self,
        to: EditorMode,
        store: &mut Arc<PolylineStore>,
    ) -> Result<(), EditError> {
        let from = self.mode();
        match (from, to) {
            (a, b) if a == b => Ok(()),
            (EditorMode::Select, EditorMode::Digitize) => {
                if store.selected().is_some() {
                    Arc::make_mut(store).deselect();
                }
                *self = Self::Digitize(DigitizeBuffer::new());
                Ok(())
            }
            (EditorMode::Digitize, EditorMode::Select) => {
                if let Some(buffer) = self.digitize_buffer().filter(|b| !b.is_empty()) {
                    log::info!(
                        "Unvollständige Polylinie mit {} Punkt(en) verworfen",
                        buffer.len()
                    );
                }
                *self = Self::Select;
                Ok(())
            }
            (EditorMode::Select, EditorMode::Edit) => {
                let has_active = store
                    .selected()
                    .is_some_and(|id| store.contains(id));
                if !has_active {
                    return Err(EditError::InvalidTransition {
                        from,
                        to,
                        reason: "keine Polylinie selektiert",
                    });
                }
                *self = Self::Edit;
                Ok(())
            }
            (EditorMode::Edit, EditorMode::Select) => {
                *self = Self::Select;
                Ok(())
            }
            _ => Err(EditError::InvalidTransition {
                from,
                to,
                reason: "nur über den Select-Modus erreichbar",
            }),
        }
    }

    /// Erzwingt den Select-Modus ohne Wächter (z.B. wenn die aktive Polylinie verschwindet).
    pub fn force_select(&mut self) {
        *self = Self::Select;
    }
}
