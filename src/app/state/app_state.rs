use crate::app::history::{EditHistory, Snapshot};
use crate::app::CommandLog;
use crate::core::{EditError, EditorMode, PolylineStore};
use crate::shared::EditorOptions;
use std::sync::Arc;

use super::{ModeState, UiState};

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Alle finalisierten Polylinien inkl. Selektion (Arc für O(1)-Snapshots)
    pub store: Arc<PolylineStore>,
    /// Aktiver Modus samt Digitalisier-Puffer
    pub mode: ModeState,
    /// UI-State
    pub ui: UiState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen (Toleranzen, Farben, Breiten)
    pub options: EditorOptions,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit gegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            store: Arc::new(PolylineStore::new()),
            mode: ModeState::default(),
            ui: UiState::new(),
            command_log: CommandLog::new(),
            history: EditHistory::new_with_capacity(options.undo_depth),
            options,
        }
    }

    /// Aktiver Modus.
    pub fn mode(&self) -> EditorMode {
        self.mode.mode()
    }

    /// Gibt die Anzahl der Polylinien zurück (für UI-Anzeige)
    pub fn polyline_count(&self) -> usize {
        self.store.len()
    }

    /// Mutabler Zugriff auf den Store (CoW: klont nur, wenn ein Snapshot ihn teilt).
    ///
    /// Für Selektionsänderungen, die nicht in die History gehören.
    #[inline]
    pub fn store_mut(&mut self) -> &mut PolylineStore {
        Arc::make_mut(&mut self.store)
    }

    /// Führt eine undo-fähige Store-Mutation aus.
    ///
    /// Der Snapshot wird nur bei Erfolg in die History übernommen.
    pub fn edit_store<T>(
        &mut self,
        edit: impl FnOnce(&mut PolylineStore) -> Result<T, EditError>,
    ) -> Result<T, EditError> {
        let snapshot = Snapshot::from_state(self);
        let result = edit(self.store_mut());
        if result.is_ok() {
            self.history.record_snapshot(snapshot);
        }
        result
    }

    /// Gibt zurück, ob ein Undo-Schritt verfügbar ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Stellt die Modus-Invarianten nach einem Austausch des Stores wieder her.
    ///
    /// Edit ohne gültige Selektion fällt auf Select zurück, im Digitize-Modus
    /// gibt es keine Selektion.
    pub fn reconcile_mode(&mut self) {
        match self.mode() {
            EditorMode::Edit => {
                let active = self.store.selected().filter(|id| self.store.contains(*id));
                if active.is_none() {
                    log::info!("Aktive Polylinie existiert nicht mehr, zurück in den Select-Modus");
                    self.mode.force_select();
                }
            }
            EditorMode::Digitize => {
                if self.store.selected().is_some() {
                    self.store_mut().deselect();
                }
            }
            EditorMode::Select => {}
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
