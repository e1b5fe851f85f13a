//! Handler für Kamera, Ansichts-Presets und Hilfe.

use crate::app::AppState;
use crate::core::EditorMode;
use crate::shared::{SceneBackend, SceneRequest, ViewPreset};

/// Setzt die Kamera auf den Standardzustand zurück.
pub fn reset_camera(scene: &mut dyn SceneBackend) {
    log::debug!("Kamera zurückgesetzt");
    scene.submit(SceneRequest::ResetCamera);
}

/// Richtet die Kamera auf ein Ansichts-Preset aus.
pub fn set_view_preset(scene: &mut dyn SceneBackend, preset: ViewPreset) {
    log::debug!("Ansicht: {:?}", preset);
    scene.submit(SceneRequest::SetViewPreset { preset });
}

/// Erzeugt den Hilfetext für den aktuellen Modus und blendet ihn ein.
pub fn show_help(state: &mut AppState) {
    let text = help_text(state);
    log::info!("{}", text);
    state.ui.help_text = text;
    state.ui.show_help = true;
}

/// Verwirft Statusmeldung und Hilfe.
pub fn dismiss_status(state: &mut AppState) {
    state.ui.status_message = None;
    state.ui.show_help = false;
}

fn help_text(state: &AppState) -> String {
    let mode_lines = match state.mode() {
        EditorMode::Select => {
            "Klick: Polylinie wählen | Doppelklick: Kamera verschieben | Rechtsklick: Kamera zurücksetzen\n\
             Space: Digitalisieren | M: Bearbeiten | D: Auswahl aufheben | Entf: Polylinie löschen"
        }
        EditorMode::Digitize => {
            "Klick: Punkt setzen | Enter: Polylinie abschließen | Esc: Punkte verwerfen\n\
             Space: zurück zu Select"
        }
        EditorMode::Edit => {
            "Klick auf Stützpunkt: Punkt löschen | Klick nahe Endpunkt: Polylinie verlängern\n\
             Klick nahe fremdem Endpunkt: Polylinien verbinden | M/Space: zurück zu Select"
        }
    };

    let selection = match state.store.selected() {
        Some(id) => format!("Auswahl: {}", id),
        None => "Auswahl: keine".to_string(),
    };

    format!(
        "Modus: {} ({} Polylinie(n), {})\n{}\n\
         S: Speichern | C: Alles löschen | T: Topologie | H: Hilfe | X/Y/Z/I: Ansicht | R: Kamera | Strg+Z/Strg+Y: Undo/Redo",
        state.mode(),
        state.polyline_count(),
        selection,
        mode_lines
    )
}
