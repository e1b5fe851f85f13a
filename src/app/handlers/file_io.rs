//! Handler für Datei-Operationen (Laden, Speichern).

use crate::app::use_cases;
use crate::app::AppState;
use std::path::PathBuf;

/// Öffnet den Verzeichnis-Dialog zum Speichern.
pub fn request_save(state: &mut AppState) {
    use_cases::file_io::request_save_dialog(state);
}

/// Speichert alle Polylinien unterhalb von `dir`.
pub fn save(state: &mut AppState, dir: PathBuf) -> anyhow::Result<()> {
    use_cases::file_io::save_polylines(state, dir)
}

/// Lädt Polylinien aus dem übergebenen Pfad.
pub fn load(state: &mut AppState, path: PathBuf) -> anyhow::Result<()> {
    use_cases::file_io::load_polylines(state, path)
}
