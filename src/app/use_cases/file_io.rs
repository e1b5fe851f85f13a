//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::AppState;
use crate::core::EditorMode;
use std::path::PathBuf;

/// Fordert beim Host einen Verzeichnis-Dialog zum Speichern an.
pub fn request_save_dialog(state: &mut AppState) {
    state.ui.show_save_dialog = true;
}

/// Speichert alle Polylinien samt Topologie nach `dir/polylines_output`.
///
/// Ein leerer Store wird nicht gespeichert. Das Verzeichnis wird für
/// folgendes Speichern ohne Dialog gemerkt.
pub fn save_polylines(state: &mut AppState, dir: PathBuf) -> anyhow::Result<()> {
    state.ui.show_save_dialog = false;
    state.ui.output_dir = Some(dir.clone());

    if state.store.is_empty() {
        log::info!("Keine Polylinien zum Speichern");
        state.ui.set_status("Keine Polylinien zum Speichern");
        return Ok(());
    }

    let report = crate::io::export_polylines(&dir, &state.store.records())?;
    state.ui.set_status(format!(
        "{} Polylinie(n) gespeichert in {}",
        report.polyline_count,
        report.output_dir.display()
    ));
    state.ui.last_saved_dir = Some(report.output_dir);
    Ok(())
}

/// Lädt Polylinien aus einer Zusammenfassungsdatei und ersetzt den Store.
///
/// Undo-fähig; ein laufender Edit-Modus fällt auf Select zurück, ein
/// Digitalisier-Puffer bleibt erhalten.
pub fn load_polylines(state: &mut AppState, path: PathBuf) -> anyhow::Result<()> {
    let records = crate::io::load_polyline_file(&path)?;
    let classified = records.iter().filter(|r| r.terminations.is_some()).count();
    let ids = state.edit_store(|store| store.replace_all_records(records))?;

    if state.mode() == EditorMode::Edit {
        state.mode.force_select();
    }
    state.reconcile_mode();

    log::info!(
        "{} Polylinie(n) geladen aus {} ({} mit Topologie)",
        ids.len(),
        path.display(),
        classified
    );
    state
        .ui
        .set_status(format!("{} Polylinie(n) geladen", ids.len()));
    state.ui.current_file_path = Some(path);
    Ok(())
}
