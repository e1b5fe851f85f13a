//! Use-Cases für modusübergreifende Bearbeitung.

use crate::app::AppState;
use crate::core::EditorMode;

/// Entfernt alle Polylinien (undo-fähig) und verwirft einen Digitalisier-Puffer.
///
/// Im Edit-Modus gibt es danach keine aktive Polylinie mehr, daher Rückfall auf Select.
pub fn clear_all(state: &mut AppState) {
    if let Some(buffer) = state.mode.digitize_buffer_mut() {
        buffer.clear();
    }

    if state.store.is_empty() {
        log::debug!("Alles löschen: keine Polylinien vorhanden");
        return;
    }

    let count = state.store.len();
    let cleared: Result<(), crate::core::EditError> = state.edit_store(|store| {
        store.clear();
        Ok(())
    });
    if cleared.is_ok() {
        log::info!("{} Polylinie(n) entfernt", count);
        state.ui.set_status(format!("{} Polylinie(n) entfernt", count));
    }

    if state.mode() == EditorMode::Edit {
        state.mode.force_select();
    }
}
