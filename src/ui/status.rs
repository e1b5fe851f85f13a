//! Status-Bar am unteren Bildschirmrand.

use crate::app::{AppIntent, AppState};

/// Rendert die Status-Bar und gibt ggf. einen Schließen-Intent zurück.
pub fn render_status_bar(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("Modus: {}", state.mode()));
            ui.separator();

            ui.label(format!("Polylinien: {}", state.polyline_count()));
            ui.separator();

            match state.store.selected_polyline() {
                Some(line) => ui.label(format!(
                    "Auswahl: {} ({} Punkte, {:.2} m)",
                    line.id,
                    line.len(),
                    line.length()
                )),
                None => ui.label("Auswahl: keine"),
            };

            if let Some(buffer) = state.mode.digitize_buffer() {
                ui.separator();
                ui.label(format!("Entwurf: {} Punkte", buffer.len()));
            }

            if let Some(message) = &state.ui.status_message {
                ui.separator();
                ui.label(message.as_str());
                if ui.small_button("✕").clicked() {
                    events.push(AppIntent::StatusDismissed);
                }
            }
        });
    });

    if state.ui.show_help {
        egui::Window::new("Hilfe")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(state.ui.help_text.as_str());
                if ui.button("Schließen").clicked() {
                    events.push(AppIntent::StatusDismissed);
                }
            });
    }

    events
}
