//! Viewport-Input-Handling: Maus- und Tastatur-Events → AppIntent.

use super::keyboard;
use crate::app::AppIntent;

/// Sammelt Viewport-Events aus egui-Input und gibt AppIntents zurück.
///
/// Klickpositionen werden relativ zur linken oberen Ecke des Viewports
/// übergeben, passend zu [`crate::shared::SceneBackend::pick_surface`].
pub fn collect_viewport_intents(ui: &egui::Ui, response: &egui::Response) -> Vec<AppIntent> {
    let mut events = Vec::new();

    // Keyboard-Shortcuts (ausgelagert in keyboard/)
    events.extend(keyboard::collect_keyboard_intents(ui));
    collect_pointer_intents(response, &mut events);

    events
}

/// Übersetzt Einfach-, Doppel- und Rechtsklicks in Viewport-Intents.
fn collect_pointer_intents(response: &egui::Response, events: &mut Vec<AppIntent>) {
    let Some(pointer_pos) = response.interact_pointer_pos() else {
        return;
    };
    let screen_pos = viewport_local(response.rect, pointer_pos);

    if response.double_clicked_by(egui::PointerButton::Primary) {
        events.push(AppIntent::ViewportDoubleClicked { screen_pos });
    } else if response.clicked_by(egui::PointerButton::Primary) {
        events.push(AppIntent::ViewportClicked { screen_pos });
    } else if response.clicked_by(egui::PointerButton::Secondary) {
        events.push(AppIntent::ViewportSecondaryClicked { screen_pos });
    }
}

/// Rechnet eine egui-Bildschirmposition in Viewport-Pixel um.
fn viewport_local(rect: egui::Rect, pointer_pos: egui::Pos2) -> glam::Vec2 {
    let local = pointer_pos - rect.min;
    glam::Vec2::new(local.x, local.y)
}
