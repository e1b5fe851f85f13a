//! Keyboard-Shortcuts für den Viewport.
//!
//! Modustasten werden unverändert als [`ModeKey`] weitergereicht; ob eine Taste
//! im aktiven Modus etwas bewirkt, entscheidet der Modus-Handler.

use crate::app::{AppIntent, ModeKey};
use crate::shared::ViewPreset;

/// Verarbeitet Keyboard-Shortcuts und gibt AppIntents zurück.
pub(super) fn collect_keyboard_intents(ui: &egui::Ui) -> Vec<AppIntent> {
    let mut events = Vec::new();

    // Undo / Redo (Cmd/Ctrl + Z / Y, Shift+Cmd+Z)
    let (modifiers, key_z_pressed, key_y_pressed) = ui.input(|i| {
        (
            i.modifiers,
            i.key_pressed(egui::Key::Z),
            i.key_pressed(egui::Key::Y),
        )
    });

    if modifiers.command && key_z_pressed && !modifiers.shift {
        events.push(AppIntent::UndoRequested);
    }

    if modifiers.command && (key_y_pressed || (modifiers.shift && key_z_pressed)) {
        events.push(AppIntent::RedoRequested);
    }

    // Modustasten
    let (key_space, key_m, key_d, key_del, key_enter, key_escape) = ui.input(|i| {
        (
            i.key_pressed(egui::Key::Space),
            i.key_pressed(egui::Key::M),
            i.key_pressed(egui::Key::D),
            i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
            i.key_pressed(egui::Key::Enter),
            i.key_pressed(egui::Key::Escape),
        )
    });

    let mode_keys = [
        (key_space, ModeKey::ToggleDigitize),
        (key_m && !modifiers.command, ModeKey::ToggleEdit),
        (key_d && !modifiers.command, ModeKey::Deselect),
        (key_del, ModeKey::DeleteSelected),
        (key_enter, ModeKey::Finish),
        (key_escape, ModeKey::Cancel),
    ];
    events.extend(
        mode_keys
            .into_iter()
            .filter(|(pressed, _)| *pressed)
            .map(|(_, key)| AppIntent::ModeKeyPressed { key }),
    );

    // Globale Tasten (ohne Ctrl, damit Ctrl+Z/Ctrl+Y nicht doppelt wirken)
    if modifiers.command {
        return events;
    }

    let (key_s, key_c, key_h, key_r, key_t, key_x, key_y, key_z, key_i) = ui.input(|i| {
        (
            i.key_pressed(egui::Key::S),
            i.key_pressed(egui::Key::C),
            i.key_pressed(egui::Key::H),
            i.key_pressed(egui::Key::R),
            i.key_pressed(egui::Key::T),
            i.key_pressed(egui::Key::X),
            i.key_pressed(egui::Key::Y),
            i.key_pressed(egui::Key::Z),
            i.key_pressed(egui::Key::I),
        )
    });

    if key_s {
        events.push(AppIntent::SaveRequested);
    }
    if key_c {
        events.push(AppIntent::ClearAllRequested);
    }
    if key_h {
        events.push(AppIntent::HelpRequested);
    }
    if key_r {
        events.push(AppIntent::ResetCameraRequested);
    }
    if key_t {
        events.push(AppIntent::ClassifyTopologyRequested);
    }

    let presets = [
        (key_x, ViewPreset::AlongX),
        (key_y, ViewPreset::AlongY),
        (key_z, ViewPreset::AlongZ),
        (key_i, ViewPreset::Isometric),
    ];
    events.extend(
        presets
            .into_iter()
            .filter(|(pressed, _)| *pressed)
            .map(|(_, preset)| AppIntent::ViewPresetRequested { preset }),
    );

    events
}
