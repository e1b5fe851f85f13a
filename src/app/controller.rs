//! Application Controller für zentrale Event-Verarbeitung.

use super::scene_sync::SceneMirror;
use super::{AppCommand, AppIntent, AppState};
use crate::shared::SceneBackend;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
///
/// Nach jedem Command wird die Szene über den [`SceneMirror`] nachgeführt.
#[derive(Debug, Default)]
pub struct AppController {
    mirror: SceneMirror,
}

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut AppState,
        scene: &mut dyn SceneBackend,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, scene, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        scene: &mut dyn SceneBackend,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        let result = match command {
            // === Modus-Dispatch ===
            AppCommand::ModeClick { screen_pos } => {
                handlers::mode::click(state, scene, screen_pos);
                Ok(())
            }
            AppCommand::ModeDoubleClick { screen_pos } => {
                handlers::mode::double_click(state, scene, screen_pos);
                Ok(())
            }
            AppCommand::ModeSecondaryClick { screen_pos } => {
                handlers::mode::secondary_click(state, scene, screen_pos);
                Ok(())
            }
            AppCommand::ModeKey { key } => {
                handlers::mode::key(state, scene, key);
                Ok(())
            }

            // === Datei-I/O ===
            AppCommand::RequestSaveDialog => {
                handlers::file_io::request_save(state);
                Ok(())
            }
            AppCommand::SavePolylines { dir } => handlers::file_io::save(state, dir),
            AppCommand::LoadPolylines { path } => handlers::file_io::load(state, path),

            // === Editing ===
            AppCommand::ClearAllPolylines => {
                handlers::editing::clear_all(state);
                Ok(())
            }
            AppCommand::Undo => {
                handlers::history::undo(state);
                Ok(())
            }
            AppCommand::Redo => {
                handlers::history::redo(state);
                Ok(())
            }

            // === Topologie ===
            AppCommand::ClassifyTopology => {
                handlers::topology::classify(state, scene);
                Ok(())
            }
            AppCommand::SetTermination {
                id,
                end,
                termination,
            } => {
                handlers::topology::set_termination(state, id, end, termination);
                Ok(())
            }

            // === Kamera & Ansicht ===
            AppCommand::ResetCamera => {
                handlers::view::reset_camera(scene);
                Ok(())
            }
            AppCommand::SetViewPreset { preset } => {
                handlers::view::set_view_preset(scene, preset);
                Ok(())
            }

            // === Hilfe & Status ===
            AppCommand::ShowHelp => {
                handlers::view::show_help(state);
                Ok(())
            }
            AppCommand::DismissStatus => {
                handlers::view::dismiss_status(state);
                Ok(())
            }
        };

        // Auch nach einem fehlgeschlagenen IO-Command bleibt die Szene konsistent.
        self.mirror.sync(state, scene);
        result
    }

    /// Erzwingt beim nächsten Abgleich ein vollständiges Neuzeichnen
    /// (z.B. nach einem Neuaufbau der Szene durch den Host).
    pub fn resync(&mut self, state: &AppState, scene: &mut dyn SceneBackend) {
        self.mirror.invalidate();
        self.mirror.sync(state, scene);
    }
}
