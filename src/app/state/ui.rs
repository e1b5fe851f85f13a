use std::path::PathBuf;

/// UI-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct UiState {
    /// Temporäre Status- bzw. Diagnosenachricht
    pub status_message: Option<String>,
    /// Ob die Hilfe angezeigt werden soll
    pub show_help: bool,
    /// Zuletzt erzeugter Hilfetext
    pub help_text: String,
    /// Zielverzeichnis für Speichern ohne Dialog
    pub output_dir: Option<PathBuf>,
    /// Ob der Host einen Verzeichnis-Dialog zum Speichern öffnen soll
    pub show_save_dialog: bool,
    /// Verzeichnis, in das zuletzt gespeichert wurde
    pub last_saved_dir: Option<PathBuf>,
    /// Zuletzt geladene Polylinien-Datei
    pub current_file_path: Option<PathBuf>,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand (keine Dialoge, keine Meldung).
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt eine Statusmeldung.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}
