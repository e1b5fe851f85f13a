use crate::app::modes::ModeKey;
use crate::core::{PolylineEnd, PolylineId, Termination};
use crate::shared::ViewPreset;
use glam::Vec2;
use std::path::PathBuf;

/// Mutierende Commands, die vom Controller ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // === Modus-Dispatch ===
    /// Linksklick an den aktiven Modus-Handler
    ModeClick { screen_pos: Vec2 },
    /// Doppelklick an den aktiven Modus-Handler
    ModeDoubleClick { screen_pos: Vec2 },
    /// Rechtsklick an den aktiven Modus-Handler
    ModeSecondaryClick { screen_pos: Vec2 },
    /// Taste an den aktiven Modus-Handler
    ModeKey { key: ModeKey },

    // === Datei-I/O ===
    /// Verzeichnis-Dialog zum Speichern anfordern
    RequestSaveDialog,
    /// Alle Polylinien in `dir/polylines_output` speichern
    SavePolylines { dir: PathBuf },
    /// Polylinien aus Datei laden (ersetzt den Store)
    LoadPolylines { path: PathBuf },

    // === Editing ===
    /// Alle Polylinien entfernen
    ClearAllPolylines,
    /// Undo
    Undo,
    /// Redo
    Redo,

    // === Topologie ===
    /// Alle Enden automatisch klassifizieren
    ClassifyTopology,
    /// Abschlussart eines Endes von Hand setzen
    SetTermination {
        id: PolylineId,
        end: PolylineEnd,
        termination: Termination,
    },

    // === Kamera & Ansicht ===
    /// Kamera zurücksetzen
    ResetCamera,
    /// Blickrichtung setzen
    SetViewPreset { preset: ViewPreset },

    // === Hilfe & Status ===
    /// Hilfetext erzeugen und anzeigen
    ShowHelp,
    /// Statusmeldung entfernen
    DismissStatus,
}
