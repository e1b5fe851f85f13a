use crate::app::modes::ModeKey;
use crate::core::{PolylineEnd, PolylineId, Termination};
use crate::shared::ViewPreset;
use glam::Vec2;
use std::path::PathBuf;

/// App-Intent Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Linksklick im Viewport (Pixel relativ zur Viewport-Ecke)
    ViewportClicked { screen_pos: Vec2 },
    /// Doppelklick links im Viewport
    ViewportDoubleClicked { screen_pos: Vec2 },
    /// Rechtsklick im Viewport
    ViewportSecondaryClicked { screen_pos: Vec2 },
    /// Modusrelevante Taste gedrückt
    ModeKeyPressed { key: ModeKey },
    /// Speichern (ins bekannte Verzeichnis oder mit Dialog)
    SaveRequested,
    /// Speichern in ein gewähltes Verzeichnis (Ergebnis des Dialogs)
    SaveToDirectoryRequested { dir: PathBuf },
    /// Polylinien aus einer Zusammenfassungsdatei laden
    LoadRequested { path: PathBuf },
    /// Alle Polylinien entfernen
    ClearAllRequested,
    /// Topologie aller Enden automatisch bestimmen
    ClassifyTopologyRequested,
    /// Abschlussart eines Endes gewählt (z.B. im Kontextmenü des Hosts)
    TerminationChosen {
        id: PolylineId,
        end: PolylineEnd,
        termination: Termination,
    },
    /// Hilfe anzeigen
    HelpRequested,
    /// Kamera auf Ausgangsposition
    ResetCameraRequested,
    /// Vordefinierte Blickrichtung
    ViewPresetRequested { preset: ViewPreset },
    /// Letzte Änderung rückgängig machen
    UndoRequested,
    /// Rückgängig gemachte Änderung wiederholen
    RedoRequested,
    /// Statusmeldung schließen
    StatusDismissed,
}
