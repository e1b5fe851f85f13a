//! Interaktionsmodi des Editors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aktiver Interaktionsmodus. Es ist immer genau einer aktiv.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EditorMode {
    /// Polylinien auswählen, Kamera steuern (Startmodus)
    #[default]
    Select,
    /// Neue Polylinie per Klick auf die Oberfläche erfassen
    Digitize,
    /// Selektierte Polylinie verlängern, ausdünnen oder verbinden
    Edit,
}

impl EditorMode {
    /// Anzeigename (Statuszeile, Hilfe).
    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Digitize => "DIGITIZE",
            Self::Edit => "EDIT",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
