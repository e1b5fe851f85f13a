//! Modus-Handler: Klick- und Tastensemantik pro Modus.
//!
//! Jeder Modus implementiert [`ModeHandler`]. Die Auswahl des Handlers
//! erfolgt über das Modus-Tag ([`handler_for`]), nie über Vergleiche im Aufrufer.
//! Ein Handler wechselt den Modus nicht selbst, sondern meldet den Wunsch
//! als [`ModeOutcome::SwitchTo`] an die Zustandsmaschine.

mod digitize;
mod edit;
mod select;

pub use digitize::DigitizeMode;
pub use edit::EditMode;
pub use select::SelectMode;

use glam::Vec2;

use super::picking::Picker;
use super::AppState;
use crate::core::{EditError, EditorMode};
use crate::shared::{SceneBackend, SceneRequest};

/// Modusrelevante Tasten (Zuordnung zu physischen Tasten im UI-Layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKey {
    /// Select ⇄ Digitize (Leertaste)
    ToggleDigitize,
    /// Select ⇄ Edit (M)
    ToggleEdit,
    /// Selektion aufheben (D)
    Deselect,
    /// Selektierte Polylinie löschen (Entf)
    DeleteSelected,
    /// Digitalisieren abschließen (Enter)
    Finish,
    /// Digitalisieren abbrechen (Escape)
    Cancel,
}

/// Ergebnis einer Handler-Aktion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeOutcome {
    /// Im aktuellen Modus bleiben
    Stay,
    /// Moduswechsel bei der Zustandsmaschine beantragen
    SwitchTo(EditorMode),
}

/// Laufzeitkontext eines Handler-Aufrufs.
pub struct ModeContext<'a> {
    /// Anwendungszustand (Store, Modus, Optionen)
    pub state: &'a mut AppState,
    /// Externer Renderer
    pub scene: &'a mut dyn SceneBackend,
}

impl<'a> ModeContext<'a> {
    /// Bündelt Zustand und Szene für einen Handler-Aufruf.
    pub fn new(state: &'a mut AppState, scene: &'a mut dyn SceneBackend) -> Self {
        Self { state, scene }
    }

    /// Read-only Picker über aktuelle Szene und Store.
    pub fn picker(&self) -> Picker<'_> {
        Picker::new(&*self.scene, &self.state.store, &self.state.options)
    }

    /// Auftrag an den Renderer.
    pub fn submit(&mut self, request: SceneRequest) {
        self.scene.submit(request);
    }
}

/// Klick- und Tastensemantik eines Modus.
///
/// Ein `Err` ist immer eine behebbare Diagnose: der Zustand ist unverändert
/// (Ausnahme: Digitize-Abschluss mit zu wenigen Punkten verwirft den Puffer).
pub trait ModeHandler {
    /// Modus, den dieser Handler bedient.
    fn mode(&self) -> EditorMode;

    /// Einfacher Linksklick.
    fn on_click(&self, ctx: &mut ModeContext<'_>, screen: Vec2)
        -> Result<ModeOutcome, EditError>;

    /// Doppelklick links.
    fn on_double_click(
        &self,
        ctx: &mut ModeContext<'_>,
        screen: Vec2,
    ) -> Result<ModeOutcome, EditError>;

    /// Rechtsklick. Standard: keine Wirkung.
    fn on_secondary_click(
        &self,
        _ctx: &mut ModeContext<'_>,
        _screen: Vec2,
    ) -> Result<ModeOutcome, EditError> {
        log::debug!("Rechtsklick ohne Wirkung im Modus {}", self.mode());
        Ok(ModeOutcome::Stay)
    }

    /// Modusrelevante Taste.
    fn on_key(&self, ctx: &mut ModeContext<'_>, key: ModeKey) -> Result<ModeOutcome, EditError>;
}

/// Liefert den Handler zum Modus-Tag.
pub fn handler_for(mode: EditorMode) -> &'static dyn ModeHandler {
    match mode {
        EditorMode::Select => &SelectMode,
        EditorMode::Digitize => &DigitizeMode,
        EditorMode::Edit => &EditMode,
    }
}
