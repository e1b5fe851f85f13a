//! Application-Layer: Controller, State, Events, Modi und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
/// Modus-Handler der Interaktions-Zustandsmaschine
pub mod modes;
pub mod picking;
pub mod scene_sync;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Polylinien, Modus, UI).
pub mod state;
pub mod use_cases;

pub use crate::core::{EditorMode, PolylineStore};
pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use modes::ModeKey;
pub use picking::{Picker, PolylineHit, Tolerances};
pub use scene_sync::SceneMirror;
pub use state::{AppState, DigitizeBuffer, ModeState, UiState};
