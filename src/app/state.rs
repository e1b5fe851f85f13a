//! Application State: zentrale Datenhaltung.

mod app_state;
mod mode;
mod ui;

pub use app_state::AppState;
pub use mode::{DigitizeBuffer, ModeState};
pub use ui::UiState;
