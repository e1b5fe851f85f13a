//! Handler für modusübergreifende Bearbeitung.

use crate::app::use_cases;
use crate::app::AppState;

/// Entfernt alle Polylinien.
pub fn clear_all(state: &mut AppState) {
    use_cases::editing::clear_all(state);
}
