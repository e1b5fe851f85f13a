//! UI-Komponenten: Input-Handling und Status-Bar.

pub mod input;
mod keyboard;
/// Status-Bar und Hilfefenster
pub mod status;

pub use input::collect_viewport_intents;
pub use status::render_status_bar;
