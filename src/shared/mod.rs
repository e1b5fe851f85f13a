//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen und den Vertrag zum externen Renderer,
//! damit `app` und Host keine direkten Abhängigkeiten aufeinander haben.

pub mod options;
pub mod scene;

pub use options::EditorOptions;
pub use scene::{HeadlessScene, PolylineStyle, SceneBackend, SceneRequest, ViewPreset};
