//! Outcrop Polyline Mapper Library.
//! Interaktives Digitalisieren und Bearbeiten von 3D-Polylinien auf einer Aufschluss-Oberfläche.

pub mod app;
pub mod core;
pub mod io;
pub mod shared;
pub mod ui;

pub use app::{AppCommand, AppController, AppIntent, AppState, ModeKey, UiState};
pub use core::{
    Bounds3, EditError, EditorMode, Point3, Polyline, PolylineEnd, PolylineId, PolylineRecord,
    PolylineStore, PolylineTopology, Termination,
};
pub use io::{export_polylines, load_polyline_file, parse_polyline_summary, write_polyline_summary};
pub use shared::{
    EditorOptions, HeadlessScene, PolylineStyle, SceneBackend, SceneRequest, ViewPreset,
};
