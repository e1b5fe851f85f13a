//! Szenen-Vertrag zwischen App-Layer und externem 3D-Renderer.
//!
//! Der Renderer (Mesh, Kamera, Oberflächen-Picking) ist nicht Teil dieser
//! Crate. Er wird über [`SceneBackend`] angebunden und erhält alle
//! Änderungen als [`SceneRequest`]s, synchron in Eingangsreihenfolge.

use crate::core::{Bounds3, EditorMode, Point3, PolylineId, Termination};
use glam::Vec2;

/// Vordefinierte Blickrichtungen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    /// Blick entlang der X-Achse (YZ-Ebene)
    AlongX,
    /// Blick entlang der Y-Achse (XZ-Ebene)
    AlongY,
    /// Blick entlang der Z-Achse (XY-Ebene)
    AlongZ,
    /// Isometrische Ansicht
    Isometric,
}

/// Darstellungsstil einer Polylinie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineStyle {
    /// Linienfarbe (RGBA)
    pub color: [f32; 4],
    /// Linienbreite in Pixeln
    pub width: f32,
    /// Ob die Polylinie selektiert ist
    pub selected: bool,
}

/// Auftrag an den Renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneRequest {
    /// Polylinie anlegen oder ersetzen
    ShowPolyline {
        id: PolylineId,
        points: Vec<Point3>,
        style: PolylineStyle,
        /// Abschluss-Labels `[Start, Ende]`, falls klassifiziert
        terminations: Option<[Termination; 2]>,
    },
    /// Polylinie aus der Szene entfernen
    RemovePolyline { id: PolylineId },
    /// Einen Punkt an den Digitalisier-Entwurf anhängen (inkl. Segment zum Vorgänger)
    AppendDraftPoint {
        point: Point3,
        previous: Option<Point3>,
        style: PolylineStyle,
    },
    /// Entwurf komplett neu zeichnen
    ShowDraft {
        points: Vec<Point3>,
        style: PolylineStyle,
    },
    /// Entwurf entfernen
    ClearDraft,
    /// Stützpunkt-Marker der aktiven Polylinie im Edit-Modus
    ShowControlPoints {
        id: PolylineId,
        points: Vec<Point3>,
        radius: f64,
    },
    /// Stützpunkt-Marker entfernen
    ClearControlPoints,
    /// Kamera/Trackball-Zentrum anteilig zum Zielpunkt verschieben
    TranslateCamera { target: Point3, fraction: f64 },
    /// Kamera auf die Ausgangsposition zurücksetzen
    ResetCamera,
    /// Vordefinierte Blickrichtung setzen
    SetViewPreset { preset: ViewPreset },
    /// Aktiver Modus hat gewechselt (z.B. für Hintergrundfarbe)
    ModeChanged { mode: EditorMode },
}

/// Fähigkeiten des externen Renderers.
pub trait SceneBackend {
    /// Löst eine Bildschirmposition in den getroffenen Mesh-Oberflächenpunkt auf.
    fn pick_surface(&self, screen: Vec2) -> Option<Point3>;
    /// Bounding-Box des geladenen Meshes, falls vorhanden.
    fn mesh_bounds(&self) -> Option<Bounds3>;
    /// Randvertices des Meshes für die Topologie (siehe [`crate::core::mesh_boundary_vertices`]).
    fn mesh_boundary(&self) -> Vec<Point3> {
        Vec::new()
    }
    /// Übergibt einen Auftrag. Wird synchron abgearbeitet.
    fn submit(&mut self, request: SceneRequest);
}

/// Renderer-loses Backend über einer ebenen Fläche `z = 0`.
///
/// Bildschirmpixel werden linear auf Welteinheiten abgebildet, Klicks außerhalb
/// des Viewports verfehlen die Oberfläche. Alle Aufträge werden gesammelt.
/// Gedacht für Tests, Benchmarks und Stapelbetrieb.
#[derive(Debug, Clone)]
pub struct HeadlessScene {
    /// Viewport-Größe in Pixeln
    pub viewport_size: Vec2,
    /// Welteinheiten pro Pixel
    pub world_per_pixel: f64,
    /// Gesammelte Aufträge in Eingangsreihenfolge
    pub requests: Vec<SceneRequest>,
    /// Simulierter Aufschlussrand
    pub boundary: Vec<Point3>,
}

impl HeadlessScene {
    /// Erstellt eine Fläche mit gegebener Pixelgröße und Skalierung.
    pub fn new(viewport_size: Vec2, world_per_pixel: f64) -> Self {
        Self {
            viewport_size,
            world_per_pixel,
            requests: Vec::new(),
            boundary: Vec::new(),
        }
    }

    /// Weltpunkt zu einer Bildschirmposition (ohne Trefferprüfung).
    pub fn world_at(&self, screen: Vec2) -> Point3 {
        Point3::new(
            screen.x as f64 * self.world_per_pixel,
            screen.y as f64 * self.world_per_pixel,
            0.0,
        )
    }

    /// Bildschirmposition zu einem Weltpunkt der Fläche.
    pub fn screen_at(&self, world: Point3) -> Vec2 {
        Vec2::new(
            (world.x / self.world_per_pixel) as f32,
            (world.y / self.world_per_pixel) as f32,
        )
    }

    /// Leert die gesammelten Aufträge und gibt sie zurück.
    pub fn take_requests(&mut self) -> Vec<SceneRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl SceneBackend for HeadlessScene {
    fn pick_surface(&self, screen: Vec2) -> Option<Point3> {
        let inside = screen.x >= 0.0
            && screen.y >= 0.0
            && screen.x <= self.viewport_size.x
            && screen.y <= self.viewport_size.y;
        inside.then(|| self.world_at(screen))
    }

    fn mesh_bounds(&self) -> Option<Bounds3> {
        Some(Bounds3::new(Point3::ZERO, self.world_at(self.viewport_size)))
    }

    fn mesh_boundary(&self) -> Vec<Point3> {
        self.boundary.clone()
    }

    fn submit(&mut self, request: SceneRequest) {
        self.requests.push(request);
    }
}
