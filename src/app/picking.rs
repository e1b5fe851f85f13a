//! Picking-Adapter: Bildschirmposition → Oberflächenpunkt, Polylinie, Stützpunkt.
//!
//! Reine Abfragen ohne Seiteneffekte auf den Store. Jeder Fehlschlag wird als
//! [`EditError::PickMiss`] gemeldet und vom Aufrufer behandelt.

use glam::Vec2;

use crate::core::{
    distance_to_polyline, nearest_vertex, EditError, EndpointMatch, Point3, PolylineEnd,
    PolylineId, PolylineStore,
};
use crate::shared::options::FALLBACK_SCENE_DIAGONAL;
use crate::shared::{EditorOptions, SceneBackend};

/// Absolute Pick-Toleranzen in Welteinheiten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Referenzlänge (Mesh-Diagonale)
    pub diagonal: f64,
    /// Selektion einer Polylinie
    pub select: f64,
    /// Treffer auf einen Stützpunkt
    pub delete: f64,
    /// Fremder Endpunkt zum Verbinden
    pub join: f64,
    /// Verlängerungsbereich um aktive Endpunkte
    pub extend: f64,
}

impl Tolerances {
    /// Skaliert die Anteile aus den Optionen mit der Diagonale.
    pub fn from_options(options: &EditorOptions, diagonal: f64) -> Self {
        Self {
            diagonal,
            select: options.select_tolerance_fraction * diagonal,
            delete: options.delete_tolerance_fraction * diagonal,
            join: options.join_tolerance_fraction * diagonal,
            extend: options.extend_tolerance_fraction * diagonal,
        }
    }
}

/// Referenzdiagonale: Mesh, ersatzweise die Ausdehnung aller Polylinien.
pub fn scene_diagonal(scene: &dyn SceneBackend, store: &PolylineStore) -> f64 {
    scene
        .mesh_bounds()
        .or_else(|| store.bounds())
        .map(|b| b.diagonal())
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(FALLBACK_SCENE_DIAGONAL)
}

/// Treffer von [`Picker::pick_nearest_polyline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineHit {
    /// Getroffene Polylinie
    pub id: PolylineId,
    /// Abstand des Oberflächenpunkts zur Polylinie
    pub distance: f64,
    /// Oberflächenpunkt unter dem Cursor
    pub surface: Point3,
}

/// Read-only Sicht auf Szene und Store für Pick-Abfragen.
pub struct Picker<'a> {
    scene: &'a dyn SceneBackend,
    store: &'a PolylineStore,
    tolerances: Tolerances,
}

impl<'a> Picker<'a> {
    /// Erstellt einen Picker; die Toleranzen werden aus der aktuellen Diagonale berechnet.
    pub fn new(
        scene: &'a dyn SceneBackend,
        store: &'a PolylineStore,
        options: &EditorOptions,
    ) -> Self {
        let tolerances = Tolerances::from_options(options, scene_diagonal(scene, store));
        Self {
            scene,
            store,
            tolerances,
        }
    }

    /// Aktive Toleranzen.
    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// Oberflächenpunkt unter der Bildschirmposition.
    pub fn pick_surface_point(&self, screen: Vec2) -> Result<Point3, EditError> {
        self.scene.pick_surface(screen).ok_or(EditError::PickMiss)
    }

    /// Nächste Polylinie innerhalb der Selektions-Toleranz.
    pub fn pick_nearest_polyline(&self, screen: Vec2) -> Result<PolylineHit, EditError> {
        let surface = self.pick_surface_point(screen)?;
        let (id, distance) = self.nearest_polyline_at(surface)?;
        Ok(PolylineHit {
            id,
            distance,
            surface,
        })
    }

    /// Nächste Polylinie zu einem Weltpunkt (Segmentabstand). Bei Gleichstand gewinnt die ältere.
    pub fn nearest_polyline_at(&self, point: Point3) -> Result<(PolylineId, f64), EditError> {
        self.store
            .iter()
            .filter_map(|line| distance_to_polyline(point, &line.points).map(|d| (line.id, d)))
            .filter(|(_, d)| *d <= self.tolerances.select)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or(EditError::PickMiss)
    }

    /// Index des Stützpunkts von `id` unter der Bildschirmposition.
    pub fn pick_nearest_control_point(
        &self,
        id: PolylineId,
        screen: Vec2,
    ) -> Result<usize, EditError> {
        let surface = self.pick_surface_point(screen)?;
        self.control_point_at(id, surface)
    }

    /// Index des Stützpunkts von `id` innerhalb der Lösch-Toleranz um `point`.
    pub fn control_point_at(&self, id: PolylineId, point: Point3) -> Result<usize, EditError> {
        let line = self.store.get(id).ok_or(EditError::UnknownPolyline(id))?;
        nearest_vertex(point, &line.points)
            .filter(|(_, d)| *d <= self.tolerances.delete)
            .map(|(index, _)| index)
            .ok_or(EditError::PickMiss)
    }

    /// Näheres Ende von `id`, sofern innerhalb `tolerance`.
    pub fn pick_nearest_endpoint(
        &self,
        id: PolylineId,
        point: Point3,
        tolerance: f64,
    ) -> Result<(PolylineEnd, f64), EditError> {
        let line = self.store.get(id).ok_or(EditError::UnknownPolyline(id))?;
        line.nearest_end(point)
            .filter(|(_, d)| *d <= tolerance)
            .ok_or(EditError::PickMiss)
    }

    /// Nächster Endpunkt einer anderen Polylinie als `id` innerhalb `tolerance`.
    pub fn pick_foreign_endpoint(
        &self,
        id: PolylineId,
        point: Point3,
        tolerance: f64,
    ) -> Result<EndpointMatch, EditError> {
        self.store
            .nearest_foreign_endpoint(point, id, tolerance)
            .ok_or(EditError::PickMiss)
    }
}
