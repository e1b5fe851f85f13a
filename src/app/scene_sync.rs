//! Abgleich zwischen App-Zustand und externer Szene.
//!
//! Der Spiegel merkt sich, was zuletzt an den Renderer übertragen wurde, und
//! erzeugt nach jedem Command nur die nötigen [`SceneRequest`]s. Dadurch ist
//! die Szene nach jeder Mutation (auch Undo, Laden, Verbinden) konsistent.

use std::sync::Arc;

use super::picking::scene_diagonal;
use super::AppState;
use crate::core::{EditorMode, Point3, Polyline, PolylineId, PolylineStore};
use crate::shared::options::CONTROL_POINT_RADIUS_FRACTION;
use crate::shared::{EditorOptions, PolylineStyle, SceneBackend, SceneRequest};

/// Zuletzt übertragener Szenenzustand.
#[derive(Debug, Default)]
pub struct SceneMirror {
    store: Option<Arc<PolylineStore>>,
    mode: Option<EditorMode>,
    draft: Vec<Point3>,
    control_points: Option<(PolylineId, Vec<Point3>)>,
}

impl SceneMirror {
    /// Erstellt einen leeren Spiegel (nichts übertragen).
    pub fn new() -> Self {
        Self::default()
    }

    /// Vergisst den übertragenen Stand; der nächste Abgleich zeichnet alles neu.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Überträgt alle Unterschiede seit dem letzten Abgleich.
    pub fn sync(&mut self, state: &AppState, scene: &mut dyn SceneBackend) {
        self.sync_mode(state.mode(), scene);
        self.sync_polylines(&state.store, &state.options, scene);
        self.sync_draft(state, scene);
        self.sync_control_points(state, scene);
    }

    fn sync_mode(&mut self, mode: EditorMode, scene: &mut dyn SceneBackend) {
        if self.mode != Some(mode) {
            scene.submit(SceneRequest::ModeChanged { mode });
            self.mode = Some(mode);
        }
    }

    fn sync_polylines(
        &mut self,
        store: &Arc<PolylineStore>,
        options: &EditorOptions,
        scene: &mut dyn SceneBackend,
    ) {
        if let Some(previous) = &self.store {
            if Arc::ptr_eq(previous, store) {
                return;
            }
            for id in previous.ids().filter(|id| !store.contains(*id)) {
                scene.submit(SceneRequest::RemovePolyline { id });
            }
        }

        for line in store.iter() {
            let unchanged = self
                .store
                .as_ref()
                .and_then(|prev| prev.get(line.id))
                .is_some_and(|prev| prev == line);
            if !unchanged {
                scene.submit(SceneRequest::ShowPolyline {
                    id: line.id,
                    points: line.points.clone(),
                    style: style_for(line, options),
                    terminations: line.topology.as_ref().map(|t| t.terminations),
                });
            }
        }

        self.store = Some(Arc::clone(store));
    }

    fn sync_draft(&mut self, state: &AppState, scene: &mut dyn SceneBackend) {
        let desired = state
            .mode
            .digitize_buffer()
            .map(|b| b.points())
            .unwrap_or_default();
        if desired == self.draft.as_slice() {
            return;
        }

        let request = if desired.is_empty() {
            SceneRequest::ClearDraft
        } else if desired.len() == self.draft.len() + 1 && desired.starts_with(&self.draft) {
            SceneRequest::AppendDraftPoint {
                point: desired[desired.len() - 1],
                previous: self.draft.last().copied(),
                style: draft_style(&state.options),
            }
        } else {
            SceneRequest::ShowDraft {
                points: desired.to_vec(),
                style: draft_style(&state.options),
            }
        };
        scene.submit(request);
        self.draft = desired.to_vec();
    }

    fn sync_control_points(&mut self, state: &AppState, scene: &mut dyn SceneBackend) {
        let desired = match state.mode() {
            EditorMode::Edit => state
                .store
                .selected_polyline()
                .map(|line| (line.id, line.points.clone())),
            _ => None,
        };
        if desired == self.control_points {
            return;
        }

        match &desired {
            Some((id, points)) => {
                let radius = scene_diagonal(&*scene, &state.store) * CONTROL_POINT_RADIUS_FRACTION;
                scene.submit(SceneRequest::ShowControlPoints {
                    id: *id,
                    points: points.clone(),
                    radius,
                });
            }
            None => scene.submit(SceneRequest::ClearControlPoints),
        }
        self.control_points = desired;
    }
}

fn style_for(line: &Polyline, options: &EditorOptions) -> PolylineStyle {
    if line.selected {
        PolylineStyle {
            color: options.polyline_color_selected,
            width: options.polyline_width_selected,
            selected: true,
        }
    } else {
        PolylineStyle {
            color: options.polyline_color_default,
            width: options.polyline_width_default,
            selected: false,
        }
    }
}

/// Entwurf: eigene Farbe, Breite wie die Selektion.
fn draft_style(options: &EditorOptions) -> PolylineStyle {
    PolylineStyle {
        color: options.polyline_color_draft,
        width: options.polyline_width_selected,
        selected: false,
    }
}
