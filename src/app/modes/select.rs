//! Select-Modus: Polylinien auswählen, löschen, Kamera steuern.

use glam::Vec2;

use super::{ModeContext, ModeHandler, ModeKey, ModeOutcome};
use crate::core::{EditError, EditorMode};
use crate::shared::SceneRequest;

/// Handler des Select-Modus.
pub struct SelectMode;

impl ModeHandler for SelectMode {
    fn mode(&self) -> EditorMode {
        EditorMode::Select
    }

    /// Selektiert die nächste Polylinie; ein Fehlklick hebt eine bestehende Selektion auf.
    fn on_click(
        &self,
        ctx: &mut ModeContext<'_>,
        screen: Vec2,
    ) -> Result<ModeOutcome, EditError> {
        let picked = ctx.picker().pick_nearest_polyline(screen);
        match picked {
            Ok(hit) => {
                if ctx.state.store.selected() != Some(hit.id) {
                    ctx.state.store_mut().select(hit.id)?;
                    log::info!(
                        "Polylinie {} selektiert (Abstand {:.4})",
                        hit.id,
                        hit.distance
                    );
                }
                Ok(ModeOutcome::Stay)
            }
            Err(EditError::PickMiss) if ctx.state.store.selected().is_some() => {
                if let Some(previous) = ctx.state.store_mut().deselect() {
                    log::info!("Kein Treffer, Selektion von {} aufgehoben", previous);
                }
                Ok(ModeOutcome::Stay)
            }
            Err(e) => Err(e),
        }
    }

    /// Rückt das Kamerazentrum anteilig zum angeklickten Oberflächenpunkt.
    fn on_double_click(
        &self,
        ctx: &mut ModeContext<'_>,
        screen: Vec2,
    ) -> Result<ModeOutcome, EditError> {
        let target = ctx.picker().pick_surface_point(screen)?;
        let fraction = ctx.state.options.camera_translate_fraction;
        ctx.submit(SceneRequest::TranslateCamera { target, fraction });
        log::info!(
            "Kamera rückt zu ({:.3}, {:.3}, {:.3})",
            target.x,
            target.y,
            target.z
        );
        Ok(ModeOutcome::Stay)
    }

    fn on_secondary_click(
        &self,
        ctx: &mut ModeContext<'_>,
        _screen: Vec2,
    ) -> Result<ModeOutcome, EditError> {
        ctx.submit(SceneRequest::ResetCamera);
        log::info!("Trackball zurückgesetzt");
        Ok(ModeOutcome::Stay)
    }

    fn on_key(&self, ctx: &mut ModeContext<'_>, key: ModeKey) -> Result<ModeOutcome, EditError> {
        match key {
            ModeKey::ToggleDigitize => Ok(ModeOutcome::SwitchTo(EditorMode::Digitize)),
            ModeKey::ToggleEdit => Ok(ModeOutcome::SwitchTo(EditorMode::Edit)),
            ModeKey::Deselect => {
                match ctx.state.store_mut().deselect() {
                    Some(id) => log::info!("Selektion von {} aufgehoben", id),
                    None => log::debug!("Deselektieren: nichts selektiert"),
                }
                Ok(ModeOutcome::Stay)
            }
            ModeKey::DeleteSelected => {
                let Some(id) = ctx.state.store.selected() else {
                    log::debug!("Löschen: nichts selektiert");
                    return Ok(ModeOutcome::Stay);
                };
                ctx.state.edit_store(|store| {
                    store
                        .remove(id)
                        .map(|_| ())
                        .ok_or(EditError::UnknownPolyline(id))
                })?;
                log::info!("Polylinie {} gelöscht", id);
                Ok(ModeOutcome::Stay)
            }
            ModeKey::Finish | ModeKey::Cancel => {
                log::debug!("{:?} hat im Select-Modus keine Wirkung", key);
                Ok(ModeOutcome::Stay)
            }
        }
    }
}
