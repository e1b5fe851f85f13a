//! Digitize-Modus: neue Polylinie Punkt für Punkt auf der Oberfläche erfassen.

use glam::Vec2;

use super::{ModeContext, ModeHandler, ModeKey, ModeOutcome};
use crate::core::{EditError, EditorMode};

/// Handler des Digitize-Modus.
pub struct DigitizeMode;

impl ModeHandler for DigitizeMode {
    fn mode(&self) -> EditorMode {
        EditorMode::Digitize
    }

    /// Hängt den Oberflächenpunkt an den Puffer an. Ohne Oberfläche passiert nichts.
    fn on_click(
        &self,
        ctx: &mut ModeContext<'_>,
        screen: Vec2,
    ) -> Result<ModeOutcome, EditError> {
        let point = ctx.picker().pick_surface_point(screen)?;
        let Some(buffer) = ctx.state.mode.digitize_buffer_mut() else {
            return Ok(ModeOutcome::SwitchTo(EditorMode::Select));
        };
        buffer.push(point);
        log::info!(
            "Punkt {} erfasst: ({:.3}, {:.3}, {:.3})",
            buffer.len(),
            point.x,
            point.y,
            point.z
        );
        Ok(ModeOutcome::Stay)
    }

    fn on_double_click(
        &self,
        ctx: &mut ModeContext<'_>,
        screen: Vec2,
    ) -> Result<ModeOutcome, EditError> {
        self.on_click(ctx, screen)
    }

    fn on_key(&self, ctx: &mut ModeContext<'_>, key: ModeKey) -> Result<ModeOutcome, EditError> {
        match key {
            ModeKey::ToggleDigitize => Ok(ModeOutcome::SwitchTo(EditorMode::Select)),
            // Die Zustandsmaschine lehnt Digitize → Edit ab
            ModeKey::ToggleEdit => Ok(ModeOutcome::SwitchTo(EditorMode::Edit)),
            ModeKey::Finish => finish(ctx),
            ModeKey::Cancel => {
                if let Some(buffer) = ctx.state.mode.digitize_buffer_mut() {
                    if !buffer.is_empty() {
                        log::info!("Digitalisieren abgebrochen, {} Punkt(e) verworfen", buffer.len());
                    }
                    buffer.clear();
                }
                Ok(ModeOutcome::Stay)
            }
            ModeKey::Deselect | ModeKey::DeleteSelected => {
                log::debug!("{:?} hat im Digitize-Modus keine Wirkung", key);
                Ok(ModeOutcome::Stay)
            }
        }
    }
}

/// Übernimmt den Puffer als neue Polylinie. Der Modus bleibt Digitize.
fn finish(ctx: &mut ModeContext<'_>) -> Result<ModeOutcome, EditError> {
    let points = ctx
        .state
        .mode
        .digitize_buffer_mut()
        .map(|buffer| buffer.take())
        .unwrap_or_default();

    if points.len() < 2 {
        log::warn!(
            "Polylinie braucht mindestens 2 Punkte, Puffer mit {} Punkt(en) verworfen",
            points.len()
        );
        return Err(EditError::DegeneratePolyline {
            points: points.len(),
        });
    }

    let count = points.len();
    let id = ctx.state.edit_store(|store| store.add(points))?;
    log::info!("Polylinie {} mit {} Punkten angelegt", id, count);
    ctx.state
        .ui
        .set_status(format!("Polylinie {} mit {} Punkten angelegt", id, count));
    Ok(ModeOutcome::Stay)
}
