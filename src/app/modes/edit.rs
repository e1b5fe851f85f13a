//! Edit-Modus: aktive (selektierte) Polylinie ausdünnen, verlängern, verbinden.
//!
//! Klick-Priorität, der erste Treffer gewinnt:
//! 1. Stützpunkt der aktiven Polylinie in Lösch-Toleranz → Punkt löschen
//! 2. Endpunkt der aktiven Polylinie in Verlängerungs-Toleranz und kein fremder
//!    Endpunkt in Verbindungs-Toleranz → am näheren Ende verlängern
//! 3. Fremder Endpunkt in Verbindungs-Toleranz und aktiver Endpunkt in
//!    Verlängerungs-Toleranz → verbinden, Ergebnis wird selektiert
//! 4. sonst keine Wirkung

use glam::Vec2;

use super::{ModeContext, ModeHandler, ModeKey, ModeOutcome};
use crate::core::{EditError, EditorMode, PointDeletion, PolylineEnd, PolylineId};
use crate::core::{EndpointMatch, Point3};

/// Handler des Edit-Modus.
pub struct EditMode;

/// Aufgelöste Klick-Aktion im Edit-Modus.
#[derive(Debug, Clone, Copy, PartialEq)]
enum EditAction {
    DeletePoint {
        index: usize,
    },
    Extend {
        point: Point3,
        end: PolylineEnd,
    },
    Join {
        active_end: PolylineEnd,
        foreign: EndpointMatch,
        max_gap: f64,
    },
}

impl ModeHandler for EditMode {
    fn mode(&self) -> EditorMode {
        EditorMode::Edit
    }

    fn on_click(
        &self,
        ctx: &mut ModeContext<'_>,
        screen: Vec2,
    ) -> Result<ModeOutcome, EditError> {
        let Some(active) = ctx.state.store.selected() else {
            log::warn!("Edit-Modus ohne aktive Polylinie, zurück zu Select");
            return Ok(ModeOutcome::SwitchTo(EditorMode::Select));
        };

        let action = resolve_click(ctx, active, screen)?;
        apply(ctx, active, action)
    }

    fn on_double_click(
        &self,
        _ctx: &mut ModeContext<'_>,
        _screen: Vec2,
    ) -> Result<ModeOutcome, EditError> {
        log::debug!("Doppelklick hat im Edit-Modus keine Wirkung");
        Ok(ModeOutcome::Stay)
    }

    fn on_key(&self, _ctx: &mut ModeContext<'_>, key: ModeKey) -> Result<ModeOutcome, EditError> {
        match key {
            // Leertaste verlässt Edit ebenfalls Richtung Select
            ModeKey::ToggleEdit | ModeKey::ToggleDigitize => {
                Ok(ModeOutcome::SwitchTo(EditorMode::Select))
            }
            ModeKey::Deselect | ModeKey::DeleteSelected | ModeKey::Finish | ModeKey::Cancel => {
                log::debug!("{:?} hat im Edit-Modus keine Wirkung", key);
                Ok(ModeOutcome::Stay)
            }
        }
    }
}

/// Bestimmt die Aktion nach fester Priorität. Reine Abfrage.
fn resolve_click(
    ctx: &ModeContext<'_>,
    active: PolylineId,
    screen: Vec2,
) -> Result<EditAction, EditError> {
    let picker = ctx.picker();
    let tol = picker.tolerances();
    let surface = picker.pick_surface_point(screen)?;

    match picker.control_point_at(active, surface) {
        Ok(index) => return Ok(EditAction::DeletePoint { index }),
        Err(EditError::PickMiss) => {}
        Err(e) => return Err(e),
    }

    let own_end = picker.pick_nearest_endpoint(active, surface, tol.extend);
    let foreign = picker.pick_foreign_endpoint(active, surface, tol.join);

    match (own_end, foreign) {
        (Ok((end, _)), Err(EditError::PickMiss)) => Ok(EditAction::Extend {
            point: surface,
            end,
        }),
        (Ok((active_end, _)), Ok(foreign)) => Ok(EditAction::Join {
            active_end,
            foreign,
            max_gap: tol.extend + tol.join,
        }),
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

fn apply(
    ctx: &mut ModeContext<'_>,
    active: PolylineId,
    action: EditAction,
) -> Result<ModeOutcome, EditError> {
    match action {
        EditAction::DeletePoint { index } => {
            let deletion = ctx
                .state
                .edit_store(|store| store.delete_point(active, index))?;
            match deletion {
                PointDeletion::PointRemoved => {
                    log::info!("Stützpunkt {} von Polylinie {} gelöscht", index, active);
                    Ok(ModeOutcome::Stay)
                }
                PointDeletion::PolylineRemoved(_) => {
                    log::info!(
                        "Polylinie {} hatte nur noch einen Punkt und wurde entfernt",
                        active
                    );
                    ctx.state
                        .ui
                        .set_status(format!("Polylinie {} entfernt", active));
                    Ok(ModeOutcome::SwitchTo(EditorMode::Select))
                }
            }
        }
        EditAction::Extend { point, end } => {
            ctx.state
                .edit_store(|store| store.extend(active, point, end))?;
            log::info!("Polylinie {} am {:?} verlängert", active, end);
            Ok(ModeOutcome::Stay)
        }
        EditAction::Join {
            active_end,
            foreign,
            max_gap,
        } => {
            let merged = ctx.state.edit_store(|store| {
                store.join_at(
                    active,
                    active_end,
                    foreign.polyline_id,
                    foreign.end,
                    max_gap,
                )
            })?;
            log::info!(
                "Polylinien {} und {} zu {} verbunden",
                active,
                foreign.polyline_id,
                merged
            );
            ctx.state.ui.set_status(format!(
                "Polylinien {} und {} zu {} verbunden",
                active, foreign.polyline_id, merged
            ));
            Ok(ModeOutcome::Stay)
        }
    }
}
