//! Handler für die Weiterleitung von Klicks und Tasten an den aktiven Modus.

use glam::Vec2;

use crate::app::modes::{handler_for, ModeContext, ModeHandler, ModeKey, ModeOutcome};
use crate::app::AppState;
use crate::core::{EditError, EditorMode};
use crate::shared::SceneBackend;

/// Linksklick an den aktiven Modus.
pub fn click(state: &mut AppState, scene: &mut dyn SceneBackend, screen_pos: Vec2) {
    dispatch(state, scene, |handler, ctx| handler.on_click(ctx, screen_pos));
}

/// Doppelklick an den aktiven Modus.
pub fn double_click(state: &mut AppState, scene: &mut dyn SceneBackend, screen_pos: Vec2) {
    dispatch(state, scene, |handler, ctx| {
        handler.on_double_click(ctx, screen_pos)
    });
}

/// Rechtsklick an den aktiven Modus.
pub fn secondary_click(state: &mut AppState, scene: &mut dyn SceneBackend, screen_pos: Vec2) {
    dispatch(state, scene, |handler, ctx| {
        handler.on_secondary_click(ctx, screen_pos)
    });
}

/// Taste an den aktiven Modus.
pub fn key(state: &mut AppState, scene: &mut dyn SceneBackend, key: ModeKey) {
    dispatch(state, scene, |handler, ctx| handler.on_key(ctx, key));
}

/// Beantragt einen Moduswechsel bei der Zustandsmaschine.
pub fn transition(state: &mut AppState, to: EditorMode) -> Result<(), EditError> {
    let from = state.mode();
    state.mode.transition(to, &mut state.store)?;
    if from != to {
        log::info!("Modus: {} -> {}", from, to);
        state.ui.set_status(format!("Modus: {}", to));
    }
    Ok(())
}

/// Meldet einen behebbaren Fehler. Pick-Fehlschläge sind erwartbar und nur Debug.
pub fn report(state: &mut AppState, error: &EditError) {
    if error.is_pick_miss() {
        log::debug!("{} (Modus {})", error, state.mode());
    } else {
        log::warn!("{}", error);
        state.ui.set_status(error.to_string());
    }
}

fn dispatch(
    state: &mut AppState,
    scene: &mut dyn SceneBackend,
    action: impl FnOnce(&dyn ModeHandler, &mut ModeContext<'_>) -> Result<ModeOutcome, EditError>,
) {
    let handler = handler_for(state.mode());
    let outcome = {
        let mut ctx = ModeContext::new(state, scene);
        action(handler, &mut ctx)
    };

    let result = match outcome {
        Ok(ModeOutcome::Stay) => Ok(()),
        Ok(ModeOutcome::SwitchTo(to)) => transition(state, to),
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        report(state, &e);
    }
}
