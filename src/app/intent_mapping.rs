//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::ViewportClicked { screen_pos } => vec![AppCommand::ModeClick { screen_pos }],
        AppIntent::ViewportDoubleClicked { screen_pos } => {
            vec![AppCommand::ModeDoubleClick { screen_pos }]
        }
        AppIntent::ViewportSecondaryClicked { screen_pos } => {
            vec![AppCommand::ModeSecondaryClick { screen_pos }]
        }
        AppIntent::ModeKeyPressed { key } => vec![AppCommand::ModeKey { key }],
        AppIntent::SaveRequested => match state.ui.output_dir.clone() {
            Some(dir) => vec![AppCommand::SavePolylines { dir }],
            None => vec![AppCommand::RequestSaveDialog],
        },
        AppIntent::SaveToDirectoryRequested { dir } => vec![AppCommand::SavePolylines { dir }],
        AppIntent::LoadRequested { path } => vec![AppCommand::LoadPolylines { path }],
        AppIntent::ClearAllRequested => vec![AppCommand::ClearAllPolylines],
        AppIntent::ClassifyTopologyRequested => vec![AppCommand::ClassifyTopology],
        AppIntent::TerminationChosen {
            id,
            end,
            termination,
        } => vec![AppCommand::SetTermination {
            id,
            end,
            termination,
        }],
        AppIntent::HelpRequested => vec![AppCommand::ShowHelp],
        AppIntent::ResetCameraRequested => vec![AppCommand::ResetCamera],
        AppIntent::ViewPresetRequested { preset } => vec![AppCommand::SetViewPreset { preset }],
        AppIntent::UndoRequested => vec![AppCommand::Undo],
        AppIntent::RedoRequested => vec![AppCommand::Redo],
        AppIntent::StatusDismissed => vec![AppCommand::DismissStatus],
    }
}
