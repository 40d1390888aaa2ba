/*
[INPUT]:  Crossterm key events and dialog state
[OUTPUT]:  Key routing into list navigation and dialog actions
[POS]:    TUI event handling
[UPDATE]: When hotkeys or dialog key routing change
*/

use std::path::PathBuf;

use crossterm::event::KeyCode;

use super::app::AppState;
use super::ui::modal::{
    ModalAction, apply_action_dialog, apply_issue_dialog, build_action_dialog, build_issue_dialog,
    handle_modal_key,
};
use crate::staging::StagedFile;

/// Handles key events for the console.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) async fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    if app.modal.is_some() {
        let in_issue = app
            .modal
            .as_ref()
            .is_some_and(|modal| modal.issue_dialog().is_some());
        if in_issue {
            handle_issue_key(app, key).await;
        } else {
            handle_action_key(app, key).await;
        }
        return false;
    }

    match key {
        KeyCode::Char('q') => true,
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            false
        }
        KeyCode::Enter => {
            app.open_selected();
            false
        }
        KeyCode::Char('n') => {
            app.next_page();
            false
        }
        KeyCode::Char('p') => {
            app.prev_page();
            false
        }
        KeyCode::Char('f') => {
            app.cycle_status_filter();
            false
        }
        KeyCode::Char('r') => {
            if app.refresher.trigger() {
                app.status_message = String::from("refreshing...");
            }
            false
        }
        _ => false,
    }
}

async fn handle_action_key(app: &mut AppState, key: KeyCode) {
    let client = app.client.clone();
    let action = {
        let Some(modal) = app.modal.as_mut() else {
            return;
        };
        // All triggering controls are dead while a submission is in flight.
        if modal.is_loading() {
            return;
        }
        let mut view = build_action_dialog(modal, app.modal_focus, &app.attach_input);
        let action = handle_modal_key(&mut view, key);
        app.modal_focus = view.focus_index;
        apply_action_dialog(modal, &mut app.attach_input, &view);
        action
    };

    match action {
        ModalAction::Cancel => app.close_modal(),
        ModalAction::Action(kind) => {
            let mut refresh = false;
            if let Some(modal) = app.modal.as_mut() {
                refresh = modal.submit(&client, kind).await;
            }
            if refresh {
                app.refresher.trigger();
            }
        }
        ModalAction::ReportIssue => {
            if let Some(modal) = app.modal.as_mut() {
                if modal.open_issue_dialog() {
                    app.issue_focus = 0;
                }
            }
        }
        ModalAction::Attach => attach_file(app).await,
        ModalAction::Unstage(name) => {
            if let Some(modal) = app.modal.as_mut() {
                modal.unstage_file(&name);
            }
        }
        ModalAction::None | ModalAction::SubmitIssue => {}
    }
}

async fn handle_issue_key(app: &mut AppState, key: KeyCode) {
    let client = app.client.clone();
    let action = {
        let Some(modal) = app.modal.as_mut() else {
            return;
        };
        let Some(dialog) = modal.issue_dialog_mut() else {
            return;
        };
        if dialog.is_loading() {
            return;
        }
        let mut view = build_issue_dialog(dialog, app.issue_focus);
        let action = handle_modal_key(&mut view, key);
        app.issue_focus = view.focus_index;
        apply_issue_dialog(dialog, &view);
        action
    };

    match action {
        ModalAction::Cancel => {
            if let Some(modal) = app.modal.as_mut() {
                modal.close_issue_dialog();
            }
        }
        ModalAction::SubmitIssue => {
            let mut refresh = false;
            if let Some(modal) = app.modal.as_mut() {
                if let Some(dialog) = modal.issue_dialog_mut() {
                    refresh = dialog.submit(&client).await;
                }
            }
            if refresh {
                app.refresher.trigger();
            }
        }
        _ => {}
    }
}

async fn attach_file(app: &mut AppState) {
    let path_text = app.attach_input.trim().to_string();
    if path_text.is_empty() {
        app.status_message = String::from("enter a file path to attach");
        return;
    }

    match StagedFile::from_path(PathBuf::from(&path_text)).await {
        Ok(file) => {
            let name = file.name.clone();
            if let Some(modal) = app.modal.as_mut() {
                if modal.stage_file(file) {
                    app.attach_input.clear();
                    app.status_message = format!("staged {name}");
                } else {
                    app.status_message = format!("{name} is already staged");
                }
            }
        }
        Err(err) => {
            app.status_message = format!("cannot stage {path_text}: {err}");
        }
    }
}
