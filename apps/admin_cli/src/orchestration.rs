//! Routes parsed console commands to the coordinator.

use client_core::{ConsoleCoordinator, FormDraft, Screen};

use crate::commands::{ConsoleCommand, HELP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn dispatch(
    console: &mut ConsoleCoordinator,
    command: ConsoleCommand,
    status: &mut String,
) -> Flow {
    tracing::debug!(command = command.name(), "dispatching console command");

    match command {
        ConsoleCommand::Help => *status = HELP.to_string(),
        ConsoleCommand::Quit => return Flow::Quit,
        ConsoleCommand::Login { username, password } => {
            if console.screen() == Screen::LoggedIn {
                *status = "Already signed in; use 'logout' first".to_string();
            } else {
                console.login(&username, &password).await;
            }
        }
        ConsoleCommand::Logout => {
            if require_logged_in(console, status) {
                console.logout();
            }
        }
        ConsoleCommand::Refresh => {
            if require_logged_in(console, status) {
                console.refresh().await;
            }
        }
        ConsoleCommand::Open { mode, row } => {
            if !require_logged_in(console, status) {
                return Flow::Continue;
            }
            if console.overlay().is_open() {
                *status = "Close the open form first ('cancel')".to_string();
                return Flow::Continue;
            }
            let opened = match row {
                Some(row) => console.open_modal_for(mode, row),
                None => console.open_modal(mode, None),
            };
            if !opened {
                *status = "No product at that row".to_string();
            }
        }
        ConsoleCommand::Confirm => {
            if console.overlay().is_open() {
                console.confirm().await;
            } else {
                *status = "No form is open".to_string();
            }
        }
        ConsoleCommand::Cancel => {
            if console.overlay().is_open() {
                console.close_modal();
            } else {
                *status = "No form is open".to_string();
            }
        }
        ConsoleCommand::Set { field, value } => {
            edit_draft(console, status, |draft| {
                draft.update_field(field, value);
                true
            });
        }
        ConsoleCommand::Enable(enabled) => {
            edit_draft(console, status, |draft| {
                draft.set_enabled(enabled);
                true
            });
        }
        ConsoleCommand::ImageAdd => {
            if !edit_draft(console, status, FormDraft::add_image) {
                *status = "Image limit reached".to_string();
            }
        }
        ConsoleCommand::ImageRemove(index) => {
            if !edit_draft(console, status, |draft| draft.remove_image(index)) {
                *status = format!("No image at position {index}");
            }
        }
        ConsoleCommand::ImageSet(index, url) => {
            if !edit_draft(console, status, |draft| draft.set_image(index, url)) {
                *status = format!("No image at position {index}");
            }
        }
    }

    Flow::Continue
}

fn require_logged_in(console: &ConsoleCoordinator, status: &mut String) -> bool {
    if console.screen() == Screen::LoggedIn {
        return true;
    }
    *status = "Sign in first: login <username> <password>".to_string();
    false
}

/// Applies `edit` to the open draft. A closed modal sets a hint and counts as handled.
fn edit_draft(
    console: &mut ConsoleCoordinator,
    status: &mut String,
    edit: impl FnOnce(&mut FormDraft) -> bool,
) -> bool {
    match console.draft_mut() {
        Some(draft) => edit(draft),
        None => {
            *status = "No form is open".to_string();
            true
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
