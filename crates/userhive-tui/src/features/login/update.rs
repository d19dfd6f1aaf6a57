//! Login feature reducer.
//!
//! Handles credential entry and the `Idle → Submitting → Idle` transitions.
//! Navigation on success is owned by the top-level reducer.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{LoginState, LoginStatus};
use crate::effects::UiEffect;

pub const REQUIRED_MESSAGE: &str = "Email and password are required";

pub fn handle_key(login: &mut LoginState, key: KeyEvent) -> Vec<UiEffect> {
    if login.is_submitting() {
        return vec![];
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            login.toggle_focus();
            vec![]
        }
        KeyCode::Enter => submit(login),
        KeyCode::Esc => {
            login.error = None;
            vec![]
        }
        KeyCode::Backspace => {
            login.focused_mut().pop();
            login.error = None;
            vec![]
        }
        KeyCode::Char('u') if ctrl => {
            login.focused_mut().clear();
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            login.focused_mut().push(c);
            login.error = None;
            vec![]
        }
        _ => vec![],
    }
}

pub fn handle_paste(login: &mut LoginState, text: &str) {
    if login.is_submitting() {
        return;
    }
    let line = text.lines().next().unwrap_or_default();
    login.focused_mut().push_str(line.trim());
}

/// Validates the form and starts a login request.
pub fn submit(login: &mut LoginState) -> Vec<UiEffect> {
    if login.is_submitting() {
        return vec![];
    }

    let email = login.email.trim();
    if email.is_empty() || login.password.is_empty() {
        login.error = Some(REQUIRED_MESSAGE.to_string());
        return vec![];
    }

    login.status = LoginStatus::Submitting;
    login.error = None;
    vec![UiEffect::Login {
        task: None,
        email: email.to_string(),
        password: login.password.clone(),
    }]
}

pub fn handle_login_failed(login: &mut LoginState, error: String) {
    login.status = LoginStatus::Idle;
    login.error = Some(error);
}
