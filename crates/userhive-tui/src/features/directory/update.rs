//! Directory feature reducer.
//!
//! Owns pagination, search, and the resident page. Requests that reach
//! outside this slice (dialogs, logout, theme) are returned as
//! `DirectoryRequest` for the top-level reducer to apply.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use userhive_core::models::{Page, User, UserUpdate};

use super::state::{DirectoryState, FetchStatus};
use crate::effects::UiEffect;

/// Requests the directory slice cannot fulfil on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryRequest {
    Edit(User),
    Delete(User),
    Logout,
    ToggleTheme,
}

/// Handles a key on the directory view.
///
/// `busy` is true while an edit or delete is in flight; page changes are
/// ignored until it resolves.
pub fn handle_key(
    dir: &mut DirectoryState,
    key: KeyEvent,
    busy: bool,
) -> (Vec<UiEffect>, Option<DirectoryRequest>) {
    if dir.search.editing {
        handle_search_key(dir, key);
        return (vec![], None);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (vec![], None);
    }

    match key.code {
        KeyCode::Char('/') => {
            dir.search.editing = true;
            (vec![], None)
        }
        KeyCode::Esc => {
            set_query(dir, String::new());
            dir.action_error = None;
            (vec![], None)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            dir.select_previous();
            (vec![], None)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            dir.select_next();
            (vec![], None)
        }
        KeyCode::Left | KeyCode::Char('h') if !busy => (previous_page(dir), None),
        KeyCode::Right | KeyCode::Char('l') if !busy => (next_page(dir), None),
        KeyCode::Char('r') => (start_fetch(dir), None),
        KeyCode::Enter | KeyCode::Char('e') => {
            let request = dir.selected_user().cloned().map(DirectoryRequest::Edit);
            (vec![], request)
        }
        KeyCode::Delete | KeyCode::Char('d') => {
            let request = dir.selected_user().cloned().map(DirectoryRequest::Delete);
            (vec![], request)
        }
        KeyCode::Char('o') => (vec![], Some(DirectoryRequest::Logout)),
        KeyCode::Char('t') => (vec![], Some(DirectoryRequest::ToggleTheme)),
        KeyCode::Char('q') => (vec![UiEffect::Quit], None),
        _ => (vec![], None),
    }
}

fn handle_search_key(dir: &mut DirectoryState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            set_query(dir, String::new());
            dir.search.editing = false;
        }
        KeyCode::Enter => dir.search.editing = false,
        KeyCode::Up => dir.select_previous(),
        KeyCode::Down => dir.select_next(),
        KeyCode::Backspace => {
            let mut query = dir.search.query.clone();
            query.pop();
            set_query(dir, query);
        }
        KeyCode::Char('u') if ctrl => set_query(dir, String::new()),
        KeyCode::Char(c) if !ctrl => {
            let mut query = dir.search.query.clone();
            query.push(c);
            set_query(dir, query);
        }
        _ => {}
    }
}

pub fn handle_paste(dir: &mut DirectoryState, text: &str) {
    if !dir.search.editing {
        return;
    }
    let line = text.lines().next().unwrap_or_default();
    let query = format!("{}{line}", dir.search.query);
    set_query(dir, query);
}

fn set_query(dir: &mut DirectoryState, query: String) {
    if dir.search.query != query {
        dir.search.query = query;
        dir.selected = 0;
    }
}

fn previous_page(dir: &mut DirectoryState) -> Vec<UiEffect> {
    if !dir.resident.pagination_mut().previous() {
        return vec![];
    }
    on_page_changed(dir)
}

fn next_page(dir: &mut DirectoryState) -> Vec<UiEffect> {
    if !dir.resident.pagination_mut().next() {
        return vec![];
    }
    on_page_changed(dir)
}

fn on_page_changed(dir: &mut DirectoryState) -> Vec<UiEffect> {
    dir.selected = 0;
    dir.action_error = None;
    start_fetch(dir)
}

/// Starts a fetch of the current page.
pub fn start_fetch(dir: &mut DirectoryState) -> Vec<UiEffect> {
    dir.fetch = FetchStatus::Loading;
    vec![UiEffect::FetchPage {
        task: None,
        page: dir.current_page(),
    }]
}

/// Paints the mirrored page (if any), then refreshes from the server.
pub fn handle_mirror_loaded(dir: &mut DirectoryState, mirrored: Option<Page>) -> Vec<UiEffect> {
    if let Some(page) = mirrored {
        dir.resident.replace_page(page);
        dir.from_mirror = true;
        dir.clamp_selection();
    }
    start_fetch(dir)
}

/// Applies an accepted page fetch result.
pub fn handle_page_fetched(dir: &mut DirectoryState, result: Result<Page, String>) -> Vec<UiEffect> {
    match result {
        Ok(page) => {
            dir.resident.replace_page(page);
            dir.fetch = FetchStatus::Loaded;
            dir.from_mirror = false;
            dir.clamp_selection();
            vec![mirror_effect(dir)]
        }
        Err(error) => {
            dir.fetch = FetchStatus::Errored(error);
            vec![]
        }
    }
}

/// Applies a successful update in place.
pub fn handle_user_updated(dir: &mut DirectoryState, id: u64, update: &UserUpdate) -> Vec<UiEffect> {
    dir.action_error = None;
    if !dir.resident.apply_update(id, update) {
        tracing::debug!(id, "updated user is no longer resident");
        return vec![];
    }
    dir.clamp_selection();
    vec![mirror_effect(dir)]
}

/// Applies a delete result.
pub fn handle_user_deleted(
    dir: &mut DirectoryState,
    id: u64,
    result: Result<(), String>,
) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            dir.action_error = None;
            if dir.resident.remove(id).is_none() {
                tracing::debug!(id, "deleted user is no longer resident");
                return vec![];
            }
            dir.clamp_selection();
            vec![mirror_effect(dir)]
        }
        Err(error) => {
            dir.action_error = Some(error);
            vec![]
        }
    }
}

fn mirror_effect(dir: &DirectoryState) -> UiEffect {
    UiEffect::MirrorPage {
        page: dir.resident.to_page(),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn user(id: u64, first: &str, last: &str) -> User {
        User {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: Some(format!("{}@reqres.in", first.to_lowercase())),
            avatar: None,
        }
    }

    fn loaded(page: u32, total_pages: u32) -> DirectoryState {
        let mut dir = DirectoryState::new();
        handle_page_fetched(
            &mut dir,
            Ok(Page {
                items: vec![user(1, "George", "Bluth"), user(2, "Janet", "Weaver"), user(3, "Emma", "Wong")],
                page,
                total_pages,
            }),
        );
        dir
    }

    #[test]
    fn test_next_page_fetches_and_previous_is_noop_at_first_page() {
        let mut dir = loaded(1, 2);

        let (effects, _) = handle_key(&mut dir, key(KeyCode::Left), false);
        assert!(effects.is_empty());
        assert_eq!(dir.current_page(), 1);

        let (effects, _) = handle_key(&mut dir, key(KeyCode::Right), false);
        assert!(matches!(effects.as_slice(), [UiEffect::FetchPage { page: 2, .. }]));
        assert!(dir.fetch.is_loading());

        let (effects, _) = handle_key(&mut dir, key(KeyCode::Char('l')), false);
        assert!(effects.is_empty());
        assert_eq!(dir.current_page(), 2);
    }

    #[test]
    fn test_search_filters_without_touching_resident() {
        let mut dir = loaded(1, 1);
        handle_key(&mut dir, key(KeyCode::Char('/')), false);
        for c in "WEAV".chars() {
            handle_key(&mut dir, key(KeyCode::Char(c)), false);
        }

        let visible: Vec<u64> = dir.visible().iter().map(|u| u.id).collect();
        assert_eq!(visible, vec![2]);
        assert_eq!(dir.resident.len(), 3);

        // Keys typed into the search box are not commands.
        let (effects, request) = handle_key(&mut dir, key(KeyCode::Char('q')), false);
        assert!(effects.is_empty());
        assert!(request.is_none());

        handle_key(&mut dir, key(KeyCode::Esc), false);
        assert!(!dir.search.editing);
        assert_eq!(dir.visible().len(), 3);
    }

    #[test]
    fn test_edit_and_delete_target_the_filtered_selection() {
        let mut dir = loaded(1, 1);
        dir.search.query = "emma".to_string();

        let (_, request) = handle_key(&mut dir, key(KeyCode::Char('e')), false);
        assert!(matches!(request, Some(DirectoryRequest::Edit(u)) if u.id == 3));

        let (_, request) = handle_key(&mut dir, key(KeyCode::Char('d')), false);
        assert!(matches!(request, Some(DirectoryRequest::Delete(u)) if u.id == 3));
    }

    #[test]
    fn test_failed_fetch_keeps_resident_items() {
        let mut dir = loaded(1, 2);
        start_fetch(&mut dir);

        let effects = handle_page_fetched(&mut dir, Err("Failed to fetch users".to_string()));

        assert!(effects.is_empty());
        assert_eq!(dir.resident.len(), 3);
        assert_eq!(dir.fetch.error(), Some("Failed to fetch users"));
    }

    #[test]
    fn test_mirror_paints_then_fetches_mirrored_page() {
        let mut dir = DirectoryState::new();
        let effects = handle_mirror_loaded(
            &mut dir,
            Some(Page {
                items: vec![user(7, "Michael", "Lawson")],
                page: 2,
                total_pages: 2,
            }),
        );

        assert!(dir.from_mirror);
        assert_eq!(dir.resident.len(), 1);
        assert!(matches!(effects.as_slice(), [UiEffect::FetchPage { page: 2, .. }]));
    }

    #[test]
    fn test_delete_clamps_selection_and_mirrors() {
        let mut dir = loaded(1, 1);
        dir.selected = 2;

        let effects = handle_user_deleted(&mut dir, 3, Ok(()));

        assert_eq!(dir.selected, 1);
        assert!(matches!(effects.as_slice(), [UiEffect::MirrorPage { page }] if page.items.len() == 2));
    }

    #[test]
    fn test_delete_failure_sets_action_error() {
        let mut dir = loaded(1, 1);
        let effects = handle_user_deleted(&mut dir, 3, Err("Failed to delete user".to_string()));

        assert!(effects.is_empty());
        assert_eq!(dir.resident.len(), 3);
        assert_eq!(dir.action_error.as_deref(), Some("Failed to delete user"));
    }
}
