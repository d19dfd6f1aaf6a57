//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Task-spawning effects leave this module
//! with their task ids assigned.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use userhive_core::session::Session;

use crate::common::{TaskCompleted, TaskKind};
use crate::effects::UiEffect;
use crate::events::{DirectoryUiEvent, LoginUiEvent, UiEvent};
use crate::features::directory::{self, DirectoryRequest, DirectoryState};
use crate::features::login::{self, LoginState};
use crate::overlays::{self, ConfirmDeleteState, EditUserState, Overlay, OverlayExt};
use crate::state::{AppState, Screen, TuiState};
use crate::theme;

/// Mounts the initial view: the directory when a session was restored,
/// otherwise the login form.
pub fn start(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = enter_directory(app);
    assign_task_ids(&mut app.tui, &mut effects);
    effects
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let mut effects = reduce(app, event);
    assign_task_ids(&mut app.tui, &mut effects);
    effects
}

fn reduce(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => handle_task_completed(app, kind, completed),
        UiEvent::Login(event) => handle_login_event(app, event),
        UiEvent::Directory(event) => handle_directory_event(app, event),
    }
}

/// Fills the task id of every task-spawning effect from `TaskSeq`.
fn assign_task_ids(tui: &mut TuiState, effects: &mut [UiEffect]) {
    for effect in effects {
        if let Some(slot) = effect.task_slot()
            && slot.is_none()
        {
            *slot = Some(tui.task_seq.next_id());
        }
    }
}

// ============================================================================
// Task lifecycle
// ============================================================================

fn handle_task_completed(
    app: &mut AppState,
    kind: TaskKind,
    completed: TaskCompleted<Box<UiEvent>>,
) -> Vec<UiEffect> {
    let was_active = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);

    match kind {
        TaskKind::FetchPage => {
            let issued_for = match completed.result.as_ref() {
                UiEvent::Directory(DirectoryUiEvent::PageFetched { page, .. }) => Some(*page),
                _ => None,
            };
            let shown = app.tui.directory().map(DirectoryState::current_page);
            let state = &mut app.tui.tasks.fetch_page;

            if !state.is_newer(completed.id) || issued_for.is_none() || issued_for != shown {
                tracing::debug!(
                    id = completed.id.0,
                    ?issued_for,
                    ?shown,
                    "discarding stale page fetch"
                );
                return vec![];
            }
            state.mark_applied(completed.id);
        }
        TaskKind::Login => {
            if !was_active {
                tracing::debug!(id = completed.id.0, "discarding superseded login result");
                return vec![];
            }
        }
        // The server has already applied the mutation; its result is always reconciled.
        TaskKind::UpdateUser | TaskKind::DeleteUser => {}
    }

    reduce(app, *completed.result)
}

// ============================================================================
// Navigation
// ============================================================================

/// Switches to the directory view and starts its mount sequence.
///
/// Without a session the login view is shown instead and nothing is fetched.
fn enter_directory(app: &mut AppState) -> Vec<UiEffect> {
    if app.tui.session.is_none() {
        tracing::debug!("no session, redirecting to login");
        app.tui.screen = Screen::Login(LoginState::new());
        return vec![];
    }

    app.tui.screen = Screen::Directory(DirectoryState::new());
    vec![UiEffect::LoadMirror]
}

fn logout(app: &mut AppState) -> Vec<UiEffect> {
    tracing::info!("logging out");
    app.tui.session = None;
    app.overlay = None;
    app.tui.screen = Screen::Login(LoginState::new());
    vec![UiEffect::ClearSession]
}

fn login_succeeded(app: &mut AppState, session: Session) -> Vec<UiEffect> {
    tracing::info!(token = %session.masked_token(), "login succeeded");
    let mut effects = vec![UiEffect::PersistSession {
        session: session.clone(),
    }];
    app.tui.session = Some(session);
    effects.extend(enter_directory(app));
    effects
}

// ============================================================================
// Result events
// ============================================================================

fn handle_login_event(app: &mut AppState, event: LoginUiEvent) -> Vec<UiEffect> {
    match event {
        LoginUiEvent::Succeeded(session) => login_succeeded(app, session),
        LoginUiEvent::Failed(error) => {
            tracing::warn!(%error, "login failed");
            if let Some(login) = app.tui.login_mut() {
                login::handle_login_failed(login, error);
            }
            vec![]
        }
    }
}

fn handle_directory_event(app: &mut AppState, event: DirectoryUiEvent) -> Vec<UiEffect> {
    match event {
        DirectoryUiEvent::MirrorLoaded(mirrored) => match app.tui.directory_mut() {
            Some(dir) => directory::handle_mirror_loaded(dir, mirrored),
            None => vec![],
        },
        DirectoryUiEvent::PageFetched { page, result } => {
            let Some(dir) = app.tui.directory_mut() else {
                return vec![];
            };
            if let Err(error) = &result {
                tracing::warn!(page, %error, "page fetch failed");
            }
            let effects = directory::handle_page_fetched(dir, result);

            // A dialog cannot outlive the record it targets.
            if let Some(target) = app.overlay.as_ref().map(Overlay::user_id)
                && !dir.resident.contains(target)
            {
                tracing::debug!(id = target, "closing dialog for user no longer resident");
                app.overlay = None;
            }
            effects
        }
        DirectoryUiEvent::UserUpdated { id, update, result } => match result {
            Ok(()) => {
                if matches!(&app.overlay, Some(Overlay::EditUser(edit)) if edit.user_id == id) {
                    app.overlay = None;
                }
                match app.tui.directory_mut() {
                    Some(dir) => directory::handle_user_updated(dir, id, &update),
                    None => vec![],
                }
            }
            Err(error) => {
                tracing::warn!(id, %error, "update failed");
                match app.overlay.as_mut().and_then(Overlay::as_edit_mut) {
                    Some(edit) if edit.user_id == id => edit.fail(error),
                    _ => {
                        if let Some(dir) = app.tui.directory_mut() {
                            dir.action_error = Some(error);
                        }
                    }
                }
                vec![]
            }
        },
        DirectoryUiEvent::UserDeleted { id, result } => {
            match &result {
                Ok(()) => app.overlay.close_if_targets(id),
                Err(error) => {
                    tracing::warn!(id, %error, "delete failed");
                    if matches!(&app.overlay, Some(Overlay::ConfirmDelete(d)) if d.user_id == id) {
                        app.overlay = None;
                    }
                }
            }
            match app.tui.directory_mut() {
                Some(dir) => directory::handle_user_deleted(dir, id, result),
                None => vec![],
            }
        }
    }
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if let Some(effects) = overlays::handle_overlay_key(&mut app.overlay, key) {
        return effects;
    }

    let busy = app.tui.is_mutating();
    let (mut effects, request) = match &mut app.tui.screen {
        Screen::Login(login) => (login::handle_key(login, key), None),
        Screen::Directory(dir) => directory::handle_key(dir, key, busy),
    };
    if let Some(request) = request {
        effects.extend(apply_directory_request(app, request));
    }
    effects
}

fn apply_directory_request(app: &mut AppState, request: DirectoryRequest) -> Vec<UiEffect> {
    match request {
        DirectoryRequest::Edit(user) => {
            app.overlay = Some(Overlay::EditUser(EditUserState::open(&user)));
            vec![]
        }
        DirectoryRequest::Delete(user) => {
            app.overlay = Some(Overlay::ConfirmDelete(ConfirmDeleteState::open(&user)));
            vec![]
        }
        DirectoryRequest::Logout => logout(app),
        DirectoryRequest::ToggleTheme => {
            app.tui.theme = theme::toggle(app.tui.theme);
            vec![UiEffect::PersistTheme {
                theme: app.tui.theme,
            }]
        }
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    if let Some(overlay) = app.overlay.as_mut() {
        overlay.handle_paste(text);
        return;
    }
    match &mut app.tui.screen {
        Screen::Login(login) => login::handle_paste(login, text),
        Screen::Directory(dir) => directory::handle_paste(dir, text),
    }
}

#[cfg(test)]
mod tests {
    use userhive_core::config::Theme;
    use userhive_core::models::{Page, User, UserUpdate};

    use super::*;
    use crate::common::{TaskId, TaskStarted};
    use crate::features::directory::FetchStatus;
    use crate::features::login::REQUIRED_MESSAGE;

    fn user(id: u64, first: &str, last: &str) -> User {
        User {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: Some(format!("{first}.{last}@reqres.in").to_lowercase()),
            avatar: None,
        }
    }

    fn page(page: u32, total_pages: u32, items: Vec<User>) -> Page {
        Page {
            items,
            page,
            total_pages,
        }
    }

    fn first_page() -> Page {
        page(
            1,
            2,
            vec![
                user(1, "George", "Bluth"),
                user(2, "Janet", "Weaver"),
                user(3, "Emma", "Wong"),
            ],
        )
    }

    fn second_page() -> Page {
        page(2, 2, vec![user(7, "Michael", "Lawson"), user(8, "Lindsay", "Ferguson")])
    }

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Press,
        )))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, press(KeyCode::Char(c)));
        }
    }

    /// Feeds `TaskStarted` for every task effect, mirroring the runtime.
    fn start_tasks(app: &mut AppState, effects: &[UiEffect]) {
        for effect in effects {
            let (kind, task) = match effect {
                UiEffect::Login { task, .. } => (TaskKind::Login, task),
                UiEffect::FetchPage { task, .. } => (TaskKind::FetchPage, task),
                UiEffect::UpdateUser { task, .. } => (TaskKind::UpdateUser, task),
                UiEffect::DeleteUser { task, .. } => (TaskKind::DeleteUser, task),
                _ => continue,
            };
            let id = task.expect("task id assigned");
            update(
                app,
                UiEvent::TaskStarted {
                    kind,
                    started: TaskStarted { id },
                },
            );
        }
    }

    fn complete(kind: TaskKind, id: TaskId, result: UiEvent) -> UiEvent {
        UiEvent::TaskCompleted {
            kind,
            completed: TaskCompleted {
                id,
                result: Box::new(result),
            },
        }
    }

    fn fetch_task(effects: &[UiEffect]) -> (TaskId, u32) {
        effects
            .iter()
            .find_map(|effect| match effect {
                UiEffect::FetchPage {
                    task: Some(id),
                    page,
                } => Some((*id, *page)),
                _ => None,
            })
            .expect("fetch effect")
    }

    fn fetched(page_no: u32, result: Result<Page, String>) -> UiEvent {
        UiEvent::Directory(DirectoryUiEvent::PageFetched {
            page: page_no,
            result,
        })
    }

    fn dir(app: &AppState) -> &DirectoryState {
        app.tui.directory().expect("directory screen")
    }

    fn resident_ids(app: &AppState) -> Vec<u64> {
        dir(app).resident.items().iter().map(|u| u.id).collect()
    }

    /// Logged-in app with page 1 of 2 loaded from the server.
    fn loaded_app() -> AppState {
        let mut app = AppState::new(Theme::Styled, Some(Session::new("QpwL5tke4Pnpja7X4")));
        let effects = start(&mut app);
        assert!(matches!(effects.as_slice(), [UiEffect::LoadMirror]));

        let effects = update(
            &mut app,
            UiEvent::Directory(DirectoryUiEvent::MirrorLoaded(None)),
        );
        start_tasks(&mut app, &effects);
        let (id, page_no) = fetch_task(&effects);
        update(
            &mut app,
            complete(TaskKind::FetchPage, id, fetched(page_no, Ok(first_page()))),
        );
        assert_eq!(resident_ids(&app), vec![1, 2, 3]);
        app
    }

    #[test]
    fn test_start_without_session_shows_login_without_fetching() {
        let mut app = AppState::new(Theme::Styled, None);
        let effects = start(&mut app);
        assert!(effects.is_empty());
        assert!(matches!(app.tui.screen, Screen::Login(_)));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut app = AppState::new(Theme::Styled, None);
        type_text(&mut app, "eve.holt@reqres.in");
        let effects = update(&mut app, press(KeyCode::Enter));

        assert!(effects.is_empty());
        let Screen::Login(login) = &app.tui.screen else {
            panic!("expected login screen");
        };
        assert_eq!(login.error.as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_login_success_persists_session_and_mounts_directory() {
        let mut app = AppState::new(Theme::Styled, None);
        type_text(&mut app, "eve.holt@reqres.in");
        update(&mut app, press(KeyCode::Tab));
        type_text(&mut app, "cityslicka");

        let effects = update(&mut app, press(KeyCode::Enter));
        let id = match effects.as_slice() {
            [UiEffect::Login {
                task: Some(id),
                email,
                password,
            }] => {
                assert_eq!(email, "eve.holt@reqres.in");
                assert_eq!(password, "cityslicka");
                *id
            }
            other => panic!("unexpected effects: {other:?}"),
        };
        start_tasks(&mut app, &effects);

        let effects = update(
            &mut app,
            complete(
                TaskKind::Login,
                id,
                UiEvent::Login(LoginUiEvent::Succeeded(Session::new("QpwL5tke4Pnpja7X4"))),
            ),
        );

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::PersistSession { session }, UiEffect::LoadMirror]
                if session.token == "QpwL5tke4Pnpja7X4"
        ));
        assert!(app.tui.session.is_some());
        assert!(matches!(app.tui.screen, Screen::Directory(_)));
    }

    #[test]
    fn test_login_failure_shows_error_and_stores_nothing() {
        let mut app = AppState::new(Theme::Styled, None);
        type_text(&mut app, "peter@klaven");
        update(&mut app, press(KeyCode::Tab));
        type_text(&mut app, "wrong");
        let effects = update(&mut app, press(KeyCode::Enter));
        start_tasks(&mut app, &effects);
        let Some(UiEffect::Login { task: Some(id), .. }) = effects.first() else {
            panic!("expected login effect");
        };

        let effects = update(
            &mut app,
            complete(
                TaskKind::Login,
                *id,
                UiEvent::Login(LoginUiEvent::Failed("user not found".to_string())),
            ),
        );

        assert!(effects.is_empty());
        assert!(app.tui.session.is_none());
        let Screen::Login(login) = &app.tui.screen else {
            panic!("expected login screen");
        };
        assert!(!login.is_submitting());
        assert_eq!(login.error.as_deref(), Some("user not found"));
    }

    #[test]
    fn test_mirror_is_painted_then_replaced_by_fetch() {
        let mut app = AppState::new(Theme::Styled, Some(Session::new("token")));
        start(&mut app);

        let mirrored = page(1, 1, vec![user(1, "Stale", "Copy")]);
        let effects = update(
            &mut app,
            UiEvent::Directory(DirectoryUiEvent::MirrorLoaded(Some(mirrored))),
        );
        assert!(dir(&app).from_mirror);
        assert_eq!(resident_ids(&app), vec![1]);
        assert!(dir(&app).fetch.is_loading());

        start_tasks(&mut app, &effects);
        let (id, page_no) = fetch_task(&effects);
        let effects = update(
            &mut app,
            complete(TaskKind::FetchPage, id, fetched(page_no, Ok(first_page()))),
        );

        assert!(!dir(&app).from_mirror);
        assert_eq!(dir(&app).fetch, FetchStatus::Loaded);
        assert_eq!(resident_ids(&app), vec![1, 2, 3]);
        assert!(matches!(effects.as_slice(), [UiEffect::MirrorPage { page }] if page.items.len() == 3));
    }

    #[test]
    fn test_failed_refresh_keeps_resident_items() {
        let mut app = loaded_app();
        let effects = update(&mut app, press(KeyCode::Char('r')));
        start_tasks(&mut app, &effects);
        let (id, page_no) = fetch_task(&effects);

        update(
            &mut app,
            complete(
                TaskKind::FetchPage,
                id,
                fetched(page_no, Err("Failed to fetch users".to_string())),
            ),
        );

        assert_eq!(resident_ids(&app), vec![1, 2, 3]);
        assert_eq!(dir(&app).fetch.error(), Some("Failed to fetch users"));
    }

    #[test]
    fn test_fetch_for_another_page_is_discarded() {
        let mut app = loaded_app();

        let to_second = update(&mut app, press(KeyCode::Right));
        start_tasks(&mut app, &to_second);
        let (second_id, second_page_no) = fetch_task(&to_second);
        assert_eq!(second_page_no, 2);

        let back_to_first = update(&mut app, press(KeyCode::Left));
        start_tasks(&mut app, &back_to_first);
        let (first_id, first_page_no) = fetch_task(&back_to_first);
        assert_eq!(first_page_no, 1);

        // Page 2 resolves late, after the user already went back.
        let effects = update(
            &mut app,
            complete(TaskKind::FetchPage, second_id, fetched(2, Ok(second_page()))),
        );
        assert!(effects.is_empty());
        assert_eq!(dir(&app).current_page(), 1);
        assert_eq!(resident_ids(&app), vec![1, 2, 3]);

        update(
            &mut app,
            complete(TaskKind::FetchPage, first_id, fetched(1, Ok(first_page()))),
        );
        assert_eq!(dir(&app).fetch, FetchStatus::Loaded);
    }

    #[test]
    fn test_older_fetch_for_same_page_is_discarded() {
        let mut app = loaded_app();

        let older = update(&mut app, press(KeyCode::Char('r')));
        start_tasks(&mut app, &older);
        let newer = update(&mut app, press(KeyCode::Char('r')));
        start_tasks(&mut app, &newer);
        let (older_id, _) = fetch_task(&older);
        let (newer_id, _) = fetch_task(&newer);
        assert!(newer_id > older_id);

        let fresh = page(1, 2, vec![user(1, "George", "Bluth")]);
        update(&mut app, complete(TaskKind::FetchPage, newer_id, fetched(1, Ok(fresh))));
        assert_eq!(resident_ids(&app), vec![1]);

        let effects = update(
            &mut app,
            complete(TaskKind::FetchPage, older_id, fetched(1, Ok(first_page()))),
        );
        assert!(effects.is_empty());
        assert_eq!(resident_ids(&app), vec![1]);
    }

    #[test]
    fn test_edit_success_updates_in_place_and_mirrors() {
        let mut app = loaded_app();
        update(&mut app, press(KeyCode::Down));
        update(&mut app, press(KeyCode::Char('e')));
        assert!(matches!(&app.overlay, Some(Overlay::EditUser(e)) if e.user_id == 2));

        update(&mut app, press(KeyCode::Char('e')));
        let effects = update(&mut app, press(KeyCode::Enter));
        start_tasks(&mut app, &effects);
        let Some(UiEffect::UpdateUser {
            task: Some(id),
            update: draft,
            ..
        }) = effects.first()
        else {
            panic!("expected update effect");
        };
        assert_eq!(draft.first_name, "Janete");

        let effects = update(
            &mut app,
            complete(
                TaskKind::UpdateUser,
                *id,
                UiEvent::Directory(DirectoryUiEvent::UserUpdated {
                    id: 2,
                    update: draft.clone(),
                    result: Ok(()),
                }),
            ),
        );

        assert!(app.overlay.is_none());
        assert_eq!(resident_ids(&app), vec![1, 2, 3]);
        let edited = dir(&app).resident.get(2).expect("still resident");
        assert_eq!(edited.first_name, "Janete");
        assert_eq!(edited.last_name, "Weaver");
        assert!(matches!(effects.as_slice(), [UiEffect::MirrorPage { .. }]));
    }

    #[test]
    fn test_edit_failure_keeps_dialog_open_with_error() {
        let mut app = loaded_app();
        update(&mut app, press(KeyCode::Enter));
        let effects = update(&mut app, press(KeyCode::Enter));
        start_tasks(&mut app, &effects);
        let Some(UiEffect::UpdateUser { task: Some(id), .. }) = effects.first() else {
            panic!("expected update effect");
        };

        update(
            &mut app,
            complete(
                TaskKind::UpdateUser,
                *id,
                UiEvent::Directory(DirectoryUiEvent::UserUpdated {
                    id: 1,
                    update: UserUpdate::from(&user(1, "George", "Bluth")),
                    result: Err("Failed to update user".to_string()),
                }),
            ),
        );

        let Some(Overlay::EditUser(edit)) = &app.overlay else {
            panic!("edit dialog should stay open");
        };
        assert!(!edit.saving);
        assert_eq!(edit.error.as_deref(), Some("Failed to update user"));
        assert_eq!(dir(&app).resident.get(1).map(|u| u.first_name.as_str()), Some("George"));
    }

    #[test]
    fn test_escape_ignored_while_edit_is_saving() {
        let mut app = loaded_app();
        update(&mut app, press(KeyCode::Enter));
        let effects = update(&mut app, press(KeyCode::Enter));
        start_tasks(&mut app, &effects);

        let effects = update(&mut app, press(KeyCode::Esc));

        assert!(effects.is_empty());
        assert!(matches!(&app.overlay, Some(Overlay::EditUser(edit)) if edit.saving));
    }

    #[test]
    fn test_edit_failure_without_dialog_surfaces_list_error() {
        let mut app = loaded_app();
        update(&mut app, press(KeyCode::Enter));
        let effects = update(&mut app, press(KeyCode::Enter));
        start_tasks(&mut app, &effects);
        let Some(UiEffect::UpdateUser { task: Some(update_id), .. }) = effects.first() else {
            panic!("expected update effect");
        };
        let update_id = *update_id;

        // A refresh that no longer contains George closes his dialog.
        let effects = update(&mut app, UiEvent::Directory(DirectoryUiEvent::MirrorLoaded(None)));
        start_tasks(&mut app, &effects);
        let (fetch_id, page_no) = fetch_task(&effects);
        let without_george = page(1, 2, vec![user(2, "Janet", "Weaver"), user(3, "Emma", "Wong")]);
        update(
            &mut app,
            complete(TaskKind::FetchPage, fetch_id, fetched(page_no, Ok(without_george))),
        );
        assert!(app.overlay.is_none());

        update(
            &mut app,
            complete(
                TaskKind::UpdateUser,
                update_id,
                UiEvent::Directory(DirectoryUiEvent::UserUpdated {
                    id: 1,
                    update: UserUpdate::from(&user(1, "George", "Bluth")),
                    result: Err("Failed to update user".to_string()),
                }),
            ),
        );

        assert!(app.overlay.is_none());
        assert_eq!(dir(&app).action_error.as_deref(), Some("Failed to update user"));
        assert_eq!(resident_ids(&app), vec![2, 3]);
    }

    #[test]
    fn test_delete_success_removes_user() {
        let mut app = loaded_app();
        update(&mut app, press(KeyCode::Down));
        update(&mut app, press(KeyCode::Down));
        update(&mut app, press(KeyCode::Char('d')));
        let effects = update(&mut app, press(KeyCode::Char('y')));
        start_tasks(&mut app, &effects);
        let Some(UiEffect::DeleteUser { task: Some(id), id: target }) = effects.first() else {
            panic!("expected delete effect");
        };
        assert_eq!(*target, 3);

        let effects = update(
            &mut app,
            complete(
                TaskKind::DeleteUser,
                *id,
                UiEvent::Directory(DirectoryUiEvent::UserDeleted {
                    id: 3,
                    result: Ok(()),
                }),
            ),
        );

        assert!(app.overlay.is_none());
        assert_eq!(resident_ids(&app), vec![1, 2]);
        assert_eq!(dir(&app).selected, 1);
        assert!(matches!(effects.as_slice(), [UiEffect::MirrorPage { .. }]));
    }

    #[test]
    fn test_delete_failure_closes_dialog_and_surfaces_error() {
        let mut app = loaded_app();
        update(&mut app, press(KeyCode::Char('d')));
        let effects = update(&mut app, press(KeyCode::Enter));
        start_tasks(&mut app, &effects);
        let Some(UiEffect::DeleteUser { task: Some(id), .. }) = effects.first() else {
            panic!("expected delete effect");
        };

        update(
            &mut app,
            complete(
                TaskKind::DeleteUser,
                *id,
                UiEvent::Directory(DirectoryUiEvent::UserDeleted {
                    id: 1,
                    result: Err("Failed to delete user".to_string()),
                }),
            ),
        );

        assert!(app.overlay.is_none());
        assert_eq!(resident_ids(&app), vec![1, 2, 3]);
        assert_eq!(dir(&app).action_error.as_deref(), Some("Failed to delete user"));
    }

    #[test]
    fn test_refresh_removing_edited_user_closes_dialog() {
        let mut app = loaded_app();
        update(&mut app, press(KeyCode::Down));
        update(&mut app, press(KeyCode::Char('e')));
        assert!(app.overlay.is_some());

        // The dialog is open, so refresh is issued directly.
        let effects = update(&mut app, UiEvent::Directory(DirectoryUiEvent::MirrorLoaded(None)));
        start_tasks(&mut app, &effects);
        let (id, page_no) = fetch_task(&effects);
        let without_janet = page(1, 2, vec![user(1, "George", "Bluth"), user(3, "Emma", "Wong")]);
        update(
            &mut app,
            complete(TaskKind::FetchPage, id, fetched(page_no, Ok(without_janet))),
        );

        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_pagination_ignored_while_delete_in_flight() {
        let mut app = loaded_app();
        update(&mut app, press(KeyCode::Char('d')));
        let effects = update(&mut app, press(KeyCode::Char('y')));
        start_tasks(&mut app, &effects);
        // Dismissing is blocked while deleting, so drop the dialog directly.
        app.overlay = None;

        let effects = update(&mut app, press(KeyCode::Right));
        assert!(effects.is_empty());
        assert_eq!(dir(&app).current_page(), 1);
    }

    #[test]
    fn test_logout_clears_session_and_returns_to_login() {
        let mut app = loaded_app();
        let effects = update(&mut app, press(KeyCode::Char('o')));

        assert!(matches!(effects.as_slice(), [UiEffect::ClearSession]));
        assert!(app.tui.session.is_none());
        assert!(matches!(app.tui.screen, Screen::Login(_)));
    }

    #[test]
    fn test_fetch_result_after_logout_is_ignored() {
        let mut app = loaded_app();
        let effects = update(&mut app, press(KeyCode::Char('r')));
        start_tasks(&mut app, &effects);
        let (id, page_no) = fetch_task(&effects);
        update(&mut app, press(KeyCode::Char('o')));

        let effects = update(
            &mut app,
            complete(TaskKind::FetchPage, id, fetched(page_no, Ok(first_page()))),
        );
        assert!(effects.is_empty());
        assert!(matches!(app.tui.screen, Screen::Login(_)));
    }

    #[test]
    fn test_theme_toggle_persists() {
        let mut app = loaded_app();
        let effects = update(&mut app, press(KeyCode::Char('t')));
        assert_eq!(app.tui.theme, Theme::Plain);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::PersistTheme { theme: Theme::Plain }]
        ));
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        let mut app = AppState::new(Theme::Plain, None);
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new_with_kind(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyEventKind::Press,
            ))),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }
}
