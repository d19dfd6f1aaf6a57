//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: Option<Session>  (authentication)
//! │   ├── screen: Screen            (login or directory view)
//! │   ├── task_seq: TaskSeq         (async task id generator)
//! │   └── tasks: Tasks              (task lifecycle state)
//! └── overlay: Option<Overlay>      (edit / delete dialogs)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can borrow their own state while the reducer borrows `TuiState`.

use userhive_core::config::Theme;
use userhive_core::session::Session;

use crate::common::{TaskSeq, Tasks};
use crate::features::directory::DirectoryState;
use crate::features::login::LoginState;
use crate::overlays::Overlay;
use crate::theme::Palette;

/// Combined application state for the TUI.
#[derive(Debug)]
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(theme: Theme, session: Option<Session>) -> Self {
        Self {
            tui: TuiState::new(theme, session),
            overlay: None,
        }
    }
}

/// Which view owns the screen.
#[derive(Debug)]
pub enum Screen {
    Login(LoginState),
    Directory(DirectoryState),
}

/// Non-overlay UI state.
#[derive(Debug)]
pub struct TuiState {
    pub should_quit: bool,
    pub theme: Theme,
    /// Present while authenticated. The directory is never shown without it.
    pub session: Option<Session>,
    pub screen: Screen,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    /// Creates state on the login screen. The runtime mounts the directory
    /// through the reducer when a session was restored.
    pub fn new(theme: Theme, session: Option<Session>) -> Self {
        Self {
            should_quit: false,
            theme,
            session,
            screen: Screen::Login(LoginState::new()),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme)
    }

    pub fn directory(&self) -> Option<&DirectoryState> {
        match &self.screen {
            Screen::Directory(dir) => Some(dir),
            Screen::Login(_) => None,
        }
    }

    pub fn directory_mut(&mut self) -> Option<&mut DirectoryState> {
        match &mut self.screen {
            Screen::Directory(dir) => Some(dir),
            Screen::Login(_) => None,
        }
    }

    pub fn login_mut(&mut self) -> Option<&mut LoginState> {
        match &mut self.screen {
            Screen::Login(login) => Some(login),
            Screen::Directory(_) => None,
        }
    }

    /// True while an edit or delete request is in flight.
    pub fn is_mutating(&self) -> bool {
        self.tasks.update_user.is_running() || self.tasks.delete_user.is_running()
    }
}
