//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! Effects that spawn a task carry `task: Option<TaskId>`. Feature reducers
//! leave it `None`; the top-level reducer assigns ids from `TaskSeq` before
//! returning, so the runtime always sees `Some`.

use userhive_core::config::Theme;
use userhive_core::models::{Page, UserUpdate};
use userhive_core::session::Session;

use crate::common::TaskId;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Authenticate against the directory.
    Login {
        task: Option<TaskId>,
        email: String,
        password: String,
    },

    /// Store the session in the session file.
    PersistSession { session: Session },

    /// Remove the stored session.
    ClearSession,

    /// Read the page mirror and report it back synchronously.
    LoadMirror,

    /// Fetch one page of users.
    FetchPage { task: Option<TaskId>, page: u32 },

    /// Write the resident page to the mirror.
    MirrorPage { page: Page },

    /// Send an edit draft.
    UpdateUser {
        task: Option<TaskId>,
        id: u64,
        update: UserUpdate,
    },

    /// Delete a user.
    DeleteUser { task: Option<TaskId>, id: u64 },

    /// Persist the theme preference to config.
    PersistTheme { theme: Theme },
}

impl UiEffect {
    /// Returns the task id slot for effects that spawn a task.
    pub(crate) fn task_slot(&mut self) -> Option<&mut Option<TaskId>> {
        match self {
            UiEffect::Login { task, .. }
            | UiEffect::FetchPage { task, .. }
            | UiEffect::UpdateUser { task, .. }
            | UiEffect::DeleteUser { task, .. } => Some(task),
            UiEffect::Quit
            | UiEffect::PersistSession { .. }
            | UiEffect::ClearSession
            | UiEffect::LoadMirror
            | UiEffect::MirrorPage { .. }
            | UiEffect::PersistTheme { .. } => None,
        }
    }
}
