//! UI event types.
//!
//! All external inputs (terminal, async results) are converted to `UiEvent`
//! before being processed by the reducer.
//!
//! ## Task Lifecycle Events
//!
//! Async work uses a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`
//!
//! Result events carry errors as display strings; the reducer stores them in
//! view state as-is.

use crossterm::event::Event as CrosstermEvent;
use userhive_core::models::{Page, UserUpdate};
use userhive_core::session::Session;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Login results.
#[derive(Debug)]
pub enum LoginUiEvent {
    Succeeded(Session),
    Failed(String),
}

/// Directory results.
#[derive(Debug)]
pub enum DirectoryUiEvent {
    /// The mirror was read at mount (synchronously, before any fetch).
    MirrorLoaded(Option<Page>),

    /// A page fetch resolved. `page` is the page the request was issued for.
    PageFetched {
        page: u32,
        result: Result<Page, String>,
    },

    /// An update resolved. `update` is the draft that was submitted.
    UserUpdated {
        id: u64,
        update: UserUpdate,
        result: Result<(), String>,
    },

    /// A delete resolved.
    UserDeleted { id: u64, result: Result<(), String> },
}

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation).
    Tick,

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    Login(LoginUiEvent),

    Directory(DirectoryUiEvent),
}
