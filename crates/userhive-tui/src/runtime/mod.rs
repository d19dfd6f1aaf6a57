//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s to `inbox_tx` when their task completes
//! - The runtime drains `inbox_rx` each frame and feeds the reducer
//!
//! Session and mirror storage are synchronous and run inline.
//!
//! Structure:
//! - `mod.rs`: Core runtime (`TuiRuntime`, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Async request handlers

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use userhive_core::api::DirectoryClient;
use userhive_core::config::{Config, Theme};
use userhive_core::mirror::MirrorCache;
use userhive_core::session::SessionStore;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::{DirectoryUiEvent, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame interval while requests are in flight or the user is typing.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Storage and network dependencies of the runtime.
#[derive(Debug, Clone)]
pub struct RuntimeDeps {
    pub client: DirectoryClient,
    pub sessions: SessionStore,
    pub mirror: MirrorCache,
    /// Config file the theme preference is written to.
    pub config_path: PathBuf,
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    deps: RuntimeDeps,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime, restoring any stored session.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(deps: RuntimeDeps, theme: Theme) -> Result<Self> {
        let session = match deps.sessions.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable session");
                None
            }
        };

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(theme, session),
            inbox_tx,
            inbox_rx,
            deps,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        let effects = update::start(&mut self.state);
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Only Tick triggers render; other events batch until the next tick.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty && !self.state.tui.should_quit {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.tui.tasks.is_any_running() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick is due unless there is already work queued.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns an async task with a uniform `TaskStarted`/`TaskCompleted` lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            // Network effects
            UiEffect::Login {
                task,
                email,
                password,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.deps.client.clone();
                self.spawn_task(TaskKind::Login, task, move || {
                    handlers::login(client, email, password)
                });
            }
            UiEffect::FetchPage { task, page } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.deps.client.clone();
                self.spawn_task(TaskKind::FetchPage, task, move || {
                    handlers::fetch_page(client, page)
                });
            }
            UiEffect::UpdateUser { task, id, update } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.deps.client.clone();
                self.spawn_task(TaskKind::UpdateUser, task, move || {
                    handlers::update_user(client, id, update)
                });
            }
            UiEffect::DeleteUser { task, id } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.deps.client.clone();
                self.spawn_task(TaskKind::DeleteUser, task, move || {
                    handlers::delete_user(client, id)
                });
            }

            // Local storage effects
            UiEffect::PersistSession { session } => {
                if let Err(e) = self.deps.sessions.save(&session) {
                    tracing::warn!(error = %format!("{e:#}"), "failed to store session");
                }
            }
            UiEffect::ClearSession => {
                if let Err(e) = self.deps.sessions.clear() {
                    tracing::warn!(error = %format!("{e:#}"), "failed to clear session");
                }
            }
            UiEffect::LoadMirror => {
                let mirrored = self.deps.mirror.read_page();
                self.dispatch_event(UiEvent::Directory(DirectoryUiEvent::MirrorLoaded(mirrored)));
            }
            UiEffect::MirrorPage { page } => {
                self.deps.mirror.write_page(&page);
            }
            UiEffect::PersistTheme { theme } => {
                if let Err(e) = Config::save_theme_to(&self.deps.config_path, theme) {
                    tracing::warn!(error = %format!("{e:#}"), "failed to save theme");
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
