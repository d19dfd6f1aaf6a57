//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that perform I/O and return a
//! `UiEvent`. They never touch state; the runtime spawns them and sends the
//! result to the inbox.
//!
//! ```ignore
//! // Handler: pure async, returns UiEvent
//! pub async fn fetch_page(client: DirectoryClient, page: u32) -> UiEvent { ... }
//!
//! // Runtime: spawns with the task lifecycle and sends to inbox
//! self.spawn_task(TaskKind::FetchPage, id, move || handlers::fetch_page(client, page));
//! ```

pub mod auth;
pub mod directory;

pub use auth::*;
pub use directory::*;
