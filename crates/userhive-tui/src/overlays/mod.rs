//! Overlay modules for the TUI.
//!
//! Overlays are modal dialogs drawn on top of the directory that take over
//! keyboard input while open. Each overlay owns its state, key handler, and
//! render function.
//!
//! - `edit.rs`: edit a user's name and email
//! - `delete.rs`: confirm deletion of a user
//! - `render_utils.rs`: shared rendering helpers

pub mod delete;
pub mod edit;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use delete::ConfirmDeleteState;
pub use edit::EditUserState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::theme::Palette;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    EditUser(EditUserState),
    ConfirmDelete(ConfirmDeleteState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette, spinner: &str) {
        match self {
            Overlay::EditUser(e) => e.render(frame, area, palette, spinner),
            Overlay::ConfirmDelete(d) => d.render(frame, area, palette, spinner),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::EditUser(e) => e.handle_key(key),
            Overlay::ConfirmDelete(d) => d.handle_key(key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Overlay::EditUser(e) = self {
            e.handle_paste(text);
        }
    }

    /// Id of the user this overlay acts on.
    pub fn user_id(&self) -> u64 {
        match self {
            Overlay::EditUser(e) => e.user_id,
            Overlay::ConfirmDelete(d) => d.user_id,
        }
    }

    pub fn as_edit_mut(&mut self) -> Option<&mut EditUserState> {
        match self {
            Overlay::EditUser(e) => Some(e),
            Overlay::ConfirmDelete(_) => None,
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette, spinner: &str);

    /// Closes the overlay if it targets `id`.
    fn close_if_targets(&mut self, id: u64);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette, spinner: &str) {
        if let Some(overlay) = self {
            overlay.render(frame, area, palette, spinner);
        }
    }

    fn close_if_targets(&mut self, id: u64) {
        if self.as_ref().is_some_and(|overlay| overlay.user_id() == id) {
            *self = None;
        }
    }
}

/// Routes a key to the active overlay and applies its transition.
///
/// Returns `None` when no overlay is open so the caller can fall through to
/// the screen's own key handling.
pub fn handle_overlay_key(overlay: &mut Option<Overlay>, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let active = overlay.as_mut()?;
    let update = active.handle_key(key);
    if matches!(update.transition, OverlayTransition::Close) {
        *overlay = None;
    }
    Some(update.effects)
}
