//! Delete confirmation overlay.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use userhive_core::models::User;

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use crate::effects::UiEffect;
use crate::theme::Palette;

/// State for the delete confirmation overlay.
#[derive(Debug, Clone)]
pub struct ConfirmDeleteState {
    pub user_id: u64,
    pub full_name: String,
    /// A delete request is in flight.
    pub deleting: bool,
}

impl ConfirmDeleteState {
    pub fn open(user: &User) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name(),
            deleting: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        if self.deleting {
            return OverlayUpdate::stay();
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('n' | 'N') => OverlayUpdate::close(),
            KeyCode::Enter | KeyCode::Char('y' | 'Y') => {
                self.deleting = true;
                OverlayUpdate::stay().with_ui_effects(vec![UiEffect::DeleteUser {
                    task: None,
                    id: self.user_id,
                }])
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette, spinner: &str) {
        let hints = [InputHint::new("y", "delete"), InputHint::new("n", "cancel")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Delete User",
                border_color: palette.error,
                width: 52,
                height: 7,
                hints: &hints,
            },
            palette,
        );

        let lines = if self.deleting {
            vec![Line::from(Span::styled(format!("{spinner} Deleting..."), palette.accent()))]
        } else {
            vec![
                Line::from(vec![
                    Span::styled("Delete ", palette.text()),
                    Span::styled(self.full_name.clone(), palette.title()),
                    Span::styled("?", palette.text()),
                ]),
                Line::from(Span::styled("This action cannot be undone.", palette.muted())),
            ]
        };
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), layout.body);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyModifiers};

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn emma() -> User {
        User {
            id: 3,
            first_name: "Emma".to_string(),
            last_name: "Wong".to_string(),
            email: None,
            avatar: None,
        }
    }

    #[test]
    fn test_confirm_emits_delete_once() {
        let mut confirm = ConfirmDeleteState::open(&emma());

        let update = confirm.handle_key(key(KeyCode::Char('y')));
        assert!(matches!(update.effects.as_slice(), [UiEffect::DeleteUser { id: 3, .. }]));
        assert!(confirm.deleting);

        let again = confirm.handle_key(key(KeyCode::Enter));
        assert!(again.effects.is_empty());
    }

    #[test]
    fn test_cancel_closes() {
        let mut confirm = ConfirmDeleteState::open(&emma());
        let update = confirm.handle_key(key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Close));
        assert!(update.effects.is_empty());
    }
}
