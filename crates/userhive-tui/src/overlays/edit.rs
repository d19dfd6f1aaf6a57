//! Edit overlay: a scratch draft of one user.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use userhive_core::models::{User, UserUpdate};

use super::OverlayUpdate;
use super::render_utils::{
    InputHint, InputLine, OverlayConfig, render_input_line, render_overlay, render_separator,
};
use crate::effects::UiEffect;
use crate::theme::Palette;

pub const NAMES_REQUIRED: &str = "First and last name are required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    FirstName,
    LastName,
    Email,
}

impl EditField {
    fn next(self) -> Self {
        match self {
            EditField::FirstName => EditField::LastName,
            EditField::LastName => EditField::Email,
            EditField::Email => EditField::FirstName,
        }
    }

    fn previous(self) -> Self {
        match self {
            EditField::FirstName => EditField::Email,
            EditField::LastName => EditField::FirstName,
            EditField::Email => EditField::LastName,
        }
    }
}

/// State for the edit overlay.
#[derive(Debug, Clone)]
pub struct EditUserState {
    /// Id of the resident user being edited.
    pub user_id: u64,
    /// Initials shown in the header, taken from the record at open time.
    pub initials: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub focus: EditField,
    /// An update request is in flight. Every key is ignored until it resolves.
    pub saving: bool,
    pub error: Option<String>,
}

impl EditUserState {
    pub fn open(user: &User) -> Self {
        Self {
            user_id: user.id,
            initials: user.initials(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone().unwrap_or_default(),
            focus: EditField::default(),
            saving: false,
            error: None,
        }
    }

    /// Returns the draft as an update body. A blank email is sent as absent.
    pub fn draft(&self) -> UserUpdate {
        let email = self.email.trim();
        UserUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
        }
    }

    /// Records a failed update; the dialog stays open for another attempt.
    pub fn fail(&mut self, error: String) {
        self.saving = false;
        self.error = Some(error);
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            EditField::FirstName => &mut self.first_name,
            EditField::LastName => &mut self.last_name,
            EditField::Email => &mut self.email,
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.saving {
            return;
        }
        let line = text.lines().next().unwrap_or_default();
        self.focused_mut().push_str(line);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if self.saving {
            return OverlayUpdate::stay();
        }
        if key.code == KeyCode::Esc {
            return OverlayUpdate::close();
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Enter => return self.submit(),
            KeyCode::Backspace => {
                self.focused_mut().pop();
                self.error = None;
            }
            KeyCode::Char('u') if ctrl => self.focused_mut().clear(),
            KeyCode::Char(c) if !ctrl => {
                self.focused_mut().push(c);
                self.error = None;
            }
            _ => {}
        }
        OverlayUpdate::stay()
    }

    fn submit(&mut self) -> OverlayUpdate {
        let update = self.draft();
        if update.first_name.is_empty() || update.last_name.is_empty() {
            self.error = Some(NAMES_REQUIRED.to_string());
            return OverlayUpdate::stay();
        }

        self.saving = true;
        self.error = None;
        OverlayUpdate::stay().with_ui_effects(vec![UiEffect::UpdateUser {
            task: None,
            id: self.user_id,
            update,
        }])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette, spinner: &str) {
        let hints = [
            InputHint::new("Enter", "save"),
            InputHint::new("Tab", "next field"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Edit User",
                border_color: palette.accent,
                width: 60,
                height: 11,
                hints: &hints,
            },
            palette,
        );
        let body = layout.body;
        let row = |offset: u16| Rect::new(body.x + 1, body.y + offset, body.width.saturating_sub(2), 1);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("[{}] ", self.initials), palette.accent()),
                Span::styled(format!("User #{}", self.user_id), palette.muted()),
            ])),
            row(0),
        );
        render_separator(frame, body, 1, palette);

        let fields = [
            ("First name:", &self.first_name, EditField::FirstName),
            ("Last name: ", &self.last_name, EditField::LastName),
            ("Email:     ", &self.email, EditField::Email),
        ];
        for (offset, (label, value, field)) in (2u16..).zip(fields) {
            render_input_line(
                frame,
                row(offset),
                &InputLine {
                    label,
                    value,
                    placeholder: None,
                    focused: !self.saving && self.focus == field,
                },
                palette,
            );
        }

        let status = if self.saving {
            Line::from(Span::styled(format!("{spinner} Saving..."), palette.accent()))
        } else if let Some(error) = &self.error {
            Line::from(Span::styled(error.as_str(), palette.error()))
        } else {
            Line::default()
        };
        frame.render_widget(Paragraph::new(status), row(6));
    }
}
