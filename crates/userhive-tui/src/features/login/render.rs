//! Login view rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{LoginField, LoginState};
use crate::common::mask;
use crate::overlays::render_utils::{
    InputHint, InputLine, calculate_overlay_area, render_hints, render_input_line,
};
use crate::theme::Palette;

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 13;

pub fn render_login(
    frame: &mut Frame,
    area: Rect,
    login: &LoginState,
    palette: &Palette,
    spinner: &str,
) {
    let card = calculate_overlay_area(area, CARD_WIDTH, CARD_HEIGHT);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(" UserHive ", palette.title()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    if inner.height < 9 {
        return;
    }

    let row = |offset: u16| Rect::new(inner.x + 1, inner.y + offset, inner.width.saturating_sub(2), 1);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled("Welcome back", palette.title())))
            .alignment(Alignment::Center),
        row(1),
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Sign in to manage your users",
            palette.muted(),
        )))
        .alignment(Alignment::Center),
        row(2),
    );

    let editable = !login.is_submitting();
    render_input_line(
        frame,
        row(4),
        &InputLine {
            label: "Email:   ",
            value: &login.email,
            placeholder: Some("name@example.com"),
            focused: editable && login.focus == LoginField::Email,
        },
        palette,
    );
    let masked = mask(&login.password);
    render_input_line(
        frame,
        row(5),
        &InputLine {
            label: "Password:",
            value: &masked,
            placeholder: Some("••••••••"),
            focused: editable && login.focus == LoginField::Password,
        },
        palette,
    );

    let status = if login.is_submitting() {
        Line::from(Span::styled(format!("{spinner} Signing in..."), palette.accent()))
    } else if let Some(error) = &login.error {
        Line::from(Span::styled(error.as_str(), palette.error()))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), row(7));

    let hints = [
        InputHint::new("Enter", "sign in"),
        InputHint::new("Tab", "switch field"),
        InputHint::new("Ctrl+C", "quit"),
    ];
    render_hints(frame, inner, &hints, palette);
}
