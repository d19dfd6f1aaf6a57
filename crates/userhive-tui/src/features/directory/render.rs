//! Directory view rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use userhive_core::models::User;

use super::state::DirectoryState;
use crate::common::truncate_with_ellipsis;
use crate::overlays::render_utils::{InputHint, InputLine, render_hints, render_input_line};
use crate::theme::Palette;

/// Column width for the "First Last" cell.
const NAME_WIDTH: usize = 28;

pub fn render_directory(
    frame: &mut Frame,
    area: Rect,
    dir: &DirectoryState,
    palette: &Palette,
    spinner: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(" UserHive · User Management ", palette.title()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // search
            Constraint::Length(1), // status / errors
            Constraint::Min(1),    // list
            Constraint::Length(1), // pagination
            Constraint::Length(1), // hints
        ])
        .split(inner);

    render_input_line(
        frame,
        padded(chunks[0]),
        &InputLine {
            label: "Search:",
            value: &dir.search.query,
            placeholder: Some("Search users... (/)"),
            focused: dir.search.editing,
        },
        palette,
    );

    render_status(frame, padded(chunks[1]), dir, palette, spinner);
    render_list(frame, padded(chunks[2]), dir, palette);
    render_pagination(frame, chunks[3], dir, palette);

    let hints = if dir.search.editing {
        vec![
            InputHint::new("Enter", "done"),
            InputHint::new("Esc", "clear"),
        ]
    } else {
        vec![
            InputHint::new("↑↓", "select"),
            InputHint::new("←→", "page"),
            InputHint::new("/", "search"),
            InputHint::new("e", "edit"),
            InputHint::new("d", "delete"),
            InputHint::new("r", "refresh"),
            InputHint::new("t", "theme"),
            InputHint::new("o", "logout"),
            InputHint::new("q", "quit"),
        ]
    };
    render_hints(frame, chunks[4], &hints, palette);
}

fn padded(area: Rect) -> Rect {
    Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height)
}

fn render_status(frame: &mut Frame, area: Rect, dir: &DirectoryState, palette: &Palette, spinner: &str) {
    let line = if let Some(error) = dir.action_error.as_deref().or(dir.fetch.error()) {
        Line::from(Span::styled(format!("! {error}"), palette.error()))
    } else if dir.fetch.is_loading() {
        Line::from(Span::styled(format!("{spinner} Loading users..."), palette.accent()))
    } else if dir.from_mirror {
        Line::from(Span::styled("Showing cached users", palette.muted()))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list(frame: &mut Frame, area: Rect, dir: &DirectoryState, palette: &Palette) {
    let visible = dir.visible();

    if visible.is_empty() {
        let lines = if dir.fetch.is_loading() && dir.resident.is_empty() {
            vec![Line::from(Span::styled("Loading users...", palette.muted()))]
        } else {
            vec![
                Line::from(Span::styled("No users found", palette.title())),
                Line::from(Span::styled(
                    "Try adjusting your search or go to another page",
                    palette.muted(),
                )),
            ]
        };
        let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
        let centered = Rect::new(area.x, top, area.width, area.height.min(lines.len() as u16));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
        return;
    }

    let email_width = (area.width as usize).saturating_sub(NAME_WIDTH + 8);
    let items: Vec<ListItem> = visible
        .iter()
        .map(|user| ListItem::new(user_line(user, email_width, palette)))
        .collect();

    let list = List::new(items).highlight_style(palette.selected());
    let mut list_state = ListState::default().with_selected(Some(dir.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn user_line(user: &User, email_width: usize, palette: &Palette) -> Line<'static> {
    let name = truncate_with_ellipsis(&user.full_name(), NAME_WIDTH);
    let email = user
        .email
        .as_deref()
        .map(|email| truncate_with_ellipsis(email, email_width))
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(format!(" {:<3} ", user.initials()), palette.accent()),
        Span::styled(format!("{name:<NAME_WIDTH$} "), palette.text()),
        Span::styled(email, palette.muted()),
    ])
}

fn render_pagination(frame: &mut Frame, area: Rect, dir: &DirectoryState, palette: &Palette) {
    let pagination = dir.resident.pagination();
    let side = |enabled: bool, label: &'static str| {
        if enabled {
            Span::styled(label, palette.accent())
        } else {
            Span::styled(label, palette.muted())
        }
    };

    let line = Line::from(vec![
        side(pagination.has_previous(), "← Previous"),
        Span::styled(
            format!("   Page {} of {}   ", pagination.page(), pagination.total_pages()),
            palette.text(),
        ),
        side(pagination.has_next(), "Next →"),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
