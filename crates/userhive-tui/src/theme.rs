//! Color palettes for the two themes.
//!
//! Views never pick colors directly; they read them from a `Palette` so the
//! same render code serves both themes.

use ratatui::style::{Color, Modifier, Style};
use userhive_core::config::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub error: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Styled => Self {
                accent: Color::Magenta,
                text: Color::White,
                muted: Color::DarkGray,
                error: Color::Red,
                border: Color::Indexed(99),
                selection_bg: Color::Indexed(54),
                selection_fg: Color::White,
            },
            Theme::Plain => Self {
                accent: Color::Reset,
                text: Color::Reset,
                muted: Color::Reset,
                error: Color::Reset,
                border: Color::Reset,
                selection_bg: Color::Reset,
                selection_fg: Color::Reset,
            },
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn title(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    /// Errors are bold so they stay visible without color.
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Selected rows are reversed so they stay visible without color.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::REVERSED)
    }
}

/// Returns the other theme.
pub fn toggle(theme: Theme) -> Theme {
    match theme {
        Theme::Styled => Theme::Plain,
        Theme::Plain => Theme::Styled,
    }
}
