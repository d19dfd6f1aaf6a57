//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;

use crate::features::directory::render_directory;
use crate::features::login::render_login;
use crate::overlays::OverlayExt;
use crate::state::{AppState, Screen};

/// Spinner frames for in-flight requests.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 6;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let palette = app.tui.palette();
    let spinner = spinner_frame(app.tui.spinner_frame);

    match &app.tui.screen {
        Screen::Login(login) => render_login(frame, area, login, &palette, spinner),
        Screen::Directory(dir) => render_directory(frame, area, dir, &palette, spinner),
    }

    app.overlay.render(frame, area, &palette, spinner);
}

fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[(tick / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use userhive_core::config::Theme;
    use userhive_core::models::{Page, User};
    use userhive_core::session::Session;

    use super::*;
    use crate::events::{DirectoryUiEvent, UiEvent};
    use crate::update;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(0), SPINNER_FRAMES[0]);
        assert_eq!(spinner_frame(SPINNER_SPEED_DIVISOR), SPINNER_FRAMES[1]);
        assert_eq!(
            spinner_frame(SPINNER_SPEED_DIVISOR * SPINNER_FRAMES.len()),
            SPINNER_FRAMES[0]
        );
    }

    #[test]
    fn test_login_screen_renders() {
        let app = AppState::new(Theme::Styled, None);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal.draw(|frame| render(&app, frame)).expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("UserHive"));
        assert!(text.contains("Email"));
    }

    #[test]
    fn test_directory_renders_users_and_pagination() {
        let mut app = AppState::new(Theme::Plain, Some(Session::new("token")));
        update::start(&mut app);
        let mirrored = Page {
            items: vec![User {
                id: 1,
                first_name: "George".to_string(),
                last_name: "Bluth".to_string(),
                email: Some("george.bluth@reqres.in".to_string()),
                avatar: None,
            }],
            page: 1,
            total_pages: 2,
        };
        update::update(
            &mut app,
            UiEvent::Directory(DirectoryUiEvent::MirrorLoaded(Some(mirrored))),
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).expect("terminal");
        terminal.draw(|frame| render(&app, frame)).expect("draw");

        let text = buffer_text(&terminal);
        assert!(text.contains("George Bluth"));
        assert!(text.contains("Page 1 of 2"));
    }
}
