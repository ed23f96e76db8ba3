mod footer;
mod log;
mod page;
mod panel;

use super::Frame;
use crate::navigation::TitleBar;
use crate::state::State;
use ratatui::layout::{Constraint, Direction, Layout};

const TITLE_HEIGHT: u16 = 3;
const LOG_WIDTH_PERCENT: u16 = 35;

/// Render the page and, on top of it, the panel currently on screen.
///
pub fn render(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let title_height = match state.panel().title_bar() {
        TitleBar::Shown => TITLE_HEIGHT,
        TitleBar::Hidden => 0,
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(title_height),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100 - LOG_WIDTH_PERCENT),
            Constraint::Percentage(LOG_WIDTH_PERCENT),
        ])
        .split(rows[1]);

    if title_height > 0 {
        page::title(frame, rows[0], state);
    }
    page::body(frame, columns[0], state);
    log::log(frame, columns[1], state);
    footer::notices(frame, rows[2], state);
    footer::footer(frame, rows[3], state);

    if let Some(on_screen) = state.on_screen() {
        panel::panel(frame, size, on_screen, state);
    }
}
