pub mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    // Input grows with its text, up to a third of the screen
    let available_width = frame.area().width.saturating_sub(widgets::BUTTON_WIDTH + 2) as usize;
    let input_lines = if app.feedback.is_empty() || available_width == 0 {
        1
    } else {
        app.feedback.chars().count().div_ceil(available_width)
    };
    let max_lines = (frame.area().height as usize / 3).saturating_sub(2).max(1);
    #[allow(clippy::cast_possible_truncation)]
    let input_height = (input_lines.clamp(1, max_lines) + 2) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),               // story-output
            Constraint::Length(1),            // Status line
            Constraint::Length(input_height), // feedback + get-feedback
            Constraint::Length(1),            // Keymap bar
        ])
        .split(frame.area());

    widgets::render_story_output(frame, app, chunks[0]);
    widgets::render_status_bar(frame, app, chunks[1]);
    widgets::render_input_row(frame, app, chunks[2]);
    widgets::render_bottom_bar(frame, app, chunks[3]);

    if app.show_help {
        widgets::render_help_window(frame, frame.area());
    }
}
