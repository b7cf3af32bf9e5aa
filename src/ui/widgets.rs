use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};

pub const BUTTON_WIDTH: u16 = 16;

const FOCUS_COLOR: Color = Color::Cyan;
const IDLE_COLOR: Color = Color::DarkGray;

const fn border_color(focused: bool) -> Color {
    if focused {
        FOCUS_COLOR
    } else {
        IDLE_COLOR
    }
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "Feedstream - Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("General:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Ctrl+H        - Show/hide this help"),
        Line::from("  Ctrl+Q        - Quit application"),
        Line::from("  Ctrl+C (x2)   - Quit application"),
        Line::from(""),
        Line::from(Span::styled("Feedback:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Enter         - Get AI response"),
        Line::from("  Tab           - Switch field / button"),
        Line::from("  Space         - Press focused button"),
        Line::from(""),
        Line::from(Span::styled("Output:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Up/Down       - Scroll"),
        Line::from("  PgUp/PgDn     - Scroll by page"),
        Line::from("  Home/End      - Jump to start/end"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    let popup_width = 50;
    let popup_height = 20;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width.min(area.width),
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "Enter: Submit | Tab: Switch Focus | Ctrl+H: Help | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style);

    frame.render_widget(bar, area);
}

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (indicator, color) = if app.is_streaming {
        (" [Streaming...]", Color::Yellow)
    } else {
        ("", Color::Green)
    };

    let status = Paragraph::new(format!("{}{indicator}", app.endpoint_url))
        .alignment(Alignment::Right)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    frame.render_widget(status, area);
}

pub fn render_story_output(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" story-output ")
        .border_style(Style::default().fg(Color::Green));

    if app.story_output.is_empty() && !app.is_streaming {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Type customer feedback below and press Enter",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    // Measure with the same word wrapping the pane renders with, minus borders
    let inner_width = area.width.saturating_sub(2).max(1);
    let total_visual_lines = Paragraph::new(app.story_output.as_str())
        .wrap(Wrap { trim: false })
        .line_count(inner_width);

    let visible_height = area.height.saturating_sub(2) as usize;
    let max_scroll = total_visual_lines.saturating_sub(visible_height);
    let actual_scroll = app.scroll_offset.min(max_scroll);

    if app.scroll_offset != actual_scroll {
        app.scroll_offset = actual_scroll;
    }

    let story = Paragraph::new(app.story_output.as_str())
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(actual_scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(story, area);
}

/// The `feedback` input field with the `get-feedback` button to its right.
pub fn render_input_row(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(BUTTON_WIDTH)])
        .split(area);

    let field_focused = app.focus == Focus::Feedback;

    let (input_text, input_style) = if app.feedback.is_empty() {
        ("Type the customer's feedback...", Style::default().fg(Color::Gray))
    } else {
        (
            app.feedback.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };

    let input = Paragraph::new(input_text)
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" feedback ")
                .border_style(Style::default().fg(border_color(field_focused))),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(input, columns[0]);

    let button_style = if field_focused {
        Style::default().fg(Color::White)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(FOCUS_COLOR)
            .add_modifier(Modifier::BOLD)
    };

    let button = Paragraph::new("Get Feedback")
        .alignment(Alignment::Center)
        .style(button_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color(!field_focused))),
        );

    frame.render_widget(button, columns[1]);
}
