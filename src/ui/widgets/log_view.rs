// src/ui/widgets/log_view.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation},
};
use rust_i18n::t;

/// Splits a log line into its timestamp and the rest.
///
/// Lines are written as `TIMESTAMP LEVEL MESSAGE` with an RFC 3339 timestamp;
/// anything else is rendered unstyled.
fn styled_line(line: &str) -> Line<'static> {
    match line.split_once(' ') {
        Some((timestamp, rest)) if timestamp.contains('T') => {
            let level_style = if rest.trim_start().starts_with("ERROR") {
                Style::default().fg(Color::Red)
            } else if rest.trim_start().starts_with("WARN") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(timestamp.to_string(), Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {rest}"), level_style),
            ])
        }
        _ => Line::from(line.to_string()),
    }
}

/// Renders the log view panel.
///
/// Shows the most recent lines of the log file with a horizontal scrollbar
/// for lines wider than the panel.
pub fn render_log_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(format!(" {} [ ] ", t!("logs.title")))
        .borders(Borders::ALL);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    app.log_horizontal_scroll_state = app.log_horizontal_scroll_state.content_length(app.log_width());

    // Keep the newest lines in view.
    let height = inner_area.height.saturating_sub(1) as usize;
    let start = app.log_content.len().saturating_sub(height);
    let log_lines: Vec<Line> = app.log_content[start..].iter().map(|l| styled_line(l)).collect();

    let log_paragraph = Paragraph::new(log_lines).scroll((0, u16::try_from(app.log_horizontal_scroll).unwrap_or(u16::MAX)));
    frame.render_widget(log_paragraph, inner_area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::HorizontalBottom).thumb_symbol("■");
    let scrollbar_area = Rect {
        x: inner_area.x,
        y: inner_area.y + inner_area.height.saturating_sub(1),
        width: inner_area.width,
        height: 1,
    };
    frame.render_stateful_widget(scrollbar, scrollbar_area, &mut app.log_horizontal_scroll_state);
}
