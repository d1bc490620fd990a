// src/ui/widgets/input.rs
use crate::app::{App, InputMode};
use crate::core::filter::CategorySelection;
use ratatui::{layout::Position, prelude::*, widgets::{Block, Borders, Paragraph}};
use rust_i18n::t;

/// Renders the search box and, next to it, the category selector.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(30)])
        .split(area);

    let searching = app.input_mode == InputMode::Search;
    let search = app.browser.search();
    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} [/] ", t!("resources.search")))
        .border_style(if searching { Style::default().fg(Color::Cyan) } else { Style::default() });
    let input_paragraph = if search.is_empty() && !searching {
        Paragraph::new(t!("resources.search_placeholder").to_string()).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(search).style(Style::default().fg(Color::Yellow))
    };
    frame.render_widget(input_paragraph.block(input_block), chunks[0]);

    let category = match app.browser.selection() {
        CategorySelection::All => t!("resources.all_categories").to_string(),
        CategorySelection::Category(name) => name.clone(),
    };
    let selector = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(category, Style::default().fg(Color::Cyan)),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(format!(" {} ", t!("resources.category"))));
    frame.render_widget(selector, chunks[1]);

    // Show the cursor only while typing.
    if searching {
        frame.set_cursor_position(Position::new(
            chunks[0].x + search.chars().count() as u16 + 1,
            chunks[0].y + 1,
        ));
    }
}
