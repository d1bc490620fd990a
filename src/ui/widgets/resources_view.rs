// src/ui/widgets/resources_view.rs

use crate::app::App;
use crate::core::browser::BrowserFocus;
use crate::core::filter::CategorySelection;
use crate::ui::widgets::{info_panel, input};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
};
use rust_i18n::t;

/// Renders the resources page: search bar, info panel, category grid,
/// featured documents and the recently added table.
pub fn render_resources_view(frame: &mut Frame, app: &App, area: Rect) {
    let error_height = if app.viewer.last_error().is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Search & category
            Constraint::Length(error_height), // Load error banner
            Constraint::Length(9),            // Info & categories
            Constraint::Min(6),               // Featured documents
            Constraint::Length(9),            // Recently added
        ])
        .split(area);

    input::render_input(frame, app, chunks[0]);
    render_load_error(frame, app, chunks[1]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    info_panel::render_resources_info(frame, &app.site().resources, top[0]);
    render_categories(frame, app, top[1]);

    render_featured(frame, app, chunks[3]);
    render_recent(frame, app, chunks[4]);
}

fn focus_style(focused: bool) -> Style {
    if focused { Style::default().fg(Color::Cyan) } else { Style::default().fg(Color::DarkGray) }
}

fn render_load_error(frame: &mut Frame, app: &App, area: Rect) {
    let Some(failure) = app.viewer.last_error() else {
        return;
    };
    let text = Line::from(vec![
        Span::styled(format!("✗ {}: ", t!("resources.load_error")), Style::default().fg(Color::Red).bold()),
        Span::raw(format!("{} ({})", failure.locator, failure.message)),
    ]);
    let banner = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
    frame.render_widget(banner, area);
}

fn render_categories(frame: &mut Frame, app: &App, area: Rect) {
    let catalog = app.browser.catalog();
    let items: Vec<ListItem> = catalog
        .categories
        .iter()
        .map(|c| {
            let selected = matches!(app.browser.selection(), CategorySelection::Category(name) if *name == c.name);
            let name_style = if selected {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Cyan)
            };
            ListItem::new(Line::from(vec![
                Span::styled(c.name.clone(), name_style),
                Span::styled(
                    format!("  {}", t!("resources.documents_count", count = c.document_count)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", t!("resources.categories"))));
    frame.render_widget(list, area);
}

fn render_featured(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.browser.focus() == BrowserFocus::Featured;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(format!(" {} ", t!("resources.featured")));

    let documents = app.browser.filtered_documents();
    if documents.is_empty() {
        let empty = Paragraph::new(t!("resources.no_results").to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = documents
        .iter()
        .map(|doc| {
            ListItem::new(vec![
                Line::from(Span::styled(doc.title.clone(), Style::default().bold())),
                Line::from(Span::styled(doc.description.clone(), Style::default().fg(Color::Gray))),
                Line::from(vec![
                    Span::styled(format!("[{}]", doc.category), Style::default().fg(Color::Cyan)),
                    Span::raw(format!(
                        "  {}  ·  {}  ·  {}",
                        t!("resources.pages", count = doc.page_count),
                        doc.size_label,
                        t!("resources.downloads", count = doc.download_count),
                    )),
                ]),
            ])
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.browser.cursor()));
    }
    let list = List::new(items)
        .block(block)
        .highlight_symbol("▶ ")
        .highlight_style(Style::new().bg(Color::DarkGray));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_recent(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.browser.focus() == BrowserFocus::Recent;
    let header = Row::new(vec![
        Cell::from(t!("resources.col_document").to_string()),
        Cell::from(t!("resources.col_category").to_string()),
        Cell::from(t!("resources.col_date").to_string()),
        Cell::from(t!("resources.col_size").to_string()),
    ])
    .style(Style::default().fg(Color::Cyan).bold());

    let rows: Vec<Row> = app
        .browser
        .filtered_recent()
        .iter()
        .map(|doc| {
            Row::new(vec![
                Cell::from(doc.title.clone()),
                Cell::from(doc.category.clone()),
                Cell::from(doc.published.clone()),
                Cell::from(doc.size_label.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(50),
        Constraint::Percentage(22),
        Constraint::Percentage(16),
        Constraint::Percentage(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(focused))
                .title(format!(" {} ", t!("resources.recent"))),
        )
        .highlight_symbol("▶ ")
        .row_highlight_style(Style::new().bg(Color::DarkGray));

    let mut state = TableState::default();
    if focused {
        state.select(Some(app.browser.cursor()));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
