// src/ui/widgets/archive_view.rs

use crate::app::App;
use crate::core::archive::ArchiveRow;
use crate::core::models::{AboutInfo, Severity, VulnerabilityRecord};
use crate::ui::widgets::info_panel;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use rust_i18n::t;

/// Badge colors of the bulletin: critical red, high yellow, medium blue, low green.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::High => Color::Yellow,
        Severity::Medium => Color::Blue,
        Severity::Low => Color::Green,
    }
}

fn severity_badge(severity: Severity) -> Span<'static> {
    Span::styled(
        format!(" {} ", t!(severity.label_key())),
        Style::default().fg(Color::Black).bg(severity_color(severity)).bold(),
    )
}

fn row_line(row: &ArchiveRow) -> Line<'static> {
    let chevron = |expanded: bool| if expanded { "▼ " } else { "▶ " };
    match row {
        ArchiveRow::Year { year, expanded, records } => Line::from(vec![
            Span::styled(chevron(*expanded), Style::default().fg(Color::Cyan)),
            Span::styled(year.to_string(), Style::default().fg(Color::Cyan).bold()),
            Span::styled(format!("  ({records})"), Style::default().fg(Color::DarkGray)),
        ]),
        ArchiveRow::Month { month, expanded, records, .. } => Line::from(vec![
            Span::raw("  "),
            Span::styled(chevron(*expanded), Style::default().fg(Color::Cyan)),
            Span::styled(month.to_string(), Style::default().bold()),
            Span::styled(
                format!("  {}", t!("archive.count", count = records)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        ArchiveRow::Record { record, .. } => Line::from(vec![
            Span::raw("      "),
            severity_badge(record.severity),
            Span::raw(" "),
            Span::raw(record.title.clone()),
        ]),
    }
}

/// Renders the bulletin page: info panel on top, tree and detail pane below.
pub fn render_archive_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(area);
    info_panel::render_archive_info(frame, &app.site().archive, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[1]);

    let items: Vec<ListItem> = app.archive.visible_rows().iter().map(|row| ListItem::new(row_line(row))).collect();
    let mut state = ListState::default().with_selected(Some(app.archive.cursor()));
    let tree = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", t!("archive.recent"))))
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(tree, body[0], &mut state);

    render_details(frame, app.archive.selected_record(), &app.site().archive.about, body[1]);
}

/// Shown in the detail pane while no record is selected.
fn about_lines(about: &AboutInfo) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(t!("archive.about").to_string().bold().cyan()).centered(),
        Line::from(""),
        Line::from(about.summary.clone()),
    ];
    for feature in &about.features {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled("■ ", Style::default().fg(Color::Cyan)), feature.title.clone().bold()]));
        lines.push(Line::from(Span::styled(feature.description.clone(), Style::default().fg(Color::Gray))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(t!("archive.select_hint").to_string().dark_gray()).centered());
    lines
}

fn render_details(frame: &mut Frame, record: Option<&VulnerabilityRecord>, about: &AboutInfo, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", t!("archive.details")));
    let Some(record) = record else {
        let p = Paragraph::new(about_lines(about)).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(p, area);
        return;
    };

    let text = vec![
        Line::from(record.title.clone().bold()),
        Line::from(""),
        Line::from(vec![severity_badge(record.severity), Span::raw(format!("  {}", record.published))]),
        Line::from(Span::styled(record.id.to_uppercase(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(record.description.clone()),
    ];
    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(p, area);
}
