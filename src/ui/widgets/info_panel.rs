// src/ui/widgets/info_panel.rs

use crate::core::models::{ArchiveInfo, ResourcesInfo};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use rust_i18n::t;

const ACCENT: Color = Color::Cyan;

/// The two-line shell prompt that opens each info panel.
fn prompt(host: &str, dir: &str, command: &str) -> Vec<Line<'static>> {
    let accent = Style::default().fg(ACCENT);
    let plain = Style::default().fg(Color::Gray);
    vec![
        Line::from(vec![
            Span::styled("┌──(", accent),
            Span::styled("security", plain),
            Span::styled("@", accent),
            Span::styled(host.to_string(), plain),
            Span::styled(")-[", accent),
            Span::styled(dir.to_string(), plain),
            Span::styled("]", accent),
        ]),
        Line::from(vec![Span::styled("└─$ ", accent), Span::styled(command.to_string(), plain)]),
    ]
}

fn field(label: String, value: Vec<Span<'static>>) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("{label} "), Style::default().fg(ACCENT).bold())];
    spans.extend(value);
    Line::from(spans)
}

fn chips(values: &[String]) -> Vec<Span<'static>> {
    values
        .iter()
        .flat_map(|v| {
            [
                Span::styled(format!("[{v}]"), Style::default().fg(Color::Black).bg(ACCENT)),
                Span::raw(" "),
            ]
        })
        .collect()
}

fn panel(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .title_bottom(Line::from(" ONLINE ").right_aligned().fg(Color::Green));
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Renders the `recursos-info.sh` panel of the resources page.
pub fn render_resources_info(frame: &mut Frame, info: &ResourcesInfo, area: Rect) {
    let mut lines = prompt("edu-repo", "~/recursos", &t!("resources.info.command"));
    lines.push(field(t!("resources.info.total").to_string(), vec![Span::raw(info.total_documents.clone())]));
    lines.push(field(t!("resources.info.formats").to_string(), chips(&info.formats)));
    lines.push(field(t!("resources.info.update").to_string(), vec![Span::raw(info.update_cadence.clone())]));
    lines.push(field(t!("resources.info.usage").to_string(), vec![Span::raw(info.usage.clone())]));
    lines.push(field(t!("resources.info.stats").to_string(), vec![Span::raw(info.statistics.clone())]));
    panel(frame, area, "recursos-info.sh", lines);
}

/// Renders the `vulnerabilidades-info.sh` panel of the bulletin page.
pub fn render_archive_info(frame: &mut Frame, info: &ArchiveInfo, area: Rect) {
    let mut lines = prompt("vuln-repo", "~/vulnerabilidades", &t!("archive.info.command"));
    lines.push(field(t!("archive.info.update").to_string(), vec![Span::raw(info.update_cadence.clone())]));
    lines.push(field(t!("archive.info.categories").to_string(), chips(&info.categories)));
    lines.push(field(t!("archive.info.format").to_string(), vec![Span::raw(info.format.clone())]));
    lines.push(field(t!("archive.info.access").to_string(), vec![Span::raw(info.access.clone())]));
    lines.push(field(
        t!("archive.info.status").to_string(),
        vec![Span::styled("● ", Style::default().fg(Color::Green)), Span::raw(info.status.clone())],
    ));
    lines.push(field(t!("archive.info.total").to_string(), vec![Span::raw(info.total_cves.clone())]));
    panel(frame, area, "vulnerabilidades-info.sh", lines);
}
