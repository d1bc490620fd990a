// src/ui/widgets/rules_popup.rs

use crate::core::models::SiteInfo;
use crate::ui::layout::centered_rect;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use rust_i18n::t;

/// Renders the publication rules and important warnings on top of the UI.
pub fn render_rules_popup(frame: &mut Frame, site: &SiteInfo, area: Rect) {
    let mut lines = vec![Line::from(t!("rules.title").to_string().bold().cyan()), Line::from("")];
    lines.extend(
        site.publication_rules
            .iter()
            .map(|rule| Line::from(vec![Span::styled("✓ ", Style::default().fg(Color::Green)), Span::raw(rule.clone())])),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(t!("rules.warnings").to_string().bold().yellow()));
    lines.push(Line::from(""));
    lines.extend(
        site.warnings
            .iter()
            .map(|warning| Line::from(vec![Span::styled("✗ ", Style::default().fg(Color::Red)), Span::raw(warning.clone())])),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(t!("rules.dismiss").to_string().dark_gray()).centered());

    let block = Block::default()
        .title(format!(" {} ", t!("rules.popup")))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let popup_area = centered_rect(70, 80, area);
    let popup = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
