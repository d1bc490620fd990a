// src/ui/widgets/viewer_popup.rs

use crate::app::App;
use crate::core::viewer::ViewerPhase;
use crate::ui::layout::centered_rect;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use rust_i18n::t;

/// Renders the document viewer on top of the resources page.
///
/// `Clear` wipes the popup area first so the page underneath does not bleed
/// through. Only the page the viewer state points at is requested from the
/// loaded document, and that page is always within `[1, total]`.
pub fn render_viewer_popup(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect(80, 85, area);
    let heading = app.viewer_heading().unwrap_or_default();

    let block = Block::default()
        .title(format!(" {} · {} ", t!("viewer.title"), heading))
        .title_bottom(pager(app))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let content = match app.viewer.phase() {
        ViewerPhase::Loading { .. } => Paragraph::new(Line::from(vec![
            Span::styled("⟳ ", Style::default().fg(Color::Cyan)),
            Span::raw(t!("viewer.loading").to_string()),
        ]))
        .alignment(Alignment::Center),
        ViewerPhase::Ready { .. } => {
            let lines: Vec<Line> = app.current_page_lines().unwrap_or_default().into_iter().map(Line::from).collect();
            let centered = app.document.as_ref().is_some_and(|d| d.is_pdf());
            Paragraph::new(lines).alignment(if centered { Alignment::Center } else { Alignment::Left })
        }
        ViewerPhase::Closed => Paragraph::new(""),
    };

    frame.render_widget(Clear, popup_area);
    frame.render_widget(content.block(block), popup_area);
}

/// `← 2 / 10 →  ✕ Cerrar`, with the arrows dimmed at the bounds.
fn pager(app: &App) -> Line<'static> {
    let arrow = |enabled: bool, symbol: &'static str| {
        Span::styled(symbol, if enabled { Style::new().bold().fg(Color::Yellow) } else { Style::new().fg(Color::DarkGray) })
    };
    Line::from(vec![
        Span::raw(" "),
        arrow(app.viewer.can_go_previous(), "←"),
        Span::raw(format!(" {} / {} ", app.viewer.current_page(), app.viewer.total_pages())),
        arrow(app.viewer.can_go_next(), "→"),
        Span::raw("   "),
        Span::styled(t!("viewer.close").to_string(), Style::default().fg(Color::Gray)),
        Span::raw(" "),
    ])
    .centered()
}
