// src/ui/widgets/footer.rs

use crate::app::{App, InputMode, Screen};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use rust_i18n::t;

fn hint(key: &'static str, label_key: &str) -> [Span<'static>; 2] {
    [
        Span::styled(format!("[{key}]"), Style::new().bold().fg(Color::Yellow)),
        Span::raw(format!(" {}  ", t!(label_key))),
    ]
}

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<[Span; 2]> = if app.show_rules {
        vec![hint("Esc", "footer.close")]
    } else if app.viewer.is_open() {
        vec![hint("←/→", "footer.page"), hint("Esc", "footer.close"), hint("Q", "footer.quit")]
    } else {
        match (app.screen, app.input_mode) {
            (Screen::Resources, InputMode::Search) => {
                vec![hint("Enter", "footer.done"), hint("Ctrl-U", "footer.clear")]
            }
            (Screen::Resources, InputMode::Normal) => {
                let mut hints = vec![
                    hint("/", "footer.search"),
                    hint("←/→", "footer.category"),
                    hint("Enter", "footer.open"),
                    hint("R", "footer.focus"),
                ];
                if app.viewer.last_error().is_some() {
                    hints.push(hint("X", "footer.dismiss"));
                }
                hints.extend([hint("Tab", "footer.switch"), hint("?", "footer.rules"), hint("Q", "footer.quit")]);
                hints
            }
            (Screen::Vulnerabilities, _) => vec![
                hint("Enter", "footer.toggle"),
                hint("E", "footer.expand_all"),
                hint("C", "footer.collapse_all"),
                hint("Tab", "footer.switch"),
                hint("?", "footer.rules"),
                hint("L", "footer.logs"),
                hint("Q", "footer.quit"),
            ],
        }
    };

    let spans: Vec<Span> = hints.into_iter().flatten().collect();
    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
