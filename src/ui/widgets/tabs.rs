// src/ui/widgets/tabs.rs

use crate::app::{App, Screen};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Tabs},
};
use rust_i18n::t;
use strum::IntoEnumIterator;

/// Renders the page switcher at the top of the screen.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::iter().map(|s| Line::from(t!(s.title_key()).to_string())).collect();
    let selected = Screen::iter().position(|s| s == app.screen).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(" edu-repo "))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::new().bold().fg(Color::Cyan))
        .divider(" │ ");
    frame.render_widget(tabs, area);
}
