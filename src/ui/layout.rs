// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Defines the areas of the application's user interface.
///
/// This struct holds `Rect` objects, each representing a specific
/// widget area on the terminal screen, so widgets never re-calculate
/// the split themselves.
pub struct AppLayout {
    pub tabs: Rect,
    pub body: Rect,
    pub footer: Rect,
    pub log_panel: Rect,
}

/// Creates the complete application layout.
///
/// The frame is split vertically into the tab bar, the page body and a
/// one-line footer. When the log panel is visible, the body gives its right
/// third to the logs.
pub fn create_layout(frame_size: Rect, show_logs: bool) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    let content_constraints = if show_logs {
        vec![Constraint::Percentage(65), Constraint::Percentage(35)]
    } else {
        vec![Constraint::Percentage(100)]
    };

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(content_constraints)
        .split(main_chunks[1]);

    AppLayout {
        tabs: main_chunks[0],
        body: content_chunks[0],
        log_panel: if show_logs { content_chunks[1] } else { Rect::default() },
        footer: main_chunks[2],
    }
}

/// Helper function to create a centered rectangle for a popup.
///
/// # Arguments
/// * `percent_x` - The desired width of the popup as a percentage of the parent area.
/// * `percent_y` - The desired height of the popup as a percentage of the parent area.
/// * `r` - The parent `Rect` to center the new area within.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
