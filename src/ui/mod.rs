// src/ui/mod.rs

use crate::app::{App, Screen};
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area(), app.show_logs);

    widgets::tabs::render_tabs(frame, app, layout.tabs);

    match app.screen {
        Screen::Resources => widgets::resources_view::render_resources_view(frame, app, layout.body),
        Screen::Vulnerabilities => widgets::archive_view::render_archive_view(frame, app, layout.body),
    }

    if app.show_logs {
        widgets::log_view::render_log_view(frame, app, layout.log_panel);
    }
    widgets::footer::render_footer(frame, app, layout.footer);

    // Overlays go last so they sit on top of everything else.
    if app.viewer.is_open() {
        widgets::viewer_popup::render_viewer_popup(frame, app, frame.area());
    }
    if app.show_rules {
        widgets::rules_popup::render_rules_popup(frame, app.site(), frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DocumentLoaded;
    use crate::core::catalog::{BundledCatalog, CatalogSource};
    use ratatui::backend::TestBackend;

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 60)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn app() -> App {
        rust_i18n::set_locale("es");
        App::new(BundledCatalog.load().unwrap())
    }

    #[test]
    fn resources_screen_lists_catalog() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains("recursos-info.sh"));
        assert!(screen.contains("Herramientas"));
        assert!(screen.contains("Metodología OSSTMM"));
        assert!(screen.contains("Mayo 2023"));
    }

    #[test]
    fn empty_filter_shows_no_results_message() {
        let mut app = app();
        for c in "kerberos".chars() {
            app.browser.push_search(c);
        }
        let screen = draw(&mut app);
        assert!(screen.contains("No se encontraron documentos"));
    }

    #[test]
    fn archive_screen_shows_expanded_records() {
        let mut app = app();
        app.switch_screen();
        app.archive.toggle_year(2024);
        app.archive.toggle_month(2024, "Diciembre");
        let screen = draw(&mut app);
        assert!(screen.contains("vulnerabilidades-info.sh"));
        assert!(screen.contains("Diciembre"));
        assert!(screen.contains("Buffer Overflow en OpenSSL"));
        assert!(!screen.contains("Path Traversal en Nginx"));
        // Cursor is on a year row, so the detail pane shows the repository blurb.
        assert!(screen.contains("Sobre este repositorio"));
        assert!(screen.contains("Pruebas de Concepto"));
    }

    #[test]
    fn viewer_overlay_shows_loading_then_error_banner() {
        let mut app = app();
        let (ticket, _) = app.open_selected().unwrap();
        assert!(draw(&mut app).contains("Cargando documento"));

        app.on_document_loaded(DocumentLoaded { ticket, result: Err("no such file".into()) });
        let screen = draw(&mut app);
        assert!(screen.contains("Error al cargar el documento"));
        assert!(screen.contains("no such file"));
    }

    #[test]
    fn rules_popup_and_log_panel_render() {
        let mut app = app();
        app.toggle_rules();
        app.show_logs = true;
        let screen = draw(&mut app);
        assert!(screen.contains("Normas de publicación"));
        assert!(screen.contains("Advertencias importantes"));
    }
}
