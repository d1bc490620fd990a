// src/app.rs

use crate::core::archive::VulnerabilityArchive;
use crate::core::browser::ResourceBrowser;
use crate::core::document::{LoadedDocument, RenderError};
use crate::core::models::{Catalog, SiteInfo};
use crate::core::viewer::{LoadTicket, ViewerPhase, ViewerState};
use crate::logging;
use ratatui::widgets::ScrollbarState;
use std::sync::Arc;
use strum::{Display, EnumIter};
use tokio::task::JoinError;
use tracing::{debug, error, info};

/// Lines of the log file kept for the log panel.
const LOG_TAIL_LINES: usize = 200;
const LOG_SCROLL_STEP: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Screen {
    Resources,
    Vulnerabilities,
}

impl Screen {
    pub fn title_key(&self) -> &'static str {
        match self {
            Screen::Resources => "tabs.resources",
            Screen::Vulnerabilities => "tabs.vulnerabilities",
        }
    }
}

/// Whether keystrokes on the resources screen edit the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Result of a background document load, delivered back to the event loop.
#[derive(Debug)]
pub struct DocumentLoaded {
    pub ticket: LoadTicket,
    pub result: Result<LoadedDocument, String>,
}

impl DocumentLoaded {
    /// Builds the completion from a finished blocking load task.
    pub fn from_join(ticket: LoadTicket, joined: Result<Result<LoadedDocument, RenderError>, JoinError>) -> Self {
        let result = match joined {
            Ok(loaded) => loaded.map_err(|e| e.to_string()),
            Err(e) => {
                error!(error = %e, "Document load task failed.");
                Err(format!("Task panicked: {e}"))
            }
        };
        Self { ticket, result }
    }
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub browser: ResourceBrowser,
    pub archive: VulnerabilityArchive,
    pub viewer: ViewerState,
    pub document: Option<LoadedDocument>,
    pub show_rules: bool,
    pub show_logs: bool,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
    catalog: Arc<Catalog>,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            should_quit: false,
            screen: Screen::Resources,
            input_mode: InputMode::Normal,
            browser: ResourceBrowser::new(Arc::clone(&catalog)),
            archive: VulnerabilityArchive::new(Arc::new(catalog.vulnerabilities.clone())),
            viewer: ViewerState::new(),
            document: None,
            show_rules: false,
            show_logs: false,
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
            catalog,
        }
    }

    pub fn site(&self) -> &SiteInfo {
        &self.catalog.site
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn switch_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Resources => Screen::Vulnerabilities,
            Screen::Vulnerabilities => Screen::Resources,
        };
        self.input_mode = InputMode::Normal;
        info!(screen = %self.screen, "Switched screen.");
    }

    pub fn toggle_rules(&mut self) {
        self.show_rules = !self.show_rules;
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if self.show_logs {
            self.refresh_logs();
        }
    }

    /// Opens the viewer on the entry under the cursor.
    ///
    /// Returns the ticket and locator the caller must load.
    pub fn open_selected(&mut self) -> Option<(LoadTicket, String)> {
        let locator = self.browser.selected_locator()?.to_string();
        Some(self.open_document(locator))
    }

    pub fn open_document(&mut self, locator: String) -> (LoadTicket, String) {
        self.document = None;
        let ticket = self.viewer.open(locator.clone());
        (ticket, locator)
    }

    /// Applies a load completion; stale ones are dropped by the viewer.
    pub fn on_document_loaded(&mut self, loaded: DocumentLoaded) {
        match loaded.result {
            Ok(document) => {
                if self.viewer.load_success(loaded.ticket, document.page_count())
                    && matches!(self.viewer.phase(), ViewerPhase::Ready { .. })
                {
                    self.document = Some(document);
                }
            }
            Err(message) => {
                self.viewer.load_failure(loaded.ticket, message);
            }
        }
    }

    pub fn close_viewer(&mut self) {
        self.viewer.close();
        self.document = None;
    }

    /// Lines of the page the viewer is on, if a document is ready.
    pub fn current_page_lines(&self) -> Option<Vec<String>> {
        let document = self.document.as_ref()?;
        document.page(self.viewer.current_page())
    }

    /// Heading of the viewer overlay: the catalog title, or the raw locator.
    pub fn viewer_heading(&self) -> Option<String> {
        let locator = self.viewer.locator()?;
        Some(self.browser.title_for(locator).unwrap_or(locator).to_string())
    }

    pub fn on_tick(&mut self) {
        if self.show_logs {
            self.refresh_logs();
        }
    }

    pub fn refresh_logs(&mut self) {
        self.log_content = logging::tail(&logging::log_path(), LOG_TAIL_LINES);
        self.set_log_scroll(self.log_horizontal_scroll);
    }

    /// Width in characters of the longest log line.
    pub fn log_width(&self) -> usize {
        self.log_content.iter().map(|line| line.chars().count()).max().unwrap_or(0)
    }

    pub fn scroll_logs_left(&mut self) {
        self.set_log_scroll(self.log_horizontal_scroll.saturating_sub(LOG_SCROLL_STEP));
    }

    pub fn scroll_logs_right(&mut self) {
        self.set_log_scroll(self.log_horizontal_scroll.saturating_add(LOG_SCROLL_STEP));
    }

    fn set_log_scroll(&mut self, offset: usize) {
        self.log_horizontal_scroll = offset.min(self.log_width());
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn enter_search(&mut self) {
        debug!("Entering search mode.");
        self.input_mode = InputMode::Search;
    }

    pub fn leave_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{BundledCatalog, CatalogSource};
    use crate::core::document::{DocumentRenderer, LocalDocumentRenderer};

    fn app() -> App {
        App::new(BundledCatalog.load().unwrap())
    }

    fn loaded_text(locator: &str, pages: usize) -> LoadedDocument {
        let dir = tempfile::tempdir().unwrap();
        let text: Vec<String> = (1..=pages).map(|i| format!("página {i}")).collect();
        std::fs::write(dir.path().join("doc.txt"), text.join("\n\u{c}")).unwrap();
        let mut document = LocalDocumentRenderer::new(dir.path()).load("/doc.txt").unwrap();
        document.locator = locator.to_string();
        document
    }

    #[test]
    fn opening_selected_document_enters_loading() {
        let mut app = app();
        let (ticket, locator) = app.open_selected().unwrap();
        assert_eq!(locator, "/nmap-guia-completa.txt");
        assert!(matches!(app.viewer.phase(), ViewerPhase::Loading { .. }));
        assert_eq!(app.viewer_heading().as_deref(), Some("Nmap: Guía Completa de Uso"));

        app.on_document_loaded(DocumentLoaded { ticket, result: Ok(loaded_text(&locator, 3)) });
        assert_eq!(app.viewer.total_pages(), 3);
        assert_eq!(app.current_page_lines(), Some(vec!["página 1".to_string()]));

        app.viewer.next_page();
        assert_eq!(app.current_page_lines(), Some(vec!["página 2".to_string()]));
    }

    #[test]
    fn stale_document_is_not_shown() {
        let mut app = app();
        let (old, locator) = app.open_selected().unwrap();
        let (current, _) = app.open_document("/owasp-top-10.txt".to_string());
        app.on_document_loaded(DocumentLoaded { ticket: old, result: Ok(loaded_text(&locator, 2)) });
        assert!(app.document.is_none());
        app.on_document_loaded(DocumentLoaded { ticket: current, result: Err("no existe".into()) });
        assert!(!app.viewer.is_open());
        assert_eq!(app.viewer.last_error().map(|e| e.locator.as_str()), Some("/owasp-top-10.txt"));
    }

    #[test]
    fn failure_leaves_archive_navigation_alone() {
        let mut app = app();
        app.archive.toggle_year(2024);
        let before = app.archive.navigation().clone();
        let (ticket, _) = app.open_selected().unwrap();
        app.on_document_loaded(DocumentLoaded { ticket, result: Err("boom".into()) });
        assert_eq!(app.archive.navigation(), &before);
    }

    #[test]
    fn closing_viewer_drops_document() {
        let mut app = app();
        let (ticket, locator) = app.open_selected().unwrap();
        app.on_document_loaded(DocumentLoaded { ticket, result: Ok(loaded_text(&locator, 2)) });
        app.close_viewer();
        assert!(app.document.is_none());
        assert_eq!(app.viewer.total_pages(), 0);
        assert!(app.current_page_lines().is_none());
    }

    #[tokio::test]
    async fn panicked_load_task_is_reported_as_such() {
        let ticket = ViewerState::new().open("/nmap-guia-completa.txt");
        let joined = tokio::task::spawn_blocking(|| -> Result<LoadedDocument, RenderError> {
            panic!("renderer crashed")
        })
        .await;
        let loaded = DocumentLoaded::from_join(ticket, joined);
        let message = loaded.result.unwrap_err();
        assert!(message.starts_with("Task panicked:"), "{message}");
        assert!(!message.contains("could not read"));
    }

    #[tokio::test]
    async fn render_errors_keep_their_message() {
        let ticket = ViewerState::new().open("/x.pdf");
        let joined = tokio::task::spawn_blocking(|| LocalDocumentRenderer::new("/srv").load("https://a.b/x.pdf")).await;
        let loaded = DocumentLoaded::from_join(ticket, joined);
        assert_eq!(loaded.result.unwrap_err(), "unsupported locator scheme 'https'");
    }

    #[test]
    fn log_scroll_stops_at_longest_line() {
        let mut app = app();
        app.log_content = vec!["corta".to_string(), "x".repeat(10)];
        for _ in 0..100 {
            app.scroll_logs_right();
        }
        assert_eq!(app.log_horizontal_scroll, 10);
        app.scroll_logs_left();
        assert_eq!(app.log_horizontal_scroll, 6);

        app.log_content.clear();
        app.scroll_logs_right();
        assert_eq!(app.log_horizontal_scroll, 0);
    }

    #[test]
    fn switching_screen_leaves_search_mode() {
        let mut app = app();
        app.enter_search();
        app.switch_screen();
        assert_eq!(app.screen, Screen::Vulnerabilities);
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
