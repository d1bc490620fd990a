// src/core/browser.rs

use crate::core::filter::{CategorySelection, filter_documents, filter_recent};
use crate::core::models::{Catalog, Document, RecentDocument};
use std::sync::Arc;
use tracing::debug;

/// Which list on the resources screen owns the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserFocus {
    #[default]
    Featured,
    Recent,
}

/// State of the resources screen: search box, category selector and a cursor
/// over whichever filtered list has focus.
#[derive(Debug, Clone)]
pub struct ResourceBrowser {
    catalog: Arc<Catalog>,
    search: String,
    selection: CategorySelection,
    focus: BrowserFocus,
    cursor: usize,
}

impl ResourceBrowser {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            search: String::new(),
            selection: CategorySelection::All,
            focus: BrowserFocus::Featured,
            cursor: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn focus(&self) -> BrowserFocus {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filtered_documents(&self) -> Vec<&Document> {
        filter_documents(&self.catalog.featured, &self.selection, &self.search)
    }

    pub fn filtered_recent(&self) -> Vec<&RecentDocument> {
        filter_recent(&self.catalog.recent, &self.selection, &self.search)
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.clamp_cursor();
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.clamp_cursor();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.clamp_cursor();
    }

    pub fn select_category(&mut self, selection: CategorySelection) {
        debug!(?selection, "Category selected.");
        self.selection = selection;
        self.clamp_cursor();
    }

    pub fn next_category(&mut self) {
        let next = self.selection.next(&self.catalog.categories);
        self.select_category(next);
    }

    pub fn previous_category(&mut self) {
        let previous = self.selection.previous(&self.catalog.categories);
        self.select_category(previous);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            BrowserFocus::Featured => BrowserFocus::Recent,
            BrowserFocus::Recent => BrowserFocus::Featured,
        };
        self.cursor = 0;
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.focused_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Locator of the entry under the cursor, if the focused list is not empty.
    pub fn selected_locator(&self) -> Option<&str> {
        match self.focus {
            BrowserFocus::Featured => self.filtered_documents().get(self.cursor).map(|d| d.locator.as_str()),
            BrowserFocus::Recent => self.filtered_recent().get(self.cursor).map(|d| d.locator.as_str()),
        }
    }

    /// Title for a locator, used as the viewer heading.
    pub fn title_for(&self, locator: &str) -> Option<&str> {
        self.catalog
            .featured
            .iter()
            .find(|d| d.locator == locator)
            .map(|d| d.title.as_str())
            .or_else(|| self.catalog.recent.iter().find(|d| d.locator == locator).map(|d| d.title.as_str()))
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            BrowserFocus::Featured => self.filtered_documents().len(),
            BrowserFocus::Recent => self.filtered_recent().len(),
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.focused_len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{BundledCatalog, CatalogSource};

    fn browser() -> ResourceBrowser {
        ResourceBrowser::new(Arc::new(BundledCatalog.load().unwrap()))
    }

    #[test]
    fn cursor_follows_filtered_list() {
        let mut browser = browser();
        for _ in 0..10 {
            browser.cursor_down();
        }
        assert_eq!(browser.cursor(), 3);
        assert_eq!(browser.selected_locator(), Some("/hardening-servidores-linux.txt"));

        browser.select_category(CategorySelection::Category("Metodologías".into()));
        assert_eq!(browser.cursor(), 0);
        assert_eq!(browser.selected_locator(), Some("/metodologia-osstmm.txt"));
    }

    #[test]
    fn empty_result_has_no_selection() {
        let mut browser = browser();
        for c in "zzz".chars() {
            browser.push_search(c);
        }
        assert!(browser.filtered_documents().is_empty());
        assert!(browser.selected_locator().is_none());
        browser.pop_search();
        browser.clear_search();
        assert_eq!(browser.filtered_documents().len(), 4);
    }

    #[test]
    fn recent_focus_selects_recent_rows() {
        let mut browser = browser();
        browser.next_category();
        assert_eq!(browser.selection(), &CategorySelection::Category("Herramientas".into()));
        browser.toggle_focus();
        assert_eq!(browser.focus(), BrowserFocus::Recent);
        assert_eq!(browser.selected_locator(), Some("/metasploit-manual-avanzado.txt"));
        assert_eq!(
            browser.title_for("/metasploit-manual-avanzado.txt"),
            Some("Metasploit Framework: Manual Avanzado")
        );
        browser.previous_category();
        assert_eq!(browser.selection(), &CategorySelection::All);
    }
}
