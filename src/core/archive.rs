// src/core/archive.rs

use crate::core::models::{VulnerabilityRecord, YearGroup};
use crate::core::navigator::NavigationState;
use std::sync::Arc;
use tracing::debug;

/// One visible line of the archive tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveRow<'a> {
    Year { year: i32, expanded: bool, records: usize },
    Month { year: i32, month: &'a str, expanded: bool, records: usize },
    Record { year: i32, month: &'a str, record: &'a VulnerabilityRecord },
}

impl ArchiveRow<'_> {
    fn key(&self) -> RowKey {
        match self {
            ArchiveRow::Year { year, .. } => RowKey::Year(*year),
            ArchiveRow::Month { year, month, .. } => RowKey::Month(*year, month.to_string()),
            ArchiveRow::Record { record, .. } => RowKey::Record(record.id.clone()),
        }
    }
}

// Identity of a row that survives rows being inserted or removed around it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowKey {
    Year(i32),
    Month(i32, String),
    Record(String),
}

/// The vulnerability bulletin board: the year/month tree and a cursor over it.
#[derive(Debug, Clone)]
pub struct VulnerabilityArchive {
    years: Arc<Vec<YearGroup>>,
    navigation: NavigationState,
    cursor: usize,
}

impl VulnerabilityArchive {
    pub fn new(years: Arc<Vec<YearGroup>>) -> Self {
        Self { years, navigation: NavigationState::new(), cursor: 0 }
    }

    #[cfg(test)]
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn toggle_year(&mut self, year: i32) {
        self.navigation.toggle_year(year);
        self.clamp_cursor();
    }

    pub fn toggle_month(&mut self, year: i32, month: &str) {
        self.navigation.toggle_month(year, month);
        self.clamp_cursor();
    }

    /// Flattens the tree into the rows currently on screen.
    ///
    /// Month rows exist only under expanded years and record rows only under
    /// visible months, so a month left expanded under a collapsed year is
    /// never drawn.
    pub fn visible_rows(&self) -> Vec<ArchiveRow<'_>> {
        let mut rows = Vec::new();
        for group in self.years.iter() {
            let year = group.year;
            let expanded = self.navigation.is_year_expanded(year);
            rows.push(ArchiveRow::Year { year, expanded, records: group.record_count() });
            if !expanded {
                continue;
            }
            for month in &group.months {
                let open = self.navigation.is_month_visible(year, &month.month);
                rows.push(ArchiveRow::Month {
                    year,
                    month: &month.month,
                    expanded: open,
                    records: month.records.len(),
                });
                if open {
                    rows.extend(month.records.iter().map(|record| ArchiveRow::Record {
                        year,
                        month: &month.month,
                        record,
                    }));
                }
            }
        }
        rows
    }

    pub fn selected_row(&self) -> Option<ArchiveRow<'_>> {
        self.visible_rows().into_iter().nth(self.cursor)
    }

    /// The record under the cursor, for the detail pane.
    pub fn selected_record(&self) -> Option<&VulnerabilityRecord> {
        match self.selected_row()? {
            ArchiveRow::Record { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn cursor_down(&mut self) {
        let len = self.visible_rows().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Toggles the year or month under the cursor. Records have nothing to toggle.
    pub fn activate(&mut self) {
        let target = match self.selected_row() {
            Some(ArchiveRow::Year { year, .. }) => Some((year, None)),
            Some(ArchiveRow::Month { year, month, .. }) => Some((year, Some(month.to_string()))),
            _ => None,
        };
        match target {
            Some((year, None)) => {
                debug!(year, "Toggling year.");
                self.toggle_year(year);
            }
            Some((year, Some(month))) => {
                debug!(year, month = %month, "Toggling month.");
                self.toggle_month(year, &month);
            }
            None => {}
        }
    }

    /// Opens every year and month, keeping the cursor on the row it was on.
    pub fn expand_all(&mut self) {
        let selected = self.selected_row().map(|row| row.key());
        for group in self.years.iter() {
            self.navigation.expand_year(group.year);
            for month in &group.months {
                self.navigation.expand_month(group.year, &month.month);
            }
        }
        if let Some(key) = selected {
            if let Some(index) = self.visible_rows().iter().position(|row| row.key() == key) {
                self.cursor = index;
            }
        }
        self.clamp_cursor();
    }

    pub fn collapse_all(&mut self) {
        self.navigation.collapse_all();
        self.cursor = 0;
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{BundledCatalog, CatalogSource};

    fn archive() -> VulnerabilityArchive {
        let catalog = BundledCatalog.load().unwrap();
        VulnerabilityArchive::new(Arc::new(catalog.vulnerabilities))
    }

    #[test]
    fn starts_with_only_year_rows() {
        let archive = archive();
        let rows = archive.visible_rows();
        assert_eq!(
            rows,
            vec![
                ArchiveRow::Year { year: 2024, expanded: false, records: 3 },
                ArchiveRow::Year { year: 2023, expanded: false, records: 3 },
            ]
        );
    }

    #[test]
    fn activating_rows_walks_down_the_tree() {
        let mut archive = archive();
        archive.activate();
        archive.cursor_down();
        assert!(matches!(archive.selected_row(), Some(ArchiveRow::Month { month: "Diciembre", records: 2, .. })));
        archive.activate();
        archive.cursor_down();
        let record = archive.selected_record().unwrap();
        assert_eq!(record.id, "cve-2024-0001");
        // Records have nothing to toggle.
        let before = archive.navigation().clone();
        archive.activate();
        assert_eq!(archive.navigation(), &before);
    }

    #[test]
    fn expanding_then_collapsing_2024_clears_its_months() {
        let mut archive = archive();
        archive.toggle_month(2024, "Diciembre");
        archive.toggle_year(2024);
        assert_eq!(archive.visible_rows().len(), 2 + 2 + 2);

        archive.toggle_year(2024);
        assert!(archive.navigation().expanded_months().is_empty());
        assert_eq!(archive.visible_rows().len(), 2);
    }

    #[test]
    fn cursor_is_clamped_after_collapse() {
        let mut archive = archive();
        archive.expand_all();
        for _ in 0..20 {
            archive.cursor_down();
        }
        assert_eq!(archive.cursor(), archive.visible_rows().len() - 1);
        archive.toggle_year(2023);
        archive.toggle_year(2024);
        assert_eq!(archive.cursor(), 1);
        archive.collapse_all();
        assert_eq!(archive.cursor(), 0);
        archive.cursor_up();
        assert_eq!(archive.cursor(), 0);
    }

    #[test]
    fn expand_all_keeps_the_selected_row() {
        let mut archive = archive();
        archive.cursor_down();
        assert!(matches!(archive.selected_row(), Some(ArchiveRow::Year { year: 2023, .. })));
        archive.expand_all();
        assert!(matches!(archive.selected_row(), Some(ArchiveRow::Year { year: 2023, .. })));
        assert_eq!(archive.cursor(), 1 + 2 + 3);

        archive.collapse_all();
        archive.toggle_year(2024);
        archive.cursor_down();
        archive.cursor_down();
        assert!(matches!(archive.selected_row(), Some(ArchiveRow::Month { month: "Noviembre", .. })));
        archive.expand_all();
        assert!(matches!(archive.selected_row(), Some(ArchiveRow::Month { year: 2024, month: "Noviembre", .. })));
    }

    #[test]
    fn expand_all_shows_every_record() {
        let mut archive = archive();
        archive.expand_all();
        let records = archive
            .visible_rows()
            .iter()
            .filter(|row| matches!(row, ArchiveRow::Record { .. }))
            .count();
        assert_eq!(records, 6);
    }
}
