// src/core/navigator.rs

use std::collections::BTreeSet;

/// Builds the composite "year-month" key used in the expanded-months set.
///
/// Month labels repeat across years ("Diciembre" exists in 2023 and 2024), so
/// the year is part of the key.
pub fn month_key(year: i32, month: &str) -> String {
    format!("{year}-{month}")
}

/// Expand/collapse state of the vulnerability archive.
///
/// Invariant: no month key survives the collapse of its year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    expanded_years: BTreeSet<i32>,
    expanded_months: BTreeSet<String>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_year(&mut self, year: i32) {
        if self.expanded_years.remove(&year) {
            self.collapse_months_of(year);
        } else {
            self.expanded_years.insert(year);
        }
    }

    pub fn toggle_month(&mut self, year: i32, month: &str) {
        let key = month_key(year, month);
        if !self.expanded_months.remove(&key) {
            self.expanded_months.insert(key);
        }
    }

    pub fn expand_year(&mut self, year: i32) {
        self.expanded_years.insert(year);
    }

    pub fn expand_month(&mut self, year: i32, month: &str) {
        self.expanded_months.insert(month_key(year, month));
    }

    pub fn collapse_all(&mut self) {
        self.expanded_years.clear();
        self.expanded_months.clear();
    }

    pub fn is_year_expanded(&self, year: i32) -> bool {
        self.expanded_years.contains(&year)
    }

    pub fn is_month_expanded(&self, year: i32, month: &str) -> bool {
        self.expanded_months.contains(&month_key(year, month))
    }

    /// A month's records are shown only when both the month and its year are open.
    pub fn is_month_visible(&self, year: i32, month: &str) -> bool {
        self.is_year_expanded(year) && self.is_month_expanded(year, month)
    }

    #[cfg(test)]
    pub fn expanded_years(&self) -> &BTreeSet<i32> {
        &self.expanded_years
    }

    #[cfg(test)]
    pub fn expanded_months(&self) -> &BTreeSet<String> {
        &self.expanded_months
    }

    // Single set difference over the month keys of `year`.
    fn collapse_months_of(&mut self, year: i32) {
        let prefix = format!("{year}-");
        self.expanded_months.retain(|key| !key.starts_with(&prefix));
    }
}
