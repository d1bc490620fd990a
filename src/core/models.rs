// src/core/models.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// --- Catalog Data Models ---

/// Severity of a published vulnerability. Any other label fails catalog loading.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
    Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Locale key for the badge label shown next to a record.
    pub fn label_key(&self) -> &'static str {
        match self {
            Severity::Critical => "severity.critical",
            Severity::High => "severity.high",
            Severity::Medium => "severity.medium",
            Severity::Low => "severity.low",
        }
    }
}

// A document category, as listed in the "Categorías" grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub document_count: u32,
}

// A featured document of the resource library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub page_count: u32,
    pub size_label: String,
    pub download_count: u32,
    pub locator: String,
}

// A row of the "Añadidos Recientemente" table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentDocument {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub published: String,
    pub size_label: String,
    pub locator: String,
}

// A single entry of the vulnerability bulletin board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VulnerabilityRecord {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub published: String,
    pub description: String,
}

// --- Archive Grouping ---
// Years and months keep the order they have in the catalog source; that order
// is the display order, so they are plain vectors rather than maps.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthGroup {
    pub month: String,
    pub records: Vec<VulnerabilityRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearGroup {
    pub year: i32,
    pub months: Vec<MonthGroup>,
}

impl YearGroup {
    pub fn record_count(&self) -> usize {
        self.months.iter().map(|m| m.records.len()).sum()
    }
}

// --- Informational Panels ---

/// Content of the `./recursos --info` terminal panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ResourcesInfo {
    pub total_documents: String,
    pub formats: Vec<String>,
    pub update_cadence: String,
    pub usage: String,
    pub statistics: String,
}

/// Content of the `./vulnerabilidades --info` terminal panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ArchiveInfo {
    pub update_cadence: String,
    pub categories: Vec<String>,
    pub format: String,
    pub access: String,
    pub status: String,
    pub total_cves: String,
    #[serde(default)]
    pub about: AboutInfo,
}

/// The "about this repository" blurb of the bulletin page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AboutInfo {
    pub summary: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SiteInfo {
    pub resources: ResourcesInfo,
    pub archive: ArchiveInfo,
    pub publication_rules: Vec<String>,
    pub warnings: Vec<String>,
}

// --- Catalog ---

/// The complete, read-only reference data of both pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub featured: Vec<Document>,
    pub recent: Vec<RecentDocument>,
    pub vulnerabilities: Vec<YearGroup>,
    #[serde(default)]
    pub site: SiteInfo,
}

impl Catalog {
    #[cfg(test)]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    #[cfg(test)]
    pub fn year(&self, year: i32) -> Option<&YearGroup> {
        self.vulnerabilities.iter().find(|y| y.year == year)
    }

    pub fn vulnerability_count(&self) -> usize {
        self.vulnerabilities.iter().map(YearGroup::record_count).sum()
    }
}
