//! Read-only access to the reference data of both pages.
//!
//! The UI never embeds catalog literals: it asks a `CatalogSource` for a
//! validated `Catalog` once at startup. The default source is the JSON catalog
//! compiled into the binary; a file path from the configuration replaces it
//! without recompiling.

use crate::core::models::Catalog;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate category '{0}'")]
    DuplicateCategory(String),
    #[error("duplicate document id {0}")]
    DuplicateDocument(u32),
    #[error("duplicate recent document id {0}")]
    DuplicateRecent(u32),
    #[error("document {id} references unknown category '{category}'")]
    UnknownCategory { id: u32, category: String },
    #[error("document {0} has no pages")]
    EmptyDocument(u32),
    #[error("duplicate year {0} in vulnerability archive")]
    DuplicateYear(i32),
    #[error("duplicate month '{month}' in year {year}")]
    DuplicateMonth { year: i32, month: String },
    #[error("duplicate vulnerability id '{0}'")]
    DuplicateVulnerability(String),
}

/// A collaborator that yields the catalog.
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError>;
}

/// The catalog shipped inside the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledCatalog;

impl CatalogSource for BundledCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        debug!("Loading bundled catalog.");
        parse_catalog(BUNDLED_CATALOG)
    }
}

/// A catalog read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        info!(path = %self.path.display(), "Loading catalog file.");
        let raw = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_catalog(&raw)
    }
}

/// Deserializes and validates a catalog document.
pub fn parse_catalog(raw: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(raw)?;
    validate(&catalog)?;
    info!(
        categories = catalog.categories.len(),
        featured = catalog.featured.len(),
        recent = catalog.recent.len(),
        vulnerabilities = catalog.vulnerability_count(),
        "Catalog loaded."
    );
    Ok(catalog)
}

/// Checks the referential constraints serde cannot express.
pub fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut names = HashSet::new();
    for category in &catalog.categories {
        if !names.insert(category.name.as_str()) {
            return Err(CatalogError::DuplicateCategory(category.name.clone()));
        }
    }

    let mut ids = HashSet::new();
    for doc in &catalog.featured {
        if !ids.insert(doc.id) {
            return Err(CatalogError::DuplicateDocument(doc.id));
        }
        if !names.contains(doc.category.as_str()) {
            return Err(CatalogError::UnknownCategory { id: doc.id, category: doc.category.clone() });
        }
        if doc.page_count == 0 {
            return Err(CatalogError::EmptyDocument(doc.id));
        }
    }

    let mut recent_ids = HashSet::new();
    for doc in &catalog.recent {
        if !recent_ids.insert(doc.id) {
            return Err(CatalogError::DuplicateRecent(doc.id));
        }
        if !names.contains(doc.category.as_str()) {
            return Err(CatalogError::UnknownCategory { id: doc.id, category: doc.category.clone() });
        }
    }

    let mut years = HashSet::new();
    let mut cves = HashSet::new();
    for year in &catalog.vulnerabilities {
        if !years.insert(year.year) {
            return Err(CatalogError::DuplicateYear(year.year));
        }
        let mut months = HashSet::new();
        for month in &year.months {
            if !months.insert(month.month.as_str()) {
                return Err(CatalogError::DuplicateMonth { year: year.year, month: month.month.clone() });
            }
            for record in &month.records {
                if !cves.insert(record.id.as_str()) {
                    return Err(CatalogError::DuplicateVulnerability(record.id.clone()));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Severity;
    use std::io::Write;

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = BundledCatalog.load().expect("bundled catalog must load");
        assert_eq!(catalog.categories.len(), 8);
        assert_eq!(catalog.category("Herramientas").map(|c| c.document_count), Some(24));
        assert_eq!(catalog.featured.len(), 4);
        assert_eq!(catalog.recent.len(), 5);
        assert_eq!(catalog.vulnerability_count(), 6);
        let titles: Vec<&str> = catalog.site.archive.about.features.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Análisis Detallado", "Pruebas de Concepto", "Recursos Técnicos"]);
    }

    #[test]
    fn bundled_archive_keeps_source_order() {
        let catalog = BundledCatalog.load().unwrap();
        let years: Vec<i32> = catalog.vulnerabilities.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2024, 2023]);
        let months: Vec<&str> = catalog.year(2024).unwrap().months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["Diciembre", "Noviembre"]);
        let first = &catalog.year(2024).unwrap().months[0].records[0];
        assert_eq!(first.severity, Severity::Critical);
    }

    #[test]
    fn bundled_documents_have_distinct_locators() {
        let catalog = BundledCatalog.load().unwrap();
        let locators: HashSet<&str> = catalog
            .featured
            .iter()
            .map(|d| d.locator.as_str())
            .chain(catalog.recent.iter().map(|d| d.locator.as_str()))
            .collect();
        assert_eq!(locators.len(), catalog.featured.len() + catalog.recent.len());
    }

    fn bundled_json() -> serde_json::Value {
        serde_json::from_str(BUNDLED_CATALOG).unwrap()
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let mut value = bundled_json();
        value["vulnerabilities"][0]["months"][0]["records"][0]["severity"] = "urgent".into();
        let err = parse_catalog(&value.to_string()).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn dangling_category_is_rejected() {
        let mut value = bundled_json();
        value["featured"][1]["category"] = "Inexistente".into();
        match parse_catalog(&value.to_string()) {
            Err(CatalogError::UnknownCategory { id, category }) => {
                assert_eq!(id, 2);
                assert_eq!(category, "Inexistente");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn zero_page_document_is_rejected() {
        let mut value = bundled_json();
        value["featured"][0]["page_count"] = 0.into();
        assert!(matches!(parse_catalog(&value.to_string()), Err(CatalogError::EmptyDocument(1))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut value = bundled_json();
        value["featured"][3]["id"] = 1.into();
        assert!(matches!(parse_catalog(&value.to_string()), Err(CatalogError::DuplicateDocument(1))));

        let mut value = bundled_json();
        value["vulnerabilities"][1]["months"][0]["records"][0]["id"] = "cve-2024-0001".into();
        assert!(matches!(
            parse_catalog(&value.to_string()),
            Err(CatalogError::DuplicateVulnerability(id)) if id == "cve-2024-0001"
        ));

        let mut value = bundled_json();
        value["vulnerabilities"][1]["year"] = 2024.into();
        assert!(matches!(parse_catalog(&value.to_string()), Err(CatalogError::DuplicateYear(2024))));
    }

    #[test]
    fn file_catalog_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUNDLED_CATALOG.as_bytes()).unwrap();
        let source = JsonFileCatalog::new(file.path());
        assert_eq!(source.load().unwrap(), BundledCatalog.load().unwrap());
    }

    #[test]
    fn missing_file_reports_path() {
        let source = JsonFileCatalog::new("/nonexistent/catalog.json");
        let err = source.load().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
