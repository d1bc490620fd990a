// src/core/filter.rs

use crate::core::models::{Category, Document, RecentDocument};

/// The value of the category selector above the document lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// "Todas las categorías"
    #[default]
    All,
    Category(String),
}

impl CategorySelection {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Category(name) => name == category,
        }
    }

    /// Steps the selector forward: `All`, then each category in catalog order, then back to `All`.
    pub fn next(&self, categories: &[Category]) -> Self {
        match self.position(categories) {
            None => categories.first().map_or(Self::All, |c| Self::Category(c.name.clone())),
            Some(i) => categories.get(i + 1).map_or(Self::All, |c| Self::Category(c.name.clone())),
        }
    }

    pub fn previous(&self, categories: &[Category]) -> Self {
        match self.position(categories) {
            None => categories.last().map_or(Self::All, |c| Self::Category(c.name.clone())),
            Some(0) => Self::All,
            Some(i) => Self::Category(categories[i - 1].name.clone()),
        }
    }

    // `None` stands for `All`, and also for a name that is no longer in the catalog.
    fn position(&self, categories: &[Category]) -> Option<usize> {
        match self {
            CategorySelection::All => None,
            CategorySelection::Category(name) => categories.iter().position(|c| &c.name == name),
        }
    }
}

/// Case-insensitive substring match; a blank query matches everything.
fn matches_query(query: &str, fields: &[&str]) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields.iter().any(|field| field.to_lowercase().contains(&needle))
}

/// Featured documents matching both the category selection and the search text.
pub fn filter_documents<'a>(
    documents: &'a [Document],
    selection: &CategorySelection,
    search: &str,
) -> Vec<&'a Document> {
    documents
        .iter()
        .filter(|doc| selection.matches(&doc.category))
        .filter(|doc| matches_query(search, &[doc.title.as_str(), doc.description.as_str()]))
        .collect()
}

/// Rows of the recently added table under the same selection and search.
pub fn filter_recent<'a>(
    documents: &'a [RecentDocument],
    selection: &CategorySelection,
    search: &str,
) -> Vec<&'a RecentDocument> {
    documents
        .iter()
        .filter(|doc| selection.matches(&doc.category))
        .filter(|doc| matches_query(search, &[doc.title.as_str()]))
        .collect()
}
