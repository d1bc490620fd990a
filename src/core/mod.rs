// src/core/mod.rs

// Screen state and reference data, independent of the terminal. The `ui`
// module only reads from these types; every transition lives here.

/// Catalog data structures: categories, documents, vulnerability records.
pub mod models;

/// Loading and validating the catalog from the bundled JSON or a file.
pub mod catalog;

/// Category and search filtering of the document lists.
pub mod filter;

/// Expand/collapse sets of the vulnerability archive.
pub mod navigator;

/// Document viewer state machine.
pub mod viewer;

/// Document loading and pagination.
pub mod document;

pub mod archive;
pub mod browser;
