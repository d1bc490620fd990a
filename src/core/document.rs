// src/core/document.rs

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Lines per page for plain text without form feeds.
pub const LINES_PER_PAGE: usize = 40;

const FORM_FEED: char = '\u{000C}';

// `/Type /Page` objects, but not the `/Type /Pages` tree nodes.
static PDF_PAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/Type\s*/Page(?:[^s]|$)").unwrap());

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid locator '{0}'")]
    InvalidLocator(String),
    #[error("unsupported locator scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("document is not valid UTF-8 text")]
    Encoding,
    #[error("document has no pages")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pages {
    /// Pages are drawn as frames only; the PDF text layer is never extracted.
    Pdf { count: u32 },
    Text(Vec<Vec<String>>),
}

/// A document that finished loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub locator: String,
    pages: Pages,
}

impl LoadedDocument {
    pub fn page_count(&self) -> u32 {
        match &self.pages {
            Pages::Pdf { count } => *count,
            Pages::Text(pages) => u32::try_from(pages.len()).unwrap_or(u32::MAX),
        }
    }

    /// Content of page `number` (1-indexed), `None` when out of range.
    pub fn page(&self, number: u32) -> Option<Vec<String>> {
        if number == 0 || number > self.page_count() {
            return None;
        }
        match &self.pages {
            Pages::Pdf { count } => Some(vec![
                String::new(),
                format!("[ PDF · {number} / {count} ]"),
            ]),
            Pages::Text(pages) => pages.get(number as usize - 1).cloned(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self.pages, Pages::Pdf { .. })
    }
}

/// Loads documents for the viewer.
///
/// Implementations block; callers run them off the UI loop.
pub trait DocumentRenderer: Send + Sync {
    fn load(&self, locator: &str) -> Result<LoadedDocument, RenderError>;
}

/// Reads documents from the local filesystem.
///
/// Site-relative locators (`/guia.txt`) resolve against `root`; `file://`
/// URLs are used as-is. Network schemes are refused.
#[derive(Debug, Clone)]
pub struct LocalDocumentRenderer {
    root: PathBuf,
}

impl LocalDocumentRenderer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, locator: &str) -> Result<PathBuf, RenderError> {
        let trimmed = locator.trim();
        if trimmed.is_empty() {
            return Err(RenderError::InvalidLocator(locator.to_string()));
        }
        match Url::parse(trimmed) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_err(|()| RenderError::InvalidLocator(locator.to_string())),
            Ok(url) => Err(RenderError::UnsupportedScheme(url.scheme().to_string())),
            // No scheme: a path relative to the documents root.
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let relative = trimmed.trim_start_matches('/');
                if Path::new(relative)
                    .components()
                    .any(|c| matches!(c, std::path::Component::ParentDir))
                {
                    return Err(RenderError::InvalidLocator(locator.to_string()));
                }
                Ok(self.root.join(relative))
            }
            Err(_) => Err(RenderError::InvalidLocator(locator.to_string())),
        }
    }
}

impl DocumentRenderer for LocalDocumentRenderer {
    fn load(&self, locator: &str) -> Result<LoadedDocument, RenderError> {
        let path = self.resolve(locator)?;
        debug!(path = %path.display(), "Reading document.");
        let bytes = std::fs::read(&path).map_err(|source| {
            warn!(path = %path.display(), error = %source, "Document read failed.");
            RenderError::Io { path: path.clone(), source }
        })?;
        let pages = paginate(&bytes)?;
        let document = LoadedDocument { locator: locator.to_string(), pages };
        info!(locator, pages = document.page_count(), "Document loaded.");
        Ok(document)
    }
}

fn paginate(bytes: &[u8]) -> Result<Pages, RenderError> {
    if bytes.starts_with(b"%PDF-") {
        let count = u32::try_from(PDF_PAGE.find_iter(bytes).count()).unwrap_or(u32::MAX);
        if count == 0 {
            return Err(RenderError::Empty);
        }
        return Ok(Pages::Pdf { count });
    }

    let text = std::str::from_utf8(bytes).map_err(|_| RenderError::Encoding)?;
    let pages: Vec<Vec<String>> = if text.contains(FORM_FEED) {
        text.split(FORM_FEED)
            .map(|page| page.trim_matches('\n'))
            .filter(|page| !page.trim().is_empty())
            .map(|page| page.lines().map(str::to_string).collect())
            .collect()
    } else {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        lines
            .chunks(LINES_PER_PAGE)
            .filter(|chunk| chunk.iter().any(|line| !line.trim().is_empty()))
            .map(<[String]>::to_vec)
            .collect()
    };

    if pages.is_empty() || pages.iter().all(|p| p.iter().all(|l| l.trim().is_empty())) {
        return Err(RenderError::Empty);
    }
    Ok(Pages::Text(pages))
}
