// src/config.rs

use crate::core::catalog::{BundledCatalog, CatalogSource, JsonFileCatalog};
use crate::logging::{get_config_dir, get_data_dir};
use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_FILE: &str = "config.json";

const ENV_LOCALE: &str = "EDU_REPO_LOCALE";
const ENV_CATALOG: &str = "EDU_REPO_CATALOG";
const ENV_DOCUMENTS: &str = "EDU_REPO_DOCUMENTS";

/// User settings, read from `config.json` in the platform config directory.
///
/// Every field is optional in the file; environment variables win over it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub catalog_path: Option<PathBuf>,
    pub documents_dir: Option<PathBuf>,
    pub show_logs: bool,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "es".to_string(),
            catalog_path: None,
            documents_dir: None,
            show_logs: false,
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    /// Reads the config file if there is one, then applies the environment.
    pub fn load() -> Result<Self> {
        let path = get_config_dir().join(CONFIG_FILE);
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        info!(?config, "Configuration loaded.");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults.");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).wrap_err_with(|| format!("invalid config file {}", path.display()))
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(locale) = lookup(ENV_LOCALE).filter(|v| !v.is_empty()) {
            self.locale = locale;
        }
        if let Some(path) = lookup(ENV_CATALOG).filter(|v| !v.is_empty()) {
            self.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(ENV_DOCUMENTS).filter(|v| !v.is_empty()) {
            self.documents_dir = Some(PathBuf::from(path));
        }
    }

    /// The bundled catalog unless a catalog file is configured.
    pub fn catalog_source(&self) -> Box<dyn CatalogSource> {
        match &self.catalog_path {
            Some(path) => Box::new(JsonFileCatalog::new(path)),
            None => Box::new(BundledCatalog),
        }
    }

    /// Where site-relative document locators are looked up.
    ///
    /// Falls back to the sample documents next to the working directory, then
    /// to `documentos/` under the data directory.
    pub fn documents_root(&self) -> PathBuf {
        if let Some(dir) = &self.documents_dir {
            return dir.clone();
        }
        let local = PathBuf::from("data").join("documentos");
        if local.is_dir() {
            return local;
        }
        get_data_dir().join("documentos")
    }

    pub fn tick_rate(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_rate_ms.max(10))
    }
}
