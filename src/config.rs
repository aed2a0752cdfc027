//! Configuration handling for the storefront client

use crate::state::{builtin_catalog, Product};
use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Spreadsheet web app that records submissions
pub const DEFAULT_WEBHOOK_URL: &str = "https://script.google.com/macros/s/AKfycbxlO9ZHHEB9t0GtBc7wI4uVHJwEXiuI-vP-5QEzFMOjNIjbYoVwyMZ_mp0VO2TkLdWLwA/exec";

/// Messaging link opened after every submission
pub const DEFAULT_MESSAGING_LINK: &str = "https://t.me/BioVaultX";

/// Shared access password
pub const DEFAULT_ACCESS_PASSWORD: &str = "P3pt!X9r";

/// User configuration for the client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Webhook receiving submitted records
    pub webhook_url: Option<String>,
    /// Link opened after a submission
    pub messaging_link: Option<String>,
    /// Password for the access gate
    pub access_password: Option<String>,
    /// Catalog file, relative paths resolve against the config directory
    pub catalog_path: Option<PathBuf>,
}

impl StoreConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "storefront", "storefront-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: StoreConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("STOREFRONT_WEBHOOK_URL") {
            self.webhook_url = Some(url);
        }
        if let Some(link) = lookup("STOREFRONT_MESSAGING_LINK") {
            self.messaging_link = Some(link);
        }
        if let Some(password) = lookup("STOREFRONT_ACCESS_PASSWORD") {
            self.access_password = Some(password);
        }
    }

    pub fn webhook_url(&self) -> &str {
        self.webhook_url.as_deref().unwrap_or(DEFAULT_WEBHOOK_URL)
    }

    pub fn messaging_link(&self) -> &str {
        self.messaging_link
            .as_deref()
            .unwrap_or(DEFAULT_MESSAGING_LINK)
    }

    pub fn access_password(&self) -> &str {
        self.access_password
            .as_deref()
            .unwrap_or(DEFAULT_ACCESS_PASSWORD)
    }

    /// Load the configured catalog, or the built-in one when none is set
    pub fn load_catalog(&self) -> Result<Vec<Product>> {
        let Some(path) = &self.catalog_path else {
            return Ok(builtin_catalog());
        };

        let path = if path.is_relative() {
            Self::project_dirs()
                .map(|dirs| dirs.config_dir().join(path))
                .unwrap_or_else(|| path.clone())
        } else {
            path.clone()
        };
        load_catalog_file(&path)
    }
}

/// Read a JSON array of products, rejecting entries without a name
pub fn load_catalog_file(path: &Path) -> Result<Vec<Product>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let products: Vec<Product> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;

    if let Some(pos) = products.iter().position(|p| p.name.trim().is_empty()) {
        bail!("catalog entry {pos} in {} has an empty name", path.display());
    }

    tracing::info!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert!(config.webhook_url.is_none());
        assert!(config.messaging_link.is_none());
        assert!(config.access_password.is_none());
        assert!(config.catalog_path.is_none());
        assert_eq!(config.webhook_url(), DEFAULT_WEBHOOK_URL);
        assert_eq!(config.messaging_link(), DEFAULT_MESSAGING_LINK);
        assert_eq!(config.access_password(), "P3pt!X9r");
    }

    #[test]
    fn test_partial_serialization() {
        let config = StoreConfig {
            messaging_link: Some("https://t.me/example".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: StoreConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.messaging_link(), "https://t.me/example");
        assert_eq!(parsed.webhook_url(), DEFAULT_WEBHOOK_URL);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"access_password": "open sesame", "unknown_field": "value"}"#;
        let parsed: StoreConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_password(), "open sesame");
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let mut config = StoreConfig {
            webhook_url: Some("https://file.example/hook".to_string()),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [
            ("STOREFRONT_WEBHOOK_URL", "https://env.example/hook"),
            ("STOREFRONT_ACCESS_PASSWORD", "letmein"),
        ]
        .into_iter()
        .collect();

        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.webhook_url(), "https://env.example/hook");
        assert_eq!(config.access_password(), "letmein");
        assert_eq!(config.messaging_link(), DEFAULT_MESSAGING_LINK);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"messaging_link": "https://t.me/shop"}"#).unwrap();

        let config = StoreConfig::load_from(&path).unwrap();
        assert_eq!(config.messaging_link(), "https://t.me/shop");
    }

    #[test]
    fn test_builtin_catalog_without_path() {
        let products = StoreConfig::default().load_catalog().unwrap();
        assert_eq!(products, builtin_catalog());
    }

    #[test]
    fn test_catalog_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"name": "Kisspeptin 10mg", "category": "Hormone"}, {"name": "NAD+ 500mg"}]"#,
        )
        .unwrap();

        let config = StoreConfig {
            catalog_path: Some(path),
            ..Default::default()
        };
        let products = config.load_catalog().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Kisspeptin 10mg");
    }

    #[test]
    fn test_catalog_rejects_blank_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"[{"name": "  "}]"#).unwrap();

        assert!(load_catalog_file(&path).is_err());
    }

    #[test]
    fn test_config_path_points_at_config_json() {
        if let Some(path) = StoreConfig::config_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config.json"));
            assert!(path.to_string_lossy().contains("storefront-tui"));
        }
    }
}
