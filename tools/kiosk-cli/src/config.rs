//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Durable store location.
    #[serde(default)]
    pub store: StoreConfig,

    /// Catalog source selection.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Store file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store file path; defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Catalog source settings. A URL takes precedence over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// HTTP endpoint serving the session list as a JSON array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Local JSON file with the same shape.
    #[serde(default = "default_catalog_file")]
    pub file: String,
}

fn default_catalog_file() -> String {
    "data/sessions.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: default_catalog_file(),
        }
    }
}

/// Generate a default kiosk.toml config file.
pub fn generate_default_config() -> String {
    r#"# Kiosk configuration

[store]
# Where cart and preferences persist. Defaults to the platform data dir.
# path = "/var/lib/kiosk/store.json"

[catalog]
# Remote catalog endpoint; takes precedence over `file` when set.
# url = "https://example.com/sessions.json"
file = "data/sessions.json"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert!(config.store.path.is_none());
        assert!(config.catalog.url.is_none());
        assert_eq!(config.catalog.file, "data/sessions.json");
    }

    #[test]
    fn test_partial_catalog_section_defaults_file() {
        let config: CliConfig = toml::from_str(
            r#"[catalog]
url = "https://example.test/sessions.json"
"#,
        )
        .unwrap();
        assert_eq!(
            config.catalog.url.as_deref(),
            Some("https://example.test/sessions.json")
        );
        assert_eq!(config.catalog.file, "data/sessions.json");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.catalog.file, "data/sessions.json");
    }
}
