//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use kiosk_catalog::{CatalogSource, FileCatalog, HttpCatalog};
use kiosk_commerce::{CartStore, PrefsStore};
use kiosk_store::{FileStore, KvStore, MemoryStore};

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    store: Box<dyn KvStore>,
}

impl Context {
    /// Load config and open the durable store.
    ///
    /// With `ephemeral` the store lives in memory and nothing outlives the
    /// process; otherwise the configured store file is opened, created on
    /// first use.
    pub fn load(config_path: Option<&str>, ephemeral: bool, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        let store: Box<dyn KvStore> = if ephemeral {
            Box::new(MemoryStore::new())
        } else {
            Box::new(FileStore::open(store_path(&config, &cwd))?)
        };

        Ok(Self {
            config,
            output,
            cwd,
            store,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["kiosk.toml", ".kiosk.toml", "kiosk.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Cart engine over the context's store.
    pub fn cart(&self) -> CartStore<&dyn KvStore> {
        CartStore::new(self.store.as_ref())
    }

    /// Preferences engine over the context's store.
    pub fn prefs(&self) -> PrefsStore<&dyn KvStore> {
        PrefsStore::new(self.store.as_ref())
    }

    /// Catalog source picked by the config: URL when set, file otherwise.
    pub fn catalog_source(&self) -> Box<dyn CatalogSource + Send + Sync> {
        match &self.config.catalog.url {
            Some(url) => Box::new(HttpCatalog::new(url.clone())),
            None => Box::new(FileCatalog::new(self.resolve_path(&self.config.catalog.file))),
        }
    }

    /// Durable store file location (not used with `--ephemeral`).
    pub fn store_path(&self) -> PathBuf {
        store_path(&self.config, &self.cwd)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

fn store_path(config: &CliConfig, cwd: &Path) -> PathBuf {
    match &config.store.path {
        Some(path) if Path::new(path).is_absolute() => PathBuf::from(path),
        Some(path) => cwd.join(path),
        None => data_dir().join("kiosk").join("store.json"),
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
