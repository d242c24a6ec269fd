//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use drape_cache::Cache;
use drape_commerce::catalog::InMemoryCatalog;
use drape_commerce::pricing::PricingEngine;

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["drape.toml", ".drape.toml", "drape.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Arc<Output>,
    /// Working directory.
    pub cwd: PathBuf,
    /// Path of the loaded config file, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            output: Arc::new(output),
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Today's date in local time. Rental dates are calendar days.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Data directory, created on first use.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let dir = self.resolve_path(&self.config.storage.data_dir);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(dir)
    }

    /// File-backed cache under the data directory.
    pub fn cache(&self) -> Result<Cache> {
        let dir = self.data_dir()?;
        Cache::open(&dir).with_context(|| format!("Failed to open storage at {}", dir.display()))
    }

    /// The launch catalog, with blocked dates relative to today and the
    /// configured rental policy.
    pub fn catalog(&self) -> Arc<InMemoryCatalog> {
        Arc::new(
            InMemoryCatalog::seeded(self.today())
                .with_rental_policy(self.config.storefront.rental),
        )
    }

    pub fn pricing(&self) -> PricingEngine {
        PricingEngine::from_config(&self.config.storefront)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
