//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use cart_cache::FileStore;
use cart_data::Resilient;
use cart_store::CartStore;

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
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, base_dir) = if let Some(path) = config_path {
            let base = Path::new(path)
                .parent()
                .map(|p| cwd.join(p))
                .unwrap_or_else(|| cwd.clone());
            (CliConfig::load(path)?, base)
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        tracing::debug!(base_dir = %base_dir.display(), "configuration loaded");
        Ok(Self {
            config,
            output,
            cwd,
            base_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let config_names = ["cart.toml", ".cart.toml", "cart.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, current)),
                        Err(e) => tracing::warn!(
                            path = %config_path.display(),
                            error = %format!("{:#}", e),
                            "skipping unreadable config"
                        ),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Path of the file backing the key-value store.
    pub fn storage_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.path)
    }

    /// Resolve a path relative to the config directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir.join(path)
        }
    }

    /// Open the cart store over the file-backed storage and fixture lookups.
    pub fn open_store(&self) -> Result<CartStore> {
        let policy = self.config.fetch_policy();
        let storage_path = self.storage_path();
        let storage = FileStore::open(&storage_path)
            .with_context(|| format!("Failed to open storage: {}", storage_path.display()))?;

        let catalog = Resilient::new(self.config.catalog()).with_catalog_policy(policy.clone());
        let stock = Resilient::new(self.config.stock()).with_stock_policy(policy);

        let store = CartStore::builder(catalog, stock, storage)
            .with_config(self.config.store_config())
            .with_notifier(self.output.clone())
            .open()
            .map_err(|e| anyhow!("Failed to load cart: {}", e))?;
        Ok(store)
    }
}
