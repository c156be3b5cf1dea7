//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use cart_core::prelude::*;
use cart_data::{FetchPolicy, RetryPolicy, StaticCatalog, StaticStock};
use cart_store::{Messages, StoreConfig, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store configuration.
    #[serde(default)]
    pub store: StoreSection,

    /// Failure messages shown to the shopper.
    #[serde(default)]
    pub messages: Messages,

    /// Persistence configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Lookup timeout and retry budget.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Products served by the fixture catalog and stock service.
    #[serde(default = "default_products")]
    pub products: Vec<ProductFixture>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store: StoreSection::default(),
            messages: Messages::default(),
            storage: StorageConfig::default(),
            fetch: FetchConfig::default(),
            products: default_products(),
        }
    }
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

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Configuration for the cart store itself.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_storage_key(self.store.storage_key.clone())
            .with_messages(self.messages.clone())
    }

    /// Fetch policy applied to both catalog and stock lookups.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(
            Duration::from_millis(self.fetch.timeout_ms),
            RetryPolicy::new(self.fetch.max_retries),
        )
    }

    /// Catalog built from the product fixtures.
    pub fn catalog(&self) -> StaticCatalog {
        let catalog = StaticCatalog::new();
        for fixture in &self.products {
            catalog.insert(fixture.metadata());
        }
        catalog
    }

    /// Stock levels built from the product fixtures.
    pub fn stock(&self) -> StaticStock {
        let stock = StaticStock::new();
        for fixture in &self.products {
            stock.set(ProductId::new(fixture.id), fixture.stock);
        }
        stock
    }
}

/// Store section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    /// Key the cart is persisted under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the key-value store, relative to the config file.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".cart/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Timeout per attempt in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_ms() -> u64 {
    500
}

fn default_max_retries() -> u32 {
    2
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// A product with its stock level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFixture {
    pub id: i64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub stock: i64,
}

impl ProductFixture {
    pub fn metadata(&self) -> ProductMetadata {
        ProductMetadata::new(
            ProductId::new(self.id),
            self.title.clone(),
            self.price,
            self.image.clone(),
        )
    }
}

fn default_products() -> Vec<ProductFixture> {
    [
        (1, "Tênis de Caminhada Leve Confortável", 179.9, 3),
        (2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, 5),
        (3, "Tênis Adidas Duramo Lite 2.0", 219.9, 2),
        (5, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, 5),
        (6, "Tênis Adidas Duramo Lite 2.0", 219.9, 10),
    ]
    .into_iter()
    .map(|(id, title, price, stock)| ProductFixture {
        id,
        title: title.to_string(),
        price,
        image: format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"),
        stock,
    })
    .collect()
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    let mut content = String::from(
        r#"# RocketCart configuration

[store]
storage_key = "@RocketShoes:cart"

[messages]
out_of_stock = "Quantidade solicitada fora de estoque"
add_failed = "Erro na adição do produto"
remove_failed = "Erro na remoção do produto"
update_failed = "Erro na alteração de quantidade do produto"

[storage]
path = ".cart/storage.json"

[fetch]
timeout_ms = 500
max_retries = 2
"#,
    );

    for product in default_products() {
        content.push_str(&format!(
            r#"
[[products]]
id = {}
title = "{}"
price = {:.2}
image = "{}"
stock = {}
"#,
            product.id, product.title, product.price, product.image, product.stock
        ));
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.store.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.messages, Messages::default());
        assert_eq!(config.storage.path, ".cart/storage.json");
        assert_eq!(config.fetch.max_retries, 2);
        assert_eq!(config.products, default_products());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
[messages]
out_of_stock = "Out of stock"

[[products]]
id = 9
title = "Runner"
price = 99.5
stock = 1
"#,
        )
        .unwrap();

        assert_eq!(config.messages.out_of_stock, "Out of stock");
        assert_eq!(config.messages.add_failed, Messages::default().add_failed);
        assert_eq!(config.fetch.timeout_ms, 500);
        assert_eq!(config.products.len(), 1);
        assert_eq!(config.stock().level(ProductId::new(9)), Some(1));
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.store.storage_key = "cart:test".to_string();
        config.save(path).unwrap();

        let loaded = CliConfig::load(path).unwrap();
        assert_eq!(loaded.store_config().storage_key, "cart:test");
    }
}
