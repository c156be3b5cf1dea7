//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { path, force } => init_config(path.as_deref(), force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[store]");
    ctx.output.kv("storage_key", &ctx.config.store.storage_key);

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());

    ctx.output.info("[fetch]");
    ctx.output
        .kv("timeout_ms", &ctx.config.fetch.timeout_ms.to_string());
    ctx.output
        .kv("max_retries", &ctx.config.fetch.max_retries.to_string());

    ctx.output.info("[messages]");
    ctx.output.kv("out_of_stock", &ctx.config.messages.out_of_stock);
    ctx.output.kv("add_failed", &ctx.config.messages.add_failed);
    ctx.output.kv("remove_failed", &ctx.config.messages.remove_failed);
    ctx.output.kv("update_failed", &ctx.config.messages.update_failed);

    ctx.output
        .kv("products", &ctx.config.products.len().to_string());

    Ok(())
}

async fn init_config(path: Option<&str>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = match path {
        Some(path) => ctx.cwd.join(path),
        None => ctx.cwd.join("cart.toml"),
    };

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if config_path.extension().is_some_and(|ext| ext == "json") {
        let path = config_path
            .to_str()
            .context("Config path is not valid UTF-8")?;
        CliConfig::default().save(path)?;
    } else {
        fs::write(&config_path, generate_default_config())
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;
    }

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
