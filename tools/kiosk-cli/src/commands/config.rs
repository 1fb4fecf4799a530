//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx).await,
        ConfigCommand::Init { force } => init(force, ctx).await,
    }
}

async fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output
        .kv("path", &ctx.store_path().display().to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    if let Some(ref url) = ctx.config.catalog.url {
        ctx.output.kv("url", url);
    }
    ctx.output.kv("file", &ctx.config.catalog.file);

    Ok(())
}

async fn init(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("kiosk.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
