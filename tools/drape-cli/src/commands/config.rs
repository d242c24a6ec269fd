//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let store = &ctx.config.storefront;
    ctx.output.info("[storefront]");
    ctx.output.kv("currency", store.currency.code());
    ctx.output.kv("delivery_fee", &store.delivery_fee().display());
    ctx.output.kv(
        "insurance",
        &format!(
            "basic {} bps, premium {} bps",
            store.insurance.basic_bps, store.insurance.premium_bps
        ),
    );
    ctx.output.kv(
        "rental",
        &format!("{} to {} days", store.rental.min_days, store.rental.max_days),
    );
    ctx.output.kv(
        "processing_delay",
        &format!("{} ms", store.checkout.processing_delay_ms),
    );
    if !store.promos.is_empty() {
        ctx.output.info("[[storefront.promos]]");
        for promo in &store.promos {
            ctx.output
                .list_item(&format!("{} ({} bps)", promo.code, promo.percent_bps));
        }
    }

    ctx.output.info("[storage]");
    ctx.output.kv(
        "data_dir",
        &ctx.resolve_path(&ctx.config.storage.data_dir).display().to_string(),
    );

    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output
        .kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("drape.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.validate();

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
