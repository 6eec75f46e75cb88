//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, TiendaConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
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
    match &ctx.config_file {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[store]");
    ctx.output.kv("data_dir", &ctx.config.store.data_dir.display().to_string());
    ctx.output.kv("storage_key", &ctx.config.store.storage_key);

    ctx.output.info("[catalog]");
    ctx.output.kv("path", &ctx.config.catalog.path.display().to_string());

    ctx.output.info("[order]");
    ctx.output.kv("phone", &ctx.config.order.phone);

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = &ctx.config_file else {
        bail!("No config file found. Run `tienda config init` to create one.");
    };

    let mut config = TiendaConfig::load(config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    let mut warnings: Vec<String> = Vec::new();

    let catalog_path = ctx.resolve_path(&ctx.config.catalog.path);
    if !catalog_path.exists() {
        warnings.push(format!("catalog file not found: {}", catalog_path.display()));
    }

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

fn get_config_value(config: &TiendaConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "data_dir"] => Ok(config.store.data_dir.display().to_string()),
        ["store", "storage_key"] => Ok(config.store.storage_key.clone()),
        ["catalog", "path"] => Ok(config.catalog.path.display().to_string()),
        ["order", "phone"] => Ok(config.order.phone.clone()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut TiendaConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "data_dir"] => config.store.data_dir = value.into(),
        ["store", "storage_key"] => config.store.storage_key = value.to_string(),
        ["catalog", "path"] => config.catalog.path = value.into(),
        ["order", "phone"] => config.order.phone = value.to_string(),
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set_round_trip() {
        let mut config = TiendaConfig::default();
        set_config_value(&mut config, "order.phone", "56900000000").unwrap();
        set_config_value(&mut config, "store.data_dir", "/var/tienda").unwrap();

        assert_eq!(get_config_value(&config, "order.phone").unwrap(), "56900000000");
        assert_eq!(get_config_value(&config, "store.data_dir").unwrap(), "/var/tienda");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut config = TiendaConfig::default();
        assert!(get_config_value(&config, "deploy.canary").is_err());
        assert!(set_config_value(&mut config, "store", "x").is_err());
    }
}
