//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use pizza_cart::{Currency, Language};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

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
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let shop = &ctx.config.shop;
    ctx.output.info("");
    ctx.output.info("[shop]");
    ctx.output.kv("delivery_fee", &shop.delivery_fee().display());
    ctx.output.kv("currency", shop.currency.code());
    ctx.output.kv("whatsapp_number", &shop.whatsapp_number);
    ctx.output.kv("language", language_name(shop.language));

    ctx.output.info("");
    ctx.output.info(&format!("[[menu]] ({} products)", ctx.config.menu.len()));
    for product in &ctx.config.menu {
        ctx.output.list_item(&product.name);
    }

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
    let config_path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => find_config_file(ctx)?,
    };
    let path = config_path.to_string_lossy();

    let mut config = CliConfig::load(&path)?;
    set_config_value(&mut config, key, value)?;
    config.shop.validate()?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));
    ctx.output.info("Next steps:");
    ctx.output.list_item("pizza menu");
    ctx.output.list_item("pizza shell");

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.check();

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

fn language_name(language: Language) -> &'static str {
    match language {
        Language::Portuguese => "portuguese",
        Language::English => "english",
    }
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["shop", "delivery_fee"] => Ok(config.shop.delivery_fee.to_string()),
        ["shop", "currency"] => Ok(config.shop.currency.code().to_string()),
        ["shop", "whatsapp_number"] => Ok(config.shop.whatsapp_number.clone()),
        ["shop", "language"] => Ok(language_name(config.shop.language).to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["shop", "delivery_fee"] => config.shop.delivery_fee = value.parse()?,
        ["shop", "currency"] => {
            config.shop.currency = Currency::from_code(value)
                .ok_or_else(|| anyhow!("Unknown currency: {}", value))?
        }
        ["shop", "whatsapp_number"] => config.shop.whatsapp_number = value.to_string(),
        ["shop", "language"] => {
            config.shop.language = match value.to_lowercase().as_str() {
                "portuguese" | "pt" => Language::Portuguese,
                "english" | "en" => Language::English,
                _ => bail!("Unknown language: {}", value),
            }
        }
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn find_config_file(ctx: &Context) -> Result<PathBuf> {
    for name in &CONFIG_NAMES {
        let path = ctx.cwd.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    bail!("No config file found. Run `pizza config init` to create one.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set_values() {
        let mut config = CliConfig::default();

        set_config_value(&mut config, "shop.delivery_fee", "12.5").unwrap();
        set_config_value(&mut config, "shop.currency", "usd").unwrap();
        set_config_value(&mut config, "shop.language", "en").unwrap();

        assert_eq!(get_config_value(&config, "shop.delivery_fee").unwrap(), "12.5");
        assert_eq!(get_config_value(&config, "shop.currency").unwrap(), "USD");
        assert_eq!(get_config_value(&config, "shop.language").unwrap(), "english");
        assert_eq!(config.shop.delivery_fee().display(), "US$ 12.50");
    }

    #[test]
    fn test_unknown_keys_and_values() {
        let mut config = CliConfig::default();
        assert!(get_config_value(&config, "shop.owner").is_err());
        assert!(set_config_value(&mut config, "menu", "x").is_err());
        assert!(set_config_value(&mut config, "shop.currency", "GBP").is_err());
        assert!(set_config_value(&mut config, "shop.delivery_fee", "free").is_err());
    }
}
