//! CLI configuration.

use anyhow::{Context, Result};
use pizza_cart::catalog::{Menu, Product};
use pizza_cart::ShopSettings;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Shop settings.
    #[serde(default)]
    pub shop: ShopSettings,

    /// Products on sale, in display order.
    #[serde(default)]
    pub menu: Vec<Product>,
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

    /// The menu as the cart core sees it.
    pub fn menu(&self) -> Menu {
        Menu::new(self.menu.clone())
    }

    /// Problems that make the config unusable, and ones worth a warning.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Err(e) = self.shop.validate() {
            errors.push(e.to_string());
        }

        if self.menu.is_empty() {
            warnings.push("menu is empty; `pizza order` can only add free-form items".to_string());
        }

        for (i, product) in self.menu.iter().enumerate() {
            if product.name.trim().is_empty() {
                errors.push(format!("menu[{}].name is required", i));
            }
            if product.price.is_none() && product.sizes.is_empty() {
                warnings.push(format!(
                    "menu[{}] ({}) has neither a price nor sizes and will be added at zero",
                    i, product.name
                ));
            }
            for (j, size) in product.sizes.iter().enumerate() {
                if !size.price.is_finite() || size.price < 0.0 {
                    errors.push(format!(
                        "menu[{}].sizes[{}].price must be a non-negative amount",
                        i, j
                    ));
                }
            }
            let duplicates = self
                .menu
                .iter()
                .skip(i + 1)
                .any(|other| other.name.eq_ignore_ascii_case(&product.name));
            if duplicates {
                warnings.push(format!(
                    "menu lists {} more than once; only the first entry is used",
                    product.name
                ));
            }
        }

        (errors, warnings)
    }
}

/// Generate a default pizza.toml config file.
pub fn generate_default_config() -> String {
    r#"# Pizzeria configuration

[shop]
delivery_fee = 8.0
currency = "BRL"
whatsapp_number = "5511999999999"
language = "portuguese"

[[menu]]
name = "Calabresa"
halves = ["Mussarela", "Portuguesa"]

[[menu.sizes]]
label = "BROTO"
price = 20.0
detail = "4 fatias"

[[menu.sizes]]
label = "GRANDE"
price = 45.0
detail = "8 fatias"

[[menu]]
name = "Mussarela"
halves = ["Calabresa", "Portuguesa"]

[[menu.sizes]]
label = "BROTO"
price = 18.0
detail = "4 fatias"

[[menu.sizes]]
label = "GRANDE"
price = 42.0
detail = "8 fatias"

[[menu]]
name = "Refrigerante"
price = 7.5
"#
    .to_string()
}
