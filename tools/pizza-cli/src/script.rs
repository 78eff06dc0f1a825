//! Order scripts.
//!
//! A script is a list of page actions plus the order context read at
//! submit time:
//!
//! ```toml
//! [context]
//! mode = "delivery"
//! address = "Rua A, 10"
//! payment_method = "Pix"
//!
//! [[actions]]
//! action = "add_item"
//! product = "Calabresa"
//! size = "GRANDE"
//! half = "Mussarela"
//! ```

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use pizza_cart::prelude::*;
use serde::{Deserialize, Serialize};

/// A scripted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderScript {
    /// Order details read at submit time.
    #[serde(default)]
    pub context: OrderContext,

    /// Page actions, run in order.
    #[serde(default)]
    pub actions: Vec<Action>,

    /// Send the order after the last action.
    #[serde(default = "default_true")]
    pub submit: bool,
}

fn default_true() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}

/// Most presses a single `add_item` action may stand for.
pub const MAX_QUANTITY: u32 = 99;

/// One scripted page action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Press "add" on a product.
    AddItem {
        /// Product name; looked up on the menu when no option text is given.
        product: String,
        /// Size label.
        #[serde(default)]
        size: Option<String>,
        /// Second-half flavour.
        #[serde(default)]
        half: Option<String>,
        /// Raw select text, e.g. "GRANDE - R$ 45,00 (8 fatias)".
        #[serde(default)]
        option_text: Option<String>,
        /// Declared price, for products off the menu.
        #[serde(default)]
        price: Option<f64>,
        /// Times to press the button.
        #[serde(default = "default_quantity")]
        quantity: u32,
    },
    /// Press "remove" on a cart row.
    RemoveLine { index: usize },
    ClearCart,
    SetFulfillmentMode { mode: FulfillmentMode },
    OpenCart,
    CloseCart,
}

impl OrderScript {
    /// Load a TOML or JSON script.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read order script: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON script: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML script: {}", path.display()))
        }
    }

    /// Resolve every action against `menu`.
    pub fn commands(&self, menu: &Menu) -> Result<Vec<Command>> {
        let mut commands = Vec::new();
        for (i, action) in self.actions.iter().enumerate() {
            let resolved = action
                .commands(menu)
                .with_context(|| format!("actions[{}]", i))?;
            commands.extend(resolved);
        }
        Ok(commands)
    }
}

impl Action {
    /// The session commands this action stands for.
    pub fn commands(&self, menu: &Menu) -> Result<Vec<Command>> {
        let command = match self {
            Action::AddItem {
                product,
                size,
                half,
                option_text,
                price,
                quantity,
            } => {
                if *quantity > MAX_QUANTITY {
                    bail!(
                        "quantity {} for {} is above the limit of {}",
                        quantity,
                        product,
                        MAX_QUANTITY
                    );
                }
                let config = add_item_config(
                    menu,
                    product,
                    size.as_deref(),
                    half.as_deref(),
                    option_text.as_deref(),
                    *price,
                )?;
                return Ok((0..*quantity)
                    .map(|_| Command::AddItem {
                        config: config.clone(),
                    })
                    .collect());
            }
            Action::RemoveLine { index } => Command::RemoveLine { index: *index },
            Action::ClearCart => Command::ClearCart,
            Action::SetFulfillmentMode { mode } => Command::SetFulfillmentMode { mode: *mode },
            Action::OpenCart => Command::OpenCart,
            Action::CloseCart => Command::CloseCart,
        };
        Ok(vec![command])
    }
}

/// Build the configuration for one add.
///
/// Option text is taken as-is, like a legacy page would send it. Otherwise
/// the product must be on the menu, or carry its own price.
pub fn add_item_config(
    menu: &Menu,
    product: &str,
    size: Option<&str>,
    half: Option<&str>,
    option_text: Option<&str>,
    price: Option<f64>,
) -> Result<ProductConfig> {
    let listed = menu.find(product);

    if option_text.is_some() {
        let declared = price.or_else(|| listed.and_then(|p| p.price));
        let base = listed.map_or(product, |p| p.name.as_str());
        return Ok(ProductConfig::from_option_text(base, option_text, declared)
            .with_half(half.unwrap_or_default()));
    }

    match listed {
        Some(listed) => listed.configure(size, half).ok_or_else(|| {
            anyhow!(
                "{} has no size {:?} or second half {:?}",
                listed.name,
                size.unwrap_or_default(),
                half.unwrap_or_default()
            )
        }),
        None if price.is_some() => {
            Ok(ProductConfig::from_option_text(product, size, price).with_half(half.unwrap_or_default()))
        }
        None => bail!("Unknown product: {} (not on the menu and no price given)", product),
    }
}
