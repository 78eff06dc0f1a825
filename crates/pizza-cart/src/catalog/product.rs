//! Menu products and the per-add configuration value.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Half-flavour value meaning "no second half".
pub const NO_HALF: &str = "Nenhuma";

/// Name used when a product carries no base name.
pub const DEFAULT_PRODUCT_NAME: &str = "Produto";

/// A size offered for a product (e.g. BROTO, GRANDE).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeOption {
    /// Size label shown to the customer.
    pub label: String,
    /// Unit price for this size, in currency units.
    pub price: f64,
    /// Extra description (e.g. "8 fatias").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SizeOption {
    /// Create a new size option.
    pub fn new(label: impl Into<String>, price: f64) -> Self {
        Self {
            label: label.into(),
            price,
            detail: None,
        }
    }

    /// Set the extra description.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Render the text a select option shows for this size,
    /// e.g. `"GRANDE - R$ 45,00 (8 fatias)"`.
    pub fn option_text(&self, currency: Currency) -> String {
        let price = Money::from_decimal(self.price, currency).display();
        match &self.detail {
            Some(detail) => format!("{} - {} ({})", self.label, price, detail),
            None => format!("{} - {}", self.label, price),
        }
    }
}

/// A product on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Base product name.
    pub name: String,
    /// Static declared price, used when no size price resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Available sizes, in display order.
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    /// Flavours that can fill the second half.
    #[serde(default)]
    pub halves: Vec<String>,
}

impl Product {
    /// Create a product with a declared price and no sizes.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            sizes: Vec::new(),
            halves: Vec::new(),
        }
    }

    /// Add a size option.
    pub fn with_size(mut self, size: SizeOption) -> Self {
        self.sizes.push(size);
        self
    }

    /// Add a second-half flavour.
    pub fn with_half(mut self, flavour: impl Into<String>) -> Self {
        self.halves.push(flavour.into());
        self
    }

    /// Find a size by label (case-insensitive).
    pub fn find_size(&self, label: &str) -> Option<&SizeOption> {
        self.sizes
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(label.trim()))
    }

    /// Build the configuration for one add action.
    ///
    /// With no size given, the first size is selected, as a select element
    /// would. Returns None for a size or half flavour the product does not
    /// offer.
    pub fn configure(&self, size: Option<&str>, half: Option<&str>) -> Option<ProductConfig> {
        let size = match size {
            Some(label) => Some(self.find_size(label)?.clone()),
            None => self.sizes.first().cloned(),
        };

        let half = match half.map(HalfChoice::from_value).unwrap_or_default() {
            HalfChoice::None => HalfChoice::None,
            HalfChoice::Flavour(flavour) => {
                let known = self
                    .halves
                    .iter()
                    .find(|h| h.eq_ignore_ascii_case(&flavour))?;
                HalfChoice::Flavour(known.clone())
            }
        };

        Some(ProductConfig {
            base_name: Some(self.name.clone()),
            declared_price: self.price,
            size: size.map(SizeChoice::Option),
            half,
        })
    }
}

/// The size part of a product configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SizeChoice {
    /// A size picked from structured menu data.
    Option(SizeOption),
    /// Raw option text from a select element, e.g. `"BROTO - R$ 20,00 (4 fatias)"`.
    Text(String),
}

/// The second-half part of a product configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HalfChoice {
    /// Whole pizza, one flavour.
    #[default]
    None,
    /// Second half filled with another flavour.
    Flavour(String),
}

impl HalfChoice {
    /// Interpret a select value, treating empty and [`NO_HALF`] as none.
    pub fn from_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == NO_HALF {
            HalfChoice::None
        } else {
            HalfChoice::Flavour(value.to_string())
        }
    }

    /// The flavour, if any.
    pub fn flavour(&self) -> Option<&str> {
        match self {
            HalfChoice::None => None,
            HalfChoice::Flavour(f) => Some(f),
        }
    }
}

/// Everything an add action knows about the product being added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductConfig {
    /// Base product name.
    #[serde(default)]
    pub base_name: Option<String>,
    /// Static declared price.
    #[serde(default)]
    pub declared_price: Option<f64>,
    /// Selected size.
    #[serde(default)]
    pub size: Option<SizeChoice>,
    /// Selected second half.
    #[serde(default)]
    pub half: HalfChoice,
}

impl ProductConfig {
    /// Configuration as read from a legacy page: option text plus the
    /// button's declared price.
    pub fn from_option_text(
        base_name: impl Into<String>,
        option_text: Option<&str>,
        declared_price: Option<f64>,
    ) -> Self {
        Self {
            base_name: Some(base_name.into()),
            declared_price,
            size: option_text.map(|t| SizeChoice::Text(t.to_string())),
            half: HalfChoice::None,
        }
    }

    /// Set the second-half selection from a select value.
    pub fn with_half(mut self, value: &str) -> Self {
        self.half = HalfChoice::from_value(value);
        self
    }
}

/// The shop menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    /// Products in display order.
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Menu {
    /// Create a menu from products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Find a product by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Check if the menu has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
