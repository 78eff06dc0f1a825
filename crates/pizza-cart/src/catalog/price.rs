//! Unit price resolution for configured products.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::catalog::{ProductConfig, SizeChoice};
use crate::error::CartError;
use crate::money::{Currency, Money};

/// First `R$` amount in a select option, e.g. `"BROTO - R$ 20,00 (4 fatias)"`.
static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\$\s*([0-9.,]+)").expect("valid price pattern"));

/// Extract the amount from select-option text.
///
/// Thousands dots are stripped and the decimal comma becomes a point, so
/// `"R$ 1.234,56"` reads as `1234.56`.
pub fn parse_option_price(text: &str) -> Result<f64, CartError> {
    let caps = PRICE_PATTERN
        .captures(text)
        .ok_or_else(|| CartError::UnparseablePrice(text.to_string()))?;

    let normalized = caps[1].replace('.', "").replacen(',', ".", 1);
    leading_float(&normalized).ok_or_else(|| CartError::UnparseablePrice(text.to_string()))
}

/// Parse the longest numeric prefix of `s` (digits with at most one point).
fn leading_float(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_point = false;
    let mut seen_digit = false;

    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}

/// A usable unit price: finite and not negative.
fn usable(amount: f64) -> Option<f64> {
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

/// Resolves the unit price of a configured product.
///
/// Order of preference: the selected size's price, then the declared
/// price, then zero. Resolution never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceResolver {
    currency: Currency,
}

impl PriceResolver {
    /// Create a resolver producing prices in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Resolve the unit price for a configuration.
    pub fn resolve(&self, config: &ProductConfig) -> Money {
        let from_size = match &config.size {
            Some(SizeChoice::Option(size)) => usable(size.price),
            Some(SizeChoice::Text(text)) => match parse_option_price(text) {
                Ok(amount) => usable(amount),
                Err(e) => {
                    debug!(error = %e, "size text has no price, using declared price");
                    None
                }
            },
            None => None,
        };

        let amount = from_size
            .or_else(|| config.declared_price.and_then(usable))
            .unwrap_or_else(|| {
                warn!(
                    product = config.base_name.as_deref().unwrap_or_default(),
                    "no usable price, resolving to zero"
                );
                0.0
            });

        Money::from_decimal(amount, self.currency)
    }

    /// Resolve from raw option text and a declared price, as read from a
    /// page that still scrapes its select elements.
    pub fn resolve_option_text(&self, option_text: Option<&str>, declared_price: Option<f64>) -> Money {
        self.resolve(&ProductConfig::from_option_text(
            String::new(),
            option_text,
            declared_price,
        ))
    }
}
