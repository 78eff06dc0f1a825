//! Shop settings.

use serde::{Deserialize, Serialize};

use crate::cart::{PricingEngine, DEFAULT_DELIVERY_FEE};
use crate::catalog::PriceResolver;
use crate::checkout::{MessageLabels, WhatsAppLink};
use crate::error::CartError;
use crate::money::{Currency, Money};

/// Default WhatsApp number orders are sent to.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "5511999999999";

/// Language of the order message and cart texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "pt")]
    Portuguese,
    #[serde(alias = "en")]
    English,
}

/// Per-shop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopSettings {
    /// Flat delivery fee, in currency units.
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: f64,

    /// Currency prices are shown in.
    #[serde(default)]
    pub currency: Currency,

    /// WhatsApp number receiving orders.
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,

    /// Message language.
    #[serde(default)]
    pub language: Language,
}

fn default_delivery_fee() -> f64 {
    DEFAULT_DELIVERY_FEE
}

fn default_whatsapp_number() -> String {
    DEFAULT_WHATSAPP_NUMBER.to_string()
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            delivery_fee: default_delivery_fee(),
            currency: Currency::default(),
            whatsapp_number: default_whatsapp_number(),
            language: Language::default(),
        }
    }
}

impl ShopSettings {
    /// Check the settings before a session uses them.
    pub fn validate(&self) -> Result<(), CartError> {
        if !self.delivery_fee.is_finite() || self.delivery_fee < 0.0 {
            return Err(CartError::InvalidSettings(format!(
                "delivery_fee must be a non-negative amount, got {}",
                self.delivery_fee
            )));
        }
        if self.whatsapp_number.is_empty()
            || !self.whatsapp_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(CartError::InvalidSettings(format!(
                "whatsapp_number must contain digits only, got {:?}",
                self.whatsapp_number
            )));
        }
        Ok(())
    }

    pub fn delivery_fee(&self) -> Money {
        Money::from_decimal(self.delivery_fee, self.currency)
    }

    pub fn pricing_engine(&self) -> PricingEngine {
        PricingEngine::new(self.delivery_fee())
    }

    pub fn price_resolver(&self) -> PriceResolver {
        PriceResolver::new(self.currency)
    }

    pub fn labels(&self) -> MessageLabels {
        MessageLabels::for_language(self.language)
    }

    pub fn whatsapp_link(&self) -> WhatsAppLink {
        WhatsAppLink::new(self.whatsapp_number.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ShopSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.delivery_fee().display(), "R$ 8,00");
        assert_eq!(settings.labels(), MessageLabels::portuguese());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: ShopSettings =
            serde_json::from_str(r#"{"delivery_fee": 10.5, "language": "en"}"#).unwrap();
        assert_eq!(settings.delivery_fee().amount_cents, 1050);
        assert_eq!(settings.language, Language::English);
        assert_eq!(settings.whatsapp_number, DEFAULT_WHATSAPP_NUMBER);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = ShopSettings {
            delivery_fee: -1.0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(CartError::InvalidSettings(_))));

        let settings = ShopSettings {
            whatsapp_number: "+55 (11) 9999".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
