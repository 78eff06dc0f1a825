//! Display names for configured products.
//!
//! The name doubles as half of the cart merge key, so every size or
//! half-flavour change must produce a different string.

use crate::catalog::{ProductConfig, SizeChoice, DEFAULT_PRODUCT_NAME};

/// Size label from select-option text: whatever precedes the first `-`.
pub fn size_label_from_option_text(text: &str) -> Option<&str> {
    let label = text.split('-').next().unwrap_or_default().trim();
    (!label.is_empty()).then_some(label)
}

/// Derive the cart name for a configuration.
///
/// `"Calabresa"`, `"Calabresa (GRANDE)"`,
/// `"Calabresa (GRANDE) — Meio: Mussarela"`.
pub fn product_name(config: &ProductConfig) -> String {
    let mut name = config
        .base_name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(DEFAULT_PRODUCT_NAME)
        .to_string();

    let size = match &config.size {
        Some(SizeChoice::Option(size)) => Some(size.label.trim()).filter(|l| !l.is_empty()),
        Some(SizeChoice::Text(text)) => size_label_from_option_text(text),
        None => None,
    };
    if let Some(size) = size {
        name.push_str(&format!(" ({})", size));
    }

    if let Some(flavour) = config.half.flavour() {
        name.push_str(&format!(" \u{2014} Meio: {}", flavour));
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{HalfChoice, SizeOption};

    #[test]
    fn test_size_label() {
        assert_eq!(size_label_from_option_text("BROTO - R$ 20,00 (4 fatias)"), Some("BROTO"));
        assert_eq!(size_label_from_option_text("FAMILIA"), Some("FAMILIA"));
        assert_eq!(size_label_from_option_text(" - R$ 20,00"), None);
    }

    #[test]
    fn test_base_name_only() {
        let config = ProductConfig {
            base_name: Some("Refrigerante".into()),
            ..Default::default()
        };
        assert_eq!(product_name(&config), "Refrigerante");
    }

    #[test]
    fn test_missing_base_name() {
        assert_eq!(product_name(&ProductConfig::default()), "Produto");
    }

    #[test]
    fn test_size_and_half() {
        let config = ProductConfig::from_option_text(
            "Calabresa",
            Some("GRANDE - R$ 45,00 (8 fatias)"),
            None,
        )
        .with_half("Mussarela");
        assert_eq!(product_name(&config), "Calabresa (GRANDE) \u{2014} Meio: Mussarela");
    }

    #[test]
    fn test_half_sentinel_is_omitted() {
        let config = ProductConfig::from_option_text("Calabresa", Some("BROTO - R$ 20,00"), None)
            .with_half("Nenhuma");
        assert_eq!(config.half, HalfChoice::None);
        assert_eq!(product_name(&config), "Calabresa (BROTO)");
    }

    #[test]
    fn test_structured_size() {
        let config = ProductConfig {
            base_name: Some("Portuguesa".into()),
            size: Some(SizeChoice::Option(SizeOption::new("MEDIA", 38.0))),
            ..Default::default()
        };
        assert_eq!(product_name(&config), "Portuguesa (MEDIA)");
    }
}
