//! Outbound order handoff.

use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Result of handing an order to the outside world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Handoff {
    /// Channel name (e.g. "whatsapp").
    pub channel: String,
    /// Where the order went, e.g. a deep link to open.
    pub target: String,
}

/// Capability that takes a formatted order payload out of the core.
///
/// The session does not depend on this succeeding; a failure is logged
/// and the cart stays as it was.
pub trait OrderSubmitter {
    /// Hand over a transport payload.
    fn submit(&mut self, payload: &str) -> Result<Handoff, CartError>;
}

/// Builds a `wa.me` deep link carrying the order text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppLink {
    number: String,
}

impl WhatsAppLink {
    /// Link to the shop's WhatsApp number (digits, country code first).
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// The deep link for `payload`.
    pub fn url_for(&self, payload: &str) -> String {
        format!("https://wa.me/{}?text={}", self.number, payload)
    }
}

impl OrderSubmitter for WhatsAppLink {
    fn submit(&mut self, payload: &str) -> Result<Handoff, CartError> {
        if self.number.is_empty() || !self.number.chars().all(|c| c.is_ascii_digit()) {
            return Err(CartError::Handoff(format!(
                "invalid WhatsApp number: {:?}",
                self.number
            )));
        }
        Ok(Handoff {
            channel: "whatsapp".to_string(),
            target: self.url_for(payload),
        })
    }
}
