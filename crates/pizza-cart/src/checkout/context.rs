//! Order metadata read at submit time.

use crate::cart::FulfillmentMode;
use serde::{Deserialize, Serialize};

/// What the customer filled in besides the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderContext {
    /// Pickup or delivery.
    #[serde(default)]
    pub mode: FulfillmentMode,
    /// Delivery address, only meaningful for deliveries.
    #[serde(default)]
    pub address: String,
    /// Payment method label (e.g. "Pix", "Dinheiro").
    #[serde(default)]
    pub payment_method: String,
    /// Raw change-due input, e.g. "50,00".
    #[serde(default)]
    pub change_due: String,
}

impl OrderContext {
    /// Context for a pickup order.
    pub fn pickup() -> Self {
        Self::default()
    }

    /// Context for a delivery to `address`.
    pub fn delivery(address: impl Into<String>) -> Self {
        Self {
            mode: FulfillmentMode::Delivery,
            address: address.into(),
            ..Default::default()
        }
    }

    /// Set the payment method.
    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = method.into();
        self
    }

    /// Set the raw change-due input.
    pub fn with_change_due(mut self, change_due: impl Into<String>) -> Self {
        self.change_due = change_due.into();
        self
    }

    /// The address to deliver to, if this is a delivery with an address.
    pub fn delivery_address(&self) -> Option<&str> {
        let address = self.address.trim();
        (self.mode.is_delivery() && !address.is_empty()).then_some(address)
    }

    /// The payment method, if one was chosen.
    pub fn payment_method(&self) -> Option<&str> {
        let method = self.payment_method.trim();
        (!method.is_empty()).then_some(method)
    }

    /// Interpret the change-due input.
    pub fn change_due(&self) -> ChangeDue {
        ChangeDue::parse(&self.change_due)
    }
}

/// Whether the courier must bring change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeDue {
    /// Exact payment or no cash involved.
    NotNeeded,
    /// Change for the given raw amount text.
    For(String),
}

impl ChangeDue {
    /// Empty input and the zero forms `0`, `0,00`, `0.00` mean no change.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "0" | "0,00" | "0.00" => ChangeDue::NotNeeded,
            amount => ChangeDue::For(amount.to_string()),
        }
    }
}
