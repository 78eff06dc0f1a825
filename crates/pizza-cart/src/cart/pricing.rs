//! Cart pricing calculations.

use std::str::FromStr;

use crate::cart::CartStore;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Default flat delivery fee, in currency units.
pub const DEFAULT_DELIVERY_FEE: f64 = 8.0;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMode {
    /// Customer collects at the shop.
    #[default]
    #[serde(alias = "retirada")]
    Pickup,
    /// Shop delivers to an address; adds the delivery fee.
    #[serde(alias = "entrega")]
    Delivery,
}

impl FulfillmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentMode::Pickup => "pickup",
            FulfillmentMode::Delivery => "delivery",
        }
    }

    /// Whether the address field is shown and the fee applies.
    pub fn is_delivery(&self) -> bool {
        *self == FulfillmentMode::Delivery
    }
}

/// Parses a mode name; accepts the shop's Portuguese select values too.
impl FromStr for FulfillmentMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pickup" | "retirada" => Ok(FulfillmentMode::Pickup),
            "delivery" | "entrega" => Ok(FulfillmentMode::Delivery),
            _ => Err(()),
        }
    }
}

/// Pricing breakdown for a cart under a fulfillment mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Delivery fee charged (zero for pickup).
    pub delivery_fee: Money,
    /// Subtotal plus delivery fee.
    pub total: Money,
    /// Units in the cart.
    pub item_count: u64,
}

/// Computes cart totals with the flat delivery surcharge.
///
/// Holds no totals of its own; every call reads the cart as it is now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingEngine {
    delivery_fee: Money,
}

impl PricingEngine {
    /// Create an engine charging `delivery_fee` for deliveries.
    pub fn new(delivery_fee: Money) -> Self {
        Self { delivery_fee }
    }

    /// The configured delivery fee.
    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    /// Fee charged for `mode`.
    pub fn fee_for(&self, mode: FulfillmentMode) -> Money {
        if mode.is_delivery() {
            self.delivery_fee
        } else {
            Money::zero(self.delivery_fee.currency)
        }
    }

    /// Subtotal plus the fee for `mode`.
    pub fn total(&self, cart: &CartStore, mode: FulfillmentMode) -> Money {
        self.totals(cart, mode).total
    }

    /// Full breakdown for `cart` under `mode`.
    pub fn totals(&self, cart: &CartStore, mode: FulfillmentMode) -> CartTotals {
        let subtotal = cart.subtotal();
        let delivery_fee = self.fee_for(mode);
        let total = Money::new(
            subtotal.amount_cents.saturating_add(delivery_fee.amount_cents),
            subtotal.currency,
        );
        CartTotals {
            subtotal,
            delivery_fee,
            total,
            item_count: cart.item_count(),
        }
    }
}
