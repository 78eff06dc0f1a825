//! Cart rendering.
//!
//! A render is a projection of the cart store and the current fulfillment
//! mode. Nothing here is cached; after every cart mutation the caller
//! renders again.

use serde::{Deserialize, Serialize};

use crate::cart::{CartStore, CartTotals, FulfillmentMode, PricingEngine};
use crate::checkout::MessageLabels;
use crate::error::CartError;
use crate::money::Money;
use crate::session::Command;

/// One displayed cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartRow {
    /// Position in the cart; the remove button targets it.
    pub index: usize,
    pub quantity: u32,
    pub name: String,
    /// Quantity times unit price.
    pub line_total: Money,
    /// `line_total` formatted, e.g. "R$ 40,00".
    pub price_text: String,
}

impl CartRow {
    /// `"2x Pizza (Grande)"`.
    pub fn description(&self) -> String {
        format!("{}x {}", self.quantity, self.name)
    }

    /// The command the row's remove button sends.
    pub fn remove_command(&self) -> Command {
        Command::RemoveLine { index: self.index }
    }
}

/// Everything the page shows for the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartRender {
    pub rows: Vec<CartRow>,
    /// Badge counter (units, not lines).
    pub item_count: u64,
    pub totals: CartTotals,
    /// e.g. "Total: R$ 48,00".
    pub total_line: String,
    pub mode: FulfillmentMode,
    /// The address field is shown only for deliveries.
    pub address_visible: bool,
    /// Whether the cart panel is open.
    pub panel_open: bool,
}

impl CartRender {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize for JSON consumers.
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Receives every fresh render (the page's list, counter and total).
pub trait CartSink {
    fn show(&mut self, render: &CartRender);
}

/// Projects a cart into a [`CartRender`].
#[derive(Debug, Clone)]
pub struct CartView {
    pricing: PricingEngine,
    labels: MessageLabels,
}

impl CartView {
    pub fn new(pricing: PricingEngine, labels: MessageLabels) -> Self {
        Self { pricing, labels }
    }

    /// Render `cart` under `mode`.
    pub fn render(&self, cart: &CartStore, mode: FulfillmentMode, panel_open: bool) -> CartRender {
        let rows = cart
            .lines()
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let line_total = item.total_price();
                CartRow {
                    index,
                    quantity: item.quantity,
                    name: item.name.clone(),
                    line_total,
                    price_text: line_total.display(),
                }
            })
            .collect();

        let totals = self.pricing.totals(cart, mode);
        CartRender {
            rows,
            item_count: totals.item_count,
            total_line: self.labels.total_line(&totals.total),
            totals,
            mode,
            address_visible: mode.is_delivery(),
            panel_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn view() -> CartView {
        CartView::new(
            PricingEngine::new(Money::new(800, Currency::BRL)),
            MessageLabels::portuguese(),
        )
    }

    #[test]
    fn test_render_rows() {
        let mut cart = CartStore::new(Currency::BRL);
        cart.add_amount("Pizza (Grande)", 20.0);
        cart.add_amount("Pizza (Grande)", 20.0);
        cart.add_amount("Refrigerante", 7.5);

        let render = view().render(&cart, FulfillmentMode::Delivery, true);
        assert_eq!(render.rows.len(), 2);
        assert_eq!(render.rows[0].description(), "2x Pizza (Grande)");
        assert_eq!(render.rows[0].price_text, "R$ 40,00");
        assert_eq!(render.rows[1].price_text, "R$ 7,50");
        assert_eq!(render.item_count, 3);
        assert_eq!(render.total_line, "Total: R$ 55,50");
        assert!(render.address_visible);
        assert!(render.panel_open);
    }

    #[test]
    fn test_remove_command_targets_row() {
        let mut cart = CartStore::new(Currency::BRL);
        cart.add_amount("A", 1.0);
        cart.add_amount("B", 2.0);

        let render = view().render(&cart, FulfillmentMode::Pickup, false);
        assert_eq!(render.rows[1].remove_command(), Command::RemoveLine { index: 1 });
        assert!(!render.address_visible);
    }

    #[test]
    fn test_render_empty_cart() {
        let cart = CartStore::new(Currency::BRL);
        let render = view().render(&cart, FulfillmentMode::Pickup, false);
        assert!(render.is_empty());
        assert_eq!(render.total_line, "Total: R$ 0,00");
        assert!(render.to_json().unwrap().contains("\"item_count\": 0"));
    }
}
