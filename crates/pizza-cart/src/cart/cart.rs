//! Cart store and line item types.

use crate::error::CartError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The in-memory cart of one ordering session.
///
/// Lines keep insertion order, which is also display order. A line is
/// identified by its (name, unit price) pair; adding the same pair again
/// bumps the quantity instead of appending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CartStore {
    /// Currency every line is priced in.
    currency: Currency,
    /// Lines in display order.
    items: Vec<LineItem>,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Add one unit of `name` at `unit_price`.
    ///
    /// Merges into an existing line with the same name and price, otherwise
    /// appends a new line with quantity 1. A negative price is stored as
    /// zero. Returns the index of the affected line.
    pub fn add(&mut self, name: impl Into<String>, unit_price: Money) -> Result<usize, CartError> {
        if unit_price.currency != self.currency {
            return Err(CartError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: unit_price.currency.code().to_string(),
            });
        }

        let unit_price = if unit_price.is_negative() {
            Money::zero(self.currency)
        } else {
            unit_price
        };
        let name = name.into();

        if let Some(index) = self.items.iter().position(|i| i.matches(&name, &unit_price)) {
            let item = &mut self.items[index];
            item.quantity = item.quantity.saturating_add(1);
            return Ok(index);
        }

        self.items.push(LineItem::new(name, unit_price));
        Ok(self.items.len() - 1)
    }

    /// Add one unit priced from a decimal amount; NaN counts as zero.
    pub fn add_amount(&mut self, name: impl Into<String>, amount: f64) -> usize {
        let price = Money::from_decimal(amount, self.currency);
        // Same currency by construction, so add cannot fail.
        self.add(name, price).unwrap_or_default()
    }

    /// Take one unit off the line at `index`, removing the line when its
    /// last unit goes.
    pub fn decrement_or_remove(&mut self, index: usize) -> Result<LineChange, CartError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::LineOutOfRange { index, len })?;

        if item.quantity > 1 {
            item.quantity -= 1;
            return Ok(LineChange::Decremented {
                index,
                quantity: item.quantity,
            });
        }

        let item = self.items.remove(index);
        Ok(LineChange::Removed { index, item })
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price times quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .map(LineItem::total_price)
            // Every line is in the cart currency, so try_add always succeeds.
            .fold(Money::zero(self.currency), |acc, line| {
                acc.try_add(&line).unwrap_or(acc)
            })
    }

    /// Total units in the cart (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the line at `index`.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// The cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Display name, including size and half-flavour suffixes.
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity, never below 1.
    pub quantity: u32,
}

impl LineItem {
    /// Create a new line with quantity 1.
    pub fn new(name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    fn matches(&self, name: &str, unit_price: &Money) -> bool {
        self.name == name && self.unit_price == *unit_price
    }
}

/// What a decrement did to a line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineChange {
    /// The line lost one unit and is still present.
    Decremented { index: usize, quantity: u32 },
    /// The line's last unit went and the line was removed.
    Removed { index: usize, item: LineItem },
}
