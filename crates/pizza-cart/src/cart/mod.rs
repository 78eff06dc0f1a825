//! Shopping cart module.
//!
//! Contains the cart store, its line items, and pricing.

mod cart;
mod pricing;

pub use cart::{CartStore, LineChange, LineItem};
pub use pricing::{CartTotals, FulfillmentMode, PricingEngine, DEFAULT_DELIVERY_FEE};
