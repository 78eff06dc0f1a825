//! Product catalog module.
//!
//! Contains menu products, the per-add configuration value, and the
//! price and name derivation that turns a configuration into a cart line.

mod naming;
mod price;
mod product;

pub use naming::{product_name, size_label_from_option_text};
pub use price::{parse_option_price, PriceResolver};
pub use product::{
    HalfChoice, Menu, Product, ProductConfig, SizeChoice, SizeOption, DEFAULT_PRODUCT_NAME,
    NO_HALF,
};
