//! Cart core for the pizzeria ordering page.
//!
//! This crate holds everything on the page that has rules to it:
//!
//! - **Catalog**: menu products, per-add configuration, price and name derivation
//! - **Cart**: the line-item store and delivery-aware pricing
//! - **View**: the projection the page displays after every change
//! - **Checkout**: order context, message formatting, WhatsApp handoff
//! - **Session**: typed command dispatch over one customer's cart
//!
//! # Example
//!
//! ```rust
//! use pizza_cart::prelude::*;
//!
//! let settings = ShopSettings::default();
//! let mut session = Session::new(&settings).unwrap();
//!
//! let pizza = Product::new("Calabresa", 40.0)
//!     .with_size(SizeOption::new("GRANDE", 20.0).with_detail("8 fatias"));
//! let config = pizza.configure(Some("GRANDE"), None).unwrap();
//!
//! session.dispatch(Command::AddItem { config: config.clone() });
//! session.dispatch(Command::AddItem { config });
//! let outcome = session.dispatch(Command::SetFulfillmentMode {
//!     mode: FulfillmentMode::Delivery,
//! });
//!
//! assert_eq!(outcome.render().total_line, "Total: R$ 48,00");
//! ```

pub mod error;
pub mod money;
pub mod settings;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;
pub mod view;

pub use error::CartError;
pub use money::{Currency, Money};
pub use settings::{Language, ShopSettings};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::money::{Currency, Money};
    pub use crate::settings::{Language, ShopSettings};

    // Catalog
    pub use crate::catalog::{
        HalfChoice, Menu, PriceResolver, Product, ProductConfig, SizeChoice, SizeOption,
    };

    // Cart
    pub use crate::cart::{CartStore, CartTotals, FulfillmentMode, LineItem, PricingEngine};

    // Checkout
    pub use crate::checkout::{
        ChangeDue, Handoff, MessageLabels, OrderContext, OrderMessage, OrderMessageFormatter,
        OrderSubmitter, WhatsAppLink,
    };

    // Session and view
    pub use crate::session::{Command, Outcome, Session};
    pub use crate::view::{CartRender, CartRow, CartSink, CartView};
}
