//! Ordering session and command dispatch.
//!
//! A [`Session`] owns the cart for one visit to the ordering page. Each
//! user action arrives as a [`Command`]; dispatch runs the whole
//! resolve, mutate, render and recompute sequence before returning, so the
//! returned render always matches the cart.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cart::{CartStore, FulfillmentMode, LineChange};
use crate::catalog::{product_name, PriceResolver, ProductConfig};
use crate::checkout::{Handoff, OrderContext, OrderMessage, OrderMessageFormatter, OrderSubmitter};
use crate::error::CartError;
use crate::settings::ShopSettings;
use crate::view::{CartRender, CartSink, CartView};

/// A user action on the ordering page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// "Add" button on a product.
    AddItem { config: ProductConfig },
    /// "Remove" button on a cart row.
    RemoveLine { index: usize },
    /// "Clear cart" button.
    ClearCart,
    /// Pickup/delivery select changed.
    SetFulfillmentMode { mode: FulfillmentMode },
    /// Cart panel opened.
    OpenCart,
    /// Cart panel closed.
    CloseCart,
    /// "Send order" button.
    Submit { context: OrderContext },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddItem { .. } => "add_item",
            Command::RemoveLine { .. } => "remove_line",
            Command::ClearCart => "clear_cart",
            Command::SetFulfillmentMode { .. } => "set_fulfillment_mode",
            Command::OpenCart => "open_cart",
            Command::CloseCart => "close_cart",
            Command::Submit { .. } => "submit",
        }
    }
}

/// What a dispatched command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The cart view after the command.
    Rendered(CartRender),
    /// The order was formatted and handed off. `handoff` is None when the
    /// transport failed.
    Submitted {
        message: OrderMessage,
        handoff: Option<Handoff>,
        render: CartRender,
    },
    /// The command was refused; show `warning` to the customer.
    Refused { warning: String, render: CartRender },
}

impl Outcome {
    /// The cart view after the command.
    pub fn render(&self) -> &CartRender {
        match self {
            Outcome::Rendered(render) => render,
            Outcome::Submitted { render, .. } => render,
            Outcome::Refused { render, .. } => render,
        }
    }
}

/// One customer's ordering session.
pub struct Session {
    cart: CartStore,
    mode: FulfillmentMode,
    panel_open: bool,
    resolver: PriceResolver,
    view: CartView,
    formatter: OrderMessageFormatter,
    submitter: Box<dyn OrderSubmitter>,
    sink: Option<Box<dyn CartSink>>,
}

impl Session {
    /// Start a session with an empty cart, submitting through WhatsApp.
    pub fn new(settings: &ShopSettings) -> Result<Self, CartError> {
        settings.validate()?;
        let pricing = settings.pricing_engine();
        let labels = settings.labels();

        Ok(Self {
            cart: CartStore::new(settings.currency),
            mode: FulfillmentMode::default(),
            panel_open: false,
            resolver: settings.price_resolver(),
            view: CartView::new(pricing, labels.clone()),
            formatter: OrderMessageFormatter::new(labels, pricing),
            submitter: Box::new(settings.whatsapp_link()),
            sink: None,
        })
    }

    /// Replace the outbound transport.
    pub fn with_submitter(mut self, submitter: impl OrderSubmitter + 'static) -> Self {
        self.submitter = Box::new(submitter);
        self
    }

    /// Push every render to `sink`.
    pub fn with_sink(mut self, sink: impl CartSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn mode(&self) -> FulfillmentMode {
        self.mode
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Render the current state without changing it.
    pub fn render(&self) -> CartRender {
        self.view.render(&self.cart, self.mode, self.panel_open)
    }

    /// Format the order for `context` without handing it off.
    ///
    /// Uses the context's mode, which may differ from the session's until
    /// the next `SetFulfillmentMode` or `Submit`.
    pub fn format_order(&self, context: &OrderContext) -> Result<OrderMessage, CartError> {
        self.formatter.format(&self.cart, context)
    }

    /// Apply one command and re-render.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        debug!(command = command.name(), "dispatching");

        let outcome = match command {
            Command::AddItem { config } => {
                self.add_item(&config);
                Outcome::Rendered(self.render())
            }
            Command::RemoveLine { index } => {
                self.remove_line(index);
                Outcome::Rendered(self.render())
            }
            Command::ClearCart => {
                self.cart.clear();
                Outcome::Rendered(self.render())
            }
            Command::SetFulfillmentMode { mode } => {
                self.mode = mode;
                Outcome::Rendered(self.render())
            }
            Command::OpenCart => {
                self.panel_open = true;
                Outcome::Rendered(self.render())
            }
            Command::CloseCart => {
                self.panel_open = false;
                Outcome::Rendered(self.render())
            }
            Command::Submit { context } => self.submit(&context),
        };

        if let Some(sink) = self.sink.as_mut() {
            sink.show(outcome.render());
        }
        outcome
    }

    fn add_item(&mut self, config: &ProductConfig) {
        let name = product_name(config);
        let price = self.resolver.resolve(config);

        // The resolver prices in the cart's currency.
        match self.cart.add(name.as_str(), price) {
            Ok(index) => debug!(
                line = index,
                name = %name,
                price = %price,
                "item added"
            ),
            Err(e) => warn!(error = %e, name = %name, "item not added"),
        }
    }

    fn remove_line(&mut self, index: usize) {
        match self.cart.decrement_or_remove(index) {
            Ok(LineChange::Decremented { index, quantity }) => {
                debug!(line = index, quantity, "line decremented")
            }
            Ok(LineChange::Removed { index, item }) => {
                debug!(line = index, name = %item.name, "line removed")
            }
            Err(e) => warn!(error = %e, "ignoring stale remove"),
        }
    }

    fn submit(&mut self, context: &OrderContext) -> Outcome {
        // The mode select is the one source of truth at submit time.
        self.mode = context.mode;

        let message = match self.formatter.format(&self.cart, context) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "order refused");
                return Outcome::Refused {
                    warning: self.formatter.labels().empty_cart.clone(),
                    render: self.render(),
                };
            }
        };

        let handoff = match self.submitter.submit(&message.to_transport()) {
            Ok(handoff) => {
                info!(
                    channel = %handoff.channel,
                    lines = self.cart.line_count(),
                    items = self.cart.item_count(),
                    "order handed off"
                );
                Some(handoff)
            }
            Err(e) => {
                warn!(error = %e, "order handoff failed");
                None
            }
        };

        Outcome::Submitted {
            message,
            handoff,
            render: self.render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, SizeOption};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn calabresa() -> Product {
        Product::new("Calabresa", 40.0)
            .with_size(SizeOption::new("BROTO", 20.0).with_detail("4 fatias"))
            .with_size(SizeOption::new("GRANDE", 45.0).with_detail("8 fatias"))
            .with_half("Mussarela")
    }

    fn add(product: &Product, size: &str, half: Option<&str>) -> Command {
        Command::AddItem {
            config: product.configure(Some(size), half).unwrap(),
        }
    }

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl OrderSubmitter for Recorder {
        fn submit(&mut self, payload: &str) -> Result<Handoff, CartError> {
            self.0.borrow_mut().push(payload.to_string());
            Ok(Handoff {
                channel: "test".into(),
                target: "memory".into(),
            })
        }
    }

    struct Failing;

    impl OrderSubmitter for Failing {
        fn submit(&mut self, _payload: &str) -> Result<Handoff, CartError> {
            Err(CartError::Handoff("offline".into()))
        }
    }

    #[derive(Default, Clone)]
    struct Screen(Rc<RefCell<Vec<String>>>);

    impl CartSink for Screen {
        fn show(&mut self, render: &CartRender) {
            self.0.borrow_mut().push(render.total_line.clone());
        }
    }

    #[test]
    fn test_add_merges_same_configuration() {
        let mut session = Session::new(&ShopSettings::default()).unwrap();
        let product = calabresa();

        session.dispatch(add(&product, "GRANDE", None));
        session.dispatch(add(&product, "GRANDE", None));
        let outcome = session.dispatch(add(&product, "GRANDE", Some("Mussarela")));

        let render = outcome.render();
        assert_eq!(render.rows.len(), 2);
        assert_eq!(render.rows[0].description(), "2x Calabresa (GRANDE)");
        assert_eq!(render.rows[1].name, "Calabresa (GRANDE) \u{2014} Meio: Mussarela");
        assert_eq!(render.item_count, 3);
        assert_eq!(render.total_line, "Total: R$ 135,00");
    }

    #[test]
    fn test_mode_change_recomputes_total() {
        let mut session = Session::new(&ShopSettings::default()).unwrap();
        session.dispatch(add(&calabresa(), "BROTO", None));

        let delivery = session.dispatch(Command::SetFulfillmentMode {
            mode: FulfillmentMode::Delivery,
        });
        assert_eq!(delivery.render().total_line, "Total: R$ 28,00");
        assert!(delivery.render().address_visible);

        let pickup = session.dispatch(Command::SetFulfillmentMode {
            mode: FulfillmentMode::Pickup,
        });
        assert_eq!(pickup.render().total_line, "Total: R$ 20,00");
        assert!(!pickup.render().address_visible);
    }

    #[test]
    fn test_stale_remove_is_noop() {
        let mut session = Session::new(&ShopSettings::default()).unwrap();
        session.dispatch(add(&calabresa(), "BROTO", None));

        let outcome = session.dispatch(Command::RemoveLine { index: 7 });
        assert!(matches!(outcome, Outcome::Rendered(_)));
        assert_eq!(session.cart().item_count(), 1);
    }

    #[test]
    fn test_open_close_and_clear() {
        let mut session = Session::new(&ShopSettings::default()).unwrap();
        session.dispatch(add(&calabresa(), "BROTO", None));

        assert!(session.dispatch(Command::OpenCart).render().panel_open);
        let cleared = session.dispatch(Command::ClearCart);
        assert!(cleared.render().is_empty());
        assert!(cleared.render().panel_open);
        assert!(!session.dispatch(Command::CloseCart).render().panel_open);
    }

    #[test]
    fn test_submit_empty_cart_is_refused() {
        let recorder = Recorder::default();
        let mut session = Session::new(&ShopSettings::default())
            .unwrap()
            .with_submitter(recorder.clone());

        let outcome = session.dispatch(Command::Submit {
            context: OrderContext::pickup(),
        });
        match outcome {
            Outcome::Refused { warning, render } => {
                assert_eq!(warning, "Seu carrinho está vazio!");
                assert!(render.is_empty());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(recorder.0.borrow().is_empty());
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_submit_hands_off_transport_payload() {
        let recorder = Recorder::default();
        let mut session = Session::new(&ShopSettings::default())
            .unwrap()
            .with_submitter(recorder.clone());
        session.dispatch(add(&calabresa(), "BROTO", None));

        let context = OrderContext::delivery("Rua A, 10").with_payment_method("Pix");
        let outcome = session.dispatch(Command::Submit { context });

        match outcome {
            Outcome::Submitted { message, handoff, render } => {
                assert!(handoff.is_some());
                assert!(message.lines().contains(&"Total: R$ 28,00".to_string()));
                assert_eq!(render.mode, FulfillmentMode::Delivery);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        let sent = recorder.0.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("%0AEndereço: Rua%20A%2C%2010%0A"));
        // Submitting leaves the cart as it was.
        assert_eq!(session.cart().item_count(), 1);
    }

    #[test]
    fn test_failed_handoff_still_returns_message() {
        let mut session = Session::new(&ShopSettings::default())
            .unwrap()
            .with_submitter(Failing);
        session.dispatch(add(&calabresa(), "BROTO", None));

        let outcome = session.dispatch(Command::Submit {
            context: OrderContext::pickup(),
        });
        assert!(matches!(outcome, Outcome::Submitted { handoff: None, .. }));
    }

    #[test]
    fn test_format_order_leaves_cart_alone() {
        let mut session = Session::new(&ShopSettings::default()).unwrap();
        assert_eq!(
            session.format_order(&OrderContext::pickup()),
            Err(CartError::EmptyCart)
        );

        session.dispatch(add(&calabresa(), "BROTO", None));
        let message = session
            .format_order(&OrderContext::delivery("Rua A, 10"))
            .unwrap();
        assert!(message.lines().contains(&"Total: R$ 28,00".to_string()));
        assert_eq!(session.mode(), FulfillmentMode::Pickup);
        assert_eq!(session.cart().item_count(), 1);
    }

    #[test]
    fn test_sink_sees_every_render() {
        let screen = Screen::default();
        let mut session = Session::new(&ShopSettings::default())
            .unwrap()
            .with_sink(screen.clone());

        session.dispatch(add(&calabresa(), "BROTO", None));
        session.dispatch(Command::RemoveLine { index: 0 });

        assert_eq!(*screen.0.borrow(), ["Total: R$ 20,00", "Total: R$ 0,00"]);
    }

    #[test]
    fn test_command_from_json() {
        let command: Command = serde_json::from_str(
            r#"{"command": "set_fulfillment_mode", "mode": "delivery"}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            Command::SetFulfillmentMode {
                mode: FulfillmentMode::Delivery
            }
        );
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = ShopSettings {
            delivery_fee: f64::NAN,
            ..Default::default()
        };
        assert!(Session::new(&settings).is_err());
    }
}
