//! Order message formatting.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::cart::{CartStore, FulfillmentMode, PricingEngine};
use crate::checkout::{ChangeDue, OrderContext};
use crate::error::CartError;
use crate::money::Money;
use crate::settings::Language;

/// Characters left alone by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Line separator of the transport payload (an encoded newline).
pub const TRANSPORT_LINE_BREAK: &str = "%0A";

/// Percent-encode free text for a URL query component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Fixed texts of the order message and cart view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageLabels {
    pub greeting: String,
    pub total: String,
    pub order_type: String,
    pub address: String,
    pub payment_method: String,
    pub no_change: String,
    pub change_for: String,
    pub pickup: String,
    pub delivery: String,
    pub empty_cart: String,
}

impl MessageLabels {
    /// The shop's own Portuguese texts.
    pub fn portuguese() -> Self {
        Self {
            greeting: "Olá, gostaria de fazer o pedido:".into(),
            total: "Total".into(),
            order_type: "Tipo de Pedido".into(),
            address: "Endereço".into(),
            payment_method: "Forma de Pagamento".into(),
            no_change: "Não precisa de troco".into(),
            change_for: "Precisa de troco para".into(),
            pickup: "Retirada".into(),
            delivery: "Entrega".into(),
            empty_cart: "Seu carrinho está vazio!".into(),
        }
    }

    pub fn english() -> Self {
        Self {
            greeting: "Hello, I would like to place an order:".into(),
            total: "Total".into(),
            order_type: "Order type".into(),
            address: "Address".into(),
            payment_method: "Payment method".into(),
            no_change: "no change needed".into(),
            change_for: "change needed for".into(),
            pickup: "Pickup".into(),
            delivery: "Delivery".into(),
            empty_cart: "Your cart is empty!".into(),
        }
    }

    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Portuguese => Self::portuguese(),
            Language::English => Self::english(),
        }
    }

    /// Label for a fulfillment mode.
    pub fn mode(&self, mode: FulfillmentMode) -> &str {
        match mode {
            FulfillmentMode::Pickup => &self.pickup,
            FulfillmentMode::Delivery => &self.delivery,
        }
    }

    /// `"Total: R$ 48,00"`.
    pub fn total_line(&self, total: &Money) -> String {
        format!("{}: {}", self.total, total.display())
    }
}

impl Default for MessageLabels {
    fn default() -> Self {
        Self::portuguese()
    }
}

/// A formatted order, one entry per message line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderMessage {
    lines: Vec<String>,
}

impl OrderMessage {
    /// Message lines in order; blank lines are empty strings.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Human-readable text, lines joined by newlines.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Payload for a messaging deep link, newlines encoded as `%0A`.
    pub fn to_transport(&self) -> String {
        self.lines.join(TRANSPORT_LINE_BREAK)
    }
}

/// Turns a cart plus order context into an [`OrderMessage`].
#[derive(Debug, Clone)]
pub struct OrderMessageFormatter {
    labels: MessageLabels,
    pricing: PricingEngine,
}

impl OrderMessageFormatter {
    pub fn new(labels: MessageLabels, pricing: PricingEngine) -> Self {
        Self { labels, pricing }
    }

    pub fn labels(&self) -> &MessageLabels {
        &self.labels
    }

    /// Format the order.
    ///
    /// Refuses an empty cart. Lines for data the customer did not give
    /// (address on pickup, no payment method) are left out entirely.
    pub fn format(&self, cart: &CartStore, ctx: &OrderContext) -> Result<OrderMessage, CartError> {
        if cart.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let labels = &self.labels;
        let mut lines = Vec::with_capacity(cart.line_count() + 7);
        lines.push(labels.greeting.clone());

        for item in cart.lines() {
            lines.push(format!(
                "- {}x {} - {}",
                item.quantity,
                item.name,
                item.total_price().display()
            ));
        }

        let total = self.pricing.total(cart, ctx.mode);
        lines.push(String::new());
        lines.push(labels.total_line(&total));
        lines.push(format!("{}: {}", labels.order_type, labels.mode(ctx.mode)));

        if let Some(address) = ctx.delivery_address() {
            lines.push(format!("{}: {}", labels.address, encode_component(address)));
        }
        if let Some(method) = ctx.payment_method() {
            lines.push(format!("{}: {}", labels.payment_method, method));
        }

        lines.push(match ctx.change_due() {
            ChangeDue::NotNeeded => labels.no_change.clone(),
            ChangeDue::For(amount) => format!(
                "{} {} {}",
                labels.change_for,
                cart.currency().symbol(),
                amount
            ),
        });

        Ok(OrderMessage { lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn formatter(labels: MessageLabels) -> OrderMessageFormatter {
        OrderMessageFormatter::new(
            labels,
            PricingEngine::new(Money::new(800, Currency::BRL)),
        )
    }

    fn pizza_cart() -> CartStore {
        let mut cart = CartStore::new(Currency::BRL);
        cart.add_amount("Pizza (Grande)", 20.0);
        cart.add_amount("Pizza (Grande)", 20.0);
        cart
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Rua A, 10 - Apto 2"), "Rua%20A%2C%2010%20-%20Apto%202");
        assert_eq!(encode_component("São Paulo"), "S%C3%A3o%20Paulo");
        assert_eq!(encode_component("(fundos)!*'~._"), "(fundos)!*'~._");
        assert_eq!(encode_component("a&b=c#d"), "a%26b%3Dc%23d");
    }

    #[test]
    fn test_full_delivery_message() {
        let ctx = OrderContext::delivery("Rua A, 10")
            .with_payment_method("Pix")
            .with_change_due("50,00");
        let message = formatter(MessageLabels::portuguese())
            .format(&pizza_cart(), &ctx)
            .unwrap();

        assert_eq!(
            message.lines(),
            [
                "Olá, gostaria de fazer o pedido:",
                "- 2x Pizza (Grande) - R$ 40,00",
                "",
                "Total: R$ 48,00",
                "Tipo de Pedido: Entrega",
                "Endereço: Rua%20A%2C%2010",
                "Forma de Pagamento: Pix",
                "Precisa de troco para R$ 50,00",
            ]
        );
        assert!(message
            .to_transport()
            .starts_with("Olá, gostaria de fazer o pedido:%0A- 2x Pizza (Grande) - R$ 40,00%0A%0ATotal"));
    }

    #[test]
    fn test_pickup_omits_address() {
        let mut ctx = OrderContext::pickup().with_payment_method("Dinheiro");
        ctx.address = "Rua A, 10".into();
        let message = formatter(MessageLabels::portuguese())
            .format(&pizza_cart(), &ctx)
            .unwrap();

        assert!(message.lines().iter().all(|l| !l.starts_with("Endereço")));
        assert!(message.lines().contains(&"Total: R$ 40,00".to_string()));
        assert!(message.lines().contains(&"Tipo de Pedido: Retirada".to_string()));
    }

    #[test]
    fn test_missing_payment_method_is_omitted() {
        let message = formatter(MessageLabels::portuguese())
            .format(&pizza_cart(), &OrderContext::pickup())
            .unwrap();
        assert!(message.lines().iter().all(|l| !l.starts_with("Forma de Pagamento")));
        assert_eq!(message.lines().last().map(String::as_str), Some("Não precisa de troco"));
    }

    #[test]
    fn test_english_change_lines() {
        let f = formatter(MessageLabels::english());

        let ctx = OrderContext::pickup().with_change_due("0,00");
        let message = f.format(&pizza_cart(), &ctx).unwrap();
        assert_eq!(message.lines().last().map(String::as_str), Some("no change needed"));

        let ctx = OrderContext::pickup().with_change_due("5,00");
        let message = f.format(&pizza_cart(), &ctx).unwrap();
        assert_eq!(
            message.lines().last().map(String::as_str),
            Some("change needed for R$ 5,00")
        );
    }

    #[test]
    fn test_empty_cart_is_refused() {
        let cart = CartStore::new(Currency::BRL);
        let result = formatter(MessageLabels::portuguese()).format(&cart, &OrderContext::pickup());
        assert_eq!(result, Err(CartError::EmptyCart));
    }

    #[test]
    fn test_text_uses_newlines() {
        let message = formatter(MessageLabels::english())
            .format(&pizza_cart(), &OrderContext::pickup())
            .unwrap();
        assert_eq!(message.to_text().lines().count(), message.lines().len());
        assert!(!message.to_text().contains(TRANSPORT_LINE_BREAK));
    }
}
