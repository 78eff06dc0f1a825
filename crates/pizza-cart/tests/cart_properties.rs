//! Behaviour of the cart core across whole sequences of actions.

use std::collections::HashSet;

use pizza_cart::prelude::*;

fn brl(amount: f64) -> Money {
    Money::from_decimal(amount, Currency::BRL)
}

/// A fixed mix of repeated and distinct (name, price) pairs.
fn additions() -> Vec<(&'static str, f64)> {
    vec![
        ("Calabresa (BROTO)", 20.0),
        ("Calabresa (GRANDE)", 45.0),
        ("Calabresa (BROTO)", 20.0),
        ("Calabresa (BROTO)", 22.0),
        ("Refrigerante", 7.5),
        ("Calabresa (GRANDE) \u{2014} Meio: Mussarela", 45.0),
        ("Calabresa (GRANDE)", 45.0),
        ("Refrigerante", 7.5),
        ("Calabresa (BROTO)", 20.0),
    ]
}

#[test]
fn item_count_matches_number_of_adds() {
    let mut cart = CartStore::new(Currency::BRL);
    for (name, price) in additions() {
        cart.add(name, brl(price)).unwrap();
    }

    let distinct: HashSet<(&str, i64)> = additions()
        .into_iter()
        .map(|(name, price)| (name, brl(price).amount_cents))
        .collect();

    assert_eq!(cart.item_count(), additions().len() as u64);
    assert_eq!(cart.line_count(), distinct.len());
}

#[test]
fn repeated_remove_empties_the_line() {
    let mut cart = CartStore::new(Currency::BRL);
    for (name, price) in additions() {
        cart.add(name, brl(price)).unwrap();
    }
    let first = cart.get(0).cloned().unwrap();
    let lines_before = cart.line_count();

    for _ in 0..first.quantity {
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        cart.decrement_or_remove(0).unwrap();
    }

    assert_eq!(cart.line_count(), lines_before - 1);
    assert!(cart.lines().iter().all(|l| l.name != first.name || l.unit_price != first.unit_price));
    assert!(cart.lines().iter().all(|l| l.quantity >= 1));
}

#[test]
fn subtotal_ignores_add_order() {
    let forward = additions();
    let mut reversed = additions();
    reversed.reverse();
    let mut rotated = additions();
    rotated.rotate_left(4);

    let subtotal = |adds: &[(&str, f64)]| {
        let mut cart = CartStore::new(Currency::BRL);
        for (name, price) in adds {
            cart.add(*name, brl(*price)).unwrap();
        }
        cart.subtotal()
    };

    assert_eq!(subtotal(&forward), subtotal(&reversed));
    assert_eq!(subtotal(&forward), subtotal(&rotated));
    assert_eq!(subtotal(&forward).display(), "R$ 232,00");
}

#[test]
fn delivery_adds_exactly_the_fee() {
    let settings = ShopSettings::default();
    let engine = settings.pricing_engine();
    let mut cart = CartStore::new(Currency::BRL);
    for (name, price) in additions() {
        cart.add(name, brl(price)).unwrap();
    }

    let pickup = engine.total(&cart, FulfillmentMode::Pickup);
    let delivery = engine.total(&cart, FulfillmentMode::Delivery);
    let back = engine.total(&cart, FulfillmentMode::Pickup);

    assert_eq!(
        delivery.amount_cents - pickup.amount_cents,
        settings.delivery_fee().amount_cents
    );
    assert_eq!(back, pickup);
}

#[test]
fn option_text_prices() {
    let resolver = PriceResolver::new(Currency::BRL);
    assert_eq!(
        resolver.resolve_option_text(Some("BROTO - R$ 20,00 (4 fatias)"), None),
        brl(20.0)
    );
    assert_eq!(
        resolver.resolve_option_text(Some("GRANDE - R$ 1.234,56 (8 fatias)"), None),
        brl(1234.56)
    );
    assert_eq!(
        resolver.resolve_option_text(Some("GRANDE (8 fatias)"), Some(39.9)),
        brl(39.9)
    );
}

#[test]
fn two_large_pizzas_delivered() {
    let mut session = Session::new(&ShopSettings::default()).unwrap();
    let config = ProductConfig::from_option_text("Pizza", Some("Grande - R$ 20,00"), None);

    session.dispatch(Command::AddItem { config: config.clone() });
    session.dispatch(Command::AddItem { config });
    let outcome = session.dispatch(Command::SetFulfillmentMode {
        mode: FulfillmentMode::Delivery,
    });

    let render = outcome.render();
    assert_eq!(render.rows[0].name, "Pizza (Grande)");
    assert_eq!(render.rows[0].quantity, 2);
    assert_eq!(render.total_line, "Total: R$ 48,00");
}

#[test]
fn empty_submit_leaves_cart_untouched() {
    let mut session = Session::new(&ShopSettings::default()).unwrap();
    let before = session.cart().clone();

    let outcome = session.dispatch(Command::Submit {
        context: OrderContext::delivery("Rua A, 10"),
    });

    assert!(matches!(outcome, Outcome::Refused { .. }));
    assert_eq!(session.cart(), &before);
}

#[test]
fn change_due_lines() {
    let settings = ShopSettings {
        language: Language::English,
        ..Default::default()
    };
    let formatter = OrderMessageFormatter::new(settings.labels(), settings.pricing_engine());
    let mut cart = CartStore::new(Currency::BRL);
    cart.add_amount("Pizza (Grande)", 20.0);

    let last_line = |change: &str| {
        let ctx = OrderContext::pickup().with_change_due(change);
        formatter
            .format(&cart, &ctx)
            .unwrap()
            .lines()
            .last()
            .cloned()
            .unwrap()
    };

    assert_eq!(last_line("0,00"), "no change needed");
    assert_eq!(last_line("5,00"), "change needed for R$ 5,00");
}

#[test]
fn whatsapp_link_from_session() {
    let mut session = Session::new(&ShopSettings::default()).unwrap();
    session.dispatch(Command::AddItem {
        config: ProductConfig::from_option_text("Pizza", Some("Broto - R$ 20,00"), None),
    });

    let outcome = session.dispatch(Command::Submit {
        context: OrderContext::pickup().with_payment_method("Pix"),
    });
    match outcome {
        Outcome::Submitted {
            handoff: Some(handoff),
            ..
        } => {
            assert!(handoff
                .target
                .starts_with("https://wa.me/5511999999999?text=Olá, gostaria de fazer o pedido:%0A"));
            assert!(handoff.target.ends_with("%0ANão precisa de troco"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}
