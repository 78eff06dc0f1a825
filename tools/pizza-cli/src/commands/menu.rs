//! Show the menu.

use anyhow::{bail, Result};
use pizza_cart::catalog::Product;
use pizza_cart::Currency;

use super::MenuArgs;
use crate::context::Context;

/// Run the menu command.
pub fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let menu = ctx.menu();
    let currency = ctx.config.shop.currency;

    let products: Vec<&Product> = match &args.product {
        Some(name) => match menu.find(name) {
            Some(product) => vec![product],
            None => bail!("Unknown product: {}", name),
        },
        None => menu.products.iter().collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    if products.is_empty() {
        ctx.output.warn("The menu is empty. Run `pizza config init` to create a sample menu.");
        return Ok(());
    }

    ctx.output.header("Menu");
    for product in products {
        show_product(product, currency, ctx);
    }

    Ok(())
}

fn show_product(product: &Product, currency: Currency, ctx: &Context) {
    ctx.output.info("");
    ctx.output.info(&product.name);

    if let Some(price) = product.price {
        let price = pizza_cart::Money::from_decimal(price, currency);
        ctx.output.kv("price", &price.display());
    }
    for size in &product.sizes {
        ctx.output.list_item(&size.option_text(currency));
    }
    if !product.halves.is_empty() {
        ctx.output.kv("half", &product.halves.join(", "));
    }
}
