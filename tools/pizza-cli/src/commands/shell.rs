//! Interactive ordering shell.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input, Select};
use pizza_cart::catalog::NO_HALF;
use pizza_cart::prelude::*;

use super::ShellArgs;
use crate::context::Context;
use crate::output::Output;

/// Prints the cart panel after every change.
struct TerminalSink {
    output: Output,
}

impl CartSink for TerminalSink {
    fn show(&mut self, render: &CartRender) {
        if render.panel_open {
            self.output.cart(render);
        } else {
            self.output.info(&format!(
                "{} item(s) | {}",
                render.item_count, render.total_line
            ));
        }
    }
}

#[derive(Clone, Copy)]
enum Choice {
    Add,
    Remove,
    Mode,
    TogglePanel,
    Clear,
    Send,
    Quit,
}

const CHOICES: [Choice; 7] = [
    Choice::Add,
    Choice::Remove,
    Choice::Mode,
    Choice::TogglePanel,
    Choice::Clear,
    Choice::Send,
    Choice::Quit,
];

/// Run the shell command.
pub fn run(args: ShellArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The shell is interactive and has no JSON output");
    }

    let menu = ctx.menu();
    if menu.is_empty() {
        bail!("The menu is empty. Run `pizza config init` to create a sample menu.");
    }

    let mut session = Session::new(&ctx.config.shop)
        .context("Invalid shop settings")?
        .with_sink(TerminalSink {
            output: ctx.output.clone(),
        });
    let labels = ctx.config.shop.labels();

    if args.delivery {
        session.dispatch(Command::SetFulfillmentMode {
            mode: FulfillmentMode::Delivery,
        });
    }

    ctx.output.header("Pizza shell");

    loop {
        let items: Vec<String> = CHOICES
            .iter()
            .map(|choice| choice_label(*choice, &session, &labels))
            .collect();

        let selection = Select::new()
            .with_prompt("What next?")
            .items(&items)
            .default(0)
            .interact()?;

        let command = match CHOICES[selection] {
            Choice::Add => Some(pick_item(&menu, ctx)?),
            Choice::Remove => pick_line(&session, ctx)?,
            Choice::Mode => Some(pick_mode(&labels)?),
            Choice::TogglePanel if session.is_panel_open() => Some(Command::CloseCart),
            Choice::TogglePanel => Some(Command::OpenCart),
            Choice::Clear => Confirm::new()
                .with_prompt("Clear the cart?")
                .default(false)
                .interact()?
                .then_some(Command::ClearCart),
            Choice::Send => {
                if send(&mut session, &args, ctx)? {
                    return Ok(());
                }
                None
            }
            Choice::Quit => return Ok(()),
        };

        if let Some(command) = command {
            ctx.output.debug(command.name());
            session.dispatch(command);
        }
    }
}

fn choice_label(choice: Choice, session: &Session, labels: &MessageLabels) -> String {
    match choice {
        Choice::Add => "Add item".to_string(),
        Choice::Remove => "Remove item".to_string(),
        Choice::Mode => format!("{} ({})", labels.order_type, labels.mode(session.mode())),
        Choice::TogglePanel if session.is_panel_open() => "Hide cart".to_string(),
        Choice::TogglePanel => format!("Show cart ({})", session.cart().item_count()),
        Choice::Clear => "Clear cart".to_string(),
        Choice::Send => "Send order".to_string(),
        Choice::Quit => "Quit".to_string(),
    }
}

fn pick_item(menu: &Menu, ctx: &Context) -> Result<Command> {
    let currency = ctx.config.shop.currency;
    let names: Vec<&str> = menu.products.iter().map(|p| p.name.as_str()).collect();
    let product = &menu.products[Select::new()
        .with_prompt("Product")
        .items(&names)
        .default(0)
        .interact()?];

    let size = if product.sizes.is_empty() {
        None
    } else {
        let options: Vec<String> = product
            .sizes
            .iter()
            .map(|s| s.option_text(currency))
            .collect();
        let picked = Select::new()
            .with_prompt("Size")
            .items(&options)
            .default(0)
            .interact()?;
        Some(product.sizes[picked].label.as_str())
    };

    let half = if product.halves.is_empty() {
        None
    } else {
        let mut options = vec![NO_HALF];
        options.extend(product.halves.iter().map(String::as_str));
        let picked = Select::new()
            .with_prompt("Second half")
            .items(&options)
            .default(0)
            .interact()?;
        Some(options[picked])
    };

    match product.configure(size, half) {
        Some(config) => Ok(Command::AddItem { config }),
        None => bail!("{} cannot be configured that way", product.name),
    }
}

fn pick_line(session: &Session, ctx: &Context) -> Result<Option<Command>> {
    let render = session.render();
    if render.is_empty() {
        ctx.output.warn("Cart is empty");
        return Ok(None);
    }

    let rows: Vec<String> = render
        .rows
        .iter()
        .map(|r| format!("{}  {}", r.description(), r.price_text))
        .collect();
    let picked = Select::new()
        .with_prompt("Remove one of")
        .items(&rows)
        .default(0)
        .interact()?;

    Ok(Some(render.rows[picked].remove_command()))
}

fn pick_mode(labels: &MessageLabels) -> Result<Command> {
    let modes = [FulfillmentMode::Pickup, FulfillmentMode::Delivery];
    let names: Vec<&str> = modes.iter().map(|m| labels.mode(*m)).collect();
    let picked = Select::new()
        .with_prompt(labels.order_type.as_str())
        .items(&names)
        .default(0)
        .interact()?;

    Ok(Command::SetFulfillmentMode {
        mode: modes[picked],
    })
}

/// Ask for the order details and submit. Returns true once the order is out.
fn send(session: &mut Session, args: &ShellArgs, ctx: &Context) -> Result<bool> {
    let labels = ctx.config.shop.labels();

    let mut order = OrderContext {
        mode: session.mode(),
        ..Default::default()
    };
    if !session.cart().is_empty() {
        if order.mode.is_delivery() {
            order.address = Input::<String>::new()
                .with_prompt(labels.address.as_str())
                .allow_empty(true)
                .interact_text()?;
        }
        order.payment_method = Input::<String>::new()
            .with_prompt(labels.payment_method.as_str())
            .allow_empty(true)
            .interact_text()?;
        order.change_due = Input::<String>::new()
            .with_prompt("Change for (empty for none)")
            .allow_empty(true)
            .interact_text()?;

        if !args.yes
            && !Confirm::new()
                .with_prompt("Send the order?")
                .default(true)
                .interact()?
        {
            ctx.output.warn("Order not sent");
            return Ok(false);
        }
    }

    match session.dispatch(Command::Submit { context: order }) {
        Outcome::Submitted {
            message, handoff, ..
        } => {
            ctx.output.header("Message");
            println!("{}", message.to_text());
            match handoff {
                Some(handoff) => {
                    ctx.output.success(&format!("Order ready on {}", handoff.channel));
                    ctx.output.kv("open", &handoff.target);
                    Ok(true)
                }
                None => {
                    ctx.output.warn("Order could not be handed off; the cart is unchanged");
                    Ok(false)
                }
            }
        }
        Outcome::Refused { warning, .. } => {
            ctx.output.warn(&warning);
            Ok(false)
        }
        Outcome::Rendered(_) => Ok(false),
    }
}
