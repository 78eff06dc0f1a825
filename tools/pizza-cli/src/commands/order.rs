//! Run an order script.

use anyhow::{anyhow, bail, Context as _, Result};
use pizza_cart::prelude::*;
use serde_json::json;
use tracing::info;

use super::OrderArgs;
use crate::context::Context;
use crate::script::OrderScript;

/// What running a script left on screen.
#[derive(Debug)]
enum OrderReport {
    /// Dry run: the cart and the message that would go out.
    Preview {
        render: CartRender,
        message: Option<OrderMessage>,
    },
    /// The order was submitted.
    Sent {
        render: CartRender,
        message: OrderMessage,
        handoff: Option<Handoff>,
    },
    /// Submission was refused (empty cart).
    Refused { render: CartRender, warning: String },
}

/// Run the order command.
pub fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.script);
    let mut script = OrderScript::load(&path)?;
    apply_overrides(&mut script, &args)?;

    let mut session = Session::new(&ctx.config.shop).context("Invalid shop settings")?;

    ctx.output.header(&format!("Order: {}", path.display()));
    info!(script = %path.display(), actions = script.actions.len(), "running order script");

    let report = run_script(
        &mut session,
        &script,
        &ctx.menu(),
        args.dry_run,
        |command, outcome| {
            ctx.output.debug(command);
            if args.trace {
                ctx.output.cart(outcome.render());
            }
        },
    )?;

    match report {
        OrderReport::Preview { render, message } => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "cart": render,
                    "message": message.as_ref().map(|m| m.lines()),
                }));
                return Ok(());
            }

            ctx.output.cart(&render);
            match message {
                Some(message) => {
                    ctx.output.header("Message (not sent)");
                    println!("{}", message.to_text());
                }
                None => ctx.output.warn(&ctx.config.shop.labels().empty_cart),
            }
            Ok(())
        }
        OrderReport::Sent {
            render,
            message,
            handoff,
        } => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "cart": render,
                    "message": message.lines(),
                    "handoff": handoff,
                }));
            } else {
                ctx.output.cart(&render);
                ctx.output.header("Message");
                println!("{}", message.to_text());
            }

            match handoff {
                Some(handoff) => {
                    ctx.output.success(&format!("Order ready on {}", handoff.channel));
                    ctx.output.kv("open", &handoff.target);
                    Ok(())
                }
                None => bail!("Order could not be handed off"),
            }
        }
        OrderReport::Refused { render, warning } => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "cart": render, "warning": warning }));
            }
            ctx.output.warn(&warning);
            bail!("Order not sent")
        }
    }
}

/// Apply `--mode` and `--address` on top of the script's context.
fn apply_overrides(script: &mut OrderScript, args: &OrderArgs) -> Result<()> {
    if let Some(mode) = &args.mode {
        script.context.mode = mode
            .parse()
            .map_err(|_| anyhow!("Unknown mode: {} (expected pickup or delivery)", mode))?;
    }
    if let Some(address) = &args.address {
        script.context.address = address.clone();
    }
    Ok(())
}

/// Dispatch every scripted action, then submit or preview.
///
/// `on_step` sees each command name and its outcome.
fn run_script(
    session: &mut Session,
    script: &OrderScript,
    menu: &Menu,
    dry_run: bool,
    mut on_step: impl FnMut(&str, &Outcome),
) -> Result<OrderReport> {
    for command in script.commands(menu)? {
        let name = command.name();
        let outcome = session.dispatch(command);
        on_step(name, &outcome);
    }

    let context = &script.context;
    if dry_run || !script.submit {
        // Show the cart under the mode the message is written for.
        let outcome = session.dispatch(Command::SetFulfillmentMode { mode: context.mode });
        let message = match session.format_order(context) {
            Ok(message) => Some(message),
            Err(CartError::EmptyCart) => None,
            Err(e) => return Err(e.into()),
        };
        return Ok(OrderReport::Preview {
            render: outcome.render().clone(),
            message,
        });
    }

    Ok(
        match session.dispatch(Command::Submit {
            context: context.clone(),
        }) {
            Outcome::Submitted {
                message,
                handoff,
                render,
            } => OrderReport::Sent {
                render,
                message,
                handoff,
            },
            Outcome::Refused { warning, render } => OrderReport::Refused { render, warning },
            Outcome::Rendered(render) => OrderReport::Preview {
                render,
                message: None,
            },
        },
    )
}
