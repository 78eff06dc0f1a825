//! CLI command implementations.

pub mod config;
pub mod menu;
pub mod order;
pub mod shell;

use clap::{Args, Subcommand};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Show a single product.
    pub product: Option<String>,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Path to the order script (TOML or JSON).
    pub script: String,

    /// Override the script's fulfillment mode (pickup or delivery).
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Override the delivery address.
    #[arg(short, long)]
    pub address: Option<String>,

    /// Run the actions but do not send the order.
    #[arg(long)]
    pub dry_run: bool,

    /// Print every intermediate cart.
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for the shell command.
#[derive(Args)]
pub struct ShellArgs {
    /// Start in delivery mode.
    #[arg(long)]
    pub delivery: bool,

    /// Skip the confirmation before sending.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated, e.g. shop.delivery_fee).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file with a sample menu.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
