//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod prefs;
pub mod sessions;

use clap::{Args, Subcommand};

/// Arguments for the sessions command.
#[derive(Args)]
pub struct SessionsArgs {
    /// Show only sessions whose name or description contains this text.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and the total.
    Show,

    /// Add one unit of a session, budget permitting.
    Add {
        /// Session id.
        id: u64,
    },

    /// Remove one unit of a session.
    Remove {
        /// Session id.
        id: u64,
    },

    /// Empty the cart.
    Clear,
}

/// Arguments for the prefs command.
#[derive(Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: Option<PrefsCommand>,
}

#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Show the stored preferences.
    Show,

    /// Edit preferences interactively.
    Edit,

    /// Set preference fields without prompts.
    Set(PrefsSetArgs),

    /// Restore the default preferences.
    Reset,
}

/// Arguments for `prefs set`.
#[derive(Args)]
pub struct PrefsSetArgs {
    /// Display name; pass an empty string to go anonymous.
    #[arg(long)]
    pub name: Option<String>,

    /// Budget in whole euros; pass an empty string to remove it.
    #[arg(long)]
    pub max_budget: Option<String>,

    /// Sort field: id, name, or price.
    #[arg(long)]
    pub sort_key: Option<String>,

    /// Sort direction: asc or desc.
    #[arg(long)]
    pub sort_dir: Option<String>,

    /// Hide sessions above the budget: true or false.
    #[arg(long)]
    pub filter_under_budget: Option<bool>,
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

    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
