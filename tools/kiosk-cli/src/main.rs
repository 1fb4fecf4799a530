//! Kiosk CLI - Browse studio sessions and manage your cart and preferences.
//!
//! Commands:
//! - `kiosk sessions` - List sessions with preferences applied
//! - `kiosk cart` - Show and mutate the cart
//! - `kiosk prefs` - Show and edit the stored preferences
//! - `kiosk config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, ConfigArgs, PrefsArgs, SessionsArgs};

/// Kiosk CLI - Browse sessions, keep a cart, tune your preferences
#[derive(Parser)]
#[command(name = "kiosk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Use an in-memory store (nothing persists)
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sessions with preferences applied
    Sessions(SessionsArgs),

    /// Show and mutate the cart
    Cart(CartArgs),

    /// Show and edit the stored preferences
    Prefs(PrefsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose maps to debug for our crates.
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "kiosk={level},kiosk_store={level},kiosk_commerce={level},kiosk_catalog={level}"
            ))
        }))
        .with_writer(std::io::stderr)
        .init();

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config and open the store
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.ephemeral, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Sessions(args) => commands::sessions::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Prefs(args) => commands::prefs::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
