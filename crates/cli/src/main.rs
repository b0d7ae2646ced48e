//! RocketShoes CLI - The storefront cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart contents and total
//! rocket-cli cart show
//!
//! # Add one unit of product 1
//! rocket-cli cart add 1
//!
//! # Remove product 1 entirely
//! rocket-cli cart remove 1
//!
//! # Set product 1 to 3 units
//! rocket-cli cart set 1 3
//! ```
//!
//! # Commands
//!
//! - `cart show` - Print the cart contents and total
//! - `cart add` - Add one unit of a product (validated against stock)
//! - `cart remove` - Remove a product entirely
//! - `cart set` - Set a product's quantity (validated against stock)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rocket_shoes_core::ProductId;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "rocket-cli")]
#[command(author, version, about = "RocketShoes storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and mutate the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart contents and total
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product entirely
    Remove { product_id: ProductId },
    /// Set a product's quantity
    Set { product_id: ProductId, amount: i64 },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Local overrides for API URL and data dir
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to warnings only; the CLI's own output goes to stdout/stderr
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocket_shoes_cart=warn,rocket_cli=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config).await,
            CartAction::Add { product_id } => commands::cart::add(&config, product_id).await,
            CartAction::Remove { product_id } => commands::cart::remove(&config, product_id).await,
            CartAction::Set { product_id, amount } => {
                commands::cart::set(&config, product_id, amount).await
            }
        },
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
