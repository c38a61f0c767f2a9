//! Pinaka CLI - Inspect and edit the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart (add --json for machine-readable output)
//! pinaka-cart show
//!
//! # Add a product
//! pinaka-cart add --product-id p-1 --name Teapot --sku TP-001 --price 1250000 --stock 4
//!
//! # Add a product from a saved catalog API response
//! pinaka-cart add-product product.json --quantity 2
//!
//! # Change a line's quantity (zero or less removes it)
//! pinaka-cart update <LINE_ID> 3
//!
//! # Remove a line, or everything
//! pinaka-cart remove <LINE_ID>
//! pinaka-cart clear
//! ```
//!
//! # Commands
//!
//! - `show` - List lines and totals
//! - `totals` - Print item count and subtotal
//! - `add` / `add-product` - Add a product (merges with an existing line)
//! - `update` - Set a line's quantity
//! - `remove` - Remove a line
//! - `clear` - Empty the cart
//!
//! Storage location, currency and logging are configured through the
//! environment; see `pinaka_storefront::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pinaka_storefront::{CartContext, ConfigError, FileStorage, StorefrontConfig};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::cart::AddArgs;

#[derive(Parser)]
#[command(name = "pinaka-cart")]
#[command(author, version, about = "Pinaka cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cart lines and totals
    Show {
        /// Print the cart summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the item count and subtotal
    Totals,
    /// Add a product to the cart
    Add {
        /// Catalog product ID
        #[arg(long)]
        product_id: String,

        /// Product display name
        #[arg(long)]
        name: String,

        /// Product SKU
        #[arg(long)]
        sku: String,

        /// Unit price
        #[arg(long, value_parser = parse_price)]
        price: Decimal,

        /// Units in stock
        #[arg(long)]
        stock: u32,

        /// Units to add
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Add a product from a catalog JSON file
    AddProduct {
        /// Path to the product JSON
        file: PathBuf,

        /// Units to add
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Set a line's quantity; zero or less removes the line
    Update {
        /// Line item ID
        line_id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Line item ID
        line_id: String,
    },
    /// Empty the cart
    Clear,
}

fn parse_price(s: &str) -> Result<Decimal, String> {
    let price: Decimal = s.parse().map_err(|e| format!("invalid price: {e}"))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err("price must not be negative".to_string());
    }
    Ok(price)
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

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

/// Initialize tracing with `EnvFilter` and Sentry integration.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(config: &StorefrontConfig) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pinaka_storefront=info,pinaka_cli=info".into());

    let json_layer = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!config.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env();

    // Logging falls back to defaults so a bad configuration is still reported
    let logging = config.as_ref().map_or_else(|_| StorefrontConfig::default(), Clone::clone);

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry(&logging);
    init_tracing(&logging);

    if let Err(e) = execute(cli, config) {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

fn execute(
    cli: Cli,
    config: Result<StorefrontConfig, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config.map_err(|e| format!("Invalid configuration: {e}"))?;
    run(cli, config)
}

fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(dir = %config.cart_dir.display(), key = %config.cart_key, "Opening cart");
    let ctx = CartContext::<FileStorage>::from_config(config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Show { json } => commands::cart::show(&ctx, json, &mut out)?,
        Commands::Totals => commands::cart::totals(&ctx, &mut out)?,
        Commands::Add {
            product_id,
            name,
            sku,
            price,
            stock,
            quantity,
            image,
        } => {
            let args = AddArgs {
                product_id,
                name,
                sku,
                price,
                stock,
                quantity,
                image,
            };
            commands::cart::add(&ctx, args, &mut out)?;
        }
        Commands::AddProduct { file, quantity } => {
            commands::cart::add_product(&ctx, &file, quantity, &mut out)?;
        }
        Commands::Update { line_id, quantity } => {
            commands::cart::update(&ctx, &line_id, quantity)?;
        }
        Commands::Remove { line_id } => commands::cart::remove(&ctx, &line_id)?,
        Commands::Clear => commands::cart::clear(&ctx)?,
    }
    Ok(())
}
