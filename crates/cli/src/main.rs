//! Nxt Trendz CLI - drive the storefront state from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Store the bearer token issued by the login API
//! nxt-cli login --token eyJhbGciOi...
//!
//! # Show a product and add two of it to the cart
//! nxt-cli product 16 --add --quantity 2
//!
//! # Inspect and edit the cart
//! nxt-cli cart list
//! nxt-cli cart inc 16
//! nxt-cli cart clear
//!
//! # Check where a path would lead
//! nxt-cli navigate /products/16
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` - Manage the stored token
//! - `product` - Load a product and its similar products
//! - `cart` - List or edit the persisted cart
//! - `navigate` - Resolve a path through the auth gate

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nxt_trendz_core::ProductId;
use nxt_trendz_storefront::config::StorefrontConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "nxt-cli")]
#[command(author, version, about = "Nxt Trendz storefront CLI")]
struct Cli {
    /// Directory holding local storage and cookies (overrides `NXT_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a bearer token
    Login {
        /// Token returned by the login API
        #[arg(short, long)]
        token: String,
    },
    /// Forget the stored token
    Logout,
    /// Load a product and its similar products
    Product {
        /// Product ID
        id: ProductId,

        /// Add the product to the cart after loading it
        #[arg(long)]
        add: bool,

        /// Quantity to select before adding (default 1)
        #[arg(short, long, requires = "add")]
        quantity: Option<u32>,
    },
    /// Inspect or edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show what a path resolves to
    Navigate {
        /// Path such as `/products/16`
        path: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart entries and the order total
    List,
    /// Load a product and add it to the cart
    Add {
        /// Product ID
        id: ProductId,

        /// Quantity to add
        #[arg(short, long)]
        quantity: Option<u32>,
    },
    /// Remove an entry
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Increase an entry's quantity by one
    Inc {
        /// Product ID
        id: ProductId,
    },
    /// Decrease an entry's quantity by one, removing it at one
    Dec {
        /// Product ID
        id: ProductId,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "nxt_cli=info,nxt_trendz_storefront=info".into());

    // JSON logs when LOG_FORMAT=json, text otherwise; stderr keeps stdout for command output
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Commands::Login { token } => commands::session::login(&config, token)?,
        Commands::Logout => commands::session::logout(&config)?,
        Commands::Navigate { path } => commands::session::navigate(config, &path)?,
        Commands::Product { id, add, quantity } => {
            commands::product::show(config, id, add.then(|| quantity.unwrap_or(1))).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(config)?,
            CartAction::Add { id, quantity } => commands::cart::add(config, id, quantity).await?,
            CartAction::Remove { id } => commands::cart::remove(config, id)?,
            CartAction::Inc { id } => commands::cart::increment(config, id)?,
            CartAction::Dec { id } => commands::cart::decrement(config, id)?,
            CartAction::Clear => commands::cart::clear(config)?,
        },
    }
    Ok(())
}
