//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod order;
pub mod quote;
pub mod wishlist;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use drape_commerce::catalog::SortOption;
use drape_commerce::pricing::InsuranceOption;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Catalog subcommands.
#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products
    List {
        /// Search name, brand and category.
        #[arg(short, long)]
        query: Option<String>,

        /// Only this category.
        #[arg(long)]
        category: Option<String>,

        /// Only this brand.
        #[arg(long)]
        brand: Option<String>,

        /// Lowest price per day, in whole units.
        #[arg(long)]
        min_price: Option<i64>,

        /// Highest price per day, in whole units.
        #[arg(long)]
        max_price: Option<i64>,

        /// Only new arrivals.
        #[arg(long)]
        new: bool,

        /// featured, price-asc, price-desc, name-asc or newest.
        #[arg(short, long, default_value = "featured")]
        sort: SortOption,

        /// Maximum number of products to show.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one product with related products and blocked dates
    Show {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Product ID.
    pub id: String,

    /// First day of the rental (YYYY-MM-DD).
    #[arg(long)]
    pub start: NaiveDate,

    /// Return day (YYYY-MM-DD).
    #[arg(long)]
    pub end: NaiveDate,

    /// none, basic or premium.
    #[arg(short, long, default_value = "none")]
    pub insurance: InsuranceOption,

    /// Promo code to apply.
    #[arg(short, long)]
    pub promo: Option<String>,

    /// Number of pieces.
    #[arg(short, long, default_value_t = 1)]
    pub quantity: i64,

    /// Size to check against the product's sizes.
    #[arg(long)]
    pub size: Option<String>,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: WishlistCommand,
}

/// Wishlist subcommands.
#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Save a product
    Add {
        /// Product ID.
        id: String,
    },

    /// Remove a saved product
    Remove {
        /// Product ID.
        id: String,
    },

    /// List saved products
    List,

    /// Remove every saved product
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Order request file (JSON).
    pub request: PathBuf,

    /// Build the cart and print the summary without placing the order.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}
