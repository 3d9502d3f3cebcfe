// Command-line arguments

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dbkit_core::domain::ProductId;
use dbkit_infra_sqlite::BundledSchema;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dbkit")]
#[command(about = "Schema bootstrap and product store", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database URL (overrides the configured one)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Configuration file (default: ./dbkit.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply a schema script to the database
    Init {
        /// Bundled schema (account, user-profile, wall-street, products)
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        schema: Option<BundledSchema>,

        /// DDL script on disk
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List the bundled schemas
    Schemas,

    /// Manage products
    #[command(subcommand)]
    Product(ProductCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Store a new product
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        producer: String,

        /// Price, e.g. 19.99
        #[arg(long)]
        price: Decimal,

        /// Expiration date (YYYY-MM-DD)
        #[arg(long)]
        expires: NaiveDate,
    },

    /// List all products
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one product
    Show { id: ProductId },

    /// Change fields of an existing product
    Update {
        id: ProductId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        producer: Option<String>,

        #[arg(long)]
        price: Option<Decimal>,

        #[arg(long)]
        expires: Option<NaiveDate>,
    },

    /// Delete a product
    Remove { id: ProductId },
}
