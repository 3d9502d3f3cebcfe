// Subcommand handlers

use crate::cli::ProductCommand;
use anyhow::{Context, Result};
use colored::Colorize;
use dbkit_core::domain::{Product, SchemaScript};
use dbkit_core::port::{ProductDao, SchemaInitializer};
use dbkit_infra_sqlite::{
    BundledSchema, ConnectionSource, SqliteProductDao, SqliteSchemaInitializer,
};
use std::path::Path;
use std::sync::Arc;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ProductRow {
    id: String,
    name: String,
    producer: String,
    price: String,
    #[tabled(rename = "expires")]
    expiration_date: String,
    #[tabled(rename = "created")]
    creation_time: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_string()).unwrap_or_default(),
            name: product.name.clone(),
            producer: product.producer.clone(),
            price: product.price.to_string(),
            expiration_date: product.expiration_date.to_string(),
            creation_time: product
                .creation_time
                .map(|t| t.to_string())
                .unwrap_or_default(),
        }
    }
}

fn render_table(products: &[Product]) -> String {
    Table::new(products.iter().map(ProductRow::from)).to_string()
}

pub async fn init_schema(
    source: Arc<dyn ConnectionSource>,
    schema: Option<BundledSchema>,
    file: Option<&Path>,
) -> Result<()> {
    let script = match (schema, file) {
        (Some(schema), _) => schema.script(),
        (None, Some(path)) => SchemaScript::from_file(path)
            .with_context(|| format!("Failed to read schema file {}", path.display()))?,
        (None, None) => anyhow::bail!("Either --schema or --file is required"),
    };

    let initializer = SqliteSchemaInitializer::new(source, script);
    initializer
        .init()
        .await
        .with_context(|| format!("Schema '{}' was not applied", initializer.schema_name()))?;

    println!(
        "{}",
        format!("✓ Schema '{}' applied", initializer.schema_name())
            .green()
            .bold()
    );
    Ok(())
}

pub fn list_schemas() {
    println!("{}", "Bundled schemas".cyan().bold());
    println!();
    for schema in BundledSchema::ALL {
        println!("  {} {}", "•".bold(), schema);
    }
}

pub async fn product(source: Arc<dyn ConnectionSource>, command: ProductCommand) -> Result<()> {
    let dao = SqliteProductDao::new(source);

    match command {
        ProductCommand::Add {
            name,
            producer,
            price,
            expires,
        } => {
            let saved = dao.save(Product::new(name, producer, price, expires)).await?;

            println!("{}", "✓ Product saved".green().bold());
            println!();
            println!("{}", render_table(std::slice::from_ref(&saved)));
        }

        ProductCommand::List { json } => {
            let products = dao.find_all().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&products)?);
            } else if products.is_empty() {
                println!("{}", "No products stored".yellow());
            } else {
                println!("{}", render_table(&products));
            }
        }

        ProductCommand::Show { id } => {
            let product = dao.find_one(id).await?;
            println!("{}", render_table(std::slice::from_ref(&product)));
        }

        ProductCommand::Update {
            id,
            name,
            producer,
            price,
            expires,
        } => {
            let mut product = dao.find_one(id).await?;
            if let Some(name) = name {
                product.name = name;
            }
            if let Some(producer) = producer {
                product.producer = producer;
            }
            if let Some(price) = price {
                product.price = price;
            }
            if let Some(expires) = expires {
                product.expiration_date = expires;
            }

            dao.update(&product).await?;
            println!("{}", format!("✓ Product {} updated", id).green().bold());
        }

        ProductCommand::Remove { id } => {
            let product = dao.find_one(id).await?;
            dao.remove(&product).await?;
            println!("{}", format!("✓ Product {} removed", id).green().bold());
        }
    }

    Ok(())
}
