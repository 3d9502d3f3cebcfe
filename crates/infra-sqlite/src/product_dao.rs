// SQLite ProductDao Implementation

use crate::connection::ConnectionSource;
use crate::error::map_sqlx_error;
use crate::executor::{execute_query_safely, with_connection};
use async_trait::async_trait;
use dbkit_core::domain::{Product, ProductId};
use dbkit_core::error::{DaoError, Result};
use dbkit_core::port::ProductDao;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{Row, SqliteConnection};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

const ENTITY: &str = "Product";

/// Fractional digits of the `DECIMAL(19,4)` price column
const PRICE_SCALE: u32 = 4;

/// Significant digits SQLite keeps for a `DECIMAL` value stored as REAL
const PRICE_MAX_DIGITS: usize = 15;

const SAVE_PRODUCT_SQL: &str =
    "INSERT INTO products (name, producer, price, expiration_date) VALUES (?, ?, ?, ?) RETURNING id";
const UPDATE_PRODUCT_SQL: &str =
    "UPDATE products SET name = ?, producer = ?, price = ?, expiration_date = ? WHERE id = ?";
const DELETE_PRODUCT_SQL: &str = "DELETE FROM products WHERE id = ?";

// Column order is fixed: id, name, producer, price, expiration_date, creation_time
const FIND_ALL_SQL: &str = "SELECT id, name, producer, CAST(price AS TEXT), expiration_date, creation_time FROM products";
const FIND_ONE_SQL: &str = "SELECT id, name, producer, CAST(price AS TEXT), expiration_date, creation_time FROM products WHERE id = ?";

pub struct SqliteProductDao {
    source: Arc<dyn ConnectionSource>,
}

impl SqliteProductDao {
    pub fn new(source: Arc<dyn ConnectionSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ProductDao for SqliteProductDao {
    async fn save(&self, product: Product) -> Result<Product> {
        if let Some(id) = product.id {
            return Err(DaoError::illegal_argument(format!(
                "Cannot save a product that already has ID = {}",
                id
            )));
        }
        ensure_storable_price(product.price)?;
        debug!(name = %product.name, "Saving product");

        let saved = with_connection(self.source.as_ref(), move |conn| {
            Box::pin(async move { save_product(conn, product).await })
        })
        .await?;

        info!(product_id = ?saved.id, "Product saved");
        Ok(saved)
    }

    async fn find_one(&self, id: ProductId) -> Result<Product> {
        debug!(product_id = id, "Fetching product");

        with_connection(self.source.as_ref(), move |conn| {
            Box::pin(async move { find_one_product(conn, id).await })
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        debug!("Fetching all products");

        with_connection(self.source.as_ref(), |conn| {
            Box::pin(async move {
                let rows = execute_query_safely(conn, FIND_ALL_SQL).await?;
                rows.iter().map(parse_product_row).collect()
            })
        })
        .await
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let id = product.require_id("update")?;
        ensure_storable_price(product.price)?;
        debug!(product_id = id, "Updating product");

        let product = product.clone();
        with_connection(self.source.as_ref(), move |conn| {
            Box::pin(async move { update_product(conn, &product, id).await })
        })
        .await?;

        info!(product_id = id, "Product updated");
        Ok(())
    }

    async fn remove(&self, product: &Product) -> Result<()> {
        let id = product.require_id("remove")?;
        debug!(product_id = id, "Removing product");

        with_connection(self.source.as_ref(), move |conn| {
            Box::pin(async move { remove_product(conn, id).await })
        })
        .await?;

        info!(product_id = id, "Product removed");
        Ok(())
    }
}

async fn save_product(conn: &mut SqliteConnection, mut product: Product) -> Result<Product> {
    let generated = sqlx::query(SAVE_PRODUCT_SQL)
        .bind(&product.name)
        .bind(&product.producer)
        .bind(product.price.to_string())
        .bind(product.expiration_date)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(format!("Error saving product: {}", product), e))?;

    let row = generated.ok_or_else(|| {
        DaoError::execution_msg(format!(
            "Error saving product: {}, no generated key returned",
            product
        ))
    })?;
    let id: ProductId = row
        .try_get(0)
        .map_err(|e| map_sqlx_error("Error reading generated product id", e))?;

    product.id = Some(id);
    Ok(product)
}

async fn find_one_product(conn: &mut SqliteConnection, id: ProductId) -> Result<Product> {
    let row = sqlx::query(FIND_ONE_SQL)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("Error executing 'find one' statement", e))?;

    match row {
        Some(row) => parse_product_row(&row),
        None => Err(DaoError::not_found(ENTITY, id)),
    }
}

// The existence check and the mutation are separate statements: a row deleted
// concurrently in between surfaces as zero affected rows.
async fn update_product(conn: &mut SqliteConnection, product: &Product, id: ProductId) -> Result<()> {
    find_one_product(conn, id).await?;

    let result = sqlx::query(UPDATE_PRODUCT_SQL)
        .bind(&product.name)
        .bind(&product.producer)
        .bind(product.price.to_string())
        .bind(product.expiration_date)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(format!("Error updating product: {}", product), e))?;

    ensure_affected(&result, "update")
}

async fn remove_product(conn: &mut SqliteConnection, id: ProductId) -> Result<()> {
    find_one_product(conn, id).await?;

    let result = sqlx::query(DELETE_PRODUCT_SQL)
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(format!("Error removing product with id = {}", id), e))?;

    ensure_affected(&result, "remove")
}

fn ensure_affected(result: &SqliteQueryResult, action: &str) -> Result<()> {
    match result.rows_affected() {
        0 => Err(DaoError::execution_msg(format!(
            "Error executing '{}', affected rows: 0",
            action
        ))),
        _ => Ok(()),
    }
}

fn parse_product_row(row: &SqliteRow) -> Result<Product> {
    let decode = |e| map_sqlx_error("Error parsing product row", e);

    let price_text: String = row.try_get(3).map_err(decode)?;

    Ok(Product {
        id: Some(row.try_get(0).map_err(decode)?),
        name: row.try_get(1).map_err(decode)?,
        producer: row.try_get(2).map_err(decode)?,
        price: parse_price(&price_text)?,
        expiration_date: row.try_get(4).map_err(decode)?,
        creation_time: Some(row.try_get(5).map_err(decode)?),
    })
}

/// Reject prices the `price` column cannot hold exactly
///
/// More than 4 fractional digits does not fit the column scale. More than 15
/// significant digits does not survive SQLite's numeric affinity, which keeps
/// fractional values as REAL.
fn ensure_storable_price(price: Decimal) -> Result<()> {
    let normalized = price.normalize();

    if normalized.scale() > PRICE_SCALE {
        return Err(DaoError::illegal_argument(format!(
            "Price {} has more than {} fractional digits",
            price, PRICE_SCALE
        )));
    }

    let digits = normalized.mantissa().unsigned_abs().to_string().len();
    if digits > PRICE_MAX_DIGITS {
        return Err(DaoError::illegal_argument(format!(
            "Price {} has more than {} significant digits",
            price, PRICE_MAX_DIGITS
        )));
    }
    Ok(())
}

/// Decode the textual price column into a scale-4 decimal
///
/// SQLite stores `DECIMAL` values with numeric affinity, so the text may come
/// back as an integer ("10"), a real ("44.5") or in exponent form.
fn parse_price(text: &str) -> Result<Decimal> {
    let mut price = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| DaoError::execution(format!("Invalid price value '{}'", text), e))?;
    price.rescale(PRICE_SCALE);
    Ok(price)
}
