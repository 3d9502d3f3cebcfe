// dbkit Infrastructure - SQLite Adapter
// Implements: SchemaInitializer, ProductDao

mod connection;
mod error;
pub mod executor;
mod product_dao;
mod schema;

pub use connection::{create_in_memory_pool, create_pool, ConnectionSource, PoolSettings};
pub use executor::{execute_query_safely, execute_safely, with_connection};
pub use product_dao::SqliteProductDao;
pub use schema::{BundledSchema, SqliteSchemaInitializer};

// Note: sqlx::Error conversion is handled by `error::map_sqlx_error`
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for DaoError here)
