//! Shared helpers: bootstrapped in-memory databases and catalog introspection

#![allow(dead_code)]

use std::sync::Arc;

use dbkit_core::port::SchemaInitializer;
use dbkit_infra_sqlite::{
    create_in_memory_pool, BundledSchema, ConnectionSource, SqliteSchemaInitializer,
};
use sqlx::{Row, SqlitePool};

/// One row of `pragma_table_info`
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default: Option<String>,
    /// 1-based position inside the primary key, 0 when not part of it
    pub pk: i64,
}

/// Fresh in-memory database with the given schemas applied in order
pub async fn bootstrapped(schemas: &[BundledSchema]) -> SqlitePool {
    let pool = create_in_memory_pool().await.unwrap();
    let source: Arc<dyn ConnectionSource> = Arc::new(pool.clone());

    for schema in schemas {
        SqliteSchemaInitializer::bundled(source.clone(), *schema)
            .init()
            .await
            .unwrap();
    }
    pool
}

pub async fn table_names(pool: &SqlitePool) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

pub async fn columns(pool: &SqlitePool, table: &str) -> Vec<Column> {
    sqlx::query(r#"SELECT name, type, "notnull", dflt_value, pk FROM pragma_table_info(?) ORDER BY cid"#)
        .bind(table)
        .fetch_all(pool)
        .await
        .unwrap()
        .iter()
        .map(|row| Column {
            name: row.get(0),
            decl_type: row.get(1),
            not_null: row.get::<i64, _>(2) == 1,
            default: row.get(3),
            pk: row.get(4),
        })
        .collect()
}

pub async fn column(pool: &SqlitePool, table: &str, name: &str) -> Column {
    columns(pool, table)
        .await
        .into_iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("{}.{} does not exist", table, name))
}

/// Primary key columns in key order
pub async fn primary_key(pool: &SqlitePool, table: &str) -> Vec<String> {
    let mut pk: Vec<Column> = columns(pool, table)
        .await
        .into_iter()
        .filter(|c| c.pk > 0)
        .collect();
    pk.sort_by_key(|c| c.pk);
    pk.into_iter().map(|c| c.name).collect()
}

/// Column sets of the UNIQUE constraints declared on `table`
pub async fn unique_constraints(pool: &SqlitePool, table: &str) -> Vec<Vec<String>> {
    let indexes: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_index_list(?) WHERE origin = 'u' ORDER BY name")
            .bind(table)
            .fetch_all(pool)
            .await
            .unwrap();

    let mut constraints = Vec::new();
    for index in indexes {
        let cols: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_index_info(?) ORDER BY seqno")
                .bind(&index)
                .fetch_all(pool)
                .await
                .unwrap();
        constraints.push(cols);
    }
    constraints
}

/// `(from column, referenced table, referenced column)` per foreign key, by column
pub async fn foreign_keys(pool: &SqlitePool, table: &str) -> Vec<(String, String, String)> {
    sqlx::query(r#"SELECT "from", "table", "to" FROM pragma_foreign_key_list(?) ORDER BY "from""#)
        .bind(table)
        .fetch_all(pool)
        .await
        .unwrap()
        .iter()
        .map(|row| (row.get(0), row.get(1), row.get(2)))
        .collect()
}

/// Stored `CREATE TABLE` text; SQLite keeps constraint names only here
pub async fn table_ddl(pool: &SqlitePool, table: &str) -> String {
    sqlx::query_scalar("SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?")
        .bind(table)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn has_named_constraint(pool: &SqlitePool, table: &str, constraint: &str) -> bool {
    table_ddl(pool, table)
        .await
        .contains(&format!("CONSTRAINT {} ", constraint))
}
