// Port Layer - Interfaces implemented by storage adapters

pub mod product_dao;
pub mod schema_initializer;

// Re-exports
pub use product_dao::ProductDao;
pub use schema_initializer::SchemaInitializer;
