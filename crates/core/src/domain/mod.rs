// Domain Layer - Entities and schema scripts

pub mod product;
pub mod schema;

// Re-exports
pub use product::{Product, ProductId};
pub use schema::SchemaScript;
