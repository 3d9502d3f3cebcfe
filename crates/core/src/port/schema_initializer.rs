// Schema Initializer Port

use crate::error::Result;
use async_trait::async_trait;

/// Applies one schema owner's DDL script to its configured store
///
/// `init` runs the script exactly once and performs no existence checks:
/// running it against a database that already holds conflicting objects
/// fails. A failed `init` is final; nothing here retries.
#[async_trait]
pub trait SchemaInitializer: Send + Sync {
    /// Name of the schema being applied (for logging)
    fn schema_name(&self) -> &str;

    async fn init(&self) -> Result<()>;
}
