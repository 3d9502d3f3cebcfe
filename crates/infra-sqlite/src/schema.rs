// Schema Initializers (bundled DDL scripts)

use crate::connection::ConnectionSource;
use crate::executor::{execute_safely, with_connection};
use async_trait::async_trait;
use dbkit_core::domain::SchemaScript;
use dbkit_core::error::{DaoError, Result};
use dbkit_core::port::SchemaInitializer;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// Schema owners whose DDL ships with this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundledSchema {
    /// `account`
    Account,
    /// `users` + `profiles`
    UserProfile,
    /// `broker` + `sales_group` + `broker_sales_group`
    WallStreet,
    /// `products`, used by the product DAO
    Products,
}

impl BundledSchema {
    pub const ALL: [BundledSchema; 4] = [
        BundledSchema::Account,
        BundledSchema::UserProfile,
        BundledSchema::WallStreet,
        BundledSchema::Products,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BundledSchema::Account => "account",
            BundledSchema::UserProfile => "user-profile",
            BundledSchema::WallStreet => "wall-street",
            BundledSchema::Products => "products",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            BundledSchema::Account => include_str!("../schema/account.sql"),
            BundledSchema::UserProfile => include_str!("../schema/user_profile.sql"),
            BundledSchema::WallStreet => include_str!("../schema/wall_street.sql"),
            BundledSchema::Products => include_str!("../schema/products.sql"),
        }
    }

    pub fn script(self) -> SchemaScript {
        SchemaScript::new(self.name(), self.sql())
    }
}

impl std::fmt::Display for BundledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BundledSchema {
    type Err = DaoError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        BundledSchema::ALL
            .into_iter()
            .find(|schema| schema.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = BundledSchema::ALL.iter().map(|schema| schema.name()).collect();
                DaoError::illegal_argument(format!(
                    "Unknown schema '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Applies one DDL script through the execution helper
pub struct SqliteSchemaInitializer {
    source: Arc<dyn ConnectionSource>,
    script: SchemaScript,
}

impl SqliteSchemaInitializer {
    pub fn new(source: Arc<dyn ConnectionSource>, script: SchemaScript) -> Self {
        Self { source, script }
    }

    pub fn bundled(source: Arc<dyn ConnectionSource>, schema: BundledSchema) -> Self {
        Self::new(source, schema.script())
    }
}

#[async_trait]
impl SchemaInitializer for SqliteSchemaInitializer {
    fn schema_name(&self) -> &str {
        self.script.name()
    }

    async fn init(&self) -> Result<()> {
        info!(schema = %self.schema_name(), "Applying schema");

        let sql = self.script.sql().to_owned();
        let outcome = with_connection(self.source.as_ref(), move |conn| {
            Box::pin(async move { execute_safely(conn, &sql).await.map(|_| ()) })
        })
        .await;

        match &outcome {
            Ok(()) => info!(schema = %self.schema_name(), "Schema applied"),
            Err(e) => warn!(schema = %self.schema_name(), error = %e, "Schema initialization failed"),
        }
        outcome
    }
}
