// Product DAO Port (Interface)

use crate::domain::{Product, ProductId};
use crate::error::Result;
use async_trait::async_trait;

/// Data-access interface for Product persistence
///
/// Every operation opens its own connection for its whole duration and
/// reports failures only through [`crate::DaoError`].
#[async_trait]
pub trait ProductDao: Send + Sync {
    /// Insert a new product and return it with the generated id populated
    async fn save(&self, product: Product) -> Result<Product>;

    /// Find product by ID (`NotFound` when no row matches)
    async fn find_one(&self, id: ProductId) -> Result<Product>;

    /// All products, in the order the store returns them
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// Update an existing product in place
    async fn update(&self, product: &Product) -> Result<()>;

    /// Delete an existing product
    async fn remove(&self, product: &Product) -> Result<()>;
}
