// Product Domain Model

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DaoError, Result};

/// Store-generated surrogate key
pub type ProductId = i64;

/// Product Entity
///
/// `id` stays `None` until the product is persisted; `creation_time` is
/// assigned by the store and is only present on products read back from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub producer: String,
    pub price: Decimal,
    pub expiration_date: NaiveDate,
    pub creation_time: Option<NaiveDateTime>,
}

impl Product {
    /// Create a new, not yet persisted product
    pub fn new(
        name: impl Into<String>,
        producer: impl Into<String>,
        price: Decimal,
        expiration_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            producer: producer.into(),
            price,
            expiration_date,
            creation_time: None,
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Id of a product that must already exist in the store
    ///
    /// `action` names the operation in the error message ("update", "remove").
    pub fn require_id(&self, action: &str) -> Result<ProductId> {
        self.id.ok_or_else(|| {
            DaoError::illegal_argument(format!("Cannot {} a product without ID", action))
        })
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Product#{}", id)?,
            None => write!(f, "Product#<new>")?,
        }
        write!(
            f,
            "(name={}, producer={}, price={}, expiration_date={})",
            self.name, self.producer, self.price, self.expiration_date
        )
    }
}
