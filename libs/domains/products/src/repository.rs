use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ProductResult;
use crate::models::Product;

/// Data access for products.
///
/// Bodies are handed over raw; the store owns the schema and rejects
/// records that violate it. Ids are the store's string form and may be
/// malformed, which is also the store's to reject.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new record built from `fields`
    async fn create(&self, fields: Map<String, Value>) -> ProductResult<Product>;

    /// Every stored record, in no particular order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Apply `fields` and return the record as it is after the write
    async fn find_by_id_and_update(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> ProductResult<Option<Product>>;

    /// Remove the record and return its last state
    async fn find_by_id_and_delete(&self, id: &str) -> ProductResult<Option<Product>>;
}
