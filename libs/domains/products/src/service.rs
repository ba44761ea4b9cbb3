//! Product Service

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

/// Product operations over an injected repository.
///
/// Each method is exactly one repository call. Not-found is reported as
/// `Ok(None)` and left for the caller to answer.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, fields))]
    pub async fn create_product(&self, fields: Map<String, Value>) -> ProductResult<Product> {
        self.repository.create(fields).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self, fields))]
    pub async fn update_product(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> ProductResult<Option<Product>> {
        self.repository.find_by_id_and_update(id, fields).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<Option<Product>> {
        self.repository.find_by_id_and_delete(id).await
    }
}
