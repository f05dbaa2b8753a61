//! Product Service - create and list use-cases

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductRequest, ProductResponse};
use crate::repository::ProductRepository;

/// Maps wire DTOs to entities and delegates storage to the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Store a product and return it as saved.
    ///
    /// A missing or blank `id` gets a fresh UUIDv7; any other id is kept
    /// verbatim, so saving an existing id replaces that product.
    #[instrument(
        skip(self, request),
        fields(product_name = %request.name, product_id = tracing::field::Empty)
    )]
    pub async fn create_product(
        &self,
        mut request: ProductRequest,
    ) -> ProductResult<ProductResponse> {
        request
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let id = match request.id.take() {
            Some(id) if !id.trim().is_empty() => id,
            _ => Uuid::now_v7().to_string(),
        };
        tracing::Span::current().record("product_id", id.as_str());

        let product = self
            .repository
            .save(Product::from_request(id, request))
            .await?;

        tracing::info!(product_id = %product.id, "Product saved");
        Ok(product.into())
    }

    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> ProductResult<Vec<ProductResponse>> {
        let products = self.repository.find_all().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }
}
