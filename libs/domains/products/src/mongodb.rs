//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "product";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Use a different collection, e.g. to isolate test runs
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn save(&self, product: Product) -> ProductResult<Product> {
        self.collection
            .replace_one(doc! { "_id": &product.id }, &product)
            .upsert(true)
            .await?;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        tracing::debug!(count = products.len(), "Loaded products");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    async fn test_repository() -> MongoProductRepository {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = database::mongodb::connect(&url).await.unwrap();
        let db = client.database("product_service_test");
        let collection = format!("product_{}", uuid::Uuid::now_v7().simple());
        MongoProductRepository::with_collection(&db, &collection)
    }

    #[tokio::test]
    #[ignore = "requires a running MongoDB"]
    async fn test_save_upserts_and_find_all_reads_back() {
        let repo = test_repository().await;

        let mut product = Product {
            id: "p1".to_string(),
            name: "Pen".to_string(),
            description: "ball".to_string(),
            price: BigDecimal::from_str("9.99").unwrap(),
        };
        repo.save(product.clone()).await.unwrap();

        product.price = BigDecimal::from_str("10.00").unwrap();
        repo.save(product.clone()).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price.to_plain_string(), "10.00");

        repo.collection.drop().await.unwrap();
    }
}
