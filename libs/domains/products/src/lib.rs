//! Products Domain
//!
//! Create and list catalog products stored in MongoDB.
//!
//! ```text
//! Handlers  → POST/GET /api/product, JSON in and out
//! Service   → id assignment, DTO ↔ entity mapping
//! Repository→ save / find_all (MongoDB, in-memory)
//! Models    → Product entity, request/response DTOs
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("product-service");
//!
//! let service = ProductService::new(MongoProductRepository::new(&db));
//! let router = axum::Router::new().nest("/api/product", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductRepository;
pub use models::{Product, ProductRequest, ProductResponse};
pub use crate::mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
