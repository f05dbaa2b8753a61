//! HTTP handlers for the product catalog

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::{
        handlers::method_not_allowed,
        responses::{
            BadRequestJsonResponse, BadRequestValidationResponse, InternalServerErrorResponse,
            ServiceUnavailableResponse,
        },
    },
    ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{ProductRequest, ProductResponse};
use crate::repository::ProductRepository;
use crate::service::ProductService;

#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product),
    components(
        schemas(ProductRequest, ProductResponse),
        responses(
            BadRequestJsonResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Routes relative to the mount point, e.g. `/api/product`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .fallback(method_not_allowed),
        )
        .with_state(shared_service)
}

/// List every product
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products, possibly none", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = service.get_all_products().await?;
    Ok(Json(products))
}

/// Create a product, or replace the one with the same id
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product stored", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
