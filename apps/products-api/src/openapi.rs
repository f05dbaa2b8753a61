//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "Product catalog: create products and list them",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/product", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_exposes_product_routes() {
        let doc = ApiDoc::openapi();
        let item = doc
            .paths
            .paths
            .get("/api/product")
            .expect("product path should be documented");

        assert!(item.get.is_some());
        assert!(item.post.is_some());
    }
}
