//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{FromRequest, Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::errors::responses::{BadRequestJsonResponse, InternalServerErrorResponse};
use futures::TryStreamExt;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::mapper::{dto_to_entity, entity_to_dto};
use crate::models::{PriceRange, Product, ProductDto};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_products,
        get_product,
        get_products_in_range,
        save_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(ProductDto),
        responses(BadRequestJsonResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router. Mount it under `/products`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(get_products).post(save_product))
        .route("/range", get(get_products_in_range))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// Decodes the request body as a `ProductDto` and maps it to an entity.
async fn product_from_request(request: Request) -> ProductResult<Product> {
    let Json(dto) = Json::<ProductDto>::from_request(request, &()).await?;
    Ok(dto_to_entity(dto))
}

/// A found product as JSON, or `200` with an empty body.
fn optional_product(product: Option<Product>) -> Response {
    match product {
        Some(product) => Json(entity_to_dto(product)).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = Vec<ProductDto>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<ProductDto>>> {
    let products: Vec<ProductDto> = service
        .get_products()
        .map_ok(entity_to_dto)
        .try_collect()
        .await?;
    Ok(Json(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "The product, or an empty body when the id is unknown", body = ProductDto),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Response> {
    let product = service.get_product_by_id(&id).await?;
    Ok(optional_product(product))
}

/// List products with a price in `[min, max]`
#[utoipa::path(
    get,
    path = "/range",
    tag = "Products",
    params(PriceRange),
    responses(
        (status = 200, description = "Products priced within the range, bounds included", body = Vec<ProductDto>),
        (status = 400, description = "Missing or non-numeric min/max"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_products_in_range<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(range): Query<PriceRange>,
) -> ProductResult<Json<Vec<ProductDto>>> {
    let products: Vec<ProductDto> = service
        .get_product_by_price_range(range.min, range.max)
        .map_ok(entity_to_dto)
        .try_collect()
        .await?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductDto,
    responses(
        (status = 200, description = "Product stored", body = ProductDto),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn save_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    request: Request,
) -> ProductResult<Json<ProductDto>> {
    let product = service
        .save_product(product_from_request(request))
        .await?;
    Ok(Json(entity_to_dto(product)))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductDto,
    responses(
        (status = 200, description = "Updated product, or an empty body when the id is unknown", body = ProductDto),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    request: Request,
) -> ProductResult<Response> {
    let product = service
        .update_product(product_from_request(request), &id)
        .await?;
    Ok(optional_product(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted, or nothing to delete"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<StatusCode> {
    service.delete_product(&id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::repository::MockProductRepository;
    use axum::body::Body;
    use axum::http::{Method, header};
    use futures::{StreamExt, stream};
    use http_body_util::BodyExt;
    use mockall::predicate::eq;
    use tower::ServiceExt;

    fn app(mock: MockProductRepository) -> Router {
        Router::new().nest("/products", router(ProductService::new(mock)))
    }

    fn request(method: Method, uri: &str, body: Option<&str>) -> Request {
        let builder = axum::http::Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    fn p1() -> Product {
        Product::new("Product1", 1, 20.1).with_id("p1")
    }

    fn p2() -> Product {
        Product::new("Product2", 2, 25.0).with_id("p2")
    }

    #[tokio::test]
    async fn test_list_products_returns_array() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_all()
            .returning(|| stream::iter(vec![Ok(p1()), Ok(p2())]).boxed());

        let response = app(mock)
            .oneshot(request(Method::GET, "/products", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let products: Vec<ProductDto> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id.as_deref(), Some("p1"));
        assert_eq!(products[1].price, 25.0);
    }

    #[tokio::test]
    async fn test_get_missing_product_is_200_with_empty_body() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_id()
            .with(eq("unknown".to_string()))
            .returning(|_| Ok(None));

        let response = app(mock)
            .oneshot(request(Method::GET, "/products/unknown", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_product_by_id() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_id()
            .with(eq("p1".to_string()))
            .returning(|_| Ok(Some(p1())));

        let response = app(mock)
            .oneshot(request(Method::GET, "/products/p1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let dto: ProductDto = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(dto, entity_to_dto(p1()));
    }

    #[tokio::test]
    async fn test_range_route_binds_query() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_price_between()
            .with(eq(PriceRange::new(20.0, 26.0)))
            .times(1)
            .returning(|_| stream::iter(vec![Ok(p1()), Ok(p2())]).boxed());

        let response = app(mock)
            .oneshot(request(Method::GET, "/products/range?min=20&max=26", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let products: Vec<ProductDto> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Product1", "Product2"]);
    }

    #[tokio::test]
    async fn test_range_with_bad_query_is_rejected() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_price_between().never();

        let response = app(mock)
            .oneshot(request(Method::GET, "/products/range?min=cheap&max=26", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_returns_200_with_assigned_id() {
        let mut mock = MockProductRepository::new();
        mock.expect_save()
            .withf(|p| p.id.is_none() && p.name == "X")
            .times(1)
            .returning(|p| Ok(p.with_id("65f1c0ffee0ddba11ca7d00d")));

        let response = app(mock)
            .oneshot(request(
                Method::POST,
                "/products",
                Some(r#"{"name":"X","quantity":1,"price":9.99}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let dto: ProductDto = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(dto.id.as_deref(), Some("65f1c0ffee0ddba11ca7d00d"));
        assert_eq!(dto.quantity, 1);
        assert_eq!(dto.price, 9.99);
    }

    #[tokio::test]
    async fn test_create_with_malformed_body_uses_error_response() {
        let mut mock = MockProductRepository::new();
        mock.expect_save().never();

        let response = app(mock)
            .oneshot(request(Method::POST, "/products", Some(r#"{"name":"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"], "JSON_EXTRACTION");
    }

    #[tokio::test]
    async fn test_update_uses_path_id() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_id()
            .with(eq("p1".to_string()))
            .returning(|_| Ok(Some(p1())));
        mock.expect_save()
            .withf(|p| p.id.as_deref() == Some("p1") && p.name == "New")
            .returning(Ok);

        let response = app(mock)
            .oneshot(request(
                Method::PUT,
                "/products/p1",
                Some(r#"{"id":"other","name":"New","quantity":3,"price":1.5}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let dto: ProductDto = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(dto.id.as_deref(), Some("p1"));
        assert_eq!(dto.name, "New");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_200_with_empty_body() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));
        mock.expect_save().never();

        // The body is never read for an unknown id, so even garbage is accepted.
        let response = app(mock)
            .oneshot(request(Method::PUT, "/products/missing", Some("not json")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_existing_id_with_malformed_body_is_rejected() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_id()
            .with(eq("p1".to_string()))
            .times(1)
            .returning(|_| Ok(Some(p1())));
        mock.expect_save().never();

        let response = app(mock)
            .oneshot(request(Method::PUT, "/products/p1", Some("not json")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"], "JSON_EXTRACTION");
        assert_eq!(body["code"], 1003);
    }

    #[tokio::test]
    async fn test_delete_is_200_with_empty_body() {
        let mut mock = MockProductRepository::new();
        mock.expect_delete_by_id()
            .with(eq("p1".to_string()))
            .times(1)
            .returning(|_| Ok(()));

        let response = app(mock)
            .oneshot(request(Method::DELETE, "/products/p1", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_store_fault_is_500() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_id()
            .returning(|_| Err(ProductError::Database("connection refused".into())));

        let response = app(mock)
            .oneshot(request(Method::GET, "/products/p1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"], "DATABASE_ERROR");
    }
}
