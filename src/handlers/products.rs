use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::AppState;
use crate::auth::AuthenticatedUser;
use crate::domain::product::{NewProduct, Product, ProductPatch};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Merge patch: absent fields are left as they are. `description: null`
/// clears the description.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub page_id: i32,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            page_id: p.page_id,
        }
    }
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        ProductPatch {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Caller has no page yet"),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let product = NewProduct {
        name: body.name,
        description: body.description,
        price: body.price,
    };

    let product = web::block(move || state.catalog.create(user.0.id, product)).await??;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// PUT /products/{id}
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 403, description = "Product belongs to another user"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn update_product(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let patch = ProductPatch::from(body.into_inner());

    let product =
        web::block(move || state.catalog.update(user.0.id, product_id, patch)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /products/{id}
///
/// Responds with the product as it was before deletion.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = ProductResponse),
        (status = 403, description = "Product belongs to another user"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn delete_product(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();

    let product = web::block(move || state.catalog.delete(user.0.id, product_id)).await??;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}
