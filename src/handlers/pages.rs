use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::products::ProductResponse;
use crate::application::{AppState, PageWithProducts};
use crate::auth::AuthenticatedUser;
use crate::domain::page::PagePatch;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePageRequest {
    pub title: String,
    pub description: Option<String>,
}

/// Merge patch for a page. Changing the title never changes the slug.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePageRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub products: Vec<ProductResponse>,
}

impl From<PageWithProducts> for PageResponse {
    fn from(view: PageWithProducts) -> Self {
        let PageWithProducts { page, products } = view;
        PageResponse {
            id: page.id,
            slug: page.slug,
            title: page.title,
            description: page.description,
            owner_id: page.owner_id,
            products: products.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

impl From<UpdatePageRequest> for PagePatch {
    fn from(req: UpdatePageRequest) -> Self {
        PagePatch {
            title: req.title,
            description: req.description,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /pages
#[utoipa::path(
    post,
    path = "/pages",
    request_body = CreatePageRequest,
    responses(
        (status = 201, description = "Page created", body = PageResponse),
        (status = 400, description = "Caller already has a page, or the slug is taken"),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "pages"
)]
pub async fn create_page(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreatePageRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let page =
        web::block(move || state.pages.create(user.0.id, body.title, body.description)).await??;
    Ok(HttpResponse::Created().json(PageResponse::from(page)))
}

/// GET /pages/me
#[utoipa::path(
    get,
    path = "/pages/me",
    responses(
        (status = 200, description = "The caller's page", body = PageResponse),
        (status = 404, description = "Caller has no page"),
    ),
    security(("bearer_auth" = [])),
    tag = "pages"
)]
pub async fn get_my_page(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let page = web::block(move || state.pages.get_for_owner(user.0.id)).await??;
    Ok(HttpResponse::Ok().json(PageResponse::from(page)))
}

/// PUT /pages/me
#[utoipa::path(
    put,
    path = "/pages/me",
    request_body = UpdatePageRequest,
    responses(
        (status = 200, description = "Page updated", body = PageResponse),
        (status = 404, description = "Caller has no page"),
    ),
    security(("bearer_auth" = [])),
    tag = "pages"
)]
pub async fn update_my_page(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<UpdatePageRequest>,
) -> Result<HttpResponse, AppError> {
    let patch = PagePatch::from(body.into_inner());

    let page = web::block(move || state.pages.update_for_owner(user.0.id, patch)).await??;
    Ok(HttpResponse::Ok().json(PageResponse::from(page)))
}

/// DELETE /pages/me
///
/// Removes the page with its products and orders.
#[utoipa::path(
    delete,
    path = "/pages/me",
    responses(
        (status = 204, description = "Page deleted"),
        (status = 404, description = "Caller has no page"),
    ),
    security(("bearer_auth" = [])),
    tag = "pages"
)]
pub async fn delete_my_page(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    web::block(move || state.pages.delete_for_owner(user.0.id)).await??;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /pages/{slug}
///
/// Public storefront view, no authentication.
#[utoipa::path(
    get,
    path = "/pages/{slug}",
    params(("slug" = String, Path, description = "Public page slug")),
    responses(
        (status = 200, description = "Page with its products", body = PageResponse),
        (status = 404, description = "Unknown slug"),
    ),
    tag = "pages"
)]
pub async fn get_public_page(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();

    let page = web::block(move || state.pages.get_public(&slug)).await??;
    Ok(HttpResponse::Ok().json(PageResponse::from(page)))
}
