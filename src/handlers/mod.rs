pub mod orders;
pub mod pages;
pub mod products;
pub mod users;

use actix_web::{web, HttpResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::errors::AppError;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Single-page storefronts with public checkout."
    ),
    paths(
        users::register,
        users::login,
        users::me,
        users::delete_me,
        pages::create_page,
        pages::get_my_page,
        pages::update_my_page,
        pages::delete_my_page,
        pages::get_public_page,
        products::create_product,
        products::update_product,
        products::delete_product,
        orders::place_order,
        orders::list_my_orders,
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "users", description = "Accounts and tokens"),
        (name = "pages", description = "Storefront pages"),
        (name = "products", description = "Catalog management"),
        (name = "orders", description = "Checkout and order history"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Mount every route of the API. Routes with a fixed segment are
/// registered before the parameterised route sharing their prefix.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .route("/", web::get().to(health))
    .service(
        web::scope("/users")
            .route("", web::post().to(users::register))
            .route("/login", web::post().to(users::login))
            .route("/me", web::get().to(users::me))
            .route("/me", web::delete().to(users::delete_me)),
    )
    .service(
        web::scope("/pages")
            .route("", web::post().to(pages::create_page))
            .route("/me", web::get().to(pages::get_my_page))
            .route("/me", web::put().to(pages::update_my_page))
            .route("/me", web::delete().to(pages::delete_my_page))
            .route("/{slug}", web::get().to(pages::get_public_page)),
    )
    .service(
        web::scope("/products")
            .route("", web::post().to(products::create_product))
            .route("/{id}", web::put().to(products::update_product))
            .route("/{id}", web::delete().to(products::delete_product)),
    )
    .service(
        web::scope("/orders")
            .route("/my-orders", web::get().to(orders::list_my_orders))
            .route("/{page_slug}", web::post().to(orders::place_order)),
    );
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "Storefront API is running"
    }))
}
