pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::error::Error;
use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::AppState;
use auth::TokenService;
use config::AppConfig;
use handlers::ApiDoc;
use infrastructure::{
    DieselOrderRepository, DieselPageRepository, DieselProductRepository, DieselUserRepository,
};

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Wire the Diesel repositories behind the application services.
pub fn app_state(pool: DbPool, tokens: TokenService) -> AppState {
    AppState::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselPageRepository::new(pool.clone())),
        Arc::new(DieselProductRepository::new(pool.clone())),
        Arc::new(DieselOrderRepository::new(pool)),
        tokens,
    )
}

/// Mount the OpenAPI document and Swagger UI.
///
/// `NormalizePath::trim` turns `/swagger-ui/` into `/swagger-ui`, which the
/// UI's own `/swagger-ui/{_:.*}` route never matches, so the bare path
/// redirects to the index page.
pub fn swagger(cfg: &mut web::ServiceConfig) {
    cfg.service(web::redirect("/swagger-ui", "/swagger-ui/index.html"))
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
}

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(pool: DbPool, config: &AppConfig) -> std::io::Result<actix_web::dev::Server> {
    let tokens = TokenService::new(
        &config.jwt_secret,
        chrono::Duration::minutes(config.token_ttl_minutes),
    );
    let state = web::Data::new(app_state(pool, tokens));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .configure(handlers::configure)
            .configure(swagger)
    })
    .bind((config.host.clone(), config.port))?
    .run())
}

#[cfg(test)]
mod tests {
    use actix_web::http::{header, StatusCode};
    use actix_web::middleware::NormalizePath;
    use actix_web::test::{call_service, init_service, TestRequest};
    use actix_web::App;

    use super::swagger;

    #[actix_web::test]
    async fn swagger_landing_page_is_reachable() {
        let app = init_service(App::new().wrap(NormalizePath::trim()).configure(swagger)).await;

        let resp = call_service(&app, TestRequest::get().uri("/swagger-ui/").to_request()).await;
        assert!(resp.status().is_redirection());
        assert_eq!(
            resp.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(&b"/swagger-ui/index.html"[..])
        );

        let resp = call_service(
            &app,
            TestRequest::get().uri("/swagger-ui/index.html").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn openapi_document_is_served() {
        let app = init_service(App::new().wrap(NormalizePath::trim()).configure(swagger)).await;
        let resp = call_service(
            &app,
            TestRequest::get().uri("/api-docs/openapi.json").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
