use dotenvy::dotenv;
use storefront_service::config::AppConfig;
use storefront_service::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("Loaded {:?}", config);

    let pool = create_pool(&config.database_url, config.pool_size).map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(pool, &config)?.await
}
