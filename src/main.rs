//! # Paw Adopt API
//!
//! Entry point for the pet adoption marketplace backend. Wires the
//! SQLite repository, S3 image storage and the token signer into the
//! web application and mounts the REST routes.

#![recursion_limit = "256"]

pub mod access;
pub mod api;
pub mod config;
pub mod consts;
pub mod errors;
pub mod logger;
pub mod models;
pub mod repo;
pub mod rest;
pub mod services;
pub mod utils;

use ntex::web;
use ntex_cors::Cors;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_simple_logger()?;

    // Initialize database connection pool
    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool(config::APP_CONFIG.is_prod()).await?,
    };

    // Initialize AWS services
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(
            config::APP_CONFIG.aws_region.clone(),
        ))
        .load()
        .await;

    let storage_service = services::storage::StorageHandler {
        client: aws_sdk_s3::Client::new(&aws_config),
    };
    let token_service = services::tokens::HmacTokenService {
        sign_secret: config::APP_CONFIG.token_sign_secret.clone(),
    };

    configure_and_run_server(sqlite_repo, storage_service, token_service).await
}

/// Boxes per-worker copies of the shared services into the app state
fn create_app_state(
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    storage_service: services::storage::StorageHandler,
    token_service: services::tokens::HmacTokenService,
) -> rest::AppState {
    rest::AppState {
        repo: Box::new(sqlite_repo),
        storage_service: Box::new(storage_service),
        token_service: Box::new(token_service),
    }
}

/// Configures and starts the web server
async fn configure_and_run_server(
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    storage_service: services::storage::StorageHandler,
    token_service: services::tokens::HmacTokenService,
) -> anyhow::Result<()> {
    let server_addr = (
        config::APP_CONFIG.web_server_host.as_str(),
        config::APP_CONFIG.web_server_port,
    );

    log::info!("starting server on {}:{}", server_addr.0, server_addr.1);

    web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec!["GET", "HEAD", "POST", "OPTIONS", "PUT", "DELETE"])
                    .allowed_origin(&config::APP_CONFIG.cors_allowed_origin)
                    .finish(),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(
                sqlite_repo.clone(),
                storage_service.clone(),
                token_service.clone(),
            ))
            .configure(rest::routes::auth)
            .configure(rest::routes::pets)
            .configure(rest::routes::applications)
            .configure(rest::routes::shelters)
            .configure(rest::routes::users)
            .service((rest::server::health, rest::server::index))
            .default_service(web::route().to(rest::server::serve_not_found))
    })
    .bind(server_addr)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {e}"))
}
