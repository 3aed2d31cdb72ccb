//! # Mawa Store
//!
//! Ticket storefront of the venue: plan catalog, web prices, bookable dates,
//! order confirmation and the Bold payment handshake.
//! Configures SSL, middleware, cryptographic keys, and route handling.

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod front;
pub mod metric;
pub mod models;
pub mod repo;
pub mod services;
pub mod utils;
pub mod webhook;

use csrf::AesGcmCsrfProtection;
use logfire::config::MetricsOptions;
use ntex::web;
use ntex_cors::Cors;
use ntex_session::CookieSession;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};
use std::sync::Arc;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    // Initialize configuration
    config::init_config()?;
    let app_config = config::app_config()?;

    // Initialize logging and metrics, telemetry is only exported with a token
    let mut logfire_config = logfire::configure()
        .install_panic_handler()
        .with_metrics(Some(MetricsOptions::default()))
        .send_to_logfire(logfire::config::SendToLogfire::IfTokenPresent);
    if let Some(token) = &app_config.logfire_token {
        logfire_config = logfire_config.with_token(token.to_string());
    }
    let shutdown_handler = logfire_config.finish()?;

    if app_config.bold_secret().is_none() {
        logfire::warn!("BOLD_SECRET_KEY is not set, orders will go to the widget unsigned");
    }
    if app_config.bold_api_key().is_none() {
        logfire::warn!("BOLD_API_KEY is not set, the payment step is disabled");
    }

    // Initialize database connection pool
    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool(app_config.is_prod()).await?,
    };

    let integrity_service = services::integrity::IntegrityHashClient {
        endpoint: app_config.integrity_hash_endpoint(),
    };

    // The csrf key is derived from the configured password and salt, the
    // session key is random per process
    let csrf_key = utils::build_csrf_key(&app_config.csrf_pass, &app_config.csrf_salt)?;
    let session_key = utils::build_random_csrf_key()?;

    configure_and_run_server(csrf_key, session_key, sqlite_repo, integrity_service).await?;

    shutdown_handler.shutdown()?;

    Ok(())
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor() -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    let app_config = config::app_config()?;
    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Creates application state from the provided services
fn create_app_state(
    csrf_key: [u8; 32],
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    integrity_service: services::integrity::IntegrityHashClient,
) -> front::AppState {
    front::AppState {
        csrf_protec: AesGcmCsrfProtection::from_key(csrf_key),
        repo: Arc::new(sqlite_repo),
        integrity_service: Arc::new(integrity_service),
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(
    csrf_key: [u8; 32],
    session_key: [u8; 32],
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    integrity_service: services::integrity::IntegrityHashClient,
) -> anyhow::Result<()> {
    let app_config = config::app_config()?;
    let server_addr = ("0.0.0.0", app_config.web_server_port);
    let base_url = app_config.base_url();

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec!["GET", "HEAD", "POST", "OPTIONS"])
                    .allowed_origin(&base_url)
                    .allowed_origin("https://checkout.bold.co")
                    .finish(),
            )
            .wrap(
                CookieSession::private(&session_key)
                    .secure(app_config.is_prod())
                    .domain(app_config.web_server_host.to_string())
                    .max_age(consts::MAX_AGE_COOKIES)
                    .name("mawa-session"),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(
                csrf_key,
                sqlite_repo.clone(),
                integrity_service.clone(),
            ))
            .configure(front::routes::storefront)
            .configure(front::routes::success)
            .configure(front::routes::legal)
            .configure(front::routes::api)
            .configure(webhook::routes::bold)
            .service((
                ntex_files::Files::new("/static", "web/static/"),
                front::server::serve_favicon,
            ))
            .default_service(web::route().to(front::server::serve_not_found))
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor()?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
