pub mod auth;
pub mod config;
pub mod err;
pub mod models;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::handler::Handler;
use axum::{routing::get, routing::post, Extension, Json, Router};

use crate::auth::AuthService;
use crate::config::BackendConfig;
use crate::store::{Backend, StaticRoster, StudentDirectory};

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = BackendConfig::from_env();
    let directory: Arc<dyn StudentDirectory> = match &config {
        Some(cfg) if !cfg.is_placeholder() => {
            let backend = Backend::connect(cfg).await?;
            backend.ensure_schema().await?;
            log::info!("Connected to student database at {}", cfg.service_url);
            Arc::new(backend)
        }
        _ => {
            // Logins will answer with the not-configured error until real
            // credentials arrive.
            log::warn!("Backend configuration missing or placeholder; serving the demo roster");
            Arc::new(StaticRoster::demo())
        }
    };
    let auth_service = Arc::new(AuthService::new(config, directory));

    let app = Router::new()
        .route("/login", post(auth::login))
        .route("/health", get(health))
        .layer(Extension(auth_service))
        .fallback(err::handler404.into_service());

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    log::info!("Starting MathPrep Academy server on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
