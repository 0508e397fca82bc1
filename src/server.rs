use anyhow::{anyhow, Context, Result};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use log::{error, info};
use std::path::Path;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::Config;
use crate::models::SuggestionList;
use crate::service::SuggestionService;

/// Build the application router
pub fn router(service: SuggestionService, frontend_dir: &Path) -> Router {
    Router::new()
        .route("/api/suggestions", get(get_suggestions))
        .route_service("/", ServeFile::new(frontend_dir.join("index.html")))
        .nest_service("/frontend", ServeDir::new(frontend_dir))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn get_suggestions(
    State(service): State<SuggestionService>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<SuggestionList> {
    let prefix = match query {
        Ok(Query(pairs)) => last_value(pairs, "prefix"),
        Err(e) => {
            log::debug!("Unreadable query string, treating prefix as absent: {}", e);
            None
        }
    };
    Json(service.suggestions(prefix.as_deref()).await)
}

/// Last value given for `key`; repeated parameters do not fail the request
fn last_value(pairs: Vec<(String, String)>, key: &str) -> Option<String> {
    pairs
        .into_iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v)
        .last()
}

/// Fail startup early when the frontend entry document is missing
pub fn check_frontend(frontend_dir: &Path) -> Result<()> {
    let index = frontend_dir.join("index.html");
    if !index.is_file() {
        return Err(anyhow!(
            "Frontend entry document not found at {}",
            index.display()
        ));
    }
    Ok(())
}

/// Bind the configured host, which may be a hostname or an IP literal
pub async fn bind(config: &Config) -> Result<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.host, config.port))
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &Config, service: SuggestionService) -> Result<()> {
    check_frontend(&config.frontend_dir)?;

    let listener = bind(config).await?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(service, &config.frontend_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, stopping server..."),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Periodically purge expired cache entries and log a metrics summary
pub fn spawn_stats_reporter(service: SuggestionService, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let purged = service.cache().purge_expired().await;
            if purged > 0 {
                log::debug!("Purged {} expired cache entries", purged);
            }
            service.metrics().log_summary(service.cache().len().await);
        }
    })
}
