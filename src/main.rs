use anyhow::Result;
use clap::Parser;
use log::info;
use std::sync::Arc;

use suggest_relay::cache::SuggestionCache;
use suggest_relay::cli::Cli;
use suggest_relay::fetcher::SuggestionFetcher;
use suggest_relay::metrics::RelayMetrics;
use suggest_relay::server;
use suggest_relay::service::SuggestionService;
use suggest_relay::upstream::DatamuseClient;
use suggest_relay::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    info!("Starting suggestion relay");

    let cli = Cli::parse();
    let config = Config::from_env()?.apply_cli(&cli)?;

    info!("Configuration:");
    info!("  listen: {}:{}", config.host, config.port);
    info!("  frontend: {}", config.frontend_dir.display());
    info!("  upstream: {} (timeout {}s)", config.upstream_url, config.upstream_timeout_secs);
    info!(
        "  cache: {} entries, {}s ttl",
        config.cache_capacity, config.cache_ttl_secs
    );
    info!(
        "  suggestions: up to {}, prefix >= {} chars",
        config.max_suggestions, config.min_prefix_len
    );

    let client = DatamuseClient::new(&config.upstream_url, config.upstream_timeout())?;
    let service = SuggestionService::new(
        SuggestionFetcher::new(client, config.max_suggestions),
        SuggestionCache::new(config.cache_ttl(), config.cache_capacity),
        Arc::new(RelayMetrics::new()),
        config.min_prefix_len,
    );

    let reporter = config
        .stats_interval()
        .map(|every| server::spawn_stats_reporter(service.clone(), every));

    let result = server::serve(&config, service.clone()).await;

    if let Some(reporter) = reporter {
        reporter.abort();
    }
    service.metrics().log_summary(service.cache().len().await);

    result
}
