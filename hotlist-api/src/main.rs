mod routes;

use actix_web::{web, App, HttpServer};
use hotlist_core::{AppConfig, CacheStore, Refresher, TrendingClient, TrendingService};
use reqwest::ClientBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let client = ClientBuilder::new()
        .user_agent("Hotlist/0.1")
        .build()
        .expect("failed to build HTTP client");

    let store = CacheStore::open(config.cache_file()).await;
    let refresher = Refresher::new(TrendingClient::new(client, &config.source), store.clone());
    let service = TrendingService::new(refresher, store, config.cache.max_age());

    // The first fetch runs in the background; /health reports 503 until it
    // completes, while queries served before then fall back to on-demand
    // refreshes.
    let _ = service.spawn_startup_refresh();

    info!(
        host = %config.server.host,
        port = config.server.port,
        "starting hotlist api"
    );

    let data = web::Data::new(service);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(routes::configure))
        .bind(format!("{}:{}", config.server.host, config.server.port))?
        .run()
        .await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
