use std::sync::Arc;

use chargehub::{build_app, serve, store::PgStore, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "chargehub=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!(
        stations_require_auth = config.routes.stations_require_auth,
        points_require_auth = config.routes.points_require_auth,
        "configuration loaded"
    );

    let store = PgStore::connect(&config.database_url, config.max_connections).await?;
    store.migrate().await?;

    let app = build_app(AppState::with_postgres(config.clone(), store.clone()));
    let result = serve(app, config.listen_addr).await;

    store.close().await;
    result
}
