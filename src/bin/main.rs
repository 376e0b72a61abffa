use std::{str::FromStr, sync::Arc};

use hr_core::{
    core::{
        catalog::{seed_default_grants, seed_permission_catalog},
        db::{init_grant_cache, init_store},
    },
    init_openapi_route,
    settings::{get_config, StoreBackend},
    AppState,
};
use poem::listener::TcpListener;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config()?;
    let log_level = Level::from_str(&config.log_level).unwrap_or(Level::DEBUG);
    // Logging to Console or File
    let _guard = if config.log_to_console {
        tracing_subscriber::fmt().with_max_level(log_level).init();
        None
    } else {
        let file_appender = tracing_appender::rolling::daily("./logs", "app.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_max_level(log_level)
            .init();
        Some(guard)
    };
    tracing::info!("run with config: {:?}", config);

    // Init Store and Grant Cache
    let store = init_store(&config).await?;
    let grant_cache = init_grant_cache(&config)?;
    seed_permission_catalog(store.as_ref()).await?;
    if config.store_backend == StoreBackend::Memory {
        // nothing survives a restart, start from the stock grants
        seed_default_grants(store.as_ref()).await?;
    }
    // Init App State
    let app_state = Arc::new(AppState {
        store,
        grant_cache,
        config: config.clone(),
    });

    let app = init_openapi_route(app_state);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await?;
    Ok(())
}
