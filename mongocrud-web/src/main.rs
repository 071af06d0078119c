use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use mongocrud::{backend::StoreBackendBuilder, mongodb::MongoDbStore, store::RecordStore};
use mongocrud_web::{app, config::Config, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let backend = MongoDbStore::builder(&config.mongodb_uri, &config.database)
        .app_name("mongocrud-web")
        .connect_timeout(config.connect_timeout)
        .operation_timeout(config.operation_timeout)
        .build()
        .await
        .context("could not connect to MongoDB")?;

    let state = Arc::new(AppState::new(
        RecordStore::new(backend).into_dyn(),
        config.collection.clone(),
    ));

    let served = serve(&config, state.clone()).await;

    if let Err(e) = state.store.shutdown().await {
        error!(error = %e, "failed to disconnect from MongoDB");
    }

    served
}

async fn serve(config: &Config, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.server_address)
        .await
        .with_context(|| format!("bind {}", config.server_address))?;
    info!(address = %config.server_address, collection = %config.collection, "server listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "cannot listen for the shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
