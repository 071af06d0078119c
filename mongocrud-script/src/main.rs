use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use mongocrud::{backend::StoreBackendBuilder, mongodb::MongoDbStore, store::RecordStore};
use mongocrud_script::{config::Cli, run_scenario};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let backend = MongoDbStore::builder(&cli.uri, &cli.database)
        .app_name("mongocrud-script")
        .connect_timeout(cli.connect_timeout())
        .operation_timeout(cli.operation_timeout())
        .build()
        .await
        .context("could not connect to MongoDB")?;

    let store = RecordStore::new(backend);
    let result = run_scenario(&store.collection(&cli.collection)).await;

    if let Err(e) = store.shutdown().await {
        error!(error = %e, "failed to disconnect from MongoDB");
    }

    let report = result.context("scenario failed")?;
    info!(
        id = %report.inserted_id,
        modified = report.modified,
        deleted = report.deleted,
        remaining_j = report.j_records.len(),
        "scenario complete"
    );

    Ok(())
}
