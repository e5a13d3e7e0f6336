use std::fs::File;

use products_axum::{router, start_server};
use products_server::{AppConfig, Cli, app::ServerApp};
use products_sqlite::Db;
use tracing::{Level, event};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let (router, api) = router(ServerApp(db), &server)?;

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        serde_json::to_writer_pretty(File::create(&path)?, api.as_ref())?;
        event!(Level::INFO, path = %path.display(), "wrote API documentation");
        return Ok(());
    }

    if server.allowed_origin.is_none() {
        event!(
            Level::WARN,
            "no allowed origin configured, cross-origin requests will be refused"
        );
    }

    start_server(&server, router).await?;
    Ok(())
}
