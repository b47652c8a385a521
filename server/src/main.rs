use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use todo_server::{router, Mode, RecordService, ServerConfig, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,todo_server=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let config = ServerConfig::parse();

    let store = Store::open(&config.db_path)?;
    let app = router(RecordService::new(store.clone()), &config);

    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    tracing::info!("API available at http://{}/api", config.addr());
    if config.mode == Mode::Production {
        tracing::info!(dir = %config.public_dir.display(), "serving UI bundle");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await?;
    tracing::info!("store closed, bye");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
