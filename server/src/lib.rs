//! Todo list REST API backed by a single SQLite table.
//!
//! # Overview
//! Layers, leaf first: [`store::Store`] runs parameterized statements,
//! [`service::RecordService`] applies record rules, and [`routes`] maps HTTP
//! requests onto the service. [`router`] assembles the full application,
//! including the mode-dependent root (API description in development, static
//! UI bundle in production).

pub mod codec;
pub mod config;
pub mod error;
pub mod query;
pub mod routes;
pub mod service;
pub mod store;
pub mod types;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub use config::{Mode, ServerConfig};
pub use service::RecordService;
pub use store::Store;
pub use types::{CreateRecord, DeleteConfirmation, Record, UpdateRecord};

/// Build the application router for `config`.
pub fn router(service: RecordService, config: &ServerConfig) -> Router {
    let app = Router::new().nest("/api", routes::api_routes(service));
    let app = match config.mode {
        Mode::Development => app.route("/", get(routes::api_info)),
        Mode::Production => {
            let index = ServeFile::new(config.public_dir.join("index.html"));
            app.fallback_service(ServeDir::new(&config.public_dir).fallback(index))
        }
    };
    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Development-mode application over `service`.
pub fn app(service: RecordService) -> Router {
    router(service, &ServerConfig::default())
}

pub async fn run(listener: TcpListener, service: RecordService) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service)).await
}
