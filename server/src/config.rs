use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// `GET /` describes the API; the UI is served separately.
    #[default]
    Development,
    /// The built UI bundle is served from `public_dir`.
    Production,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server")]
#[command(about = "Todo list REST API backed by SQLite")]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long = "db", env = "DATABASE_PATH", default_value = "./data/todos.sqlite")]
    pub db_path: PathBuf,

    #[arg(long, env = "APP_MODE", value_enum, default_value_t = Mode::Development)]
    pub mode: Mode,

    #[arg(long, env = "PUBLIC_DIR", default_value = "./public")]
    pub public_dir: PathBuf,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_path: PathBuf::from("./data/todos.sqlite"),
            mode: Mode::Development,
            public_dir: PathBuf::from("./public"),
        }
    }
}
