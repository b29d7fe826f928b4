use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

/// Server configuration.
///
/// Layered: built-in defaults, then an optional config file, then `LOCKER_*`
/// environment variables (e.g. `LOCKER_SERVICE_TOKEN`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Token government services must present to file documents.
    pub service_token: String,
    /// Seed the locker and inbox with demo content at start-up.
    pub seed_demo_data: bool,
    /// YAML file of disclosure requests to load instead of the demo inbox.
    #[serde(default)]
    pub requests_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration. `file` names an optional config file, with or
    /// without extension (`locker` matches `locker.toml`, `locker.yaml`...).
    pub fn load(file: Option<&Path>) -> Result<Self, AppError> {
        let file = file.unwrap_or_else(|| Path::new("locker"));

        config::Config::builder()
            .set_default("bind_addr", "127.0.0.1:3000")
            .and_then(|b| b.set_default("service_token", "dev-token"))
            .and_then(|b| b.set_default("seed_demo_data", true))
            .map_err(|e| AppError::Config(e.to_string()))?
            .add_source(config::File::from(file).required(false))
            .add_source(config::Environment::with_prefix("LOCKER").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| AppError::Config(e.to_string()))
    }
}
