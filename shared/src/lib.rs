pub mod config;
pub mod cors;
pub mod service_info;

pub use config::{ApiConfig, ConfigError};

/// Immutable per-process state handed to every invocation
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(ApiConfig::from_env()?))
    }
}
