use jabaki_atoms::images::ImageSize;
use std::env;
use thiserror::Error;

pub const DEFAULT_SERVICE_NAME: &str = "JaBaKi";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("DEFAULT_IMAGE_SIZE must be a positive integer, got {0:?}")]
    InvalidImageSize(String),
}

/// Settings read from the Lambda environment once per cold start
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Name shown in the `GET /` banner (`SERVICE_NAME`)
    pub service_name: String,
    /// Template used when a request names no size (`DEFAULT_IMAGE_SIZE`, unset = no suffix)
    pub default_size: ImageSize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            default_size: ImageSize::Original,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_name = lookup("SERVICE_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let default_size = match lookup("DEFAULT_IMAGE_SIZE") {
            None => ImageSize::Original,
            Some(raw) if raw.trim().is_empty() => ImageSize::Original,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(px) if px > 0 => ImageSize::Square(px),
                _ => return Err(ConfigError::InvalidImageSize(raw)),
            },
        };

        Ok(Self {
            service_name,
            default_size,
        })
    }
}
