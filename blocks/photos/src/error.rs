use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid JSON in {context}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("credentials file has neither an \"installed\" nor a \"web\" client")]
    MissingClient,

    #[error("Authorization failed: {0}")]
    Authorization(String),
}

impl DriveError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        DriveError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        DriveError::Json {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DriveError>;
