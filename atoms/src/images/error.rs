use lambda_http::http::StatusCode;
use thiserror::Error;

/// Failures of the image URL endpoints.
/// Client variants are reported verbatim; `Internal` keeps its detail for the logs only.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("File ID is required")]
    MissingFileId,

    #[error("Invalid file ID")]
    MalformedFileId,

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Size must be a positive whole number")]
    InvalidSize,

    #[error("Internal server error")]
    Internal(String),
}

impl ImageError {
    pub fn status(&self) -> StatusCode {
        match self {
            ImageError::MissingFileId
            | ImageError::MalformedFileId
            | ImageError::InvalidBody(_)
            | ImageError::InvalidSize => StatusCode::BAD_REQUEST,
            ImageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_hides_detail() {
        let err = ImageError::Internal("serde blew up at line 3".to_string());
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_errors_are_bad_request() {
        assert_eq!(ImageError::MissingFileId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ImageError::InvalidSize.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ImageError::MalformedFileId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ImageError::InvalidBody("expected value".into()).to_string(),
            "Invalid request body"
        );
    }
}
