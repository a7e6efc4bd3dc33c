use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Serialize;

use crate::images::ImageError;

/// JSON response with the given status. CORS headers are added by the router.
pub fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(payload)?.into())
        .map_err(Box::new)?)
}

/// `{"error": message}` with the given status
pub fn error_response(status: StatusCode, message: &str) -> Result<Response<Body>, Error> {
    json_response(status, &serde_json::json!({ "error": message }))
}

/// Map an `ImageError` to its response, logging whatever the caller is not shown.
pub fn image_error_response(err: &ImageError) -> Result<Response<Body>, Error> {
    match err {
        ImageError::Internal(detail) => tracing::error!("❌ Internal error: {}", detail),
        ImageError::InvalidBody(detail) => tracing::warn!("⚠️ Invalid request body: {}", detail),
        other => tracing::warn!("⚠️ Rejected request: {}", other),
    }
    error_response(err.status(), &err.to_string())
}
