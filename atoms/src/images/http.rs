use lambda_http::{Body, Error as LambdaError, Response, http::StatusCode};

use super::model::{FileId, ImageSize, ImageUrlResponse, Lh3Response};
use super::service::{
    build_lh3_url, decode_path_id, parse_lh3_request, parse_size_param, require_file_id,
};
use crate::response::{image_error_response, json_response};

/// HTTP Handler: GET /api/google-image/{id}
/// `path_id` is the still percent-encoded path remainder, `size_param` the raw `?size=` value.
pub fn google_image_handler(
    path_id: &str,
    size_param: Option<&str>,
    default_size: ImageSize,
) -> Result<Response<Body>, LambdaError> {
    let decoded = match decode_path_id(path_id) {
        Ok(decoded) => decoded,
        Err(e) => return image_error_response(&e),
    };
    let raw = match require_file_id(Some(&decoded)) {
        Ok(raw) => raw,
        Err(e) => return image_error_response(&e),
    };
    let size = match parse_size_param(size_param, default_size) {
        Ok(size) => size,
        Err(e) => return image_error_response(&e),
    };

    let file_id = FileId::extract(raw);
    let url = build_lh3_url(&file_id, size);
    tracing::info!("🖼️ google-image: raw={} file_id={} size={:?}", raw, file_id, size.pixels());

    json_response(StatusCode::OK, &ImageUrlResponse { url })
}

/// HTTP Handler: POST /api/generate-lh3
pub fn generate_lh3_handler(
    body: &[u8],
    default_size: ImageSize,
) -> Result<Response<Body>, LambdaError> {
    let (file_id, size) = match parse_lh3_request(body, default_size) {
        Ok(parsed) => parsed,
        Err(e) => return image_error_response(&e),
    };

    let url = build_lh3_url(&file_id, size);
    tracing::info!("✅ generate-lh3: file_id={} size={:?}", file_id, size.pixels());

    let response = Lh3Response {
        file_id: file_id.into_inner(),
        lh3_url: url.clone(),
        url,
        size: size.pixels(),
    };
    json_response(StatusCode::OK, &response)
}
