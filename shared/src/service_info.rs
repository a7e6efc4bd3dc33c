use jabaki_atoms::response::json_response;
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Serialize;

/// Routes listed by the banner
pub const ENDPOINTS: [&str; 3] = ["/health", "/api/google-image/<file_id>", "/api/generate-lh3"];

#[derive(Serialize)]
struct Banner<'a> {
    message: String,
    endpoints: &'a [&'a str],
}

/// GET /
pub fn banner(service_name: &str) -> Result<Response<Body>, Error> {
    let banner = Banner {
        message: format!("{} API is running", service_name),
        endpoints: &ENDPOINTS,
    };
    json_response(StatusCode::OK, &banner)
}

/// GET /health
pub fn health() -> Result<Response<Body>, Error> {
    json_response(StatusCode::OK, &serde_json::json!({ "status": "healthy" }))
}
