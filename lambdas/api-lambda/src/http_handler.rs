use jabaki_atoms::images::{self, ImageError};
use jabaki_atoms::response::{error_response, image_error_response};
use jabaki_shared::{cors, service_info, AppState};
use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;

const GOOGLE_IMAGE_PREFIX: &str = "/api/google-image/";

/// Main Lambda handler - every route of the API goes through here
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    tracing::info!("🚀 API Lambda invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if *method == Method::OPTIONS {
        return cors::preflight_response();
    }

    finalize_response(route(&event, &state))
}

fn route(event: &Request, state: &AppState) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let default_size = state.config.default_size;

    // GET /api/google-image/{id} - {id} is percent-decoded by the handler and may be a whole share link
    if let Some(path_id) = path.strip_prefix(GOOGLE_IMAGE_PREFIX) {
        return match method {
            &Method::GET => {
                let size_param = event
                    .query_string_parameters_ref()
                    .and_then(|params| params.first("size"));
                images::google_image_handler(path_id, size_param, default_size)
            }
            _ => method_not_allowed(),
        };
    }

    match (method, path) {
        (&Method::GET, "/") => service_info::banner(&state.config.service_name),
        (&Method::GET, "/health") => service_info::health(),
        // GET /api/google-image - no id at all
        (&Method::GET, "/api/google-image") => {
            image_error_response(&ImageError::MissingFileId)
        }
        (&Method::POST, "/api/generate-lh3") => {
            images::generate_lh3_handler(event.body(), default_size)
        }
        (_, "/") | (_, "/health") | (_, "/api/google-image") | (_, "/api/generate-lh3") => {
            method_not_allowed()
        }
        _ => {
            tracing::warn!("⚠️ No route matched - Method: {} Path: {}", method, path);
            not_found()
        }
    }
}

/// Attach CORS headers; turn any failure that escaped a handler into a generic 500.
fn finalize_response(resp: Result<Response<Body>, Error>) -> Result<Response<Body>, Error> {
    match resp {
        Ok(resp) => Ok(cors::with_cors_headers(resp)),
        Err(e) => {
            let resp = image_error_response(&ImageError::Internal(e.to_string()))?;
            Ok(cors::with_cors_headers(resp))
        }
    }
}

fn method_not_allowed() -> Result<Response<Body>, Error> {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn not_found() -> Result<Response<Body>, Error> {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
