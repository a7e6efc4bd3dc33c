use lambda_http::{
    http::{header::HeaderValue, StatusCode},
    Body, Error, Response,
};

/// Every origin may call the API; only the verbs we serve are advertised.
pub fn with_cors_headers(mut resp: Response<Body>) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    resp
}

/// OPTIONS on any path: 200 with an empty body
pub fn preflight_response() -> Result<Response<Body>, Error> {
    let resp = Response::builder()
        .status(StatusCode::OK)
        .body(Body::Empty)
        .map_err(Box::new)?;
    Ok(with_cors_headers(resp))
}
