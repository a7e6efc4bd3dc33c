use jabaki_shared::AppState;
use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch adds its own timestamps
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let state = Arc::new(AppState::from_env()?);
    tracing::info!(
        "Starting {} API - default size: {:?}",
        state.config.service_name,
        state.config.default_size
    );

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
