//! Per-request timing middleware.
//!
//! Every inbound request passes through [`track_timing`], which measures
//! wall-clock duration from entry to exit of the wrapped handler and feeds
//! it into the shared [`RequestStats`](hashvault::RequestStats) — whatever
//! the outcome of the request. The background phase of an encoding task is
//! not part of the measurement: by the time it runs, the response has
//! already left.

use crate::server::routes::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub async fn track_timing(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    tracing::info!("Received {} {}", request.method(), request.uri().path());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    state.service.record_request(elapsed);
    tracing::debug!("Request handled in {} microseconds", elapsed.as_micros());

    response
}
