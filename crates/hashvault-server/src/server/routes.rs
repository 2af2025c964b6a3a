//! Route handlers and router assembly.
//!
//! The handlers are thin adapters between HTTP and the
//! [`EncodingService`] façade: they extract and hand over, and they map
//! each library error variant onto its response status. All shared state
//! lives in [`AppState`], injected through the router — there are no
//! process-wide singletons, so tests can build an isolated router per case.

use crate::server::timing::track_timing;
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use hashvault::{EncodingService, EncodingTicket, Error, LOOKUP_PATH, StatsSnapshot};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: EncodingService,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(service: EncodingService, shutdown: CancellationToken) -> Self {
        Self { service, shutdown }
    }
}

/// Adapter mapping library errors onto HTTP responses.
///
/// - `InvalidRequest` → 400 with the validation message
/// - `KeyNotFound` → 404
/// - `ChannelError` → 500
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Error::KeyNotFound { .. } => StatusCode::NOT_FOUND,
            Error::ChannelError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.0.to_string()).into_response()
    }
}

/// Form body of a submission. The field is optional so that its absence
/// surfaces as a validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    password: Option<String>,
}

/// `POST /hash` — accept a credential and answer with its ticket before
/// the encoding work begins.
async fn encode_and_persist(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> Result<(StatusCode, Json<EncodingTicket>), ApiError> {
    let ticket = state.service.submit(form.password).await?;
    Ok((StatusCode::ACCEPTED, Json(ticket)))
}

/// `GET /hash/{key}` — plain-text digest for a key, or the empty
/// placeholder while the encoding is still pending.
async fn lookup_encoding(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<String, ApiError> {
    Ok(state.service.lookup(&key)?)
}

/// `GET /stats` — aggregate request count and average latency.
async fn report_statistics(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.service.stats())
}

/// `GET /shutdown` — request a graceful drain. Acknowledged before the
/// server actually begins shutting down.
async fn request_shutdown(State(state): State<AppState>) -> StatusCode {
    tracing::info!("Shutdown requested over HTTP");
    state.shutdown.cancel();
    StatusCode::ACCEPTED
}

/// Assembles the application router with the timing layer wrapped around
/// every route, the stats endpoint included.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(LOOKUP_PATH, post(encode_and_persist))
        .route(&format!("{LOOKUP_PATH}/{{key}}"), get(lookup_encoding))
        .route("/stats", get(report_statistics))
        .route("/shutdown", get(request_shutdown))
        .layer(middleware::from_fn_with_state(state.clone(), track_timing))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use core::time::Duration;
    use tower::ServiceExt;

    const DELAY: Duration = Duration::from_secs(5);

    fn test_router() -> (Router, CancellationToken) {
        let shutdown = CancellationToken::new();
        let state = AppState::new(EncodingService::new(DELAY), shutdown.clone());
        (build_router(state), shutdown)
    }

    fn submit_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/hash")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Waits past the encoding delay. Under `start_paused`, the runtime
    /// auto-advances the clock once every task is parked on a timer, so
    /// the background task's earlier deadline fires first.
    async fn outwait_delay() {
        tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn submission_is_accepted_with_a_ticket() {
        let (router, _) = test_router();
        let response = router.oneshot(submit_request("password=P%40ssW0rd%21")).await.unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let ticket: EncodingTicket =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(ticket.url, "/hash/1");
        assert!(!ticket.time_available.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_serves_the_placeholder_then_the_digest() {
        let (router, _) = test_router();

        let response = router
            .clone()
            .oneshot(submit_request("password=P%40ssW0rd%21"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = router.clone().oneshot(get_request("/hash/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "");

        outwait_delay().await;

        let response = router.clone().oneshot(get_request("/hash/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            "62+j0x1/W8bCgSgF3YggMtf+AfOqb28xuOXvKvTXBs8iDZDwQci9cGBiNdHvHHyywclJeKIhPWoftStSNJdf5g=="
        );
    }

    #[tokio::test(start_paused = true)]
    async fn empty_credential_is_accepted_and_eventually_encoded() {
        let (router, _) = test_router();

        let response = router.clone().oneshot(submit_request("password=")).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        outwait_delay().await;

        let response = router.clone().oneshot(get_request("/hash/1")).await.unwrap();
        assert_eq!(
            body_string(response).await,
            "z4PhNX7vuL3xVChQ1m2AB9Yg5AULVxXcg/SpIdNs6c5H0NE8XYXysP+DGNKHfuwvY7kxvUdBeoGlODJ6+SfaPg=="
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_credential_field_is_a_bad_request() {
        let (router, _) = test_router();
        let response = router.oneshot(submit_request("user=nobody")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_key_is_a_bad_request() {
        let (router, _) = test_router();
        let response = router.oneshot(get_request("/hash/not-a-key")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn unallocated_key_is_not_found() {
        let (router, _) = test_router();
        let response = router.oneshot(get_request("/hash/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_method_is_rejected() {
        let (router, _) = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/hash")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test(start_paused = true)]
    async fn every_request_is_counted_in_the_statistics() {
        let (router, _) = test_router();

        // The stats handler snapshots before the timing layer records its
        // own request, so a fresh router reports zero.
        let response = router.clone().oneshot(get_request("/stats")).await.unwrap();
        let snapshot: StatsSnapshot =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(snapshot, StatsSnapshot { total: 0, average: 0 });

        router
            .clone()
            .oneshot(submit_request("password=stats"))
            .await
            .unwrap();
        router.clone().oneshot(get_request("/hash/1")).await.unwrap();

        let response = router.clone().oneshot(get_request("/stats")).await.unwrap();
        let snapshot: StatsSnapshot =
            serde_json::from_str(&body_string(response).await).unwrap();
        // First stats call + submission + lookup.
        assert_eq!(snapshot.total, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_endpoint_cancels_the_token() {
        let (router, shutdown) = test_router();
        let response = router.oneshot(get_request("/shutdown")).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(shutdown.is_cancelled());
    }
}
