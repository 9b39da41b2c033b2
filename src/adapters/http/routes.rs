//! Axum router for the gatekeeping and reconciliation API.

use std::time::Duration;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    credential_report, delinquency_report, evaluate_access, handle_gateway_webhook, open_thread,
    persist_token, poll_messages, post_message, revoke_token, submit_proof, AppState,
};

/// Builds the complete API router.
///
/// - `GET  /api/access` - access decision for an identity
/// - `POST /api/webhooks/gateway` - signed gateway events (no auth,
///   signature verified)
/// - `GET  /api/delinquency` - unpaid-accounts report
/// - `POST /api/payments/proof` - manual proof submission
/// - `PUT|DELETE|GET /api/credential` - gateway token lifecycle
/// - `POST /api/support/threads` - open or reuse the billing-urgent thread
/// - `POST|GET /api/support/threads/:id/messages` - post and poll messages
pub fn api_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/api/access", get(evaluate_access))
        .route("/api/webhooks/gateway", post(handle_gateway_webhook))
        .route("/api/delinquency", get(delinquency_report))
        .route("/api/payments/proof", post(submit_proof))
        .route(
            "/api/credential",
            put(persist_token).delete(revoke_token).get(credential_report),
        )
        .route("/api/support/threads", post(open_thread))
        .route(
            "/api/support/threads/:id/messages",
            post(post_message).get(poll_messages),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
