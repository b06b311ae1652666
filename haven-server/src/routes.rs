//! Route configuration.

use axum::Router;
use axum::extract::Request;
use axum::routing::{get, post};
use haven_turn::Provider;
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::handlers::{ask, health, whatsapp_ask};
use crate::state::AppState;

/// Build the application router.
///
/// Routes:
/// - `POST /ask` - JSON `{"message"}` -> `{"response", "tool_called"}`
/// - `POST /whatsapp_ask` - Twilio form `Body` -> TwiML
/// - `GET /health` - liveness
pub fn create_router<P: Provider + 'static>(state: AppState<P>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .route("/ask", post(ask::<P>))
        .route("/whatsapp_ask", post(whatsapp_ask::<P>))
        .route("/health", get(health))
        .layer(trace_layer)
        .with_state(state)
}
