//! HTTP handlers.
//!
//! Neither messaging endpoint surfaces a failure status: a failed or
//! timed-out pass becomes a fixed apology in the channel's own format.

use axum::Form;
use axum::extract::{Json, State};
use axum::http::header;
use axum::response::IntoResponse;
use haven_capabilities::escape_xml;
use haven_op_router::{NO_TOOL, reduce};
use haven_turn::Provider;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Apology returned by `/ask` when the pass fails or times out.
pub const ERROR_RESPONSE: &str =
    "I encountered an error while processing your request. Please try again.";

/// Fallback for `/whatsapp_ask` when no text was produced.
pub const WHATSAPP_FALLBACK: &str =
    "I'm here to support you, but I couldn't generate a response just now.";

/// `POST /ask` body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AskRequest {
    /// The user's message.
    pub message: String,
}

/// `POST /ask` reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AskResponse {
    /// Final answer text.
    pub response: String,
    /// Name of the capability that fired, or `"none"`.
    pub tool_called: String,
}

/// `POST /whatsapp_ask` form, as posted by the Twilio webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppForm {
    /// Message text.
    #[serde(rename = "Body", default)]
    pub body: String,
}

/// `POST /ask`
pub async fn ask<P: Provider + 'static>(
    State(state): State<AppState<P>>,
    Json(request): Json<AskRequest>,
) -> Json<AskResponse> {
    let reply = match state.run_pass(request.message).await {
        Ok(output) => AskResponse {
            response: output.outcome.final_response,
            tool_called: output.outcome.tool_called,
        },
        Err(_) => AskResponse {
            response: ERROR_RESPONSE.to_string(),
            tool_called: NO_TOOL.to_string(),
        },
    };
    Json(reply)
}

/// `POST /whatsapp_ask`
pub async fn whatsapp_ask<P: Provider + 'static>(
    State(state): State<AppState<P>>,
    Form(form): Form<WhatsAppForm>,
) -> impl IntoResponse {
    let user_text = form.body.trim().to_string();
    let text = match state.run_pass(user_text).await {
        Ok(output) => reduce(&output.events, WHATSAPP_FALLBACK).final_response,
        Err(_) => WHATSAPP_FALLBACK.to_string(),
    };
    (
        [(header::CONTENT_TYPE, "application/xml")],
        twiml_message(&text),
    )
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// Minimal TwiML reply carrying one message.
pub fn twiml_message(text: &str) -> String {
    format!("<Response><Message>{}</Message></Response>", escape_xml(text))
}
