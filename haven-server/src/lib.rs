#![deny(missing_docs)]
//! HTTP shell for the haven routing operator.
//!
//! Wires configuration, the OpenAI-compatible reasoning and specialist
//! providers, the Google Maps and Twilio backends and the capability
//! registry into a [`RouterOperator`], then serves it over axum:
//!
//! - `POST /ask` for the web frontend
//! - `POST /whatsapp_ask` for the Twilio messaging webhook
//! - `GET /health`

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::{AppConfig, ConfigError, ValidationError};
pub use routes::create_router;
pub use state::{AppState, RequestError};

use haven_capabilities::{GoogleMaps, SpecialistTool, Twilio, standard_registry};
use haven_op_router::RouterOperator;
use haven_provider_openai::OpenAi;
use haven_tool::RegistryError;
use std::sync::Arc;
use thiserror::Error;

/// Errors that stop the server from starting.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Two capabilities share a name.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The HTTP client could not be built.
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),

    /// The bind address is malformed.
    #[error("invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    /// Binding or serving failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Build the shared state from validated configuration.
///
/// The registry is frozen here; nothing registers capabilities afterwards.
pub fn build_state(config: &AppConfig) -> Result<AppState<OpenAi>, StartupError> {
    let http = reqwest::Client::builder()
        .timeout(config.reasoning.timeout())
        .build()?;

    let reasoning = OpenAi::new(&config.reasoning.api_key)
        .model(&config.reasoning.model)
        .base_url(&config.reasoning.base_url)
        .http_client(http.clone());

    let specialist = SpecialistTool::new(
        OpenAi::new(config.specialist.api_key_or(&config.reasoning))
            .model(config.specialist.model_or(&config.reasoning))
            .base_url(config.specialist.base_url_or(&config.reasoning))
            .http_client(http.clone()),
    )
    .temperature(config.specialist.temperature)
    .max_tokens(config.specialist.max_tokens);

    let mut maps = GoogleMaps::new(&config.maps.api_key).http_client(http.clone());
    if let Some(url) = non_blank(&config.maps.base_url) {
        maps = maps.base_url(url);
    }

    let twilio_config = &config.twilio;
    let mut twilio = Twilio::new(
        &twilio_config.account_sid,
        &twilio_config.auth_token,
        &twilio_config.from_number,
        &twilio_config.emergency_contact,
    )
    .http_client(http);
    if let Some(text) = non_blank(&twilio_config.announcement) {
        twilio = twilio.announcement(text);
    }
    if let Some(url) = non_blank(&twilio_config.base_url) {
        twilio = twilio.base_url(url);
    }

    let registry = standard_registry(specialist, Arc::new(maps), Arc::new(twilio))?;
    tracing::info!(capabilities = ?registry.names(), "capability registry frozen");

    let operator = RouterOperator::new(reasoning, Arc::new(registry), config.router.clone());
    Ok(AppState::new(operator, config.server.request_timeout()))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
