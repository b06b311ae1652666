//! Application configuration.
//!
//! Loaded from environment variables with the `HAVEN` prefix; nested values
//! use `__` as separator. A `.env` file is read first when present.
//!
//! ```no_run
//! use haven_server::config::AppConfig;
//!
//! let config = AppConfig::load().expect("failed to load configuration");
//! config.validate().expect("invalid configuration");
//! ```

mod error;
mod server;
mod services;

pub use error::{ConfigError, ValidationError};
pub use haven_op_router::RouterConfig;
pub use server::ServerConfig;
pub use services::{MapsConfig, ReasoningConfig, SpecialistConfig, TwilioConfig};

use serde::Deserialize;
use std::collections::HashMap;

const ENV_PREFIX: &str = "HAVEN";
const ENV_SEPARATOR: &str = "__";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Bind address, logging, request deadline
    #[serde(default)]
    pub server: ServerConfig,

    /// Routing pass: prompt, ceiling, fallback, sampling
    #[serde(default)]
    pub router: RouterConfig,

    /// Reasoning service endpoint and credentials
    #[serde(default)]
    pub reasoning: ReasoningConfig,

    /// Specialist model overrides
    #[serde(default)]
    pub specialist: SpecialistConfig,

    /// Google Maps credentials
    #[serde(default)]
    pub maps: MapsConfig,

    /// Twilio credentials and the emergency contact
    #[serde(default)]
    pub twilio: TwilioConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// - `HAVEN__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `HAVEN__ROUTER__MAX_ITERATIONS=10` -> `router.max_iterations = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_environment(config::Environment::default())
    }

    /// Load configuration from an explicit variable map instead of the
    /// process environment. Keys use the same `HAVEN__...` names.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_environment(config::Environment::default().source(Some(vars)))
    }

    fn from_environment(env: config::Environment) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(env.prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        validate_router(&self.router)?;
        self.reasoning.validate()?;
        self.specialist.validate()?;
        self.maps.validate()?;
        self.twilio.validate()?;
        Ok(())
    }
}

fn validate_router(router: &RouterConfig) -> Result<(), ValidationError> {
    if router.max_iterations == 0 {
        return Err(ValidationError::InvalidMaxIterations);
    }
    if let Some(t) = router.temperature
        && !(0.0..=2.0).contains(&t)
    {
        return Err(ValidationError::InvalidTemperature);
    }
    if router.system_prompt.trim().is_empty() {
        return Err(ValidationError::MissingRequired("HAVEN__ROUTER__SYSTEM_PROMPT"));
    }
    Ok(())
}
