//! Credentials and endpoints for the external services.

use haven_provider_openai::GROQ_BASE_URL;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Reasoning service (the router's model).
#[derive(Debug, Clone, Deserialize)]
pub struct ReasoningConfig {
    /// API key for the Chat Completions endpoint.
    #[serde(default)]
    pub api_key: String,

    /// Endpoint base URL (Groq by default).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used when the router config does not name one.
    #[serde(default = "default_model")]
    pub model: String,

    /// HTTP timeout per call, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ReasoningConfig {
    /// HTTP timeout per call.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate reasoning configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("HAVEN__REASONING__API_KEY"));
        }
        check_base_url(&self.base_url, "reasoning")
    }
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Specialist model behind `ask_mental_health_specialist`.
///
/// Unset fields fall back to the reasoning service's values.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialistConfig {
    /// API key; falls back to the reasoning key.
    pub api_key: Option<String>,

    /// Endpoint base URL; falls back to the reasoning endpoint.
    pub base_url: Option<String>,

    /// Model; falls back to the reasoning model.
    pub model: Option<String>,

    /// Sampling temperature.
    #[serde(default = "default_specialist_temperature")]
    pub temperature: f64,

    /// Maximum answer length.
    #[serde(default = "default_specialist_max_tokens")]
    pub max_tokens: u32,
}

impl SpecialistConfig {
    /// API key to use, given the reasoning settings.
    pub fn api_key_or<'a>(&'a self, reasoning: &'a ReasoningConfig) -> &'a str {
        non_blank(self.api_key.as_deref()).unwrap_or(&reasoning.api_key)
    }

    /// Base URL to use, given the reasoning settings.
    pub fn base_url_or<'a>(&'a self, reasoning: &'a ReasoningConfig) -> &'a str {
        non_blank(self.base_url.as_deref()).unwrap_or(&reasoning.base_url)
    }

    /// Model to use, given the reasoning settings.
    pub fn model_or<'a>(&'a self, reasoning: &'a ReasoningConfig) -> &'a str {
        non_blank(self.model.as_deref()).unwrap_or(&reasoning.model)
    }

    /// Validate specialist configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if let Some(url) = non_blank(self.base_url.as_deref()) {
            check_base_url(url, "specialist")?;
        }
        Ok(())
    }
}

impl Default for SpecialistConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            temperature: default_specialist_temperature(),
            max_tokens: default_specialist_max_tokens(),
        }
    }
}

/// Google Maps web services.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapsConfig {
    /// Maps API key.
    #[serde(default)]
    pub api_key: String,

    /// Override for the Maps base URL.
    pub base_url: Option<String>,
}

impl MapsConfig {
    /// Validate maps configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("HAVEN__MAPS__API_KEY"));
        }
        if let Some(url) = non_blank(self.base_url.as_deref()) {
            check_base_url(url, "maps")?;
        }
        Ok(())
    }
}

/// Twilio voice calls for the emergency capability.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TwilioConfig {
    /// Account SID.
    #[serde(default)]
    pub account_sid: String,

    /// Auth token.
    #[serde(default)]
    pub auth_token: String,

    /// Caller number (a Twilio number).
    #[serde(default)]
    pub from_number: String,

    /// The safety contact dialled in an emergency.
    #[serde(default)]
    pub emergency_contact: String,

    /// Text read out when the call connects.
    pub announcement: Option<String>,

    /// Override for the Twilio base URL.
    pub base_url: Option<String>,
}

impl TwilioConfig {
    /// Validate Twilio configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            (&self.account_sid, "HAVEN__TWILIO__ACCOUNT_SID"),
            (&self.auth_token, "HAVEN__TWILIO__AUTH_TOKEN"),
            (&self.from_number, "HAVEN__TWILIO__FROM_NUMBER"),
            (&self.emergency_contact, "HAVEN__TWILIO__EMERGENCY_CONTACT"),
        ];
        for (value, name) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingRequired(name));
            }
        }
        if let Some(url) = non_blank(self.base_url.as_deref()) {
            check_base_url(url, "twilio")?;
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_base_url(url: &str, service: &'static str) -> Result<(), ValidationError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::InvalidBaseUrl(service))
    }
}

fn default_base_url() -> String {
    GROQ_BASE_URL.to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_specialist_temperature() -> f64 {
    0.7
}

fn default_specialist_max_tokens() -> u32 {
    512
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reasoning() -> ReasoningConfig {
        ReasoningConfig {
            api_key: "gsk_test".into(),
            ..Default::default()
        }
    }

    #[test]
    fn reasoning_requires_api_key() {
        assert_eq!(
            ReasoningConfig::default().validate(),
            Err(ValidationError::MissingRequired("HAVEN__REASONING__API_KEY"))
        );
        assert!(reasoning().validate().is_ok());
    }

    #[test]
    fn reasoning_rejects_non_http_base_url() {
        let config = ReasoningConfig {
            base_url: "api.groq.com".into(),
            ..reasoning()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidBaseUrl("reasoning"))
        );
    }

    #[test]
    fn specialist_falls_back_to_reasoning() {
        let reasoning = reasoning();
        let specialist = SpecialistConfig::default();
        assert_eq!(specialist.api_key_or(&reasoning), "gsk_test");
        assert_eq!(specialist.base_url_or(&reasoning), GROQ_BASE_URL);
        assert_eq!(specialist.model_or(&reasoning), "llama-3.3-70b-versatile");

        let specialist = SpecialistConfig {
            model: Some("medgemma".into()),
            base_url: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(specialist.model_or(&reasoning), "medgemma");
        assert_eq!(specialist.base_url_or(&reasoning), GROQ_BASE_URL);
    }

    #[test]
    fn specialist_rejects_bad_temperature() {
        let config = SpecialistConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }

    #[test]
    fn twilio_reports_first_missing_field() {
        let config = TwilioConfig {
            account_sid: "AC1".into(),
            auth_token: "tok".into(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("HAVEN__TWILIO__FROM_NUMBER"))
        );
    }

    #[test]
    fn maps_requires_api_key() {
        assert_eq!(
            MapsConfig::default().validate(),
            Err(ValidationError::MissingRequired("HAVEN__MAPS__API_KEY"))
        );
    }
}
