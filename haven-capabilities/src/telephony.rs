//! Outbound emergency calls.

use async_trait::async_trait;
use thiserror::Error;

/// Default Twilio REST API base URL.
const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

/// Spoken when the call connects, unless overridden.
const DEFAULT_ANNOUNCEMENT: &str = "This is an automated alert from the Haven support assistant. \
A user may be in crisis and needs immediate help. Please reach out to them right away.";

/// Errors from a telephony backend.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CallError {
    /// HTTP or network request failed.
    #[error("request failed: {0}")]
    Request(String),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// Response body.
        body: String,
    },
}

/// Identifier of a placed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallReceipt {
    /// Backend call id (empty if the backend did not return one).
    pub sid: String,
}

/// Places the emergency call. Each call to [`Telephony::place_call`]
/// dials once; callers are responsible for not repeating it.
#[async_trait]
pub trait Telephony: Send + Sync {
    /// Dial the configured emergency contact.
    async fn place_call(&self) -> Result<CallReceipt, CallError>;
}

/// Twilio Programmable Voice client.
///
/// # Example
///
/// ```no_run
/// use haven_capabilities::Twilio;
///
/// let twilio = Twilio::new("AC...", "token", "+15550001111", "+15550002222");
/// ```
pub struct Twilio {
    account_sid: String,
    auth_token: String,
    from: String,
    to: String,
    announcement: String,
    base_url: String,
    client: reqwest::Client,
}

impl Twilio {
    /// Create a client that calls `to` from `from`.
    #[must_use]
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from: from.into(),
            to: to.into(),
            announcement: DEFAULT_ANNOUNCEMENT.into(),
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the message read out when the call connects.
    #[must_use]
    pub fn announcement(mut self, text: impl Into<String>) -> Self {
        self.announcement = text.into();
        self
    }

    /// Override the API base URL (tests, proxies).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub(crate) fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.base_url.trim_end_matches('/'),
            self.account_sid
        )
    }

    pub(crate) fn twiml(&self) -> String {
        format!(
            "<Response><Say>{}</Say></Response>",
            escape_xml(&self.announcement)
        )
    }
}

#[async_trait]
impl Telephony for Twilio {
    async fn place_call(&self) -> Result<CallReceipt, CallError> {
        let url = self.calls_url();
        tracing::info!(url = %url, to = %self.to, "placing emergency call");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", self.to.as_str()),
                ("From", self.from.as_str()),
                ("Twiml", self.twiml().as_str()),
            ])
            .send()
            .await
            .map_err(|e| CallError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CallError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(CallError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let sid = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v["sid"].as_str().map(String::from))
            .unwrap_or_default();
        Ok(CallReceipt { sid })
    }
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
