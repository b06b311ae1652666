//! Translating a reasoning-service response into a routing decision.

use haven_turn::{ProviderError, ProviderResponse, StopReason, parts_to_text, tool_uses};
use serde::{Deserialize, Serialize};

/// A request to run one capability with resolved arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Correlation id echoed back with the result.
    pub id: String,
    /// Capability to run.
    pub capability_name: String,
    /// Argument object.
    pub arguments: serde_json::Value,
}

impl Invocation {
    /// Build an invocation, normalising the arguments into a JSON object.
    ///
    /// Arguments may arrive as an object or as a JSON-encoded string. A
    /// missing value or blank string means no arguments. Anything else that
    /// does not resolve to an object is a malformed request.
    pub fn resolve(
        id: String,
        capability_name: String,
        raw: serde_json::Value,
    ) -> Result<Self, ProviderError> {
        let arguments = match raw {
            serde_json::Value::Object(_) => raw,
            serde_json::Value::Null => serde_json::json!({}),
            serde_json::Value::String(s) if s.trim().is_empty() => serde_json::json!({}),
            serde_json::Value::String(s) => match serde_json::from_str(&s) {
                Ok(v @ serde_json::Value::Object(_)) => v,
                _ => {
                    return Err(ProviderError::InvalidResponse(format!(
                        "malformed arguments for {capability_name}: {s}"
                    )));
                }
            },
            other => {
                return Err(ProviderError::InvalidResponse(format!(
                    "arguments for {capability_name} are not an object: {other}"
                )));
            }
        };
        Ok(Self {
            id,
            capability_name,
            arguments,
        })
    }
}

/// What the reasoning service asked for at one step.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// A stand-alone answer; the pass ends.
    Respond {
        /// Answer text (may be empty).
        text: String,
    },
    /// Run these capabilities, optionally after saying something.
    Invoke {
        /// Provisional text emitted alongside the requests.
        text: Option<String>,
        /// Requests in the order the service issued them.
        invocations: Vec<Invocation>,
    },
}

/// Derive the [`Decision`] for one response.
///
/// Tool requests take precedence over the stop reason, since some
/// OpenAI-compatible backends report `stop` while still returning calls.
/// A truncated or filtered response is a reasoning-service failure.
pub fn decide(response: &ProviderResponse, step: u32) -> Result<Decision, ProviderError> {
    match response.stop_reason {
        StopReason::MaxTokens => {
            return Err(ProviderError::InvalidResponse(
                "output truncated (max_tokens)".into(),
            ));
        }
        StopReason::ContentFilter => {
            return Err(ProviderError::InvalidResponse("content filtered".into()));
        }
        StopReason::EndTurn | StopReason::ToolUse => {}
    }

    let text = parts_to_text(&response.content);
    let uses = tool_uses(&response.content);

    if uses.is_empty() {
        if response.stop_reason == StopReason::ToolUse {
            return Err(ProviderError::InvalidResponse(
                "tool_use stop without any tool request".into(),
            ));
        }
        return Ok(Decision::Respond { text });
    }

    let invocations = uses
        .into_iter()
        .enumerate()
        .map(|(idx, (id, name, input))| {
            let id = if id.is_empty() {
                format!("call_{step}_{idx}")
            } else {
                id
            };
            Invocation::resolve(id, name, input)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Decision::Invoke {
        text: (!text.is_empty()).then_some(text),
        invocations,
    })
}
