//! Pass events and the reducer that collapses them into an [`Outcome`].

use serde::{Deserialize, Serialize};

/// Value of [`Outcome::tool_called`] when no capability fired.
pub const NO_TOOL: &str = "none";

/// Something observable that happened during a pass, in temporal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// A capability ran and produced this text (possibly an error description).
    Tool {
        /// Name of the capability.
        capability_name: String,
        /// Result or error text.
        result_text: String,
    },
    /// The reasoning service said something to the user.
    Agent {
        /// The utterance.
        text: String,
    },
}

impl Event {
    /// A tool event.
    pub fn tool(capability_name: impl Into<String>, result_text: impl Into<String>) -> Self {
        Event::Tool {
            capability_name: capability_name.into(),
            result_text: result_text.into(),
        }
    }

    /// An agent event.
    pub fn agent(text: impl Into<String>) -> Self {
        Event::Agent { text: text.into() }
    }
}

/// The single externally visible result of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Last capability that fired, or [`NO_TOOL`].
    pub tool_called: String,
    /// Last non-empty agent utterance, or the fallback.
    pub final_response: String,
}

/// Reduce an ordered event sequence to an [`Outcome`].
///
/// Later events supersede earlier ones: the last tool event names the
/// capability, the last non-empty agent text is the response.
pub fn reduce(events: &[Event], fallback: &str) -> Outcome {
    let mut tool_called: Option<&str> = None;
    let mut final_response: Option<&str> = None;

    for event in events {
        match event {
            Event::Tool {
                capability_name, ..
            } => tool_called = Some(capability_name),
            Event::Agent { text } if !text.is_empty() => final_response = Some(text),
            Event::Agent { .. } => {}
        }
    }

    Outcome {
        tool_called: tool_called.unwrap_or(NO_TOOL).to_string(),
        final_response: final_response.unwrap_or(fallback).to_string(),
    }
}
