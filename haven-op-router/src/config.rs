//! Configuration for the routing operator.

use serde::Deserialize;

/// Instruction seeded as the system message of every pass unless the
/// caller supplies its own.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a compassionate AI mental health assistant. You help users by:

1. Using `ask_mental_health_specialist` ONCE to get therapeutic guidance for general questions
2. Using `find_nearby_therapists_by_location` if the user asks for local therapist recommendations
3. Using `emergency_call_tool` ONLY if the user expresses suicidal thoughts or immediate self-harm risk

IMPORTANT:
- Call each tool only ONCE per user message
- After receiving tool results, respond to the user directly
- Do NOT call tools repeatedly
- Be warm, supportive, and professional in your responses";

/// Returned when a pass completes without any agent text.
pub const DEFAULT_FALLBACK_RESPONSE: &str = "I'm here to support you, but I couldn't generate a response. Please try rephrasing your message.";

/// Static configuration for a [`RouterOperator`](crate::RouterOperator).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Default system instruction.
    pub system_prompt: String,
    /// Model identifier (None = provider default).
    pub model: Option<String>,
    /// Max output tokens per reasoning call.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Hard ceiling on reasoning calls per pass. Zero is treated as one.
    pub max_iterations: u32,
    /// Response used when no agent text was produced.
    pub fallback_response: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            model: None,
            max_tokens: 1024,
            temperature: Some(0.2),
            max_iterations: 50,
            fallback_response: DEFAULT_FALLBACK_RESPONSE.into(),
        }
    }
}
