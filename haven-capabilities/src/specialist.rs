//! `ask_mental_health_specialist`: therapeutic guidance from a specialist model.

use haven_tool::{Parameter, ToolDyn, ToolError, ToolFuture, required_str};
use haven_turn::{Provider, ProviderRequest, parts_to_text, system_message, user_message};

/// Capability name.
pub const NAME: &str = "ask_mental_health_specialist";

const DESCRIPTION: &str = "Generate a therapeutic response from a mental health specialist model. \
Use this for all general user queries, mental health questions, emotional concerns, \
or to offer empathetic, evidence-based guidance in a conversational tone.";

/// Persona the specialist model answers in.
pub const SPECIALIST_PROMPT: &str = "\
You are an experienced clinical psychologist talking with someone who reached out for support.
Respond with warmth and without judgement. Acknowledge their feelings first, then offer
practical, evidence-based suggestions in plain conversational language. Ask at most one gentle
follow-up question. Keep the reply to a few short paragraphs and never diagnose.";

/// Forwards the user's query to a specialist model.
///
/// Pure text generation: no side effects, safe to call for any query.
pub struct SpecialistTool<P: Provider> {
    provider: P,
    model: Option<String>,
    temperature: Option<f64>,
    max_tokens: u32,
}

impl<P: Provider> SpecialistTool<P> {
    /// Wrap a specialist provider with default sampling settings.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            model: None,
            temperature: Some(0.7),
            max_tokens: 512,
        }
    }

    /// Use a specific model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Override the maximum response length.
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    async fn ask(&self, query: &str) -> Result<String, ToolError> {
        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![system_message(SPECIALIST_PROMPT), user_message(query)],
            tools: vec![],
            max_tokens: Some(self.max_tokens),
            temperature: self.temperature,
        };

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("specialist unavailable: {e}")))?;

        let text = parts_to_text(&response.content);
        if text.trim().is_empty() {
            return Err(ToolError::ExecutionFailed(
                "specialist returned an empty response".into(),
            ));
        }
        Ok(text)
    }
}

impl<P: Provider> ToolDyn for SpecialistTool<P> {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::string(
            "query",
            "The user's question or concern, in their own words.",
        )]
    }

    fn call(&self, input: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let query = required_str(&input, "query")?;
            let answer = self.ask(query).await?;
            Ok(serde_json::Value::String(answer))
        })
    }
}
