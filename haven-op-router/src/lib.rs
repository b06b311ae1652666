#![deny(missing_docs)]
//! Routing operator: one bounded decision pass per user message.
//!
//! [`RouterOperator`] runs the Reason-Act-Observe cycle against a fixed
//! capability registry: ask the reasoning service for a step, run any
//! requested capabilities (each at most once per pass), feed results back,
//! and repeat until the service answers or the iteration ceiling is hit.
//! The recorded [`Event`]s are then reduced to a single [`Outcome`].

pub mod config;
pub mod decision;
pub mod error;
pub mod events;
pub mod execute;

pub use config::{DEFAULT_FALLBACK_RESPONSE, DEFAULT_SYSTEM_PROMPT, RouterConfig};
pub use decision::{Decision, Invocation, decide};
pub use error::PassError;
pub use events::{Event, NO_TOOL, Outcome, reduce};
pub use execute::{StepResult, execute};

use haven_tool::ToolRegistry;
use haven_turn::{
    ContentPart, Provider, ProviderMessage, ProviderRequest, Role, assistant_message,
    system_message, user_message,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Input to one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassInput {
    /// System instruction; `None` uses the configured prompt.
    pub system_instruction: Option<String>,
    /// The user's message.
    pub user_text: String,
}

impl PassInput {
    /// Input using the operator's default system instruction.
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            user_text: user_text.into(),
        }
    }

    /// Override the system instruction for this pass.
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// Why a pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// The reasoning service gave a stand-alone answer.
    Complete,
    /// The iteration ceiling was reached.
    MaxIterations,
}

/// Everything a pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassOutput {
    /// The reduced, externally visible result.
    pub outcome: Outcome,
    /// Events in the order they happened.
    pub events: Vec<Event>,
    /// Why the pass ended.
    pub exit_reason: ExitReason,
    /// Reasoning-service calls made.
    pub iterations_used: u32,
    /// Capabilities whose repeat invocation was refused, in order.
    pub refused: Vec<String>,
}

/// The decision engine.
///
/// Generic over `P: Provider` (not object-safe). Construct once and share
/// behind an `Arc`; passes hold no state between calls.
pub struct RouterOperator<P: Provider> {
    provider: P,
    tools: Arc<ToolRegistry>,
    config: RouterConfig,
}

impl<P: Provider> RouterOperator<P> {
    /// Create a new operator with all dependencies.
    ///
    /// A `max_iterations` of zero is raised to one; every pass asks the
    /// reasoning service at least once.
    pub fn new(provider: P, tools: Arc<ToolRegistry>, mut config: RouterConfig) -> Self {
        config.max_iterations = config.max_iterations.max(1);
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Static configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The capability registry this operator routes over.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Route one message and reduce the result.
    pub async fn route(&self, input: PassInput) -> Result<PassOutput, PassError> {
        let start = Instant::now();
        let system = input
            .system_instruction
            .unwrap_or_else(|| self.config.system_prompt.clone());
        let mut messages = vec![system_message(system), user_message(input.user_text)];
        let tools = self.tools.schemas();

        let mut events: Vec<Event> = vec![];
        let mut invoked: HashSet<String> = HashSet::new();
        let mut refused: Vec<String> = vec![];
        let mut iterations: u32 = 0;

        let exit_reason = loop {
            iterations += 1;

            let request = ProviderRequest {
                model: self.config.model.clone(),
                messages: messages.clone(),
                tools: tools.clone(),
                max_tokens: Some(self.config.max_tokens),
                temperature: self.config.temperature,
            };

            let response = self.provider.complete(request).await?;
            tracing::debug!(
                iteration = iterations,
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "router.step"
            );

            let (text, invocations) = match decide(&response, iterations)? {
                Decision::Respond { text } => {
                    if !text.is_empty() {
                        events.push(Event::agent(text));
                    }
                    break ExitReason::Complete;
                }
                Decision::Invoke { text, invocations } => (text, invocations),
            };

            if let Some(text) = text {
                events.push(Event::agent(text));
            }
            messages.push(assistant_message(response.content));

            let mut results = Vec::with_capacity(invocations.len());
            for invocation in invocations {
                let (content, is_error) = if invoked.contains(&invocation.capability_name) {
                    tracing::warn!(
                        tool = %invocation.capability_name,
                        "refusing repeat invocation within one message"
                    );
                    refused.push(invocation.capability_name.clone());
                    (
                        format!(
                            "{} was already called for this message; use its earlier result.",
                            invocation.capability_name
                        ),
                        true,
                    )
                } else {
                    let step = execute(&self.tools, &invocation).await?;
                    if let Some(event) = step.event {
                        invoked.insert(invocation.capability_name.clone());
                        events.push(event);
                    }
                    (step.content, step.is_error)
                };
                results.push(ContentPart::ToolResult {
                    tool_use_id: invocation.id,
                    content,
                    is_error,
                });
            }

            messages.push(ProviderMessage {
                role: Role::User,
                content: results,
            });

            if iterations >= self.config.max_iterations {
                tracing::warn!(iterations, "iteration ceiling reached");
                break ExitReason::MaxIterations;
            }
        };

        let outcome = reduce(&events, &self.config.fallback_response);
        tracing::info!(
            tool_called = %outcome.tool_called,
            iterations,
            exit_reason = ?exit_reason,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "router.pass.complete"
        );

        Ok(PassOutput {
            outcome,
            events,
            exit_reason,
            iterations_used: iterations,
            refused,
        })
    }
}
