//! The execution step: run one invocation against the registry.

use crate::decision::Invocation;
use crate::error::PassError;
use crate::events::Event;
use futures_util::FutureExt;
use haven_tool::{ToolError, ToolRegistry};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

/// What one execution step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Event to record; `None` when no capability actually ran.
    pub event: Option<Event>,
    /// Text fed back to the reasoning service.
    pub content: String,
    /// Whether `content` describes a failure.
    pub is_error: bool,
}

/// Run `invocation`, converting contract failures into error text.
///
/// Only a [`ToolError::Defect`] or a panic inside the capability aborts
/// the pass.
pub async fn execute(
    tools: &ToolRegistry,
    invocation: &Invocation,
) -> Result<StepResult, PassError> {
    let name = invocation.capability_name.as_str();
    let Some(tool) = tools.get(name) else {
        tracing::warn!(tool = %name, "reasoning service requested unknown capability");
        return Ok(StepResult {
            event: None,
            content: error_text(&ToolError::NotFound(name.to_string())),
            is_error: true,
        });
    };

    let start = Instant::now();
    let result = AssertUnwindSafe(tool.call(invocation.arguments.clone()))
        .catch_unwind()
        .await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match result {
        Err(panic) => Err(PassError::Execution {
            capability: name.to_string(),
            message: panic_message(panic.as_ref()),
        }),
        Ok(Err(e)) if e.is_fatal() => Err(PassError::Execution {
            capability: name.to_string(),
            message: e.to_string(),
        }),
        Ok(Err(e)) => {
            tracing::warn!(tool = %name, elapsed_ms, error = %e, "capability failed");
            let content = error_text(&e);
            Ok(StepResult {
                event: Some(Event::tool(name, content.clone())),
                content,
                is_error: true,
            })
        }
        Ok(Ok(value)) => {
            tracing::debug!(tool = %name, elapsed_ms, "capability complete");
            let content = render_value(&value);
            Ok(StepResult {
                event: Some(Event::tool(name, content.clone())),
                content,
                is_error: false,
            })
        }
    }
}

/// Short human-readable description of a recoverable failure.
fn error_text(e: &ToolError) -> String {
    format!("Error: {e}")
}

/// Strings pass through verbatim; anything else is compact JSON.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_tool::{ToolDyn, ToolFuture};
    use serde_json::json;
    use std::sync::Arc;

    struct Scripted {
        name: &'static str,
        behaviour: fn() -> Result<serde_json::Value, ToolError>,
    }

    impl ToolDyn for Scripted {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "scripted"
        }
        fn call(&self, _input: serde_json::Value) -> ToolFuture<'_> {
            let behaviour = self.behaviour;
            Box::pin(async move { behaviour() })
        }
    }

    struct Panicking;

    impl ToolDyn for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }
        fn description(&self) -> &str {
            "always panics"
        }
        fn call(&self, _input: serde_json::Value) -> ToolFuture<'_> {
            Box::pin(async { panic!("index out of bounds") })
        }
    }

    fn registry() -> ToolRegistry {
        let mut r = ToolRegistry::new();
        r.register(Arc::new(Scripted {
            name: "text",
            behaviour: || Ok(json!("plain words")),
        }))
        .unwrap();
        r.register(Arc::new(Scripted {
            name: "void",
            behaviour: || Ok(serde_json::Value::Null),
        }))
        .unwrap();
        r.register(Arc::new(Scripted {
            name: "lookup",
            behaviour: || Err(ToolError::Lookup("no match for 'Atlantis'".into())),
        }))
        .unwrap();
        r.register(Arc::new(Scripted {
            name: "defect",
            behaviour: || Err(ToolError::Defect("invariant broken".into())),
        }))
        .unwrap();
        r.register(Arc::new(Panicking)).unwrap();
        r
    }

    fn inv(name: &str) -> Invocation {
        Invocation::resolve("id".into(), name.into(), json!({})).unwrap()
    }

    #[tokio::test]
    async fn string_result_passes_through() {
        let step = execute(&registry(), &inv("text")).await.unwrap();
        assert_eq!(step.content, "plain words");
        assert!(!step.is_error);
        assert_eq!(step.event, Some(Event::tool("text", "plain words")));
    }

    #[tokio::test]
    async fn null_result_renders_as_json() {
        let step = execute(&registry(), &inv("void")).await.unwrap();
        assert_eq!(step.content, "null");
    }

    #[tokio::test]
    async fn recoverable_error_becomes_tool_event() {
        let step = execute(&registry(), &inv("lookup")).await.unwrap();
        assert!(step.is_error);
        assert_eq!(step.content, "Error: lookup failed: no match for 'Atlantis'");
        assert!(matches!(step.event, Some(Event::Tool { .. })));
    }

    #[tokio::test]
    async fn unknown_capability_has_no_event() {
        let step = execute(&registry(), &inv("nonexistent")).await.unwrap();
        assert!(step.is_error);
        assert!(step.event.is_none());
        assert!(step.content.contains("tool not found"));
    }

    #[tokio::test]
    async fn defect_aborts() {
        let err = execute(&registry(), &inv("defect")).await.unwrap_err();
        assert!(matches!(err, PassError::Execution { ref capability, .. } if capability == "defect"));
    }

    #[tokio::test]
    async fn panic_aborts_with_message() {
        let err = execute(&registry(), &inv("panicking")).await.unwrap_err();
        match err {
            PassError::Execution { message, .. } => {
                assert_eq!(message, "index out of bounds")
            }
            other => panic!("expected Execution, got {other:?}"),
        }
    }
}
